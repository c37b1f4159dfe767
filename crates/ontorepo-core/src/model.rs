//! Value-level node and statement model

use crate::datatypes::Value;
use crate::vocabulary::{RDF_LANG_STRING, XSD_STRING};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of a blank node, local to the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlankId(pub u64);

impl fmt::Display for BlankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:n{}", self.0)
    }
}

/// Literal value: lexical text, datatype IRI and optional language tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    pub datatype: String,
    pub lang: Option<String>,
}

impl Literal {
    pub fn new(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: datatype.into(),
            lang: None,
        }
    }

    pub fn string(lexical: impl Into<String>) -> Self {
        Self::new(lexical, XSD_STRING)
    }

    pub fn lang_string(lexical: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: RDF_LANG_STRING.to_string(),
            lang: Some(lang.into()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.lexical)?;
        match &self.lang {
            Some(lang) => write!(f, "@{}", lang),
            None => write!(f, "^^<{}>", self.datatype),
        }
    }
}

/// An opaque computation whose result is a native value
pub trait Evaluate: fmt::Debug + Send + Sync {
    fn evaluate(&self) -> Value;
}

/// Shared handle on an [`Evaluate`] implementation
///
/// Two expressions are equal when they share the same allocation.
#[derive(Debug, Clone)]
pub struct Expression(Arc<dyn Evaluate>);

impl Expression {
    pub fn new(evaluator: impl Evaluate + 'static) -> Self {
        Self(Arc::new(evaluator))
    }

    pub fn evaluate(&self) -> Value {
        self.0.evaluate()
    }

    fn address(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for Expression {}

impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

/// Kind tag of a [`Node`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Iri,
    Blank,
    Literal,
    Anonymous,
    Dynamic,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Iri => "IRI",
            NodeKind::Blank => "blank",
            NodeKind::Literal => "literal",
            NodeKind::Anonymous => "anonymous individual",
            NodeKind::Dynamic => "dynamic expression",
        };
        f.write_str(name)
    }
}

/// RDF node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Iri(String),
    Blank(BlankId),
    Literal(Literal),
    /// OWL anonymous individual, by its node ID
    Anonymous(String),
    Dynamic(Expression),
}

impl Node {
    pub fn iri(iri: impl Into<String>) -> Self {
        Node::Iri(iri.into())
    }

    pub fn literal(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Node::Literal(Literal::new(lexical, datatype))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Iri(_) => NodeKind::Iri,
            Node::Blank(_) => NodeKind::Blank,
            Node::Literal(_) => NodeKind::Literal,
            Node::Anonymous(_) => NodeKind::Anonymous,
            Node::Dynamic(_) => NodeKind::Dynamic,
        }
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Node::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Node::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Node::Iri(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Literal(_))
    }

    /// Whether the node may appear as the subject of a statement
    pub fn is_subject(&self) -> bool {
        matches!(self, Node::Iri(_) | Node::Blank(_) | Node::Anonymous(_))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(iri) => write!(f, "<{}>", iri),
            Node::Blank(id) => write!(f, "{}", id),
            Node::Literal(literal) => write!(f, "{}", literal),
            Node::Anonymous(id) => write!(f, "_:{}", id),
            Node::Dynamic(expression) => write!(f, "?{:p}", expression.address()),
        }
    }
}

impl From<Literal> for Node {
    fn from(literal: Literal) -> Self {
        Node::Literal(literal)
    }
}

/// A statement as produced by loaders
///
/// `graph` is `None` for statements that belong to the ontology being
/// loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    pub graph: Option<Node>,
    pub subject: Node,
    pub property: Node,
    pub object: Node,
}

impl Statement {
    pub fn new(subject: Node, property: Node, object: Node) -> Self {
        Self {
            graph: None,
            subject,
            property,
            object,
        }
    }

    pub fn in_graph(mut self, graph: Node) -> Self {
        self.graph = Some(graph);
        self
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.property, self.object)?;
        if let Some(graph) = &self.graph {
            write!(f, " {}", graph)?;
        }
        f.write_str(" .")
    }
}
