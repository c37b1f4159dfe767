//! Quad store with change notification

use crate::index::QuadIndex;
use crate::node::{NodeId, NodeTable};
use crate::quad::{Changeset, Quad, QuadPattern};
use ontorepo_core::model::{BlankId, Node, NodeKind, Statement};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// Position of a node inside a quad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Graph,
    Subject,
    Property,
    Object,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Position::Graph => "graph",
            Position::Subject => "subject",
            Position::Property => "property",
            Position::Object => "object",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Unsupported node type: a {kind} node cannot be used as {position}")]
    UnsupportedNodeType { position: Position, kind: NodeKind },

    #[error("Unknown node handle {0}")]
    UnknownNode(NodeId),
}

/// Blank node labels of one document, mapped to the store blanks allocated for them
pub type BlankScope = HashMap<BlankId, NodeId>;

/// Subscriber on the store's change channel
///
/// Receives every effective changeset and returns follow-up changes,
/// which the store applies and broadcasts in turn until nothing changes.
pub trait ChangeListener: Send {
    fn on_change(&mut self, changes: &Changeset, nodes: &mut NodeTable, quads: &QuadIndex) -> Changeset;

    /// Explicit additions of quads that were already stored
    fn on_reassert(&mut self, _quads: &[Quad]) {}
}

/// Node table, quad index and listeners
#[derive(Default)]
pub struct Store {
    nodes: NodeTable,
    quads: QuadIndex,
    listeners: Vec<Box<dyn ChangeListener>>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("nodes", &self.nodes.len())
            .field("quads", &self.quads.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut NodeTable {
        &mut self.nodes
    }

    pub fn quads(&self) -> &QuadIndex {
        &self.quads
    }

    pub fn subscribe(&mut self, listener: Box<dyn ChangeListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn check_position(&self, id: NodeId, position: Position) -> Result<(), StoreError> {
        let kind = self.nodes.kind(id).ok_or(StoreError::UnknownNode(id))?;
        let allowed = match position {
            Position::Graph => matches!(kind, NodeKind::Iri | NodeKind::Blank),
            Position::Subject => matches!(kind, NodeKind::Iri | NodeKind::Blank | NodeKind::Anonymous),
            Position::Property => kind == NodeKind::Iri,
            Position::Object => true,
        };
        if allowed {
            Ok(())
        } else {
            Err(StoreError::UnsupportedNodeType { position, kind })
        }
    }

    /// Verify every node of `quad` is allowed in its position
    pub fn check(&self, quad: &Quad) -> Result<(), StoreError> {
        self.check_position(quad.graph, Position::Graph)?;
        self.check_position(quad.subject, Position::Subject)?;
        self.check_position(quad.property, Position::Property)?;
        self.check_position(quad.object, Position::Object)
    }

    /// Apply a changeset and notify listeners
    ///
    /// Nothing is applied when an added quad is ill-formed. Returns the
    /// changes that actually took effect, without listener follow-ups.
    pub fn apply(&mut self, changes: Changeset) -> Result<Changeset, StoreError> {
        for quad in &changes.added {
            self.check(quad)?;
        }
        let requested = changes.added.clone();
        let effective = self.quads.apply(changes);
        tracing::debug!(
            "Applied changeset: +{} -{}",
            effective.added.len(),
            effective.removed.len()
        );
        if requested.len() > effective.added.len() && !self.listeners.is_empty() {
            let fresh: HashSet<&Quad> = effective.added.iter().collect();
            let reasserted: Vec<Quad> = requested.into_iter().filter(|quad| !fresh.contains(quad)).collect();
            for listener in self.listeners.iter_mut() {
                listener.on_reassert(&reasserted);
            }
        }
        self.notify(effective.clone())?;
        Ok(effective)
    }

    fn notify(&mut self, changes: Changeset) -> Result<(), StoreError> {
        if self.listeners.is_empty() {
            return Ok(());
        }
        let mut listeners = std::mem::take(&mut self.listeners);
        let mut pending = changes;
        let mut outcome = Ok(());
        while !pending.is_empty() {
            let mut follow_up = Changeset::new();
            for listener in listeners.iter_mut() {
                follow_up.extend(listener.on_change(&pending, &mut self.nodes, &self.quads));
            }
            if let Err(error) = follow_up.added.iter().try_for_each(|quad| self.check(quad)) {
                outcome = Err(error);
                break;
            }
            pending = self.quads.apply(follow_up);
            if !pending.is_empty() {
                tracing::trace!("Listener follow-up: +{} -{}", pending.added.len(), pending.removed.len());
            }
        }
        self.listeners = listeners;
        outcome
    }

    /// Insert a single quad; false when it was already present
    pub fn add(&mut self, quad: Quad) -> Result<bool, StoreError> {
        Ok(!self.apply(Changeset::adding(vec![quad]))?.added.is_empty())
    }

    /// Remove a single quad; false when it was absent
    pub fn remove(&mut self, quad: Quad) -> Result<bool, StoreError> {
        Ok(!self.apply(Changeset::removing(vec![quad]))?.removed.is_empty())
    }

    /// Intern the nodes of `statement` and build the quad in `graph`
    ///
    /// A statement carrying its own graph keeps it.
    pub fn quad_of(&mut self, graph: NodeId, statement: &Statement) -> Quad {
        let graph = match &statement.graph {
            Some(node) => self.nodes.intern(node.clone()),
            None => graph,
        };
        Quad::new(
            graph,
            self.nodes.intern(statement.subject.clone()),
            self.nodes.intern(statement.property.clone()),
            self.nodes.intern(statement.object.clone()),
        )
    }

    /// Like [`Store::quad_of`], but every blank node label gets a fresh
    /// store blank, shared only by quads built with the same `scope`
    pub fn import_quad(&mut self, graph: NodeId, statement: &Statement, scope: &mut BlankScope) -> Quad {
        let graph = match &statement.graph {
            Some(node) => self.import_node(node, scope),
            None => graph,
        };
        Quad::new(
            graph,
            self.import_node(&statement.subject, scope),
            self.import_node(&statement.property, scope),
            self.import_node(&statement.object, scope),
        )
    }

    fn import_node(&mut self, node: &Node, scope: &mut BlankScope) -> NodeId {
        match node {
            Node::Blank(label) => *scope.entry(*label).or_insert_with(|| self.nodes.new_blank()),
            _ => self.nodes.intern(node.clone()),
        }
    }

    /// Value-level view of a stored quad
    pub fn statement_of(&self, quad: &Quad) -> Result<Statement, StoreError> {
        let node = |id: NodeId| -> Result<Node, StoreError> {
            self.nodes.get(id).cloned().ok_or(StoreError::UnknownNode(id))
        };
        Ok(Statement {
            graph: Some(node(quad.graph)?),
            subject: node(quad.subject)?,
            property: node(quad.property)?,
            object: node(quad.object)?,
        })
    }

    pub fn matching(&self, pattern: &QuadPattern) -> Vec<Quad> {
        self.quads.matching(pattern)
    }

    pub fn count(&self, pattern: &QuadPattern) -> usize {
        self.quads.count(pattern)
    }

    pub fn contains(&self, quad: &Quad) -> bool {
        self.quads.contains(quad)
    }

    /// Remove every quad of `graph`
    pub fn clear_graph(&mut self, graph: NodeId) -> Result<Changeset, StoreError> {
        let removed = self.matching(&QuadPattern::any().graph(graph));
        self.apply(Changeset::removing(removed))
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }
}
