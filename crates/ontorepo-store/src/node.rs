//! Interning table mapping nodes to stable handles

use ontorepo_core::model::{BlankId, Literal, Node, NodeKind};
use std::collections::HashMap;
use std::fmt;

/// Stable handle on an interned node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arena of nodes with value-based interning
///
/// Interning the same IRI, literal, blank identity, anonymous ID or
/// expression twice returns the same [`NodeId`]. Handles are never
/// reused.
#[derive(Debug, Default)]
pub struct NodeTable {
    nodes: Vec<Node>,
    index: HashMap<Node, NodeId>,
    next_blank: u64,
}

impl NodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the handle of `node`
    pub fn intern(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.index.get(&node) {
            return *id;
        }
        if let Node::Blank(BlankId(value)) = node {
            self.next_blank = self.next_blank.max(value + 1);
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node.clone());
        self.index.insert(node, id);
        id
    }

    pub fn iri(&mut self, iri: &str) -> NodeId {
        self.intern(Node::Iri(iri.to_string()))
    }

    pub fn literal(&mut self, literal: Literal) -> NodeId {
        self.intern(Node::Literal(literal))
    }

    /// Allocate a blank node with a fresh identity
    pub fn new_blank(&mut self) -> NodeId {
        let blank = BlankId(self.next_blank);
        self.intern(Node::Blank(blank))
    }

    /// Handle of an already interned node
    pub fn lookup(&self, node: &Node) -> Option<NodeId> {
        self.index.get(node).copied()
    }

    pub fn lookup_iri(&self, iri: &str) -> Option<NodeId> {
        self.lookup(&Node::Iri(iri.to_string()))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(Node::kind)
    }

    pub fn iri_of(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Node::as_iri)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontorepo_core::vocabulary::XSD_STRING;

    #[test]
    fn test_interning_returns_same_handle() {
        let mut table = NodeTable::new();
        let a = table.iri("http://example.org/a");
        let b = table.iri("http://example.org/a");
        assert_eq!(a, b);
        assert_eq!(table.len(), 1);

        let l1 = table.literal(Literal::new("x", XSD_STRING));
        let l2 = table.literal(Literal::new("x", XSD_STRING));
        assert_eq!(l1, l2);
        assert_ne!(a, l1);
    }

    #[test]
    fn test_new_blank_is_fresh() {
        let mut table = NodeTable::new();
        let explicit = table.intern(Node::Blank(BlankId(4)));
        let first = table.new_blank();
        let second = table.new_blank();
        assert_ne!(first, second);
        assert_ne!(first, explicit);
        assert_eq!(table.intern(Node::Blank(BlankId(4))), explicit);
        assert_eq!(table.kind(first), Some(NodeKind::Blank));
    }

    #[test]
    fn test_lookup_does_not_create() {
        let mut table = NodeTable::new();
        assert_eq!(table.lookup_iri("http://example.org/a"), None);
        let a = table.iri("http://example.org/a");
        assert_eq!(table.lookup_iri("http://example.org/a"), Some(a));
        assert_eq!(table.iri_of(a), Some("http://example.org/a"));
        assert_eq!(table.len(), 1);
    }
}
