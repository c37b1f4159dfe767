//! Quads, quad patterns and changesets

use crate::node::NodeId;

/// A (graph, subject, property, object) statement over node handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quad {
    pub graph: NodeId,
    pub subject: NodeId,
    pub property: NodeId,
    pub object: NodeId,
}

impl Quad {
    pub fn new(graph: NodeId, subject: NodeId, property: NodeId, object: NodeId) -> Self {
        Self {
            graph,
            subject,
            property,
            object,
        }
    }
}

/// A quad with optional positions; `None` matches anything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadPattern {
    pub graph: Option<NodeId>,
    pub subject: Option<NodeId>,
    pub property: Option<NodeId>,
    pub object: Option<NodeId>,
}

impl QuadPattern {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn graph(mut self, graph: NodeId) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn subject(mut self, subject: NodeId) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn property(mut self, property: NodeId) -> Self {
        self.property = Some(property);
        self
    }

    pub fn object(mut self, object: NodeId) -> Self {
        self.object = Some(object);
        self
    }

    pub fn matches(&self, quad: &Quad) -> bool {
        self.graph.map_or(true, |g| g == quad.graph)
            && self.subject.map_or(true, |s| s == quad.subject)
            && self.property.map_or(true, |p| p == quad.property)
            && self.object.map_or(true, |o| o == quad.object)
    }
}

/// Quads to add and quads to remove, applied as one unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changeset {
    pub added: Vec<Quad>,
    pub removed: Vec<Quad>,
}

impl Changeset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adding(quads: Vec<Quad>) -> Self {
        Self {
            added: quads,
            removed: Vec::new(),
        }
    }

    pub fn removing(quads: Vec<Quad>) -> Self {
        Self {
            added: Vec::new(),
            removed: quads,
        }
    }

    pub fn add(&mut self, quad: Quad) {
        self.added.push(quad);
    }

    pub fn remove(&mut self, quad: Quad) {
        self.removed.push(quad);
    }

    pub fn extend(&mut self, other: Changeset) {
        self.added.extend(other.added);
        self.removed.extend(other.removed);
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matching() {
        let quad = Quad::new(NodeId(0), NodeId(1), NodeId(2), NodeId(3));
        assert!(QuadPattern::any().matches(&quad));
        assert!(QuadPattern::any().subject(NodeId(1)).property(NodeId(2)).matches(&quad));
        assert!(!QuadPattern::any().object(NodeId(1)).matches(&quad));
        assert!(!QuadPattern::any().graph(NodeId(9)).matches(&quad));
    }

    #[test]
    fn test_changeset_extend() {
        let quad = Quad::new(NodeId(0), NodeId(1), NodeId(2), NodeId(3));
        let mut changes = Changeset::adding(vec![quad]);
        changes.extend(Changeset::removing(vec![quad]));
        assert_eq!(changes.len(), 2);
        assert!(!changes.is_empty());
        assert!(Changeset::new().is_empty());
    }
}
