//! # ontorepo-entail
//!
//! Incremental maintenance of two cheap RDF entailments, driven by the
//! store's change channel instead of a full recomputation:
//!
//! - every property used in a graph is typed `rdf:Property` in that graph
//! - every literal used as an object is represented by a surrogate blank
//!   node typed with the literal's datatype
//!
//! Derived statements are reference counted: a derived statement is
//! retracted only when the last statement justifying it is removed, and
//! only if this component introduced it. A derived statement that is later
//! asserted explicitly becomes an ordinary statement and is never
//! retracted.

use ontorepo_core::model::Node;
use ontorepo_core::vocabulary::{RDF_PROPERTY, RDF_TYPE};
use ontorepo_store::{ChangeListener, Changeset, NodeId, NodeTable, Quad, QuadIndex};
use std::collections::{HashMap, HashSet};

/// Change listener maintaining `rdf:Property` and literal typing
#[derive(Debug, Default)]
pub struct IncrementalEntailment {
    /// (graph, property) -> number of quads using the property
    property_usage: HashMap<(NodeId, NodeId), usize>,
    /// (graph, literal) -> number of quads having the literal as object
    literal_usage: HashMap<(NodeId, NodeId), usize>,
    /// literal -> blank node standing for its value
    surrogates: HashMap<NodeId, NodeId>,
    /// derived quads added by this listener and still justified
    introduced: HashSet<Quad>,
}

/// Entailment statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntailmentStats {
    pub tracked_properties: usize,
    pub tracked_literals: usize,
    pub derived: usize,
}

impl IncrementalEntailment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of quads currently using `property` in `graph`
    pub fn usage(&self, graph: NodeId, property: NodeId) -> usize {
        self.property_usage.get(&(graph, property)).copied().unwrap_or(0)
    }

    /// Blank node standing for `literal`, if one was allocated
    pub fn surrogate(&self, literal: NodeId) -> Option<NodeId> {
        self.surrogates.get(&literal).copied()
    }

    pub fn stats(&self) -> EntailmentStats {
        EntailmentStats {
            tracked_properties: self.property_usage.len(),
            tracked_literals: self.literal_usage.len(),
            derived: self.introduced.len(),
        }
    }

    fn on_added(&mut self, quad: &Quad, nodes: &mut NodeTable, quads: &QuadIndex, out: &mut Changeset) {
        let count = self.property_usage.entry((quad.graph, quad.property)).or_insert(0);
        *count += 1;
        if *count == 1 {
            let rdf_type = nodes.iri(RDF_TYPE);
            let rdf_property = nodes.iri(RDF_PROPERTY);
            self.derive(Quad::new(quad.graph, quad.property, rdf_type, rdf_property), quads, out);
        }

        let datatype = match nodes.get(quad.object) {
            Some(Node::Literal(literal)) => literal.datatype.clone(),
            _ => return,
        };
        let count = self.literal_usage.entry((quad.graph, quad.object)).or_insert(0);
        *count += 1;
        if *count == 1 {
            let surrogate = *self
                .surrogates
                .entry(quad.object)
                .or_insert_with(|| nodes.new_blank());
            let rdf_type = nodes.iri(RDF_TYPE);
            let datatype = nodes.iri(&datatype);
            self.derive(Quad::new(quad.graph, surrogate, rdf_type, datatype), quads, out);
        }
    }

    fn on_removed(&mut self, quad: &Quad, nodes: &mut NodeTable, out: &mut Changeset) {
        self.introduced.remove(quad);

        if release(&mut self.property_usage, (quad.graph, quad.property)) {
            let rdf_type = nodes.iri(RDF_TYPE);
            let rdf_property = nodes.iri(RDF_PROPERTY);
            self.retract(Quad::new(quad.graph, quad.property, rdf_type, rdf_property), out);
        }

        let datatype = match nodes.get(quad.object) {
            Some(Node::Literal(literal)) => literal.datatype.clone(),
            _ => return,
        };
        if release(&mut self.literal_usage, (quad.graph, quad.object)) {
            if let Some(surrogate) = self.surrogates.get(&quad.object).copied() {
                let rdf_type = nodes.iri(RDF_TYPE);
                let datatype = nodes.iri(&datatype);
                self.retract(Quad::new(quad.graph, surrogate, rdf_type, datatype), out);
            }
        }
    }

    fn derive(&mut self, derived: Quad, quads: &QuadIndex, out: &mut Changeset) {
        if quads.contains(&derived) || self.introduced.contains(&derived) {
            return;
        }
        tracing::trace!("Derived {:?}", derived);
        self.introduced.insert(derived);
        out.add(derived);
    }

    fn retract(&mut self, derived: Quad, out: &mut Changeset) {
        if self.introduced.remove(&derived) {
            tracing::trace!("Retracted {:?}", derived);
            out.remove(derived);
        }
    }
}

/// Decrement a usage counter; true when it reached zero
fn release(usage: &mut HashMap<(NodeId, NodeId), usize>, key: (NodeId, NodeId)) -> bool {
    match usage.get_mut(&key) {
        Some(count) if *count > 1 => {
            *count -= 1;
            false
        }
        Some(_) => {
            usage.remove(&key);
            true
        }
        None => false,
    }
}

impl ChangeListener for IncrementalEntailment {
    fn on_change(&mut self, changes: &Changeset, nodes: &mut NodeTable, quads: &QuadIndex) -> Changeset {
        let mut out = Changeset::new();
        for quad in &changes.added {
            self.on_added(quad, nodes, quads, &mut out);
        }
        for quad in &changes.removed {
            self.on_removed(quad, nodes, &mut out);
        }
        if !out.is_empty() {
            tracing::debug!("Entailment: +{} -{}", out.added.len(), out.removed.len());
        }
        out
    }

    fn on_reassert(&mut self, quads: &[Quad]) {
        for quad in quads {
            if self.introduced.remove(quad) {
                tracing::trace!("Asserted derived {:?}", quad);
            }
        }
    }
}
