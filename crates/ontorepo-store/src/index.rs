//! Quad set with per-position indices

use crate::node::NodeId;
use crate::quad::{Changeset, Quad, QuadPattern};
use smallvec::SmallVec;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::ops::Bound;

/// Buckets larger than this are hashed
const INLINE_BUCKET: usize = 16;

/// Quads sharing one key
///
/// Small buckets stay inline and are scanned; keys shared by many quads
/// (a graph, `rdf:type`) switch to a hash set so removal stays constant.
#[derive(Debug)]
enum Bucket {
    Inline(SmallVec<[Quad; 4]>),
    Hashed(HashSet<Quad>),
}

impl Default for Bucket {
    fn default() -> Self {
        Bucket::Inline(SmallVec::new())
    }
}

impl Bucket {
    fn insert(&mut self, quad: Quad) {
        match self {
            Bucket::Inline(quads) if quads.len() >= INLINE_BUCKET => {
                let mut hashed: HashSet<Quad> = quads.drain(..).collect();
                hashed.insert(quad);
                *self = Bucket::Hashed(hashed);
            }
            Bucket::Inline(quads) => quads.push(quad),
            Bucket::Hashed(quads) => {
                quads.insert(quad);
            }
        }
    }

    fn remove(&mut self, quad: &Quad) {
        match self {
            Bucket::Inline(quads) => {
                if let Some(position) = quads.iter().position(|q| q == quad) {
                    quads.swap_remove(position);
                }
            }
            Bucket::Hashed(quads) => {
                quads.remove(quad);
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            Bucket::Inline(quads) => quads.len(),
            Bucket::Hashed(quads) => quads.len(),
        }
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn matching(&self, pattern: &QuadPattern) -> Vec<Quad> {
        match self {
            Bucket::Inline(quads) => quads.iter().filter(|q| pattern.matches(q)).copied().collect(),
            Bucket::Hashed(quads) => quads.iter().filter(|q| pattern.matches(q)).copied().collect(),
        }
    }
}

/// All quads of a store, indexed by graph, subject, property and object
#[derive(Debug, Default)]
pub struct QuadIndex {
    quads: BTreeSet<Quad>,
    by_graph: HashMap<NodeId, Bucket>,
    by_subject: HashMap<NodeId, Bucket>,
    by_property: HashMap<NodeId, Bucket>,
    by_object: HashMap<NodeId, Bucket>,
}

fn bucket_insert(index: &mut HashMap<NodeId, Bucket>, key: NodeId, quad: Quad) {
    index.entry(key).or_default().insert(quad);
}

fn bucket_remove(index: &mut HashMap<NodeId, Bucket>, key: NodeId, quad: &Quad) {
    if let Some(bucket) = index.get_mut(&key) {
        bucket.remove(quad);
        if bucket.is_empty() {
            index.remove(&key);
        }
    }
}

impl QuadIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a quad; false when it was already present
    pub fn insert(&mut self, quad: Quad) -> bool {
        if !self.quads.insert(quad) {
            return false;
        }
        bucket_insert(&mut self.by_graph, quad.graph, quad);
        bucket_insert(&mut self.by_subject, quad.subject, quad);
        bucket_insert(&mut self.by_property, quad.property, quad);
        bucket_insert(&mut self.by_object, quad.object, quad);
        true
    }

    /// Remove a quad; false when it was absent
    pub fn remove(&mut self, quad: &Quad) -> bool {
        if !self.quads.remove(quad) {
            return false;
        }
        bucket_remove(&mut self.by_graph, quad.graph, quad);
        bucket_remove(&mut self.by_subject, quad.subject, quad);
        bucket_remove(&mut self.by_property, quad.property, quad);
        bucket_remove(&mut self.by_object, quad.object, quad);
        true
    }

    /// Apply removals then additions, returning what actually changed
    pub fn apply(&mut self, changes: Changeset) -> Changeset {
        let mut effective = Changeset::new();
        for quad in changes.removed {
            if self.remove(&quad) {
                effective.removed.push(quad);
            }
        }
        for quad in changes.added {
            if self.insert(quad) {
                effective.added.push(quad);
            }
        }
        effective
    }

    pub fn contains(&self, quad: &Quad) -> bool {
        self.quads.contains(quad)
    }

    /// Quads matching `pattern`, in handle order
    pub fn matching(&self, pattern: &QuadPattern) -> Vec<Quad> {
        // Use the most selective index
        let candidates = [
            pattern.subject.map(|s| self.by_subject.get(&s)),
            pattern.object.map(|o| self.by_object.get(&o)),
            pattern.property.map(|p| self.by_property.get(&p)),
            pattern.graph.map(|g| self.by_graph.get(&g)),
        ]
        .into_iter()
        .flatten()
        .min_by_key(|bucket| bucket.map_or(0, |b| b.len()));

        let mut result: Vec<Quad> = match candidates {
            Some(None) => return Vec::new(),
            Some(Some(bucket)) => bucket.matching(pattern),
            None => return self.quads.iter().copied().collect(),
        };
        result.sort_unstable();
        result
    }

    pub fn count(&self, pattern: &QuadPattern) -> usize {
        if *pattern == QuadPattern::any() {
            return self.quads.len();
        }
        self.matching(pattern).len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.quads.iter()
    }

    /// Smallest subject of `graph` ordered after `after`
    ///
    /// Walking from `None` visits every subject of the graph once, in
    /// handle order.
    pub fn next_subject(&self, graph: NodeId, after: Option<NodeId>) -> Option<NodeId> {
        let start = match after {
            Some(subject) => Bound::Excluded(Quad::new(graph, subject, NodeId(u32::MAX), NodeId(u32::MAX))),
            None => Bound::Included(Quad::new(graph, NodeId(0), NodeId(0), NodeId(0))),
        };
        self.quads
            .range((start, Bound::Unbounded))
            .next()
            .filter(|quad| quad.graph == graph)
            .map(|quad| quad.subject)
    }

    /// Graphs holding at least one quad
    pub fn graphs(&self) -> Vec<NodeId> {
        let mut graphs: Vec<NodeId> = self.by_graph.keys().copied().collect();
        graphs.sort_unstable();
        graphs
    }

    /// Whether `node` appears in any position
    pub fn mentions(&self, node: NodeId) -> bool {
        self.by_subject.contains_key(&node)
            || self.by_object.contains_key(&node)
            || self.by_property.contains_key(&node)
            || self.by_graph.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }
}
