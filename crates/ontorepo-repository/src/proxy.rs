//! Proxy entity views
//!
//! A [`ProxyObject`] is the cached identity of one subject node within one
//! ontology. A [`Proxy`] borrows the repository to read and write the
//! statements about that subject.

use crate::error::RepositoryError;
use crate::repository::Repository;
use itertools::Itertools;
use ontorepo_core::datatypes::Value;
use ontorepo_core::model::{Literal, Node, NodeKind};
use ontorepo_core::vocabulary::{OWL_FUNCTIONAL_PROPERTY, RDFS_RANGE, RDF_TYPE, XSD_STRING};
use ontorepo_loader::Ontology;
use ontorepo_store::{Changeset, NodeId, Quad, QuadPattern};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct ProxyState {
    ontology: Ontology,
    node: NodeId,
    alive: AtomicBool,
}

/// Cached handle on a subject node of an ontology
///
/// Clones share their state: deleting the entity through one clone
/// invalidates all of them. Equality and hashing follow the node.
#[derive(Debug, Clone)]
pub struct ProxyObject {
    inner: Arc<ProxyState>,
}

impl ProxyObject {
    pub(crate) fn new(ontology: Ontology, node: NodeId) -> Self {
        Self {
            inner: Arc::new(ProxyState {
                ontology,
                node,
                alive: AtomicBool::new(true),
            }),
        }
    }

    pub fn ontology(&self) -> &Ontology {
        &self.inner.ontology
    }

    pub fn node(&self) -> NodeId {
        self.inner.node
    }

    /// False once the entity has been deleted
    pub fn is_alive(&self) -> bool {
        self.inner.alive.load(Ordering::Acquire)
    }

    /// Whether both handles come from the same cache entry
    pub fn same_instance(&self, other: &ProxyObject) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn invalidate(&self) {
        self.inner.alive.store(false, Ordering::Release);
    }
}

impl PartialEq for ProxyObject {
    fn eq(&self, other: &Self) -> bool {
        self.inner.node == other.inner.node
    }
}

impl Eq for ProxyObject {}

impl Hash for ProxyObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.node.hash(state);
    }
}

impl fmt::Display for ProxyObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.inner.node, self.inner.ontology)
    }
}

/// Value of a property: another entity or a native value
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Object(ProxyObject),
    Data(Value),
}

impl PropertyValue {
    pub fn as_object(&self) -> Option<&ProxyObject> {
        match self {
            PropertyValue::Object(object) => Some(object),
            PropertyValue::Data(_) => None,
        }
    }

    pub fn as_data(&self) -> Option<&Value> {
        match self {
            PropertyValue::Object(_) => None,
            PropertyValue::Data(value) => Some(value),
        }
    }
}

impl From<ProxyObject> for PropertyValue {
    fn from(object: ProxyObject) -> Self {
        PropertyValue::Object(object)
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        PropertyValue::Data(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Data(Value::String(value.to_string()))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Data(Value::Boolean(value))
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Data(Value::Integer(value))
    }
}

/// Nodes that resolve to proxies when found as values
fn is_entity(kind: Option<NodeKind>) -> bool {
    matches!(kind, Some(NodeKind::Iri | NodeKind::Blank | NodeKind::Anonymous))
}

/// Read and write access to the statements about one entity
///
/// Obtained from [`Repository::proxy`]. Properties are named by IRI and
/// values are looked up across every graph of the store.
pub struct Proxy<'a> {
    repository: &'a mut Repository,
    object: ProxyObject,
}

impl fmt::Debug for Proxy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy").field("object", &self.object).finish()
    }
}

impl<'a> Proxy<'a> {
    pub(crate) fn new(repository: &'a mut Repository, object: ProxyObject) -> Self {
        Self { repository, object }
    }

    pub fn object(&self) -> &ProxyObject {
        &self.object
    }

    /// IRI of the entity, if it is named
    pub fn iri(&self) -> Option<&str> {
        self.repository.store().nodes().iri_of(self.object.node())
    }

    fn lookup(&self, iri: &str) -> Option<NodeId> {
        self.repository.store().nodes().lookup_iri(iri)
    }

    fn outgoing(&self, property: Option<NodeId>) -> Vec<Quad> {
        let mut pattern = QuadPattern::any().subject(self.object.node());
        if let Some(property) = property {
            pattern = pattern.property(property);
        }
        self.repository.store().matching(&pattern)
    }

    fn proxies(&mut self, nodes: Vec<NodeId>) -> Vec<ProxyObject> {
        let ontology = self.object.ontology().clone();
        nodes
            .into_iter()
            .map(|node| self.repository.cached_proxy(&ontology, node))
            .collect()
    }

    /// Entities related to this one by `property`
    pub fn get_object_values(&mut self, property: &str) -> Vec<ProxyObject> {
        let Some(property) = self.lookup(property) else {
            return Vec::new();
        };
        let nodes = self.repository.store().nodes();
        let objects = self
            .outgoing(Some(property))
            .into_iter()
            .map(|quad| quad.object)
            .filter(|object| is_entity(nodes.kind(*object)))
            .unique()
            .collect();
        self.proxies(objects)
    }

    pub fn get_object_value(&mut self, property: &str) -> Option<ProxyObject> {
        self.get_object_values(property).into_iter().next()
    }

    /// Entities relating to this one by `property`
    pub fn get_objects_from(&mut self, property: &str) -> Vec<ProxyObject> {
        let Some(property) = self.lookup(property) else {
            return Vec::new();
        };
        let pattern = QuadPattern::any().property(property).object(self.object.node());
        let subjects = self
            .repository
            .store()
            .matching(&pattern)
            .into_iter()
            .map(|quad| quad.subject)
            .unique()
            .collect();
        self.proxies(subjects)
    }

    pub fn get_object_from(&mut self, property: &str) -> Option<ProxyObject> {
        self.get_objects_from(property).into_iter().next()
    }

    fn decode(&self, object: NodeId) -> Option<Value> {
        match self.repository.store().nodes().get(object)? {
            Node::Literal(literal) => Some(self.repository.datatypes().to_native(&literal.lexical, &literal.datatype)),
            Node::Dynamic(expression) => Some(expression.evaluate()),
            _ => None,
        }
    }

    /// Native values of `property`; entity values are skipped
    pub fn get_data_values(&self, property: &str) -> Vec<Value> {
        let Some(property) = self.lookup(property) else {
            return Vec::new();
        };
        self.outgoing(Some(property))
            .into_iter()
            .map(|quad| quad.object)
            .unique()
            .filter_map(|object| self.decode(object))
            .collect()
    }

    pub fn get_data_value(&self, property: &str) -> Option<Value> {
        self.get_data_values(property).into_iter().next()
    }

    /// Every asserted value, grouped by property IRI
    pub fn values(&mut self) -> BTreeMap<String, Vec<PropertyValue>> {
        let ontology = self.object.ontology().clone();
        let mut values: BTreeMap<String, Vec<PropertyValue>> = BTreeMap::new();
        for quad in self.outgoing(None).into_iter().unique_by(|quad| (quad.property, quad.object)) {
            let Some(property) = self.repository.store().nodes().iri_of(quad.property).map(str::to_string) else {
                continue;
            };
            let value = if is_entity(self.repository.store().nodes().kind(quad.object)) {
                PropertyValue::Object(self.repository.cached_proxy(&ontology, quad.object))
            } else {
                match self.decode(quad.object) {
                    Some(value) => PropertyValue::Data(value),
                    None => continue,
                }
            };
            values.entry(property).or_default().push(value);
        }
        values
    }

    pub fn all_object_values(&mut self) -> BTreeMap<String, Vec<ProxyObject>> {
        self.values()
            .into_iter()
            .filter_map(|(property, values)| {
                let objects: Vec<_> = values
                    .into_iter()
                    .filter_map(|value| match value {
                        PropertyValue::Object(object) => Some(object),
                        PropertyValue::Data(_) => None,
                    })
                    .collect();
                (!objects.is_empty()).then_some((property, objects))
            })
            .collect()
    }

    pub fn all_data_values(&mut self) -> BTreeMap<String, Vec<Value>> {
        self.values()
            .into_iter()
            .filter_map(|(property, values)| {
                let data: Vec<_> = values
                    .into_iter()
                    .filter_map(|value| match value {
                        PropertyValue::Object(_) => None,
                        PropertyValue::Data(value) => Some(value),
                    })
                    .collect();
                (!data.is_empty()).then_some((property, data))
            })
            .collect()
    }

    /// Values of `rdf:type`
    pub fn classifiers(&mut self) -> Vec<ProxyObject> {
        self.get_object_values(RDF_TYPE)
    }

    /// Whether the store declares `property` functional often enough
    fn is_functional(&self, property: NodeId) -> bool {
        let (Some(rdf_type), Some(functional)) = (self.lookup(RDF_TYPE), self.lookup(OWL_FUNCTIONAL_PROPERTY)) else {
            return false;
        };
        let pattern = QuadPattern::any().subject(property).property(rdf_type).object(functional);
        let declarations = self.repository.store().count(&pattern);
        self.repository.functional_threshold().is_functional(declarations)
    }

    /// Datatype of the values of `property`, from its first IRI range
    fn range_of(&self, property: NodeId) -> String {
        let Some(range) = self.lookup(RDFS_RANGE) else {
            return XSD_STRING.to_string();
        };
        let nodes = self.repository.store().nodes();
        self.repository
            .store()
            .matching(&QuadPattern::any().subject(property).property(range))
            .iter()
            .find_map(|quad| nodes.iri_of(quad.object))
            .unwrap_or(XSD_STRING)
            .to_string()
    }

    fn value_node(&mut self, property: NodeId, value: PropertyValue) -> NodeId {
        match value {
            PropertyValue::Object(object) => object.node(),
            PropertyValue::Data(Value::Unsupported(unsupported)) => self
                .repository
                .store_mut()
                .nodes_mut()
                .literal(Literal::new(unsupported.lexical, unsupported.datatype)),
            PropertyValue::Data(value) => {
                let datatype = self.range_of(property);
                let lexical = self.repository.datatypes().encode_as(&value, &datatype);
                self.repository
                    .store_mut()
                    .nodes_mut()
                    .literal(Literal::new(lexical, datatype))
            }
        }
    }

    /// Add a value for `property` in this entity's ontology
    ///
    /// Existing values are removed first when the property is functional.
    pub fn set_value(&mut self, property: &str, value: impl Into<PropertyValue>) -> Result<(), RepositoryError> {
        let graph = self.repository.get_graph(self.object.ontology());
        let property = self.repository.store_mut().nodes_mut().iri(property);
        let mut changes = Changeset::new();
        if self.is_functional(property) {
            for quad in self.outgoing(Some(property)) {
                changes.remove(quad);
            }
        }
        let object = self.value_node(property, value.into());
        changes.add(Quad::new(graph, self.object.node(), property, object));
        self.repository.store_mut().apply(changes)?;
        Ok(())
    }

    /// Remove every value of `property`
    pub fn unset(&mut self, property: &str) -> Result<(), RepositoryError> {
        let Some(property) = self.lookup(property) else {
            return Ok(());
        };
        let quads = self.outgoing(Some(property));
        self.repository.store_mut().apply(Changeset::removing(quads))?;
        Ok(())
    }

    /// Remove one value of `property`
    pub fn unset_value(&mut self, property: &str, value: impl Into<PropertyValue>) -> Result<(), RepositoryError> {
        let Some(property) = self.lookup(property) else {
            return Ok(());
        };
        let value = value.into();
        let quads: Vec<Quad> = self
            .outgoing(Some(property))
            .into_iter()
            .filter(|quad| match &value {
                PropertyValue::Object(object) => quad.object == object.node(),
                PropertyValue::Data(data) => self.decode(quad.object).as_ref() == Some(data),
            })
            .collect();
        self.repository.store_mut().apply(Changeset::removing(quads))?;
        Ok(())
    }

    /// Remove every statement mentioning this entity and invalidate its proxies
    pub fn delete(self) -> Result<(), RepositoryError> {
        let node = self.object.node();
        let store = self.repository.store();
        let quads: Vec<Quad> = store
            .matching(&QuadPattern::any().subject(node))
            .into_iter()
            .chain(store.matching(&QuadPattern::any().object(node)))
            .unique()
            .collect();
        tracing::debug!("Deleting {} with {} statements", self.object, quads.len());
        self.repository.store_mut().apply(Changeset::removing(quads))?;
        self.repository.evict(&self.object);
        self.object.invalidate();
        Ok(())
    }
}
