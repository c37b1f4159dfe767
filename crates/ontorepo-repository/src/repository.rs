//! The repository: ontologies, graphs and proxies over one quad store

use crate::backend::Backend;
use crate::config::{EntailmentRegime, FunctionalThreshold, RepositoryConfig};
use crate::engines::{QueryEngine, QueryResult, RuleEngine, RuleRegistry};
use crate::error::{ConfigError, RepositoryError};
use crate::proxy::{Proxy, ProxyObject};
use ontorepo_core::datatypes::DatatypeRegistry;
use ontorepo_core::logging::Logger;
use ontorepo_core::model::NodeKind;
use ontorepo_entail::IncrementalEntailment;
use ontorepo_loader::{Capabilities, Ontology, ResourceAccess, ResourceLoader, ResourceMapper, Syntax};
use ontorepo_store::{NodeId, Position, Store, StoreError};
use std::collections::HashMap;
use std::fmt;
use std::io::Read;

/// Ontology repository
///
/// Owns the quad store, the ontology to graph memo and the proxy cache.
/// At most one [`ProxyObject`] is cached per ontology and subject node.
pub struct Repository {
    loader: ResourceLoader,
    backend: Backend,
    proxies: HashMap<Ontology, HashMap<NodeId, ProxyObject>>,
    threshold: FunctionalThreshold,
    datatypes: DatatypeRegistry,
    query_engine: Option<Box<dyn QueryEngine>>,
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("loader", &self.loader)
            .field("backend", &self.backend)
            .field("proxies", &self.proxies.values().map(HashMap::len).sum::<usize>())
            .field("threshold", &self.threshold)
            .field("query_engine", &self.query_engine.is_some())
            .finish()
    }
}

impl Repository {
    /// Repository with the default mapper and no entailment
    pub fn new(capabilities: Capabilities) -> Self {
        Self::with_mapper(ResourceMapper::with_defaults(), capabilities)
    }

    pub fn with_mapper(mapper: ResourceMapper, capabilities: Capabilities) -> Self {
        Self {
            loader: ResourceLoader::new(mapper, capabilities),
            backend: Backend::new(Store::new(), Box::new(RuleRegistry::new())),
            proxies: HashMap::new(),
            threshold: FunctionalThreshold::default(),
            datatypes: DatatypeRegistry::standard(),
            query_engine: None,
        }
    }

    pub fn from_config(config: &RepositoryConfig, capabilities: Capabilities) -> Result<Self, ConfigError> {
        let mut repository = Self::with_mapper(config.mapper()?, capabilities);
        repository.threshold = config.functional_threshold;
        if config.entailment == EntailmentRegime::Rdf {
            repository.backend.store.subscribe(Box::new(IncrementalEntailment::new()));
        }
        tracing::info!(
            "Repository configured with {} mapping rules, entailment {:?}",
            repository.loader.mapper().len(),
            config.entailment
        );
        Ok(repository)
    }

    pub fn with_datatypes(mut self, datatypes: DatatypeRegistry) -> Self {
        self.datatypes = datatypes;
        self
    }

    pub fn with_access(mut self, access: ResourceAccess) -> Self {
        self.loader = self.loader.with_access(access);
        self
    }

    pub fn set_rule_engine(&mut self, rules: Box<dyn RuleEngine>) {
        self.backend.rules = rules;
    }

    pub fn set_query_engine(&mut self, engine: Box<dyn QueryEngine>) {
        self.query_engine = Some(engine);
    }

    pub fn store(&self) -> &Store {
        &self.backend.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.backend.store
    }

    pub fn loader(&self) -> &ResourceLoader {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut ResourceLoader {
        &mut self.loader
    }

    pub fn datatypes(&self) -> &DatatypeRegistry {
        &self.datatypes
    }

    pub fn functional_threshold(&self) -> FunctionalThreshold {
        self.threshold
    }

    pub fn rule_engine(&self) -> &dyn RuleEngine {
        self.backend.rules.as_ref()
    }

    pub fn resolve_ontology(&mut self, iri: &str) -> Ontology {
        self.loader.resolve_ontology(iri)
    }

    pub fn get_ontology(&self, iri: &str) -> Option<Ontology> {
        self.loader.get_ontology(iri)
    }

    pub fn ontologies(&self) -> impl Iterator<Item = &Ontology> {
        self.loader.ontologies()
    }

    /// Graph node bound to `ontology`, created on first use
    pub fn get_graph(&mut self, ontology: &Ontology) -> NodeId {
        self.backend.graph(ontology)
    }

    pub(crate) fn cached_proxy(&mut self, ontology: &Ontology, node: NodeId) -> ProxyObject {
        self.proxies
            .entry(ontology.clone())
            .or_default()
            .entry(node)
            .or_insert_with(|| ProxyObject::new(ontology.clone(), node))
            .clone()
    }

    pub(crate) fn evict(&mut self, object: &ProxyObject) {
        if let Some(cache) = self.proxies.get_mut(object.ontology()) {
            cache.remove(&object.node());
        }
    }

    /// Proxy for `node` within `ontology`
    ///
    /// Fails when `node` is unknown to the store or cannot be a subject.
    pub fn resolve_proxy(&mut self, ontology: &Ontology, node: NodeId) -> Result<ProxyObject, RepositoryError> {
        let kind = self.store().nodes().kind(node).ok_or(StoreError::UnknownNode(node))?;
        if !matches!(kind, NodeKind::Iri | NodeKind::Blank | NodeKind::Anonymous) {
            return Err(StoreError::UnsupportedNodeType {
                position: Position::Subject,
                kind,
            }
            .into());
        }
        self.get_graph(ontology);
        Ok(self.cached_proxy(ontology, node))
    }

    /// Proxy for the entity named `iri`, in the ontology named by the part before `#`
    pub fn resolve_proxy_iri(&mut self, iri: &str) -> ProxyObject {
        let ontology = self.resolve_ontology(ontology_part(iri));
        self.get_graph(&ontology);
        let node = self.store_mut().nodes_mut().iri(iri);
        self.cached_proxy(&ontology, node)
    }

    /// Proxy for `iri` when the store already knows the node
    pub fn get_proxy(&mut self, iri: &str) -> Option<ProxyObject> {
        let node = self.store().nodes().lookup_iri(iri)?;
        let ontology = self.resolve_ontology(ontology_part(iri));
        Some(self.cached_proxy(&ontology, node))
    }

    /// Proxy for a fresh entity of `ontology`
    pub fn new_object(&mut self, ontology: &Ontology) -> ProxyObject {
        let iri = format!("{}#{}", ontology.iri(), uuid::Uuid::new_v4());
        self.get_graph(ontology);
        let node = self.store_mut().nodes_mut().iri(&iri);
        tracing::debug!("New object {}", iri);
        self.cached_proxy(ontology, node)
    }

    /// Proxies of the named subjects of `ontology`'s graph
    ///
    /// The graph is walked lazily, one subject at a time; each subject is
    /// yielded once. The sequence is forward-only and cannot be restarted.
    pub fn proxies_in(&mut self, ontology: &Ontology) -> ProxiesIn<'_> {
        let graph = self.get_graph(ontology);
        ProxiesIn {
            repository: self,
            ontology: ontology.clone(),
            graph,
            cursor: None,
        }
    }

    /// Read and write access to the entity behind `object`
    pub fn proxy(&mut self, object: &ProxyObject) -> Result<Proxy<'_>, RepositoryError> {
        if !object.is_alive() {
            let name = match self.store().nodes().get(object.node()) {
                Some(node) => node.to_string(),
                None => object.node().to_string(),
            };
            return Err(RepositoryError::Deleted(name));
        }
        Ok(Proxy::new(self, object.clone()))
    }

    /// Load `iri` and its imports
    pub fn load(&mut self, logger: &dyn Logger, iri: &str) -> Option<Ontology> {
        self.loader.load(&mut self.backend, logger, iri)
    }

    pub fn load_with(
        &mut self,
        logger: &dyn Logger,
        resource_iri: &str,
        ontology_iri: &str,
        force_reload: bool,
    ) -> Option<Ontology> {
        self.loader
            .load_with(&mut self.backend, logger, resource_iri, ontology_iri, force_reload)
    }

    pub fn load_from_reader(
        &mut self,
        logger: &dyn Logger,
        reader: &mut dyn Read,
        resource_iri: &str,
        ontology_iri: &str,
        syntax: Syntax,
    ) -> Option<Ontology> {
        self.loader
            .load_from_reader(&mut self.backend, logger, reader, resource_iri, ontology_iri, syntax)
    }

    /// Write `ontology` to the location of `iri`
    pub fn export(&self, logger: &dyn Logger, ontology: &Ontology, iri: &str) -> bool {
        self.loader.export(&self.backend, logger, ontology, iri)
    }

    pub fn export_all(&self, logger: &dyn Logger, iri: &str) -> bool {
        self.loader.export_all(&self.backend, logger, iri)
    }

    pub fn execute(&self, query: &str) -> Result<QueryResult, RepositoryError> {
        let engine = self.query_engine.as_ref().ok_or(RepositoryError::NoQueryEngine)?;
        engine.execute(&self.backend.store, query)
    }

    /// Activate the rules registered by loads so far
    pub fn flush_rules(&mut self) {
        self.backend.rules.flush();
    }
}

fn ontology_part(iri: &str) -> &str {
    iri.split_once('#').map_or(iri, |(base, _)| base)
}

/// Single-use iterator over the proxies of an ontology's named subjects
pub struct ProxiesIn<'a> {
    repository: &'a mut Repository,
    ontology: Ontology,
    graph: NodeId,
    /// last subject visited
    cursor: Option<NodeId>,
}

impl Iterator for ProxiesIn<'_> {
    type Item = ProxyObject;

    fn next(&mut self) -> Option<ProxyObject> {
        loop {
            let subject = self.repository.store().quads().next_subject(self.graph, self.cursor)?;
            self.cursor = Some(subject);
            if self.repository.store().nodes().kind(subject) == Some(NodeKind::Iri) {
                return Some(self.repository.cached_proxy(&self.ontology, subject));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ontology_part() {
        assert_eq!(ontology_part("http://ex.org/o#a"), "http://ex.org/o");
        assert_eq!(ontology_part("http://ex.org/o"), "http://ex.org/o");
        assert_eq!(ontology_part("http://ex.org/o#a#b"), "http://ex.org/o");
    }

    #[test]
    fn test_graph_is_memoized() {
        let mut repository = Repository::new(Capabilities::new());
        let ontology = repository.resolve_ontology("http://ex.org/o");
        let graph = repository.get_graph(&ontology);
        assert_eq!(repository.get_graph(&ontology), graph);
        assert_eq!(repository.store().nodes().iri_of(graph), Some("http://ex.org/o"));
    }

    #[test]
    fn test_proxies_are_resolved_on_demand() {
        let mut repository = Repository::new(Capabilities::new());
        let ontology = repository.resolve_ontology("http://ex.org/o");
        let graph = repository.get_graph(&ontology);
        let store = repository.store_mut();
        let p = store.nodes_mut().iri("http://ex.org/o#p");
        for name in ["a", "b", "c"] {
            let subject = store.nodes_mut().iri(&format!("http://ex.org/o#{}", name));
            store.add(ontorepo_store::Quad::new(graph, subject, p, subject)).unwrap();
            store.add(ontorepo_store::Quad::new(graph, subject, p, p)).unwrap();
        }

        let first = repository.proxies_in(&ontology).next().unwrap();
        assert_eq!(repository.proxies[&ontology].len(), 1);
        assert_eq!(repository.store().nodes().iri_of(first.node()), Some("http://ex.org/o#a"));

        let all: Vec<ProxyObject> = repository.proxies_in(&ontology).collect();
        assert_eq!(all.len(), 3);
        assert!(all[0].same_instance(&first));
    }

    #[test]
    fn test_literal_is_not_a_proxy() {
        let mut repository = Repository::new(Capabilities::new());
        let ontology = repository.resolve_ontology("http://ex.org/o");
        let literal = repository
            .store_mut()
            .nodes_mut()
            .literal(ontorepo_core::model::Literal::string("x"));
        assert!(matches!(
            repository.resolve_proxy(&ontology, literal),
            Err(RepositoryError::Store(StoreError::UnsupportedNodeType { .. }))
        ));
    }
}
