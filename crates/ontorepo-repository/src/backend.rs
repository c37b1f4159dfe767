//! Store side of the repository: the quad store, the graph memo and the
//! rule engine, as seen by the resource loader

use crate::engines::RuleEngine;
use crate::translator;
use ontorepo_core::model::Statement;
use ontorepo_loader::{Axiom, LoadError, LoadTarget, Ontology, OwlLoaderResult, RdfLoaderResult};
use ontorepo_store::{BlankScope, Changeset, NodeId, QuadPattern, Store, StoreError};
use std::collections::HashMap;
use std::fmt;

pub(crate) struct Backend {
    pub(crate) store: Store,
    graphs: HashMap<Ontology, NodeId>,
    pub(crate) rules: Box<dyn RuleEngine>,
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backend")
            .field("store", &self.store)
            .field("graphs", &self.graphs.len())
            .field("rules", &self.rules.rule_count())
            .finish()
    }
}

impl Backend {
    pub(crate) fn new(store: Store, rules: Box<dyn RuleEngine>) -> Self {
        Self {
            store,
            graphs: HashMap::new(),
            rules,
        }
    }

    /// Graph node of `ontology`, created on first use
    pub(crate) fn graph(&mut self, ontology: &Ontology) -> NodeId {
        if let Some(graph) = self.graphs.get(ontology) {
            return *graph;
        }
        let graph = self.store.nodes_mut().iri(ontology.iri());
        tracing::debug!("Bound {} to graph {}", ontology, graph);
        self.graphs.insert(ontology.clone(), graph);
        graph
    }

    pub(crate) fn existing_graph(&self, ontology: &Ontology) -> Option<NodeId> {
        self.graphs.get(ontology).copied()
    }

    /// Insert the statements of one document into the graph of `ontology`;
    /// returns the number of new quads
    ///
    /// Blank node labels are local to the document.
    pub(crate) fn insert(&mut self, ontology: &Ontology, statements: &[Statement]) -> Result<usize, StoreError> {
        let graph = self.graph(ontology);
        let mut blanks = BlankScope::new();
        let quads = statements
            .iter()
            .map(|statement| self.store.import_quad(graph, statement, &mut blanks))
            .collect();
        let applied = self.store.apply(Changeset::adding(quads))?;
        Ok(applied.added.len())
    }

    /// Statements of the graph of `ontology`, without their graph
    pub(crate) fn statements(&self, ontology: &Ontology) -> Result<Vec<Statement>, StoreError> {
        let Some(graph) = self.existing_graph(ontology) else {
            return Ok(Vec::new());
        };
        self.store
            .matching(&QuadPattern::any().graph(graph))
            .iter()
            .map(|quad| {
                let mut statement = self.store.statement_of(quad)?;
                statement.graph = None;
                Ok(statement)
            })
            .collect()
    }
}

impl LoadTarget for Backend {
    fn load_rdf(&mut self, ontology: &Ontology, input: RdfLoaderResult) -> Result<(), LoadError> {
        let added = self.insert(ontology, &input.quads)?;
        tracing::debug!("Loaded {} quads into {}", added, ontology);
        for rule in input.rules {
            self.rules.add(ontology, rule);
        }
        Ok(())
    }

    fn load_owl(&mut self, ontology: &Ontology, input: OwlLoaderResult) -> Result<(), LoadError> {
        let statements = translator::axioms_to_statements(&input.axioms);
        let added = self.insert(ontology, &statements)?;
        tracing::debug!("Loaded {} axioms as {} quads into {}", input.axioms.len(), added, ontology);
        Ok(())
    }

    fn export_rdf(&self, ontology: &Ontology) -> Result<Vec<Statement>, LoadError> {
        Ok(self.statements(ontology)?)
    }

    fn export_dataset(&self) -> Result<Vec<Statement>, LoadError> {
        let statements = self
            .store
            .quads()
            .iter()
            .map(|quad| self.store.statement_of(quad))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(statements)
    }

    fn export_owl(&self, ontology: &Ontology) -> Result<Vec<Axiom>, LoadError> {
        Ok(translator::statements_to_axioms(&self.statements(ontology)?))
    }
}
