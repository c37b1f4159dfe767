//! Seams for the rule and query engines
//!
//! Reasoning beyond the incremental entailment and query evaluation are
//! provided by external engines; the repository only wires them up.

use crate::error::RepositoryError;
use ontorepo_core::model::{Node, Statement};
use ontorepo_loader::{Ontology, RuleDefinition};
use ontorepo_store::Store;
use std::collections::BTreeMap;

/// Receives the inference rules found in loaded documents
pub trait RuleEngine: Send {
    fn add(&mut self, ontology: &Ontology, rule: RuleDefinition);

    /// Make the rules added so far effective
    fn flush(&mut self);

    fn rule_count(&self) -> usize;
}

/// Result of a query
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Boolean(bool),
    Solutions(Vec<BTreeMap<String, Node>>),
    Quads(Vec<Statement>),
}

pub trait QueryEngine: Send + Sync {
    fn execute(&self, store: &Store, query: &str) -> Result<QueryResult, RepositoryError>;
}

/// Rule engine that only records rules
#[derive(Debug, Default)]
pub struct RuleRegistry {
    pending: Vec<(Ontology, RuleDefinition)>,
    active: Vec<(Ontology, RuleDefinition)>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[(Ontology, RuleDefinition)] {
        &self.pending
    }

    pub fn active(&self) -> &[(Ontology, RuleDefinition)] {
        &self.active
    }
}

impl RuleEngine for RuleRegistry {
    fn add(&mut self, ontology: &Ontology, rule: RuleDefinition) {
        tracing::debug!("Registering rule {} from {}", rule.iri, ontology);
        self.pending.push((ontology.clone(), rule));
    }

    fn flush(&mut self) {
        self.active.append(&mut self.pending);
    }

    fn rule_count(&self) -> usize {
        self.pending.len() + self.active.len()
    }
}
