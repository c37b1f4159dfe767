//! Logical ontologies and their registry

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A logical ontology, identified by its IRI
///
/// Handles are cheap to clone; every handle for a given IRI handed out by
/// one [`OntologyRegistry`] shares the same allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ontology {
    iri: Arc<str>,
}

impl Ontology {
    fn new(iri: &str) -> Self {
        Self { iri: Arc::from(iri) }
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }

    /// Whether both handles come from the same registration
    pub fn same_instance(&self, other: &Ontology) -> bool {
        Arc::ptr_eq(&self.iri, &other.iri)
    }
}

impl fmt::Display for Ontology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.iri)
    }
}

/// Get-or-create registry of ontologies keyed by IRI
#[derive(Debug, Clone, Default)]
pub struct OntologyRegistry {
    ontologies: HashMap<String, Ontology>,
}

impl OntologyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, iri: &str) -> Ontology {
        if let Some(ontology) = self.ontologies.get(iri) {
            return ontology.clone();
        }
        tracing::debug!("Registering ontology <{}>", iri);
        let ontology = Ontology::new(iri);
        self.ontologies.insert(iri.to_string(), ontology.clone());
        ontology
    }

    pub fn get(&self, iri: &str) -> Option<Ontology> {
        self.ontologies.get(iri).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ontology> {
        self.ontologies.values()
    }

    pub fn len(&self) -> usize {
        self.ontologies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ontologies.is_empty()
    }
}
