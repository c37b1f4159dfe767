//! Syntax-specific loader and serializer capabilities
//!
//! Concrete parsers and serializers live outside this crate; they plug into
//! a [`ResourceLoader`](crate::ResourceLoader) through [`Capabilities`],
//! keyed by [`Syntax`].

use crate::owl::Axiom;
use crate::syntax::{Syntax, SyntaxFamily};
use ontorepo_core::logging::Logger;
use ontorepo_core::model::Statement;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Read, Write};
use std::sync::Arc;

/// Inference rule parsed from an RDF document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    pub iri: String,
    pub antecedents: Vec<Statement>,
    pub consequents: Vec<Statement>,
}

/// Content of an RDF-family document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RdfLoaderResult {
    pub quads: Vec<Statement>,
    pub rules: Vec<RuleDefinition>,
    /// Identifiers of the imported documents
    pub imports: Vec<String>,
}

/// Content of an OWL-family document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwlLoaderResult {
    /// Declared ontology IRI, if the document names one
    pub iri: Option<String>,
    pub axioms: Vec<Axiom>,
    pub imports: Vec<String>,
}

/// Parses RDF-family documents
///
/// Parse failures are reported to `logger`; `None` means the document could
/// not be loaded.
pub trait RdfLoader: Send + Sync {
    fn load_rdf(&self, logger: &dyn Logger, reader: &mut dyn Read, base_iri: &str) -> Option<RdfLoaderResult>;
}

/// Parses OWL-family documents
pub trait OwlLoader: Send + Sync {
    fn load_owl(&self, logger: &dyn Logger, reader: &mut dyn Read, base_iri: &str) -> Option<OwlLoaderResult>;
}

pub trait RdfSerializer: Send + Sync {
    fn serialize(&self, logger: &dyn Logger, quads: &[Statement], writer: &mut dyn Write) -> io::Result<()>;
}

pub trait OwlSerializer: Send + Sync {
    fn serialize(&self, logger: &dyn Logger, axioms: &[Axiom], writer: &mut dyn Write) -> io::Result<()>;
}

/// Dispatch tables from syntaxes to capabilities
#[derive(Clone, Default)]
pub struct Capabilities {
    rdf_loaders: HashMap<Syntax, Arc<dyn RdfLoader>>,
    owl_loaders: HashMap<Syntax, Arc<dyn OwlLoader>>,
    rdf_serializers: HashMap<Syntax, Arc<dyn RdfSerializer>>,
    owl_serializers: HashMap<Syntax, Arc<dyn OwlSerializer>>,
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("rdf_loaders", &self.rdf_loaders.keys().collect::<Vec<_>>())
            .field("owl_loaders", &self.owl_loaders.keys().collect::<Vec<_>>())
            .field("rdf_serializers", &self.rdf_serializers.keys().collect::<Vec<_>>())
            .field("owl_serializers", &self.owl_serializers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rdf_loader(mut self, syntax: Syntax, loader: impl RdfLoader + 'static) -> Self {
        self.register_rdf_loader(syntax, Arc::new(loader));
        self
    }

    pub fn with_owl_loader(mut self, syntax: Syntax, loader: impl OwlLoader + 'static) -> Self {
        self.register_owl_loader(syntax, Arc::new(loader));
        self
    }

    pub fn with_rdf_serializer(mut self, syntax: Syntax, serializer: impl RdfSerializer + 'static) -> Self {
        self.register_rdf_serializer(syntax, Arc::new(serializer));
        self
    }

    pub fn with_owl_serializer(mut self, syntax: Syntax, serializer: impl OwlSerializer + 'static) -> Self {
        self.register_owl_serializer(syntax, Arc::new(serializer));
        self
    }

    /// Register an RDF loader, replacing any previous one for `syntax`
    pub fn register_rdf_loader(&mut self, syntax: Syntax, loader: Arc<dyn RdfLoader>) {
        if syntax.family() != SyntaxFamily::Rdf {
            tracing::warn!("Ignoring RDF loader registered for {}", syntax);
            return;
        }
        self.rdf_loaders.insert(syntax, loader);
    }

    pub fn register_owl_loader(&mut self, syntax: Syntax, loader: Arc<dyn OwlLoader>) {
        if syntax.family() != SyntaxFamily::Owl {
            tracing::warn!("Ignoring OWL loader registered for {}", syntax);
            return;
        }
        self.owl_loaders.insert(syntax, loader);
    }

    pub fn register_rdf_serializer(&mut self, syntax: Syntax, serializer: Arc<dyn RdfSerializer>) {
        if syntax.family() != SyntaxFamily::Rdf {
            tracing::warn!("Ignoring RDF serializer registered for {}", syntax);
            return;
        }
        self.rdf_serializers.insert(syntax, serializer);
    }

    pub fn register_owl_serializer(&mut self, syntax: Syntax, serializer: Arc<dyn OwlSerializer>) {
        if syntax.family() != SyntaxFamily::Owl {
            tracing::warn!("Ignoring OWL serializer registered for {}", syntax);
            return;
        }
        self.owl_serializers.insert(syntax, serializer);
    }

    pub fn rdf_loader(&self, syntax: Syntax) -> Option<&dyn RdfLoader> {
        self.rdf_loaders.get(&syntax).map(|loader| loader.as_ref())
    }

    pub fn owl_loader(&self, syntax: Syntax) -> Option<&dyn OwlLoader> {
        self.owl_loaders.get(&syntax).map(|loader| loader.as_ref())
    }

    pub fn rdf_serializer(&self, syntax: Syntax) -> Option<&dyn RdfSerializer> {
        self.rdf_serializers.get(&syntax).map(|serializer| serializer.as_ref())
    }

    pub fn owl_serializer(&self, syntax: Syntax) -> Option<&dyn OwlSerializer> {
        self.owl_serializers.get(&syntax).map(|serializer| serializer.as_ref())
    }

    /// Syntaxes that can be loaded
    pub fn loadable(&self) -> Vec<Syntax> {
        let mut syntaxes: Vec<Syntax> = self
            .rdf_loaders
            .keys()
            .chain(self.owl_loaders.keys())
            .copied()
            .collect();
        syntaxes.sort();
        syntaxes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl RdfLoader for Empty {
        fn load_rdf(&self, _logger: &dyn Logger, _reader: &mut dyn Read, _base_iri: &str) -> Option<RdfLoaderResult> {
            Some(RdfLoaderResult::default())
        }
    }

    #[test]
    fn test_registration_respects_families() {
        let capabilities = Capabilities::new()
            .with_rdf_loader(Syntax::Turtle, Empty)
            .with_rdf_loader(Syntax::OwlXml, Empty);

        assert!(capabilities.rdf_loader(Syntax::Turtle).is_some());
        assert!(capabilities.rdf_loader(Syntax::OwlXml).is_none());
        assert_eq!(capabilities.loadable(), vec![Syntax::Turtle]);
    }
}
