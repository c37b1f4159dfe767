//! Dependency-closure loading and export of ontology documents
//!
//! [`ResourceLoader`] maps identifiers to locations, detects the syntax,
//! dispatches to the registered capability and hands the result to a
//! [`LoadTarget`]. Imports discovered while loading are queued and drained
//! batch by batch until no new document is reachable.

use crate::capability::{Capabilities, OwlLoaderResult, OwlSerializer, RdfLoaderResult, RdfSerializer};
use crate::error::LoadError;
use crate::mapper::ResourceMapper;
use crate::ontology::{Ontology, OntologyRegistry};
use crate::owl::Axiom;
use crate::resource::{ResourceAccess, ResourceBundle};
use crate::syntax::{Syntax, SyntaxFamily};
use ontorepo_core::logging::Logger;
use ontorepo_core::model::Statement;
use std::collections::HashMap;
use std::io::{Read, Write};

/// Receiver of loaded documents and source of exported content
pub trait LoadTarget {
    /// Store the content of an RDF document into `ontology`
    fn load_rdf(&mut self, ontology: &Ontology, input: RdfLoaderResult) -> Result<(), LoadError>;

    /// Store the content of an OWL document into `ontology`
    fn load_owl(&mut self, ontology: &Ontology, input: OwlLoaderResult) -> Result<(), LoadError>;

    /// Statements of one ontology
    fn export_rdf(&self, ontology: &Ontology) -> Result<Vec<Statement>, LoadError>;

    /// Statements of every ontology, each carrying its graph
    fn export_dataset(&self) -> Result<Vec<Statement>, LoadError>;

    /// Axioms of one ontology
    fn export_owl(&self, ontology: &Ontology) -> Result<Vec<Axiom>, LoadError>;
}

/// What an export writes
#[derive(Debug, Clone, Copy)]
enum ExportScope<'a> {
    Ontology(&'a Ontology),
    Dataset,
}

enum Payload<'a> {
    Quads(&'a dyn RdfSerializer, Vec<Statement>),
    Axioms(&'a dyn OwlSerializer, Vec<Axiom>),
}

/// Loads ontology documents and their transitive imports
#[derive(Debug)]
pub struct ResourceLoader {
    mapper: ResourceMapper,
    access: ResourceAccess,
    capabilities: Capabilities,
    ontologies: OntologyRegistry,
    /// document identifier -> ontology it was loaded into
    resources: HashMap<String, Ontology>,
    /// imports not yet loaded
    dependencies: Vec<String>,
}

impl ResourceLoader {
    pub fn new(mapper: ResourceMapper, capabilities: Capabilities) -> Self {
        Self {
            mapper,
            access: ResourceAccess::new(ResourceBundle::standard()),
            capabilities,
            ontologies: OntologyRegistry::new(),
            resources: HashMap::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_access(mut self, access: ResourceAccess) -> Self {
        self.access = access;
        self
    }

    pub fn mapper(&self) -> &ResourceMapper {
        &self.mapper
    }

    pub fn mapper_mut(&mut self) -> &mut ResourceMapper {
        &mut self.mapper
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn capabilities_mut(&mut self) -> &mut Capabilities {
        &mut self.capabilities
    }

    pub fn access_mut(&mut self) -> &mut ResourceAccess {
        &mut self.access
    }

    /// Get or create the ontology named `iri`
    pub fn resolve_ontology(&mut self, iri: &str) -> Ontology {
        self.ontologies.resolve(iri)
    }

    pub fn get_ontology(&self, iri: &str) -> Option<Ontology> {
        self.ontologies.get(iri)
    }

    pub fn ontologies(&self) -> impl Iterator<Item = &Ontology> {
        self.ontologies.iter()
    }

    /// Whether the document `resource_iri` has been loaded
    pub fn is_loaded(&self, resource_iri: &str) -> bool {
        self.resources.contains_key(resource_iri)
    }

    /// Load a document into the ontology of the same name, then its imports
    pub fn load(&mut self, target: &mut dyn LoadTarget, logger: &dyn Logger, iri: &str) -> Option<Ontology> {
        self.load_with(target, logger, iri, iri, false)
    }

    /// Load a document into `ontology_iri`, then its imports
    ///
    /// With `force_reload` the document is parsed again even if it was
    /// already loaded. OWL documents declaring their own IRI are loaded into
    /// that ontology instead.
    pub fn load_with(
        &mut self,
        target: &mut dyn LoadTarget,
        logger: &dyn Logger,
        resource_iri: &str,
        ontology_iri: &str,
        force_reload: bool,
    ) -> Option<Ontology> {
        let result = self.load_resource(target, logger, resource_iri, ontology_iri, force_reload);
        self.drain_dependencies(target, logger);
        result
    }

    /// Load a document from an already opened reader, then its imports
    pub fn load_from_reader(
        &mut self,
        target: &mut dyn LoadTarget,
        logger: &dyn Logger,
        reader: &mut dyn Read,
        resource_iri: &str,
        ontology_iri: &str,
        syntax: Syntax,
    ) -> Option<Ontology> {
        let result = self.read_resource(target, logger, reader, resource_iri, ontology_iri, syntax);
        let result = report(logger, result);
        self.drain_dependencies(target, logger);
        result
    }

    fn drain_dependencies(&mut self, target: &mut dyn LoadTarget, logger: &dyn Logger) {
        while !self.dependencies.is_empty() {
            let batch = std::mem::take(&mut self.dependencies);
            tracing::debug!("Loading a batch of {} imports", batch.len());
            for dependency in batch {
                self.load_resource(target, logger, &dependency, &dependency, false);
            }
        }
    }

    fn load_resource(
        &mut self,
        target: &mut dyn LoadTarget,
        logger: &dyn Logger,
        resource_iri: &str,
        ontology_iri: &str,
        force_reload: bool,
    ) -> Option<Ontology> {
        let result = self.try_load_resource(target, logger, resource_iri, ontology_iri, force_reload);
        report(logger, result)
    }

    fn try_load_resource(
        &mut self,
        target: &mut dyn LoadTarget,
        logger: &dyn Logger,
        resource_iri: &str,
        ontology_iri: &str,
        force_reload: bool,
    ) -> Result<Ontology, LoadError> {
        let location = self
            .mapper
            .get(resource_iri)
            .ok_or_else(|| LoadError::Unmapped(resource_iri.to_string()))?;
        if !force_reload {
            if let Some(ontology) = self.resources.get(resource_iri) {
                tracing::debug!("{} is already loaded", resource_iri);
                return Ok(ontology.clone());
            }
        }
        let syntax = Syntax::from_location(&location).ok_or_else(|| LoadError::UnknownSyntax(location.clone()))?;
        let mut reader = self.access.open_reader(&location)?;
        tracing::info!("Loading {} from {} as {}", resource_iri, location, syntax);
        self.read_resource(target, logger, reader.as_mut(), resource_iri, ontology_iri, syntax)
    }

    fn read_resource(
        &mut self,
        target: &mut dyn LoadTarget,
        logger: &dyn Logger,
        reader: &mut dyn Read,
        resource_iri: &str,
        ontology_iri: &str,
        syntax: Syntax,
    ) -> Result<Ontology, LoadError> {
        match syntax.family() {
            SyntaxFamily::Rdf => {
                let loader = self
                    .capabilities
                    .rdf_loader(syntax)
                    .ok_or(LoadError::UnsupportedSyntax(syntax))?;
                let input = loader
                    .load_rdf(logger, reader, resource_iri)
                    .ok_or_else(|| LoadError::ParseFailed(resource_iri.to_string()))?;
                let ontology = self.ontologies.resolve(ontology_iri);
                let imports = input.imports.clone();
                target.load_rdf(&ontology, input)?;
                self.register(resource_iri, &ontology, imports);
                Ok(ontology)
            }
            SyntaxFamily::Owl => {
                let loader = self
                    .capabilities
                    .owl_loader(syntax)
                    .ok_or(LoadError::UnsupportedSyntax(syntax))?;
                let input = loader
                    .load_owl(logger, reader, resource_iri)
                    .ok_or_else(|| LoadError::ParseFailed(resource_iri.to_string()))?;
                let declared = input.iri.clone().unwrap_or_else(|| ontology_iri.to_string());
                let ontology = self.ontologies.resolve(&declared);
                let imports = input.imports.clone();
                target.load_owl(&ontology, input)?;
                self.register(resource_iri, &ontology, imports);
                Ok(ontology)
            }
        }
    }

    /// Bind a document whose content reached the target and queue its imports
    fn register(&mut self, resource_iri: &str, ontology: &Ontology, imports: Vec<String>) {
        self.resources.insert(resource_iri.to_string(), ontology.clone());
        self.dependencies.extend(imports);
    }

    /// Write one ontology to the location of `iri`; false if it failed
    pub fn export(&self, target: &dyn LoadTarget, logger: &dyn Logger, ontology: &Ontology, iri: &str) -> bool {
        let result = self.try_export(target, logger, ExportScope::Ontology(ontology), iri);
        report(logger, result).is_some()
    }

    /// Write the whole dataset to the location of `iri`; false if it failed
    ///
    /// Syntaxes without named graphs only receive the ontology named `iri`.
    pub fn export_all(&self, target: &dyn LoadTarget, logger: &dyn Logger, iri: &str) -> bool {
        let result = self.try_export(target, logger, ExportScope::Dataset, iri);
        report(logger, result).is_some()
    }

    fn try_export(
        &self,
        target: &dyn LoadTarget,
        logger: &dyn Logger,
        scope: ExportScope<'_>,
        iri: &str,
    ) -> Result<(), LoadError> {
        let location = self
            .mapper
            .get(iri)
            .ok_or_else(|| LoadError::Unmapped(iri.to_string()))?;
        let syntax = Syntax::from_location(&location).ok_or_else(|| LoadError::UnknownSyntax(location.clone()))?;

        let payload = match syntax.family() {
            SyntaxFamily::Rdf => {
                let serializer = self
                    .capabilities
                    .rdf_serializer(syntax)
                    .ok_or(LoadError::UnsupportedSyntax(syntax))?;
                let quads = match scope {
                    ExportScope::Ontology(ontology) => target.export_rdf(ontology)?,
                    ExportScope::Dataset if syntax.supports_datasets() => target.export_dataset()?,
                    ExportScope::Dataset => target.export_rdf(&self.named(iri)?)?,
                };
                Payload::Quads(serializer, quads)
            }
            SyntaxFamily::Owl => {
                let serializer = self
                    .capabilities
                    .owl_serializer(syntax)
                    .ok_or(LoadError::UnsupportedSyntax(syntax))?;
                let axioms = match scope {
                    ExportScope::Ontology(ontology) => target.export_owl(ontology)?,
                    ExportScope::Dataset => {
                        logger.warning(&format!(
                            "{} cannot hold several ontologies, exporting only {}",
                            syntax, iri
                        ));
                        target.export_owl(&self.named(iri)?)?
                    }
                };
                Payload::Axioms(serializer, axioms)
            }
        };

        let mut writer = self.access.open_writer(&location)?;
        tracing::info!("Exporting to {} as {}", location, syntax);
        let written = match payload {
            Payload::Quads(serializer, quads) => serializer.serialize(logger, &quads, writer.as_mut()),
            Payload::Axioms(serializer, axioms) => serializer.serialize(logger, &axioms, writer.as_mut()),
        };
        written
            .and_then(|_| writer.flush())
            .map_err(|e| LoadError::io(&location, e))
    }

    fn named(&self, iri: &str) -> Result<Ontology, LoadError> {
        self.ontologies
            .get(iri)
            .ok_or_else(|| LoadError::UnknownOntology(iri.to_string()))
    }
}

/// Report a failure to the logger and turn it into `None`
fn report<T>(logger: &dyn Logger, result: Result<T, LoadError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            logger.error_from(&e);
            None
        }
    }
}
