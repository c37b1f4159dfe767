//! # ontorepo-loader
//!
//! Turns logical identifiers into loaded ontologies:
//!
//! - [`mapper`]: ordered rules from identifiers to physical locations
//! - [`syntax`]: the closed set of document syntaxes and their extensions
//! - [`resource`]: readers and writers over `http`, `resource`, `jar` and `file` locations
//! - [`capability`]: the loader and serializer interfaces per syntax
//! - [`loader`]: the orchestrator draining the import worklist

pub mod capability;
pub mod error;
pub mod loader;
pub mod mapper;
pub mod ontology;
pub mod owl;
pub mod resource;
pub mod syntax;

pub use capability::{
    Capabilities, OwlLoader, OwlLoaderResult, OwlSerializer, RdfLoader, RdfLoaderResult, RdfSerializer,
    RuleDefinition,
};
pub use error::{LoadError, MappingError};
pub use loader::{LoadTarget, ResourceLoader};
pub use mapper::{MappingRule, ResourceMapper};
pub use ontology::{Ontology, OntologyRegistry};
pub use owl::{Axiom, Class, Entity, Individual, Property};
pub use resource::{Location, ResourceAccess, ResourceBundle};
pub use syntax::{Syntax, SyntaxFamily};
