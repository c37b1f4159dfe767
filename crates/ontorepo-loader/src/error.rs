//! Error types for mapping and loading

use crate::syntax::Syntax;
use ontorepo_store::StoreError;
use thiserror::Error;

/// Failure to register a mapping rule
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Invalid mapping pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure while loading or exporting a resource
///
/// These are reported through the logger at the orchestrator boundary and
/// never returned from [`crate::ResourceLoader::load`] itself.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot identify the location of {0}")]
    Unmapped(String),

    #[error("Unknown syntax for resource {0}")]
    UnknownSyntax(String),

    #[error("Unsupported syntax: {0}")]
    UnsupportedSyntax(Syntax),

    #[error("Malformed location {0}")]
    MalformedLocation(String),

    #[error("Resource {0} is read-only")]
    NotWritable(String),

    #[error("No bundled resource at {0}")]
    MissingBundledResource(String),

    #[error("Failed to parse {0}")]
    ParseFailed(String),

    #[error("Unknown ontology {0}")]
    UnknownOntology(String),

    #[error("I/O failure on {location}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request to {location} failed")]
    Http {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Cannot read archive {location}")]
    Archive {
        location: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Translation failed: {0}")]
    Translation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LoadError {
    pub(crate) fn io(location: &str, source: std::io::Error) -> Self {
        LoadError::Io {
            location: location.to_string(),
            source,
        }
    }
}
