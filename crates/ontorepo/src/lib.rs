//! # Ontorepo - Ontology Repository
//!
//! Ontorepo keeps ontologies in a quad store, one graph per ontology, and
//! exposes their entities through cached proxy views. Documents are located
//! through ordered mapping rules, parsed by pluggable loader capabilities
//! and loaded together with the closure of their imports.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ontorepo::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = RepositoryConfig::from_path("repository.json")?;
//!     let mut repository = Repository::from_config(&config, Capabilities::new())?;
//!
//!     let logger = BufferedLogger::new();
//!     if let Some(ontology) = repository.load(&logger, "http://example.org/people.ttl") {
//!         let count = repository.proxies_in(&ontology).count();
//!         println!("{} entities in {}", count, ontology);
//!     }
//!     for error in logger.errors() {
//!         eprintln!("{}", error);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`ontorepo-core`**: URI resolution, node model, datatype codecs, vocabulary, logging
//! - **`ontorepo-store`**: node interning and the quad store with change notification
//! - **`ontorepo-entail`**: incremental `rdf:Property` and literal typing
//! - **`ontorepo-loader`**: resource mapping, syntaxes, resource access and the loading orchestrator
//! - **`ontorepo-repository`**: the repository, proxies, OWL translation and configuration
//!
//! ## Feature Flags
//!
//! - `full` (default): every crate
//! - `core`, `store`, `entail`, `loader`, `repository`: the named crate and what it depends on

#[cfg(feature = "ontorepo-core")]
pub use ontorepo_core as core;

#[cfg(feature = "ontorepo-store")]
pub use ontorepo_store as store;

#[cfg(feature = "ontorepo-entail")]
pub use ontorepo_entail as entail;

#[cfg(feature = "ontorepo-loader")]
pub use ontorepo_loader as loader;

#[cfg(feature = "ontorepo-repository")]
pub use ontorepo_repository as repository;

#[cfg(feature = "ontorepo-core")]
pub use ontorepo_core::{model, uri};

#[cfg(feature = "ontorepo-repository")]
pub use ontorepo_repository::{Repository, RepositoryConfig, RepositoryError};

pub use anyhow;
pub use serde;
pub use serde_json;

/// Prelude module for convenient imports
///
/// ```rust
/// use ontorepo::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "ontorepo-core")]
    pub use ontorepo_core::{
        BufferedLogger, DatatypeRegistry, Literal, Logger, Node, Statement, TracingLogger, UriComponents, Value,
    };

    #[cfg(feature = "ontorepo-store")]
    pub use ontorepo_store::{Changeset, NodeId, Quad, QuadPattern, Store};

    #[cfg(feature = "ontorepo-entail")]
    pub use ontorepo_entail::IncrementalEntailment;

    #[cfg(feature = "ontorepo-loader")]
    pub use ontorepo_loader::{Capabilities, Ontology, ResourceLoader, ResourceMapper, Syntax};

    #[cfg(feature = "ontorepo-repository")]
    pub use ontorepo_repository::{PropertyValue, ProxyObject, Repository, RepositoryConfig};

    pub use serde::{Deserialize, Serialize};
}

/// Current version of Ontorepo
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Health check function
///
/// Reports the version and which component crates are compiled in.
pub fn health_check() -> serde_json::Value {
    serde_json::json!({
        "status": "healthy",
        "version": VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "modules": {
            "core": cfg!(feature = "ontorepo-core"),
            "store": cfg!(feature = "ontorepo-store"),
            "entail": cfg!(feature = "ontorepo-entail"),
            "loader": cfg!(feature = "ontorepo-loader"),
            "repository": cfg!(feature = "ontorepo-repository")
        }
    })
}
