//! # ontorepo-repository
//!
//! The ontology repository: a quad store with one graph per ontology,
//! loading through [`ontorepo_loader::ResourceLoader`], and cached proxy
//! views over the entities of each ontology.
//!
//! ```no_run
//! use ontorepo_core::logging::TracingLogger;
//! use ontorepo_loader::Capabilities;
//! use ontorepo_repository::Repository;
//!
//! let mut repository = Repository::new(Capabilities::new());
//! let ontology = repository.resolve_ontology("http://example.org/people");
//! let alice = repository.resolve_proxy_iri("http://example.org/people#alice");
//! repository
//!     .proxy(&alice)?
//!     .set_value("http://example.org/people#name", "Alice")?;
//! repository.export(&TracingLogger, &ontology, "file:///tmp/people.nt");
//! # Ok::<(), ontorepo_repository::RepositoryError>(())
//! ```

mod backend;
pub mod config;
pub mod engines;
pub mod error;
pub mod proxy;
pub mod repository;
pub mod translator;

pub use config::{EntailmentRegime, FunctionalThreshold, RepositoryConfig};
pub use engines::{QueryEngine, QueryResult, RuleEngine, RuleRegistry};
pub use error::{ConfigError, RepositoryError};
pub use proxy::{PropertyValue, Proxy, ProxyObject};
pub use repository::{ProxiesIn, Repository};
