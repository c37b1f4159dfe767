//! # ontorepo-core
//!
//! Building blocks shared by every ontorepo crate:
//!
//! - [`uri`]: RFC 3986 parsing, recomposition and relative resolution
//! - [`model`]: value-level nodes and statements
//! - [`datatypes`]: codecs between native values and literals
//! - [`vocabulary`]: RDF, RDFS, OWL and XSD IRIs
//! - [`logging`]: the failure-reporting collaborator and tracing setup

pub mod datatypes;
pub mod logging;
pub mod model;
pub mod uri;
pub mod vocabulary;

pub use datatypes::{DatatypeCodec, DatatypeError, DatatypeRegistry, UnsupportedValue, Value, ValueKind};
pub use logging::{BufferedLogger, Logger, TracingLogger};
pub use model::{BlankId, Evaluate, Expression, Literal, Node, NodeKind, Statement};
pub use uri::{UriComponents, UriError};
