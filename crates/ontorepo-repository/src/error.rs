use ontorepo_loader::{LoadError, MappingError};
use ontorepo_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Proxy for {0} was deleted")]
    Deleted(String),

    #[error("No query engine is configured")]
    NoQueryEngine,

    #[error("Query failed: {0}")]
    Query(String),
}

impl From<RepositoryError> for LoadError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Store(e) => LoadError::Store(e),
            other => LoadError::Translation(other.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}
