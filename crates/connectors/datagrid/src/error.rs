//! Errors returned while serving a grid request.

use thiserror::Error;

use datagrid_configuration::ConfigurationError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Execution(#[from] query_engine_execution::error::Error),
    #[error("unable to serialize the response: {0}")]
    Serialization(#[from] serde_json::Error),
}
