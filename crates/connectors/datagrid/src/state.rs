//! Transient state used by the binary.
//!
//! This is initialized on startup.

use thiserror::Error;
use tracing::{info_span, Instrument};

use datagrid_configuration::Configuration;
use query_engine_execution::executor::PostgresExecutor;
use query_engine_execution::metrics;

/// A connection pool and the metrics of the queries run on it.
#[derive(Debug, Clone)]
pub struct State {
    pub metrics: metrics::Metrics,
    pub executor: PostgresExecutor,
}

/// Create a connection pool and wrap it inside a State.
pub async fn create_state(
    configuration: &Configuration,
    metrics_registry: &mut prometheus::Registry,
) -> Result<State, InitializationError> {
    let executor = PostgresExecutor::connect(
        &configuration.connection_uri,
        &configuration.pool_settings,
    )
    .instrument(info_span!(
        "Create connection pool",
        max_connections = configuration.pool_settings.max_connections,
    ))
    .await
    .map_err(InitializationError::UnableToCreatePool)?;

    let metrics = async {
        let metrics_inner = metrics::Metrics::initialize(metrics_registry)
            .map_err(InitializationError::MetricsError)?;
        Ok(metrics_inner)
    }
    .instrument(info_span!("Setup metrics"))
    .await?;

    Ok(State { metrics, executor })
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("unable to initialize connection pool: {0}")]
    UnableToCreatePool(query_engine_execution::error::Error),
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
}
