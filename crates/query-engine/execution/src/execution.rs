//! Execute an execution plan against the database.

use std::future::Future;
use std::time::Instant;

use tracing::{info_span, Instrument};

use query_engine_sql::sql;

use crate::error::Error;
use crate::executor::{Executor, Row};
use crate::metrics::Metrics;

/// The rows of the main query and both record counts.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    pub records_total: u64,
    pub records_filtered: u64,
}

/// Run the main query, then the total count, then the filtered count.
/// The statements run one after the other and are not wrapped in a transaction.
pub async fn execute<E: Executor + ?Sized>(
    executor: &E,
    metrics: Option<&Metrics>,
    plan: &sql::execution_plan::ExecutionPlan,
) -> Result<QueryResult, Error> {
    let rows = timed(metrics, run_query(executor, &plan.query))
        .instrument(info_span!("Execute query"))
        .await?;

    tracing::info!(generated_sql = %plan.total_count, "counting records");
    let records_total = timed(metrics, executor.execute_scalar_count(&plan.total_count))
        .instrument(info_span!("Count records"))
        .await?;

    tracing::info!(generated_sql = %plan.filtered_count, "counting filtered records");
    let records_filtered = timed(metrics, executor.execute_scalar_count(&plan.filtered_count))
        .instrument(info_span!("Count filtered records"))
        .await?;

    Ok(QueryResult {
        rows,
        records_total,
        records_filtered,
    })
}

async fn run_query<E: Executor + ?Sized>(
    executor: &E,
    query: &sql::execution_plan::Query,
) -> Result<Vec<Row>, Error> {
    match query {
        sql::execution_plan::Query::Structured(select) => {
            let query = select.query_sql();
            tracing::info!(
                generated_sql = %query.sql,
                params = ?&query.params,
            );
            executor.execute_structured(&query).await
        }
        sql::execution_plan::Query::Raw(statement) => {
            tracing::info!(generated_sql = %statement);
            executor.execute_raw(statement).await
        }
    }
}

async fn timed<T>(
    metrics: Option<&Metrics>,
    statement: impl Future<Output = Result<T, Error>>,
) -> Result<T, Error> {
    let started = Instant::now();
    let result = statement.await;
    if let Some(metrics) = metrics {
        metrics.record_statement_execution_time(started.elapsed());
    }
    result
}
