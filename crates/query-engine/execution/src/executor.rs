//! The statement execution primitive, and its PostgreSQL implementation.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;

use datagrid_configuration::PoolSettings;
use query_engine_sql::sql;

use crate::error::Error;

/// A result row, keyed by column name.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Runs statements against a data store.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run a statement composed from the SQL AST, with its bound parameters.
    async fn execute_structured(&self, query: &sql::string::SQL) -> Result<Vec<Row>, Error>;

    /// Run a literal statement.
    async fn execute_raw(&self, statement: &str) -> Result<Vec<Row>, Error>;

    /// Run a statement yielding one row with one count field.
    async fn execute_scalar_count(&self, statement: &str) -> Result<u64, Error>;
}

/// Runs statements on a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PostgresExecutor {
    pool: sqlx::PgPool,
}

impl PostgresExecutor {
    pub fn new(pool: sqlx::PgPool) -> Self {
        PostgresExecutor { pool }
    }

    /// Create a connection pool and connect to the database.
    pub async fn connect(connection_uri: &str, pool_settings: &PoolSettings) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(pool_settings.max_connections)
            .acquire_timeout(Duration::from_secs(pool_settings.pool_timeout))
            .idle_timeout(pool_settings.idle_timeout.map(Duration::from_secs))
            .connect(connection_uri)
            .await?;
        Ok(PostgresExecutor::new(pool))
    }

    /// Every row of a statement, each turned into a JSON object by the database.
    async fn fetch_rows(
        &self,
        statement: &str,
        params: &[sql::string::Param],
    ) -> Result<Vec<Row>, Error> {
        let wrapped = format!(
            "SELECT row_to_json(grid_row) FROM ({}) AS grid_row",
            statement.trim().trim_end_matches(';')
        );

        let query = params.iter().fold(
            sqlx::query_scalar::<sqlx::Postgres, serde_json::Value>(&wrapped),
            |query, sql::string::Param::String(value)| query.bind(value.as_str()),
        );

        query
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|value| match value {
                serde_json::Value::Object(row) => Ok(row),
                other => Err(Error::MalformedRow(other.to_string())),
            })
            .collect()
    }
}

#[async_trait]
impl Executor for PostgresExecutor {
    async fn execute_structured(&self, query: &sql::string::SQL) -> Result<Vec<Row>, Error> {
        self.fetch_rows(&query.sql, &query.params).await
    }

    async fn execute_raw(&self, statement: &str) -> Result<Vec<Row>, Error> {
        self.fetch_rows(statement, &[]).await
    }

    async fn execute_scalar_count(&self, statement: &str) -> Result<u64, Error> {
        let count = sqlx::query_scalar::<sqlx::Postgres, i64>(statement)
            .fetch_one(&self.pool)
            .await?;
        u64::try_from(count).map_err(|_| Error::InvalidCount(count))
    }
}
