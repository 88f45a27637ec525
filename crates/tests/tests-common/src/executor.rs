//! An in-memory executor that records what it is asked to run.

use std::sync::Mutex;

use async_trait::async_trait;

use query_engine_execution::error::Error;
use query_engine_execution::executor::{Executor, Row};
use query_engine_sql::sql;

/// One statement seen by a `RecordingExecutor`.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Structured(sql::string::SQL),
    Raw(String),
    Count(String),
}

/// Answers every query with the same rows, and counts by whether the statement filters.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    rows: Vec<Row>,
    total: u64,
    filtered: u64,
    fail: bool,
    statements: Mutex<Vec<Statement>>,
}

impl RecordingExecutor {
    pub fn new(rows: Vec<Row>, total: u64, filtered: u64) -> Self {
        RecordingExecutor {
            rows,
            total,
            filtered,
            ..RecordingExecutor::default()
        }
    }

    /// An executor whose every statement fails.
    pub fn failing() -> Self {
        RecordingExecutor {
            fail: true,
            ..RecordingExecutor::default()
        }
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().unwrap().clone()
    }

    fn record(&self, statement: Statement) -> Result<(), Error> {
        self.statements.lock().unwrap().push(statement);
        if self.fail {
            Err(Error::DB(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Executor for RecordingExecutor {
    async fn execute_structured(&self, query: &sql::string::SQL) -> Result<Vec<Row>, Error> {
        self.record(Statement::Structured(query.clone()))?;
        Ok(self.rows.clone())
    }

    async fn execute_raw(&self, statement: &str) -> Result<Vec<Row>, Error> {
        self.record(Statement::Raw(statement.to_string()))?;
        Ok(self.rows.clone())
    }

    async fn execute_scalar_count(&self, statement: &str) -> Result<u64, Error> {
        self.record(Statement::Count(statement.to_string()))?;
        if statement.contains("WHERE") {
            Ok(self.filtered)
        } else {
            Ok(self.total)
        }
    }
}
