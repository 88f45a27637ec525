//! Errors for query execution.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    DB(#[from] sqlx::Error),

    #[error("count statement returned {0}, expected a non-negative count")]
    InvalidCount(i64),

    #[error("statement returned a row that is not an object: {0}")]
    MalformedRow(String),
}
