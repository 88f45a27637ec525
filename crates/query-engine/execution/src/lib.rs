//! Query execution against a PostgreSQL database, and formatting of the resulting rows.

pub mod error;
pub mod execution;
pub mod executor;
pub mod formatting;
pub mod metrics;
