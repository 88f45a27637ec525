//! Serve DataTables-style grid requests from a PostgreSQL database.

pub mod error;
pub mod grid;
pub mod state;

pub use error::Error;
pub use grid::{complex_result, grid_result, simple_result, Options};
pub use query_engine_translation::translation::backend::StructuredSource;
