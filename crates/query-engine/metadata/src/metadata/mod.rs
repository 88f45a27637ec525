//! Metadata information regarding the backend columns.

pub mod columns;

// re-export without modules
pub use columns::*;
