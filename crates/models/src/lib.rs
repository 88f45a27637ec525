//! The shapes exchanged with a DataTables-style grid client: the parsed request and the
//! response envelope.

pub mod request;
pub mod response;

pub use request::{ColumnKey, GridRequest, Length, Order, RequestColumn, Search};
pub use response::{GridResponse, OutputFormat, ResponseEnvelope};
