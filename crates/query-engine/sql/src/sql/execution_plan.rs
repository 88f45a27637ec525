//! Describe the statements that answer one grid request.

use super::ast;

/// The main query and the two record counts, in the order they are run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionPlan {
    pub query: Query,
    /// Counts every record.
    pub total_count: String,
    /// Counts the records left after searching.
    pub filtered_count: String,
}

/// The main query of a plan.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Composed from the AST, with bound parameters.
    Structured(ast::Select),
    /// A caller-owned statement with its generated fragments filled in.
    Raw(String),
}
