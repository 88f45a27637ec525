//! Construct and manipulate a SQL AST and render it to SQL strings.

pub mod ast;
pub mod convert;
pub mod execution_plan;
pub mod helpers;
pub mod string;
