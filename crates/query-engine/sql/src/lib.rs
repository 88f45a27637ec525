//! A SQL AST for the structured backend and its rendering to parameterized SQL text.

pub mod sql;
