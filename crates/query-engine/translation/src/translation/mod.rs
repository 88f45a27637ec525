//! Translate an incoming grid request into an execution plan to be run against the database.

pub mod backend;
pub mod filtering;
pub mod limiting;
pub mod query;
pub mod resolution;
pub mod sorting;
