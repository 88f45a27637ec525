pub mod deployment;
pub mod executor;
pub mod fixtures;
