//! Information about the backend columns a grid is served from.

pub mod metadata;
