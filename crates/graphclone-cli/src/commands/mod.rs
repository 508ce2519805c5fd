//! CLI command implementations

pub mod clone;
