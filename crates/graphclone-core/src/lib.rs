//! Graphclone Core - Entity graph model and subgraph cloner
//!
//! This crate provides the in-memory entity graph, the cycle-safe subgraph
//! cloner, and the JSON interchange documents the graph is read from and
//! written to.

pub mod clone;
pub mod entity;
pub mod error;
pub mod graph;
pub mod interchange;

pub use clone::CloneSummary;
pub use entity::{Entity, EntityId};
pub use error::{Error, Result};
pub use graph::Graph;
pub use interchange::{Document, EntityRecord, LinkRecord};
