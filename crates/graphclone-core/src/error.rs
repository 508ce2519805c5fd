//! Error types for Graphclone Core

use thiserror::Error;

/// Result type alias using Graphclone's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Graphclone error types
///
/// The graph model itself never fails: missing roots, dangling links and
/// duplicate ids are all absorbed by policy. Errors only arise at the text
/// boundary, before a document exists.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
