//! Error types for loading serialized program trees

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, LoadError>;

/// Failure to load a program tree from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed program tree: {0}")]
    Json(#[from] serde_json::Error),
}
