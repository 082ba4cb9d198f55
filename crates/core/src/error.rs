//! Error types shared by the storage engine

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type used throughout nora-core and nora-journal
pub type Result<T> = std::result::Result<T, NoraError>;

/// Errors raised by the snapshot engine
#[derive(Debug, Error)]
pub enum NoraError {
    /// Filesystem read/write/create failure
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A referenced object does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The request is well-formed but not allowed in the current state
    #[error("{0}")]
    Validation(String),

    /// Persisted JSON could not be parsed
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Malformed hex hash
    #[error("invalid hash: {0}")]
    InvalidHash(String),
}

impl NoraError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for `NotFound` errors
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
