//! Error types for the exporter.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for export operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Scene file does not exist or cannot be accessed
    #[error("Scene file not found: {0}")]
    FileNotFound(PathBuf),

    /// Scene document could not be parsed
    #[error("Invalid scene document: {0}")]
    SceneParse(#[from] serde_json::Error),

    /// Attribute present but holding the wrong kind of value
    #[error("Attribute '{key}' on object '{object}': expected {expected}")]
    AttributeType {
        object: String,
        key: String,
        expected: &'static str,
    },

    /// Attribute present with an unusable value
    #[error("Attribute '{key}' on object '{object}': {reason}")]
    InvalidAttribute {
        object: String,
        key: String,
        reason: String,
    },

    /// Building the evaluated geometry of an object failed
    #[error("Evaluation of '{object}' failed: {reason}")]
    Evaluation { object: String, reason: String },

    /// Object not found by name
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// Invalid export configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an evaluation error for the named object.
    pub fn evaluation(object: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Evaluation {
            object: object.into(),
            reason: reason.into(),
        }
    }

    /// Whether this failure only affects the geometry of a single object.
    ///
    /// Recoverable errors degrade to "no geometry for this object"; everything
    /// else terminates the export run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Evaluation { .. })
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;
