//! Error types for the fallible boundaries of the builder.
//!
//! Editing operations never fail: unknown ids are no-ops and geometry is
//! clamped. Errors only come from parsing documents and configuration and
//! from persistence I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for builder operations.
pub type BuilderResult<T> = Result<T, BuilderError>;

/// Errors that can occur at the builder's I/O boundaries.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// Document, element or configuration JSON could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing a design file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An element id string is not a valid UUID.
    #[error("Invalid element id: {0}")]
    InvalidId(String),

    /// A document declares a schema version this build cannot read.
    #[error("Unsupported document version: {0}")]
    UnsupportedVersion(String),

    /// A loaded document violates a model invariant.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl BuilderError {
    /// Wrap an I/O error with the path it happened on.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
