//! Renderer error types.
//!
//! Rendering itself cannot fail; errors only come from reading documents
//! and writing exported pages.

use std::path::PathBuf;

use builder_core::BuilderError;
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The design document could not be read.
    #[error("Invalid design: {0}")]
    Document(#[from] BuilderError),

    /// Writing the exported page failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Output file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Visual tree could not be serialized to JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
