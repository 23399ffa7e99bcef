//! Saving and loading designs.
//!
//! The session hands finished documents to a [`DesignPersistence`]
//! collaborator. Saving is fire-and-forget: implementations log failures
//! instead of returning them, so a broken disk never interrupts editing.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{BuilderError, BuilderResult};
use crate::schema::DesignDocument;

/// Where designs are saved to and loaded from.
pub trait DesignPersistence {
    /// Store a document, replacing any previous one.
    ///
    /// Failures are logged, never returned.
    fn save(&self, document: &DesignDocument);

    /// Fetch the stored document, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored document exists but cannot be read.
    fn load(&self) -> BuilderResult<Option<DesignDocument>>;
}

/// Keeps the last saved document in memory.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    document: RwLock<Option<DesignDocument>>,
}

impl MemoryPersistence {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `document`.
    #[must_use]
    pub fn with_document(document: DesignDocument) -> Self {
        Self {
            document: RwLock::new(Some(document)),
        }
    }
}

impl DesignPersistence for MemoryPersistence {
    fn save(&self, document: &DesignDocument) {
        let mut slot = self
            .document
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = Some(document.clone());
        tracing::debug!(elements = document.elements.len(), "Design saved in memory");
    }

    fn load(&self) -> BuilderResult<Option<DesignDocument>> {
        let slot = self
            .document
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(slot.clone())
    }
}

/// Saves the design as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    /// Persist to `path`. Parent directories are created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this collaborator writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_save(&self, document: &DesignDocument) -> BuilderResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| BuilderError::io(parent, e))?;
        }
        let json = document.to_json_pretty()?;
        std::fs::write(&self.path, json).map_err(|e| BuilderError::io(&self.path, e))
    }
}

impl DesignPersistence for JsonFilePersistence {
    fn save(&self, document: &DesignDocument) {
        match self.try_save(document) {
            Ok(()) => tracing::debug!(
                path = %self.path.display(),
                elements = document.elements.len(),
                "Design saved"
            ),
            Err(e) => tracing::warn!("Failed to save design to {}: {e}", self.path.display()),
        }
    }

    fn load(&self) -> BuilderResult<Option<DesignDocument>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(BuilderError::io(&self.path, e)),
        };
        DesignDocument::from_json(&contents).map(Some)
    }
}
