//! Slot backends

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;

/// Storage-specific errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read slot {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write slot {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to clear slot {path}: {source}")]
    Clear {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize slot value: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ============================================================================
// Slot Trait
// ============================================================================

/// Single-value store keyed by a fixed name
#[async_trait]
pub trait DocumentSlot: Send + Sync {
    /// Read the stored value, `None` when the slot is empty
    async fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored value
    async fn write(&self, value: &str) -> Result<(), StorageError>;

    /// Empty the slot. Clearing an empty slot succeeds.
    async fn clear(&self) -> Result<(), StorageError>;
}

// ============================================================================
// File Slot
// ============================================================================

/// Slot stored as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl DocumentSlot for FileSlot {
    async fn read(&self) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                path: self.display_path(),
                source,
            }),
        }
    }

    async fn write(&self, value: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.display_path(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        // Write beside the target and rename so readers never see a partial value
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, value).await.map_err(write_err)?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(write_err)?;

        tracing::debug!(path = %self.path.display(), bytes = value.len(), "Slot written");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Slot cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Clear {
                path: self.display_path(),
                source,
            }),
        }
    }
}

// ============================================================================
// Memory Slot
// ============================================================================

/// In-process slot
#[derive(Debug, Default)]
pub struct MemorySlot {
    value: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }

    /// Current value without going through the async trait
    pub fn peek(&self) -> Option<String> {
        self.value.lock().clone()
    }
}

#[async_trait]
impl DocumentSlot for MemorySlot {
    async fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.lock().clone())
    }

    async fn write(&self, value: &str) -> Result<(), StorageError> {
        *self.value.lock() = Some(value.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.value.lock().take();
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
