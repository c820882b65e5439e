//! File-based Snapshot Storage Adapter
//!
//! Stores each slot as a JSON file named after its key inside a base
//! directory, e.g. `./data/skill-octangle-storage.json`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{SnapshotStorage, SnapshotStorageError};

/// File-based storage for snapshot slots
#[derive(Debug, Clone)]
pub struct FileSnapshotStorage {
    base_path: PathBuf,
}

impl FileSnapshotStorage {
    /// Create a new file storage with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let storage = FileSnapshotStorage::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the file path for a slot key
    fn slot_path(&self, key: &str) -> Result<PathBuf, SnapshotStorageError> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\'])
            && !key.contains('\0');
        if !valid {
            return Err(SnapshotStorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }

    /// Ensure the base directory exists
    async fn ensure_dir(&self) -> Result<(), SnapshotStorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SnapshotStorageError::IoError(e.to_string()))
    }
}

#[async_trait]
impl SnapshotStorage for FileSnapshotStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, SnapshotStorageError> {
        let file_path = self.slot_path(key)?;

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path)
            .await
            .map_err(|e| SnapshotStorageError::IoError(e.to_string()))?;

        Ok(Some(contents))
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), SnapshotStorageError> {
        let file_path = self.slot_path(key)?;
        self.ensure_dir().await?;

        // Temp file + rename keeps the slot whole
        let tmp_path = file_path.with_extension("json.tmp");
        fs::write(&tmp_path, value)
            .await
            .map_err(|e| SnapshotStorageError::IoError(e.to_string()))?;
        fs::rename(&tmp_path, &file_path)
            .await
            .map_err(|e| SnapshotStorageError::IoError(e.to_string()))?;

        tracing::debug!("Wrote {} bytes to {}", value.len(), file_path.display());
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, SnapshotStorageError> {
        Ok(self.slot_path(key)?.exists())
    }
}
