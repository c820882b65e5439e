//! Snapshot Storage Port - Interface for the durable key-value slot.
//!
//! The profile service writes the serialized store state under a fixed
//! namespace key after every change and reads it back on start.

use async_trait::async_trait;

/// Errors that can occur during snapshot storage operations
#[derive(Debug, thiserror::Error)]
pub enum SnapshotStorageError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Port for a durable string-valued key-value slot
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// `None` if nothing has been written under `key`
    ///
    /// # Errors
    /// Returns `SnapshotStorageError` if the slot cannot be read
    async fn read(&self, key: &str) -> Result<Option<String>, SnapshotStorageError>;

    /// Write `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns `SnapshotStorageError` if the write fails
    async fn write(&self, key: &str, value: &str) -> Result<(), SnapshotStorageError>;

    /// Check if a value exists under `key`
    async fn exists(&self, key: &str) -> Result<bool, SnapshotStorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn SnapshotStorage) {}

    #[test]
    fn snapshot_storage_error_io_displays() {
        let err = SnapshotStorageError::IoError("disk full".to_string());
        assert_eq!(err.to_string(), "IO error: disk full");
    }

    #[test]
    fn snapshot_storage_error_invalid_key_displays() {
        let err = SnapshotStorageError::InvalidKey("../x".to_string());
        assert_eq!(err.to_string(), "Invalid storage key: \"../x\"");
    }
}
