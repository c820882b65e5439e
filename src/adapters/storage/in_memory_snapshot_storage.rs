//! In-Memory Snapshot Storage Adapter
//!
//! Keeps slots in memory. Useful for testing and for sessions that
//! should not touch disk.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{SnapshotStorage, SnapshotStorageError};

/// In-memory storage for snapshot slots
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStorage {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySnapshotStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-seeded with one slot
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self {
            slots: Arc::new(RwLock::new(slots)),
        }
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.slots.write().await.clear();
    }

    /// Get the number of stored slots
    pub async fn slot_count(&self) -> usize {
        self.slots.read().await.len()
    }
}

#[async_trait]
impl SnapshotStorage for InMemorySnapshotStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, SnapshotStorageError> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), SnapshotStorageError> {
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, SnapshotStorageError> {
        Ok(self.slots.read().await.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_write_and_read() {
        let storage = InMemorySnapshotStorage::new();

        storage.write("slot", "value").await.unwrap();

        assert_eq!(storage.read("slot").await.unwrap().as_deref(), Some("value"));
    }

    #[tokio::test]
    async fn test_memory_storage_read_missing() {
        let storage = InMemorySnapshotStorage::new();
        assert_eq!(storage.read("slot").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_storage_with_slot_seeds_value() {
        let storage = InMemorySnapshotStorage::with_slot("slot", "seeded");
        assert!(storage.exists("slot").await.unwrap());
        assert_eq!(storage.slot_count().await, 1);
    }

    #[tokio::test]
    async fn test_memory_storage_clear() {
        let storage = InMemorySnapshotStorage::new();
        storage.write("a", "1").await.unwrap();
        storage.write("b", "2").await.unwrap();
        assert_eq!(storage.slot_count().await, 2);

        storage.clear().await;
        assert_eq!(storage.slot_count().await, 0);
    }

    #[tokio::test]
    async fn test_memory_storage_clones_share_slots() {
        let storage = InMemorySnapshotStorage::new();
        let clone = storage.clone();

        let handle = tokio::spawn(async move {
            clone.write("slot", "from task").await.unwrap();
        });
        handle.await.unwrap();

        assert_eq!(
            storage.read("slot").await.unwrap().as_deref(),
            Some("from task")
        );
    }
}
