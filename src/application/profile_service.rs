//! ProfileService - owns the store and keeps the durable slot in sync.
//!
//! Every mutating call applies the change to the in-memory store, writes
//! the slot document, then notifies subscribers. Storage failures are
//! logged and swallowed; the in-memory store stays authoritative.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::foundation::{ProfileId, ValidationError};
use crate::domain::skills::{
    MergeError, ProfileStore, SkillIndex, SkillSet, SnapshotError, StoreSnapshot,
};
use crate::ports::{SnapshotStorage, StoreSubscriber};

/// Application service wrapping a [`ProfileStore`].
pub struct ProfileService {
    store: ProfileStore,
    storage: Arc<dyn SnapshotStorage>,
    storage_key: String,
    subscribers: Vec<Arc<dyn StoreSubscriber>>,
}

impl ProfileService {
    /// Opens the service, rehydrating from the storage slot.
    ///
    /// Falls back to the default template if the slot is empty,
    /// unreadable, or holds a document that fails the shape check.
    pub async fn open(storage: Arc<dyn SnapshotStorage>, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();

        let mut store = match storage.read(&storage_key).await {
            Ok(Some(document)) => match StoreSnapshot::parse(&document) {
                Ok(snapshot) => {
                    info!(
                        "Restored {} profiles from slot '{}'",
                        snapshot.profiles.len(),
                        storage_key
                    );
                    ProfileStore::from_snapshot(snapshot)
                }
                Err(e) => {
                    warn!("Ignoring unreadable slot '{}': {}", storage_key, e);
                    ProfileStore::new()
                }
            },
            Ok(None) => {
                debug!("Slot '{}' is empty, starting from defaults", storage_key);
                ProfileStore::new()
            }
            Err(e) => {
                warn!("Failed to read slot '{}': {}", storage_key, e);
                ProfileStore::new()
            }
        };

        let repairs = store.take_events();
        for event in &repairs {
            warn!(event_type = event.event_type(), "Repaired state on load");
        }

        let service = Self {
            store,
            storage,
            storage_key,
            subscribers: Vec::new(),
        };
        if !repairs.is_empty() {
            service.persist().await;
        }
        service
    }

    /// Read-only view of the store.
    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Registers a subscriber for all subsequent events.
    pub fn subscribe(&mut self, subscriber: Arc<dyn StoreSubscriber>) {
        self.subscribers.push(subscriber);
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    // ───────────────────────────────────────────────────────────────
    // Working set
    // ───────────────────────────────────────────────────────────────

    /// Sets one value; returns the stored (clamped) value.
    pub async fn set_skill_value(&mut self, index: SkillIndex, value: i32) -> i32 {
        let stored = self.store.set_skill_value(index, value);
        if stored != value {
            warn!("Clamped skill {} value {} to {}", index, value, stored);
        }
        self.commit().await;
        stored
    }

    pub async fn set_skill_name(&mut self, index: SkillIndex, name: impl Into<String>) {
        self.store.set_skill_name(index, name);
        self.commit().await;
    }

    pub async fn reset_all(&mut self, value: i32) {
        self.store.reset_all(value);
        self.commit().await;
    }

    pub async fn randomize(&mut self) {
        self.store.randomize();
        self.commit().await;
    }

    // ───────────────────────────────────────────────────────────────
    // Profiles
    // ───────────────────────────────────────────────────────────────

    pub async fn save_current_profile(&mut self, name: &str) -> Result<ProfileId, ValidationError> {
        let id = self.store.save_current_profile(name)?;
        info!("Saved profile {} as '{}'", id, name.trim());
        self.commit().await;
        Ok(id)
    }

    /// Returns false (and changes nothing) for unknown ids.
    pub async fn load_profile(&mut self, id: &ProfileId) -> bool {
        let loaded = self.store.load_profile(id);
        if loaded {
            self.commit().await;
        } else {
            debug!("Load ignored, no profile {}", id);
        }
        loaded
    }

    /// Returns false (and changes nothing) for unknown ids.
    pub async fn delete_profile(&mut self, id: &ProfileId) -> bool {
        let deleted = self.store.delete_profile(id);
        if deleted {
            info!("Deleted profile {}", id);
            self.commit().await;
        } else {
            debug!("Delete ignored, no profile {}", id);
        }
        deleted
    }

    pub async fn create_new_profile(&mut self) {
        self.store.create_new_profile();
        self.commit().await;
    }

    pub async fn rename_current_profile(&mut self, name: impl Into<String>) -> bool {
        let renamed = self.store.rename_current_profile(name);
        if renamed {
            self.commit().await;
        }
        renamed
    }

    // ───────────────────────────────────────────────────────────────
    // Export / import / merge
    // ───────────────────────────────────────────────────────────────

    pub fn export_snapshot(&self) -> Result<String, SnapshotError> {
        self.store.export_snapshot()
    }

    /// Imports an export document. On failure nothing changes, including
    /// the storage slot.
    pub async fn import_snapshot(&mut self, input: &str) -> Result<(), SnapshotError> {
        match self.store.import_snapshot(input) {
            Ok(()) => {
                info!("Imported {} profiles", self.store.profiles().len());
                self.commit().await;
                Ok(())
            }
            Err(e) => {
                warn!("Rejected import: {}", e);
                Err(e)
            }
        }
    }

    pub fn merge(&self, first: &ProfileId, second: &ProfileId) -> Result<SkillSet, MergeError> {
        self.store.merge(first, second)
    }

    // ───────────────────────────────────────────────────────────────
    // Internals
    // ───────────────────────────────────────────────────────────────

    async fn commit(&mut self) {
        let events = self.store.take_events();
        if events.is_empty() {
            return;
        }

        self.persist().await;

        for event in &events {
            debug!(event_type = event.event_type(), "Store changed");
            for subscriber in &self.subscribers {
                subscriber.notify(event);
            }
        }
    }

    async fn persist(&self) {
        let document = match self.store.to_snapshot(None).to_json() {
            Ok(document) => document,
            Err(e) => {
                warn!("Failed to serialize store state: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.write(&self.storage_key, &document).await {
            warn!("Failed to write slot '{}': {}", self.storage_key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySnapshotStorage, InMemoryStoreEvents};
    use crate::ports::SnapshotStorageError;
    use async_trait::async_trait;

    const KEY: &str = "skill-octangle-storage";

    fn idx(i: usize) -> SkillIndex {
        SkillIndex::new(i).unwrap()
    }

    struct FailingStorage;

    #[async_trait]
    impl SnapshotStorage for FailingStorage {
        async fn read(&self, _key: &str) -> Result<Option<String>, SnapshotStorageError> {
            Err(SnapshotStorageError::IoError("offline".to_string()))
        }

        async fn write(&self, _key: &str, _value: &str) -> Result<(), SnapshotStorageError> {
            Err(SnapshotStorageError::IoError("offline".to_string()))
        }

        async fn exists(&self, _key: &str) -> Result<bool, SnapshotStorageError> {
            Ok(false)
        }
    }

    async fn service_with(storage: &InMemorySnapshotStorage) -> ProfileService {
        ProfileService::open(Arc::new(storage.clone()), KEY).await
    }

    #[tokio::test]
    async fn open_on_empty_slot_uses_defaults() {
        let storage = InMemorySnapshotStorage::new();
        let service = service_with(&storage).await;

        assert_eq!(service.store().skills(), &SkillSet::default_template());
        assert!(service.store().profiles().is_empty());
        assert!(!storage.exists(KEY).await.unwrap());
    }

    #[tokio::test]
    async fn open_on_garbage_slot_uses_defaults() {
        let storage = InMemorySnapshotStorage::with_slot(KEY, "{ not json");
        let service = service_with(&storage).await;

        assert_eq!(service.store().skills(), &SkillSet::default_template());
    }

    #[tokio::test]
    async fn open_rewrites_slot_after_clearing_stale_pointer() {
        let mut snapshot = ProfileStore::new().to_snapshot(None);
        snapshot.current_profile_id = Some("ghost".parse().unwrap());
        let storage = InMemorySnapshotStorage::with_slot(KEY, snapshot.to_json().unwrap());

        let service = service_with(&storage).await;

        assert!(service.store().current_profile_id().is_none());
        let document = storage.read(KEY).await.unwrap().unwrap();
        assert!(!document.contains("ghost"));
        assert_eq!(
            StoreSnapshot::parse(&document).unwrap().current_profile_id,
            None
        );
    }

    #[tokio::test]
    async fn open_keeps_unreadable_slot_until_next_change() {
        let storage = InMemorySnapshotStorage::with_slot(KEY, "{ not json");

        service_with(&storage).await;

        assert_eq!(storage.read(KEY).await.unwrap().as_deref(), Some("{ not json"));
    }

    #[tokio::test]
    async fn open_survives_failing_storage() {
        let mut service = ProfileService::open(Arc::new(FailingStorage), KEY).await;

        service.set_skill_value(idx(0), 8).await;

        assert_eq!(service.store().skills().values()[0], 8);
    }

    #[tokio::test]
    async fn mutations_are_written_to_slot() {
        let storage = InMemorySnapshotStorage::new();
        let mut service = service_with(&storage).await;

        let id = service.save_current_profile("Me").await.unwrap();
        service.set_skill_value(idx(2), 9).await;

        let document = storage.read(KEY).await.unwrap().unwrap();
        let snapshot = StoreSnapshot::parse(&document).unwrap();
        assert_eq!(snapshot.current_profile_id, Some(id));
        assert_eq!(snapshot.skills.values()[2], 9);
        assert_eq!(snapshot.profiles[0].skills().values()[2], 9);
        assert!(snapshot.exported_at.is_none());
    }

    #[tokio::test]
    async fn reopen_restores_previous_session() {
        let storage = InMemorySnapshotStorage::new();
        let (saved_id, skills) = {
            let mut service = service_with(&storage).await;
            service.set_skill_name(idx(1), "Coaching").await;
            let id = service.save_current_profile("Coach").await.unwrap();
            (id, service.store().skills().clone())
        };

        let reopened = service_with(&storage).await;

        assert_eq!(reopened.store().current_profile_id(), Some(&saved_id));
        assert_eq!(reopened.store().skills(), &skills);
    }

    #[tokio::test]
    async fn noop_operations_do_not_notify() {
        let storage = InMemorySnapshotStorage::new();
        let mut service = service_with(&storage).await;
        let recorder = Arc::new(InMemoryStoreEvents::new());
        service.subscribe(recorder.clone());

        let ghost: ProfileId = "ghost".parse().unwrap();
        assert!(!service.load_profile(&ghost).await);
        assert!(!service.delete_profile(&ghost).await);
        assert!(!service.rename_current_profile("Nobody").await);

        assert_eq!(recorder.event_count(), 0);
        assert!(!storage.exists(KEY).await.unwrap());
    }

    #[tokio::test]
    async fn subscribers_see_each_change() {
        let storage = InMemorySnapshotStorage::new();
        let mut service = service_with(&storage).await;
        let recorder = Arc::new(InMemoryStoreEvents::new());
        service.subscribe(recorder.clone());

        let id = service.save_current_profile("Me").await.unwrap();
        service.randomize().await;
        service.delete_profile(&id).await;

        assert!(recorder.has_event("profile.saved"));
        assert!(recorder.has_event("skills.changed"));
        assert!(recorder.has_event("profile.deleted"));
        assert_eq!(recorder.event_count(), 3);
    }

    #[tokio::test]
    async fn rejected_import_keeps_slot_and_state() {
        let storage = InMemorySnapshotStorage::new();
        let mut service = service_with(&storage).await;
        service.save_current_profile("Keep").await.unwrap();
        let slot_before = storage.read(KEY).await.unwrap();

        let result = service.import_snapshot(r#"{"skills": "not-an-array"}"#).await;

        assert!(result.is_err());
        assert_eq!(storage.read(KEY).await.unwrap(), slot_before);
        assert_eq!(service.store().profiles().len(), 1);
    }

    #[tokio::test]
    async fn clamped_value_is_reported() {
        let storage = InMemorySnapshotStorage::new();
        let mut service = service_with(&storage).await;

        assert_eq!(service.set_skill_value(idx(0), 15).await, 10);
    }
}
