//! Integration tests for durable persistence through the service layer.
//!
//! Each test opens a `ProfileService` over a real `FileSnapshotStorage` in a
//! temporary directory, drops it, and opens a second service on the same
//! slot to check what survived.

use std::sync::Arc;

use tempfile::TempDir;

use skill_octagon::adapters::{FileSnapshotStorage, InMemoryStoreEvents};
use skill_octagon::application::ProfileService;
use skill_octagon::domain::skills::{SkillIndex, SkillSet, StoreSnapshot};
use skill_octagon::ports::SnapshotStorage;

const KEY: &str = "skill-octangle-storage";

// =============================================================================
// Test Infrastructure
// =============================================================================

async fn open(dir: &TempDir) -> ProfileService {
    let storage = Arc::new(FileSnapshotStorage::new(dir.path()));
    ProfileService::open(storage, KEY).await
}

fn idx(i: usize) -> SkillIndex {
    SkillIndex::new(i).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn first_start_uses_default_template() {
    let dir = TempDir::new().unwrap();

    let service = open(&dir).await;

    assert_eq!(service.store().skills(), &SkillSet::default_template());
    assert!(service.store().profiles().is_empty());
    assert!(!dir.path().join(format!("{KEY}.json")).exists());
}

#[tokio::test]
async fn state_survives_restart() {
    let dir = TempDir::new().unwrap();

    let (kept, current) = {
        let mut service = open(&dir).await;
        service.set_skill_value(idx(0), 9).await;
        let kept = service.save_current_profile("Kept").await.unwrap();
        service.create_new_profile().await;
        service.set_skill_value(idx(7), 2).await;
        let current = service.save_current_profile("Current").await.unwrap();
        service.set_skill_name(idx(4), "Selling").await;
        (kept, current)
    };

    let service = open(&dir).await;
    let store = service.store();

    assert_eq!(store.profiles().len(), 2);
    assert_eq!(store.current_profile_id(), Some(&current));
    assert_eq!(store.profile(&kept).unwrap().skills().values()[0], 9);
    assert_eq!(store.skills().values()[7], 2);
    assert_eq!(store.skills()[idx(4)].name, "Selling");
    assert_eq!(store.current_profile().unwrap().skills(), store.skills());
}

#[tokio::test]
async fn slot_document_has_storage_shape() {
    let dir = TempDir::new().unwrap();
    let mut service = open(&dir).await;
    let id = service.save_current_profile("Shape").await.unwrap();

    let raw = FileSnapshotStorage::new(dir.path())
        .read(KEY)
        .await
        .unwrap()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value["skills"].as_array().unwrap().len(), 8);
    assert_eq!(value["profiles"][0]["name"], "Shape");
    assert!(value["profiles"][0]["createdAt"].is_string());
    assert_eq!(value["currentProfileId"], id.as_str());
    assert!(value.get("exportedAt").is_none());
}

#[tokio::test]
async fn corrupt_slot_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(format!("{KEY}.json")), "{\"skills\": 3}").unwrap();

    let mut service = open(&dir).await;
    assert_eq!(service.store().skills(), &SkillSet::default_template());

    // The next change overwrites the corrupt document
    service.randomize().await;
    let raw = std::fs::read_to_string(dir.path().join(format!("{KEY}.json"))).unwrap();
    assert!(StoreSnapshot::parse(&raw).is_ok());
}

#[tokio::test]
async fn stale_current_pointer_is_cleared_on_open() {
    let dir = TempDir::new().unwrap();
    let mut snapshot = {
        let mut service = open(&dir).await;
        service.save_current_profile("Only").await.unwrap();
        service.store().to_snapshot(None)
    };
    snapshot.current_profile_id = Some("vanished".parse().unwrap());
    std::fs::write(
        dir.path().join(format!("{KEY}.json")),
        snapshot.to_json().unwrap(),
    )
    .unwrap();

    let service = open(&dir).await;

    assert!(service.store().current_profile_id().is_none());
    assert_eq!(service.store().profiles().len(), 1);
}

#[tokio::test]
async fn import_replaces_everything_and_persists() {
    let source_dir = TempDir::new().unwrap();
    let export = {
        let mut service = open(&source_dir).await;
        service.reset_all(7).await;
        service.save_current_profile("Exported").await.unwrap();
        service.export_snapshot().unwrap()
    };

    let dir = TempDir::new().unwrap();
    {
        let mut service = open(&dir).await;
        service.save_current_profile("Replaced").await.unwrap();
        let recorder = Arc::new(InMemoryStoreEvents::new());
        service.subscribe(recorder.clone());

        service.import_snapshot(&export).await.unwrap();

        assert!(recorder.has_event("snapshot.imported"));
    }

    let service = open(&dir).await;
    assert_eq!(service.store().profiles().len(), 1);
    assert_eq!(service.store().profiles()[0].name(), "Exported");
    assert_eq!(service.store().skills().values(), [7; 8]);
}

#[tokio::test]
async fn saving_twice_keeps_both_profiles() {
    let dir = TempDir::new().unwrap();
    {
        let mut service = open(&dir).await;
        let first = service.save_current_profile("X").await.unwrap();
        let second = service.save_current_profile("X").await.unwrap();
        assert_ne!(first, second);
    }

    let service = open(&dir).await;
    let names: Vec<_> = service.store().profiles().iter().map(|p| p.name()).collect();
    assert_eq!(names, ["X", "X"]);
}
