//! Adapters - Implementations of port interfaces.
//!
//! - `storage` - SnapshotStorage on disk and in memory
//! - `events` - StoreSubscriber recorders and broadcast fan-out

pub mod events;
pub mod storage;

pub use events::{BroadcastStoreEvents, InMemoryStoreEvents};
pub use storage::{FileSnapshotStorage, InMemorySnapshotStorage};
