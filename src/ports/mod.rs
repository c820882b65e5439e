//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SnapshotStorage` - Durable key-value slot holding the store document
//! - `StoreSubscriber` - Observer notified after every store change

mod snapshot_storage;
mod store_subscriber;

pub use snapshot_storage::{SnapshotStorage, SnapshotStorageError};
pub use store_subscriber::StoreSubscriber;
