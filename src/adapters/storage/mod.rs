//! Storage Adapters
//!
//! Implementations of the SnapshotStorage port for the durable slot.
//!
//! ## Available Adapters
//!
//! - **FileSnapshotStorage** - Stores each slot as a JSON file on disk
//! - **InMemorySnapshotStorage** - Stores slots in memory (testing/ephemeral)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSnapshotStorage, InMemorySnapshotStorage};
//!
//! // Production: file-based storage
//! let storage = FileSnapshotStorage::new("./data");
//!
//! // Testing: in-memory storage
//! let storage = InMemorySnapshotStorage::new();
//! ```

mod file_snapshot_storage;
mod in_memory_snapshot_storage;

pub use file_snapshot_storage::FileSnapshotStorage;
pub use in_memory_snapshot_storage::InMemorySnapshotStorage;
