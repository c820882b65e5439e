//! Event adapters - StoreSubscriber implementations.
//!
//! - **InMemoryStoreEvents** - Records events for assertions
//! - **BroadcastStoreEvents** - Fans events out to tokio broadcast receivers

mod broadcast;
mod in_memory;

pub use broadcast::BroadcastStoreEvents;
pub use in_memory::InMemoryStoreEvents;
