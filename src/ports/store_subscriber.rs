//! StoreSubscriber port - Interface for observers of store changes.
//!
//! Views register a subscriber and redraw from the store's read-only
//! projection when notified. Delivery is synchronous and in order.

use crate::domain::skills::StoreEvent;

/// Port for receiving store events.
pub trait StoreSubscriber: Send + Sync {
    /// Called once per event, after the change has been applied.
    fn notify(&self, event: &StoreEvent);
}
