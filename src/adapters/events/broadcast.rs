//! Broadcast fan-out of store events over a tokio channel.
//!
//! A redraw loop holds a receiver and re-renders whenever an event
//! arrives. Lagging receivers skip the oldest events.

use tokio::sync::broadcast;

use crate::domain::skills::StoreEvent;
use crate::ports::StoreSubscriber;

const DEFAULT_CAPACITY: usize = 64;

/// Forwards every store event to all live broadcast receivers.
#[derive(Debug, Clone)]
pub struct BroadcastStoreEvents {
    sender: broadcast::Sender<StoreEvent>,
}

impl BroadcastStoreEvents {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Opens a new receiver that sees events sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastStoreEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreSubscriber for BroadcastStoreEvents {
    fn notify(&self, event: &StoreEvent) {
        // Err only means no receivers
        let _ = self.sender.send(event.clone());
    }
}
