//! In-memory store event recorder.
//!
//! Captures every delivered event for assertions and headless inspection.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::skills::StoreEvent;
use crate::ports::StoreSubscriber;

/// Records delivered events in arrival order.
///
/// # Example
///
/// ```ignore
/// let recorder = Arc::new(InMemoryStoreEvents::new());
/// service.subscribe(recorder.clone());
///
/// service.save_current_profile("Me").await?;
/// assert!(recorder.has_event("profile.saved"));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStoreEvents {
    received: Mutex<Vec<StoreEvent>>,
}

impl InMemoryStoreEvents {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all received events.
    pub fn events(&self) -> Vec<StoreEvent> {
        self.lock().clone()
    }

    /// Returns count of received events.
    pub fn event_count(&self) -> usize {
        self.lock().len()
    }

    /// Checks if an event with the given type name was received.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.lock().iter().any(|e| e.event_type() == event_type)
    }

    /// Clears all received events.
    pub fn clear(&self) {
        self.lock().clear();
    }

    // Poisoning is ignored; the Vec stays valid
    fn lock(&self) -> MutexGuard<'_, Vec<StoreEvent>> {
        self.received.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StoreSubscriber for InMemoryStoreEvents {
    fn notify(&self, event: &StoreEvent) {
        self.lock().push(event.clone());
    }
}
