//! MergeSession - the two-slot merge selector and its delayed result.
//!
//! The merge is computed as soon as it starts; publishing the result is
//! deferred by the configured animation delay. The pending publish can be
//! cancelled, and is cancelled when the session is reset or dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::foundation::ProfileId;
use crate::domain::skills::{MergeError, ProfileStore, SkillProfile, SkillSet};

/// A published merge result.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub first: ProfileId,
    pub second: ProfileId,
    pub skills: SkillSet,
}

struct PendingMerge {
    handle: JoinHandle<()>,
    cancelled: Arc<AtomicBool>,
}

/// Selection state plus the cancellable delayed publish.
pub struct MergeSession {
    first: Option<ProfileId>,
    second: Option<ProfileId>,
    result_tx: Arc<watch::Sender<Option<MergeOutcome>>>,
    pending: Option<PendingMerge>,
}

impl MergeSession {
    pub fn new() -> Self {
        let (result_tx, _) = watch::channel(None);
        Self {
            first: None,
            second: None,
            result_tx: Arc::new(result_tx),
            pending: None,
        }
    }

    pub fn first(&self) -> Option<&ProfileId> {
        self.first.as_ref()
    }

    pub fn second(&self) -> Option<&ProfileId> {
        self.second.as_ref()
    }

    /// Selects operand A. Clears B if it was the same profile.
    pub fn select_first(&mut self, id: ProfileId) -> Result<(), MergeError> {
        self.ensure_idle()?;
        if self.second.as_ref() == Some(&id) {
            self.second = None;
        }
        self.first = Some(id);
        self.result_tx.send_replace(None);
        Ok(())
    }

    /// Selects operand B, which must differ from A.
    pub fn select_second(&mut self, id: ProfileId) -> Result<(), MergeError> {
        self.ensure_idle()?;
        if self.first.as_ref() == Some(&id) {
            return Err(MergeError::SameProfile(id));
        }
        self.second = Some(id);
        self.result_tx.send_replace(None);
        Ok(())
    }

    /// Profiles offered for operand B: everything except A.
    pub fn second_candidates<'a>(&self, store: &'a ProfileStore) -> Vec<&'a SkillProfile> {
        store
            .profiles()
            .iter()
            .filter(|p| Some(p.id()) != self.first.as_ref())
            .collect()
    }

    /// True when both operands are selected, valid, and no merge is running.
    pub fn can_merge(&self, store: &ProfileStore) -> bool {
        match (&self.first, &self.second) {
            (Some(a), Some(b)) => !self.is_animating() && store.can_merge(a, b).is_ok(),
            _ => false,
        }
    }

    /// Computes the merge and schedules its publication after `delay`.
    ///
    /// Selection errors are returned before anything is scheduled.
    ///
    /// # Panics
    ///
    /// Spawns onto the current tokio runtime, so a valid merge panics when
    /// called outside one.
    pub fn start(&mut self, store: &ProfileStore, delay: Duration) -> Result<(), MergeError> {
        self.ensure_idle()?;
        let (first, second) = match (&self.first, &self.second) {
            (Some(a), Some(b)) => (a.clone(), b.clone()),
            _ => return Err(MergeError::IncompleteSelection),
        };
        let skills = store.merge(&first, &second)?;

        self.cancel();
        self.result_tx.send_replace(None);

        debug!("Merging {} with {} in {:?}", first, second, delay);

        let outcome = MergeOutcome {
            first,
            second,
            skills,
        };
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let result_tx = Arc::clone(&self.result_tx);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Checked under the channel lock so a cancel cannot interleave
            result_tx.send_if_modified(|slot| {
                if flag.load(Ordering::Acquire) {
                    return false;
                }
                *slot = Some(outcome);
                true
            });
        });

        self.pending = Some(PendingMerge { handle, cancelled });
        Ok(())
    }

    pub fn is_animating(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.handle.is_finished())
    }

    /// The published result, if the delay has elapsed.
    pub fn result(&self) -> Option<MergeOutcome> {
        self.result_tx.borrow().clone()
    }

    /// Receiver that observes each publish and clear.
    pub fn subscribe_result(&self) -> watch::Receiver<Option<MergeOutcome>> {
        self.result_tx.subscribe()
    }

    /// Waits for a pending merge to publish, then returns the result.
    pub async fn wait(&mut self) -> Option<MergeOutcome> {
        if let Some(pending) = self.pending.take() {
            // Err only when the task was aborted
            let _ = pending.handle.await;
        }
        self.result()
    }

    /// Cancels a pending publish. A published result stays visible.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancelled.store(true, Ordering::Release);
            pending.handle.abort();
            debug!("Cancelled pending merge");
        }
    }

    /// Cancels any pending merge and clears the result. Selection is kept.
    pub fn reset(&mut self) {
        self.cancel();
        self.result_tx.send_replace(None);
    }

    fn ensure_idle(&self) -> Result<(), MergeError> {
        if self.is_animating() {
            return Err(MergeError::AlreadyRunning);
        }
        Ok(())
    }
}

impl Default for MergeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MergeSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
