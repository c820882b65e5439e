//! Domain events emitted by the profile store.

use serde::Serialize;

use crate::domain::foundation::ProfileId;

/// Something observable changed in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// Working set edited; `mirrored_to` names the current profile that
    /// received the same skills.
    SkillsChanged { mirrored_to: Option<ProfileId> },

    ProfileSaved { profile_id: ProfileId, name: String },

    ProfileLoaded { profile_id: ProfileId },

    ProfileDeleted {
        profile_id: ProfileId,
        was_current: bool,
    },

    /// Working set reset to the template with no current profile.
    NewProfileStarted,

    ProfileRenamed { profile_id: ProfileId, name: String },

    SnapshotImported { profile_count: usize },

    /// A current-profile pointer referenced a missing profile and was dropped.
    StaleCurrentProfileCleared { profile_id: ProfileId },
}

impl StoreEvent {
    /// Stable event name for logs and subscribers.
    pub fn event_type(&self) -> &'static str {
        match self {
            StoreEvent::SkillsChanged { .. } => "skills.changed",
            StoreEvent::ProfileSaved { .. } => "profile.saved",
            StoreEvent::ProfileLoaded { .. } => "profile.loaded",
            StoreEvent::ProfileDeleted { .. } => "profile.deleted",
            StoreEvent::NewProfileStarted => "profile.new_started",
            StoreEvent::ProfileRenamed { .. } => "profile.renamed",
            StoreEvent::SnapshotImported { .. } => "snapshot.imported",
            StoreEvent::StaleCurrentProfileCleared { .. } => "profile.stale_cleared",
        }
    }
}
