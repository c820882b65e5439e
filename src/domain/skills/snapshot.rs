//! Snapshot document - the serialized form of store state.
//!
//! The same document shape is used for the durable storage slot and for
//! user-facing export/import; exports additionally carry `exportedAt`.
//!
//! ```json
//! {
//!   "skills": [{ "name": "Vision", "value": 5, "color": "#ef4444" }, ...],
//!   "profiles": [{ "id": "...", "name": "...", "skills": [...],
//!                  "createdAt": "...", "updatedAt": "..." }],
//!   "currentProfileId": "..." | null,
//!   "exportedAt": "..."
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::foundation::{ProfileId, Timestamp};

use super::{SkillProfile, SkillSet};

/// Errors that can occur while reading or writing a snapshot document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("Failed to parse snapshot: {0}")]
    Parse(String),

    #[error("Snapshot is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Snapshot field '{0}' must be an array")]
    NotASequence(&'static str),

    #[error("Snapshot has invalid shape: {0}")]
    InvalidShape(String),

    #[error("Failed to serialize snapshot: {0}")]
    Serialization(String),
}

/// Serialized store state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub skills: SkillSet,
    pub profiles: Vec<SkillProfile>,
    #[serde(default)]
    pub current_profile_id: Option<ProfileId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<Timestamp>,
}

impl StoreSnapshot {
    /// Pretty-printed JSON, the format users copy or download.
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    /// Compact JSON for the storage slot.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    /// Parses and shape-checks a snapshot document.
    ///
    /// Requires `skills` and `profiles` to be arrays; unknown fields are
    /// ignored. Skill values are kept as-is, without clamping. An empty
    /// `currentProfileId` is read as absent.
    pub fn parse(input: &str) -> Result<Self, SnapshotError> {
        let document: Value =
            serde_json::from_str(input).map_err(|e| SnapshotError::Parse(e.to_string()))?;

        require_sequence(&document, "skills")?;
        require_sequence(&document, "profiles")?;

        let mut snapshot: StoreSnapshot = serde_json::from_value(document)
            .map_err(|e| SnapshotError::InvalidShape(e.to_string()))?;

        let mut seen = HashSet::new();
        for profile in &snapshot.profiles {
            if !seen.insert(profile.id()) {
                return Err(SnapshotError::InvalidShape(format!(
                    "duplicate profile id '{}'",
                    profile.id()
                )));
            }
        }

        if snapshot
            .current_profile_id
            .as_ref()
            .is_some_and(ProfileId::is_empty)
        {
            snapshot.current_profile_id = None;
        }

        Ok(snapshot)
    }
}

fn require_sequence(document: &Value, field: &'static str) -> Result<(), SnapshotError> {
    match document.get(field) {
        None | Some(Value::Null) => Err(SnapshotError::MissingField(field)),
        Some(Value::Array(_)) => Ok(()),
        Some(_) => Err(SnapshotError::NotASequence(field)),
    }
}
