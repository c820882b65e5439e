//! ProfileStore aggregate - the working set, saved profiles and the
//! current-profile pointer.
//!
//! Invariants:
//! - the working set always holds exactly eight skills;
//! - `current_profile_id`, when set, names a profile in `profiles`;
//! - while a profile is current, every working-set edit is mirrored into it.

use rand::Rng;

use crate::domain::foundation::{ProfileId, Timestamp, ValidationError};

use super::merge::{merge_profiles, MergeError};
use super::{
    ProfileSummary, SkillIndex, SkillProfile, SkillSet, SnapshotError, StoreEvent, StoreSnapshot,
    DEFAULT_SKILL_VALUE,
};

/// The profile state store.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    skills: SkillSet,
    profiles: Vec<SkillProfile>,
    current_profile_id: Option<ProfileId>,
    domain_events: Vec<StoreEvent>,
}

impl ProfileStore {
    /// Creates a store holding the default template and no profiles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a snapshot, dropping a dangling current pointer.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut store = Self {
            skills: snapshot.skills,
            profiles: snapshot.profiles,
            current_profile_id: snapshot.current_profile_id,
            domain_events: Vec::new(),
        };
        store.clear_stale_current();
        store
    }

    // ───────────────────────────────────────────────────────────────
    // Read-only projection
    // ───────────────────────────────────────────────────────────────

    /// The working set.
    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    /// Saved profiles in insertion order.
    pub fn profiles(&self) -> &[SkillProfile] {
        &self.profiles
    }

    pub fn current_profile_id(&self) -> Option<&ProfileId> {
        self.current_profile_id.as_ref()
    }

    pub fn current_profile(&self) -> Option<&SkillProfile> {
        self.current_profile_id
            .as_ref()
            .and_then(|id| self.profile(id))
    }

    pub fn profile(&self, id: &ProfileId) -> Option<&SkillProfile> {
        self.profiles.iter().find(|p| p.id() == id)
    }

    /// Rows for a profile list, flagging the current one.
    pub fn profile_summaries(&self) -> Vec<ProfileSummary> {
        self.profiles
            .iter()
            .map(|p| {
                let is_current = Some(p.id()) == self.current_profile_id.as_ref();
                ProfileSummary::from_profile(p, is_current)
            })
            .collect()
    }

    /// Takes accumulated domain events, clearing the internal buffer.
    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.domain_events)
    }

    // ───────────────────────────────────────────────────────────────
    // Working-set edits
    // ───────────────────────────────────────────────────────────────

    /// Sets one skill value, clamped to 1..=10. Returns the stored value.
    pub fn set_skill_value(&mut self, index: SkillIndex, value: i32) -> i32 {
        let stored = self.skills.set_value(index, value);
        self.after_skills_changed();
        stored
    }

    pub fn set_skill_name(&mut self, index: SkillIndex, name: impl Into<String>) {
        self.skills.set_name(index, name);
        self.after_skills_changed();
    }

    /// Sets every skill to `value` (clamped to 1..=10).
    pub fn reset_all(&mut self, value: i32) {
        self.skills.reset_values(value);
        self.after_skills_changed();
    }

    /// Resets every skill to the default rating of 5.
    pub fn reset_all_default(&mut self) {
        self.reset_all(DEFAULT_SKILL_VALUE);
    }

    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::rng());
    }

    pub fn randomize_with<R: Rng>(&mut self, rng: &mut R) {
        self.skills.randomize(rng);
        self.after_skills_changed();
    }

    // ───────────────────────────────────────────────────────────────
    // Profile lifecycle
    // ───────────────────────────────────────────────────────────────

    /// Saves a copy of the working set as a new profile and makes it current.
    ///
    /// Never overwrites: saving twice under one name yields two profiles.
    /// The name is trimmed and must not be blank.
    pub fn save_current_profile(&mut self, name: &str) -> Result<ProfileId, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("profile_name"));
        }

        let profile = SkillProfile::new(name, self.skills.clone(), Timestamp::now());
        let id = profile.id().clone();
        self.profiles.push(profile);
        self.current_profile_id = Some(id.clone());

        self.record(StoreEvent::ProfileSaved {
            profile_id: id.clone(),
            name: name.to_string(),
        });
        Ok(id)
    }

    /// Loads a profile into the working set. Unknown ids are a no-op.
    pub fn load_profile(&mut self, id: &ProfileId) -> bool {
        let Some(profile) = self.profile(id) else {
            return false;
        };
        self.skills = profile.skills().clone();
        self.current_profile_id = Some(id.clone());

        self.record(StoreEvent::ProfileLoaded {
            profile_id: id.clone(),
        });
        true
    }

    /// Deletes a profile. Deleting the current one resets the working set.
    /// Unknown ids are a no-op.
    pub fn delete_profile(&mut self, id: &ProfileId) -> bool {
        let Some(pos) = self.profiles.iter().position(|p| p.id() == id) else {
            return false;
        };
        self.profiles.remove(pos);

        let was_current = self.current_profile_id.as_ref() == Some(id);
        if was_current {
            self.current_profile_id = None;
            self.skills = SkillSet::default_template();
        }

        self.record(StoreEvent::ProfileDeleted {
            profile_id: id.clone(),
            was_current,
        });
        true
    }

    /// Resets the working set to the template and detaches from any profile.
    pub fn create_new_profile(&mut self) {
        self.skills = SkillSet::default_template();
        self.current_profile_id = None;
        self.record(StoreEvent::NewProfileStarted);
    }

    /// Renames the current profile. No-op without one.
    pub fn rename_current_profile(&mut self, name: impl Into<String>) -> bool {
        let Some(id) = self.current_profile_id.clone() else {
            return false;
        };
        let Some(profile) = self.profiles.iter_mut().find(|p| p.id() == &id) else {
            return false;
        };
        let name = name.into();
        profile.rename(name.clone(), Timestamp::now());

        self.record(StoreEvent::ProfileRenamed {
            profile_id: id,
            name,
        });
        true
    }

    // ───────────────────────────────────────────────────────────────
    // Persistence
    // ───────────────────────────────────────────────────────────────

    /// Snapshot of the persisted fields.
    pub fn to_snapshot(&self, exported_at: Option<Timestamp>) -> StoreSnapshot {
        StoreSnapshot {
            skills: self.skills.clone(),
            profiles: self.profiles.clone(),
            current_profile_id: self.current_profile_id.clone(),
            exported_at,
        }
    }

    /// Export document with an `exportedAt` stamp.
    pub fn export_snapshot(&self) -> Result<String, SnapshotError> {
        self.to_snapshot(Some(Timestamp::now())).to_json_pretty()
    }

    /// Replaces skills, profiles and the current pointer from an export
    /// document. On error the store is left untouched.
    pub fn import_snapshot(&mut self, input: &str) -> Result<(), SnapshotError> {
        let snapshot = StoreSnapshot::parse(input)?;

        self.skills = snapshot.skills;
        self.profiles = snapshot.profiles;
        self.current_profile_id = snapshot.current_profile_id;
        self.clear_stale_current();

        self.record(StoreEvent::SnapshotImported {
            profile_count: self.profiles.len(),
        });
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Merge
    // ───────────────────────────────────────────────────────────────

    /// Checks that `first` and `second` can be merged.
    pub fn can_merge(&self, first: &ProfileId, second: &ProfileId) -> Result<(), MergeError> {
        self.merge_operands(first, second).map(|_| ())
    }

    /// Averages two saved profiles without touching any state.
    pub fn merge(&self, first: &ProfileId, second: &ProfileId) -> Result<SkillSet, MergeError> {
        let (a, b) = self.merge_operands(first, second)?;
        merge_profiles(a, b)
    }

    fn merge_operands(
        &self,
        first: &ProfileId,
        second: &ProfileId,
    ) -> Result<(&SkillProfile, &SkillProfile), MergeError> {
        if self.profiles.len() < 2 {
            return Err(MergeError::NotEnoughProfiles {
                available: self.profiles.len(),
            });
        }
        if first == second {
            return Err(MergeError::SameProfile(first.clone()));
        }
        let a = self
            .profile(first)
            .ok_or_else(|| MergeError::ProfileNotFound(first.clone()))?;
        let b = self
            .profile(second)
            .ok_or_else(|| MergeError::ProfileNotFound(second.clone()))?;
        Ok((a, b))
    }

    // ───────────────────────────────────────────────────────────────
    // Internals
    // ───────────────────────────────────────────────────────────────

    fn after_skills_changed(&mut self) {
        let mirrored_to = self.mirror_into_current();
        self.record(StoreEvent::SkillsChanged { mirrored_to });
    }

    fn mirror_into_current(&mut self) -> Option<ProfileId> {
        let id = self.current_profile_id.clone()?;
        match self.profiles.iter().position(|p| p.id() == &id) {
            Some(pos) => {
                self.profiles[pos].replace_skills(&self.skills, Timestamp::now());
                Some(id)
            }
            None => {
                self.current_profile_id = None;
                self.record(StoreEvent::StaleCurrentProfileCleared { profile_id: id });
                None
            }
        }
    }

    fn clear_stale_current(&mut self) {
        let stale = match &self.current_profile_id {
            Some(id) if self.profile(id).is_none() => id.clone(),
            _ => return,
        };
        self.current_profile_id = None;
        self.record(StoreEvent::StaleCurrentProfileCleared { profile_id: stale });
    }

    fn record(&mut self, event: StoreEvent) {
        self.domain_events.push(event);
    }
}
