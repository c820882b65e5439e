//! SkillProfile - a named snapshot of a working set.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProfileId, Timestamp};

use super::SkillSet;

/// A saved profile. Owns its own copy of the skills, so edits to the
/// working set only reach it through explicit mirroring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillProfile {
    id: ProfileId,
    name: String,
    skills: SkillSet,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl SkillProfile {
    /// Creates a profile with a freshly generated id.
    pub fn new(name: impl Into<String>, skills: SkillSet, now: Timestamp) -> Self {
        Self {
            id: ProfileId::new(),
            name: name.into(),
            skills,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &ProfileId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Replaces the stored skills with a copy of `skills`.
    pub fn replace_skills(&mut self, skills: &SkillSet, now: Timestamp) {
        self.skills = skills.clone();
        self.touch(now);
    }

    pub fn rename(&mut self, name: impl Into<String>, now: Timestamp) {
        self.name = name.into();
        self.touch(now);
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = self.updated_at.advanced_to(now);
    }
}

/// Read-only row for profile list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub id: ProfileId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub is_current: bool,
}

impl ProfileSummary {
    pub fn from_profile(profile: &SkillProfile, is_current: bool) -> Self {
        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
            is_current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::skills::SkillIndex;
    use chrono::{DateTime, Utc};

    fn at(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn new_profile_has_equal_created_and_updated() {
        let now = Timestamp::now();
        let profile = SkillProfile::new("Me", SkillSet::default_template(), now);
        assert_eq!(profile.created_at(), now);
        assert_eq!(profile.updated_at(), now);
        assert_eq!(profile.name(), "Me");
    }

    #[test]
    fn replace_skills_copies_and_bumps_updated_at() {
        let t0 = at("2024-01-15T10:00:00Z");
        let t1 = at("2024-01-15T11:00:00Z");
        let mut profile = SkillProfile::new("Me", SkillSet::default_template(), t0);

        let mut working = SkillSet::default_template();
        working.set_value(SkillIndex::new(0).unwrap(), 9);
        profile.replace_skills(&working, t1);

        working.set_value(SkillIndex::new(0).unwrap(), 2);
        assert_eq!(profile.skills().values()[0], 9);
        assert_eq!(profile.updated_at(), t1);
        assert_eq!(profile.created_at(), t0);
    }

    #[test]
    fn rename_never_moves_updated_at_backwards() {
        let t0 = at("2024-01-15T10:00:00Z");
        let earlier = at("2024-01-14T10:00:00Z");
        let mut profile = SkillProfile::new("Me", SkillSet::default_template(), t0);

        profile.rename("Renamed", earlier);

        assert_eq!(profile.name(), "Renamed");
        assert_eq!(profile.updated_at(), t0);
    }

    #[test]
    fn profile_serializes_with_camel_case_fields() {
        let profile = SkillProfile::new("Me", SkillSet::default_template(), Timestamp::now());
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["skills"].as_array().map(Vec::len), Some(8));
    }

    #[test]
    fn summary_reflects_profile() {
        let profile = SkillProfile::new("Me", SkillSet::default_template(), Timestamp::now());
        let summary = ProfileSummary::from_profile(&profile, true);
        assert_eq!(&summary.id, profile.id());
        assert_eq!(summary.name, "Me");
        assert!(summary.is_current);
    }
}
