//! Profile merging: index-aligned averaging of two skill sets.
//!
//! Skill `i` of the result takes its name and color from the first operand
//! and the rounded mean of both values. Rounding is half-up
//! (`floor(x + 0.5)`), so `4 + 5` gives 5 and `5 + 6` gives 6. Because the
//! first operand always wins on name and color, merging is not commutative.

use thiserror::Error;

use crate::domain::foundation::ProfileId;

use super::{Skill, SkillProfile, SkillSet};

/// Reasons a merge cannot run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("Merging needs at least 2 saved profiles, found {available}")]
    NotEnoughProfiles { available: usize },

    #[error("Cannot merge profile {0} with itself")]
    SameProfile(ProfileId),

    #[error("Profile not found: {0}")]
    ProfileNotFound(ProfileId),

    #[error("Select two profiles to merge")]
    IncompleteSelection,

    #[error("A merge is already in progress")]
    AlreadyRunning,
}

/// Mean of two ratings, rounded half-up.
pub fn average_rounded(a: i32, b: i32) -> i32 {
    let sum = i64::from(a) + i64::from(b);
    // floor((a + b) / 2 + 0.5) == floor((a + b + 1) / 2)
    (sum + 1).div_euclid(2) as i32
}

/// Merges two skill sets. Name and color come from `first`.
pub fn merge_skill_sets(first: &SkillSet, second: &SkillSet) -> SkillSet {
    let a = first.as_slice();
    let b = second.as_slice();
    SkillSet::from_skills(std::array::from_fn(|i| Skill {
        name: a[i].name.clone(),
        value: average_rounded(a[i].value, b[i].value),
        color: a[i].color.clone(),
    }))
}

/// Merges two distinct profiles.
pub fn merge_profiles(first: &SkillProfile, second: &SkillProfile) -> Result<SkillSet, MergeError> {
    if first.id() == second.id() {
        return Err(MergeError::SameProfile(first.id().clone()));
    }
    Ok(merge_skill_sets(first.skills(), second.skills()))
}
