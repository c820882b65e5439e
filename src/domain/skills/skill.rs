//! Skill record and the index value object that addresses one octagon axis.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Number of axes on the octagon.
pub const SKILL_COUNT: usize = 8;

/// Lowest meaningful rating.
pub const MIN_SKILL_VALUE: i32 = 1;

/// Highest meaningful rating.
pub const MAX_SKILL_VALUE: i32 = 10;

/// Rating given to every skill in the default template.
pub const DEFAULT_SKILL_VALUE: i32 = 5;

/// One rated skill on the octagon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub value: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Skill {
    pub fn new(name: impl Into<String>, value: i32, color: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
            color,
        }
    }

    /// Returns true if the value lies in the rendered 1..=10 range.
    pub fn is_in_range(&self) -> bool {
        (MIN_SKILL_VALUE..=MAX_SKILL_VALUE).contains(&self.value)
    }
}

/// Clamps a raw rating into 1..=10.
pub fn clamp_skill_value(value: i32) -> i32 {
    value.clamp(MIN_SKILL_VALUE, MAX_SKILL_VALUE)
}

/// Position of a skill in the working set (0 = Vision, ..., 7 = Innovation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SkillIndex(u8);

impl SkillIndex {
    /// Creates a SkillIndex, returning error if out of range.
    pub fn new(index: usize) -> Result<Self, ValidationError> {
        if index < SKILL_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(ValidationError::out_of_range(
                "skill_index",
                0,
                (SKILL_COUNT - 1) as i64,
                index as i64,
            ))
        }
    }

    /// Returns the position as a usize.
    pub fn get(&self) -> usize {
        self.0 as usize
    }

    /// Iterates over all eight positions in octagon order.
    pub fn all() -> impl Iterator<Item = SkillIndex> {
        (0..SKILL_COUNT as u8).map(SkillIndex)
    }
}

impl TryFrom<usize> for SkillIndex {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for SkillIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
