//! SkillSet - the eight index-aligned skills drawn on the octagon.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::skill::{
    clamp_skill_value, Skill, SkillIndex, DEFAULT_SKILL_VALUE, MAX_SKILL_VALUE, MIN_SKILL_VALUE,
    SKILL_COUNT,
};

/// Names and colors of the default template, in octagon order.
pub const DEFAULT_SKILLS: [(&str, &str); SKILL_COUNT] = [
    ("Vision", "#ef4444"),
    ("Leadership", "#f97316"),
    ("Technical", "#eab308"),
    ("Strategy", "#22c55e"),
    ("Sales", "#06b6d4"),
    ("Networking", "#3b82f6"),
    ("Resilience", "#8b5cf6"),
    ("Innovation", "#ec4899"),
];

/// Exactly eight skills. Serializes as a plain JSON array; arrays of any
/// other length are rejected on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet([Skill; SKILL_COUNT]);

impl SkillSet {
    /// The default template: fixed names and colors, every value 5.
    pub fn default_template() -> Self {
        Self(DEFAULT_SKILLS.map(|(name, color)| {
            Skill::new(name, DEFAULT_SKILL_VALUE, Some(color.to_string()))
        }))
    }

    pub fn from_skills(skills: [Skill; SKILL_COUNT]) -> Self {
        Self(skills)
    }

    pub fn get(&self, index: SkillIndex) -> &Skill {
        &self.0[index.get()]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Skill> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Skill] {
        &self.0
    }

    /// Values in octagon order, handy for chart rendering.
    pub fn values(&self) -> [i32; SKILL_COUNT] {
        std::array::from_fn(|i| self.0[i].value)
    }

    /// Sets one value, clamped to 1..=10. Returns the stored value.
    pub fn set_value(&mut self, index: SkillIndex, value: i32) -> i32 {
        let clamped = clamp_skill_value(value);
        self.0[index.get()].value = clamped;
        clamped
    }

    pub fn set_name(&mut self, index: SkillIndex, name: impl Into<String>) {
        self.0[index.get()].name = name.into();
    }

    /// Sets every value to `value`, clamped to 1..=10.
    pub fn reset_values(&mut self, value: i32) {
        let clamped = clamp_skill_value(value);
        for skill in self.0.iter_mut() {
            skill.value = clamped;
        }
    }

    /// Draws each value independently and uniformly from 1..=10.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for skill in self.0.iter_mut() {
            skill.value = rng.random_range(MIN_SKILL_VALUE..=MAX_SKILL_VALUE);
        }
    }
}

impl Default for SkillSet {
    fn default() -> Self {
        Self::default_template()
    }
}

impl Index<SkillIndex> for SkillSet {
    type Output = Skill;

    fn index(&self, index: SkillIndex) -> &Self::Output {
        self.get(index)
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a Skill;
    type IntoIter = std::slice::Iter<'a, Skill>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
