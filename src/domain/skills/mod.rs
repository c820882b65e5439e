//! Skills module - the octagon's skill records, saved profiles, and the
//! store that ties them together.
//!
//! # Module Organization
//!
//! - `skill` - one rated skill and the `SkillIndex` value object
//! - `skill_set` - exactly eight skills plus the default template
//! - `profile` - named snapshots of a working set
//! - `merge` - index-aligned averaging of two profiles
//! - `snapshot` - export/import and storage document
//! - `store` - the `ProfileStore` aggregate
//! - `events` - events the store records on every change

mod events;
mod merge;
mod profile;
mod skill;
mod skill_set;
mod snapshot;
mod store;

pub use events::StoreEvent;
pub use merge::{average_rounded, merge_profiles, merge_skill_sets, MergeError};
pub use profile::{ProfileSummary, SkillProfile};
pub use skill::{
    clamp_skill_value, Skill, SkillIndex, DEFAULT_SKILL_VALUE, MAX_SKILL_VALUE, MIN_SKILL_VALUE,
    SKILL_COUNT,
};
pub use skill_set::{SkillSet, DEFAULT_SKILLS};
pub use snapshot::{SnapshotError, StoreSnapshot};
pub use store::ProfileStore;
