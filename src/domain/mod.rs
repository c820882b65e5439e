//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, errors)
//! - `skills` - Skills, profiles, merging, snapshots and the profile store

pub mod foundation;
pub mod skills;
