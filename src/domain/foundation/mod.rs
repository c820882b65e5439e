//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the skill octagon domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::ProfileId;
pub use timestamp::Timestamp;
