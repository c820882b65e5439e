//! Application layer - services that coordinate the store with its ports.
//!
//! - `ProfileService` - persists and notifies after every store change
//! - `MergeSession` - two-slot merge selection with a delayed result
//! - `commands` - the line-oriented command surface used by the binary

pub mod commands;
mod merge_session;
mod profile_service;

pub use commands::{execute, Command, CommandError, Reply};
pub use merge_session::{MergeOutcome, MergeSession};
pub use profile_service::ProfileService;
