//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Storage key must be a plain name without path separators")]
    InvalidStorageKey,

    #[error("Merge animation delay exceeds maximum allowed (60000 ms)")]
    InvalidMergeDelay,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
