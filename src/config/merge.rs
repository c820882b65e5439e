//! Merge display configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Longest accepted merge delay
const MAX_ANIMATION_DELAY_MS: u64 = 60_000;

/// Merge display settings
#[derive(Debug, Clone, Deserialize)]
pub struct MergeConfig {
    /// Delay before a computed merge becomes visible
    #[serde(default = "default_animation_delay_ms")]
    pub animation_delay_ms: u64,
}

impl MergeConfig {
    pub fn animation_delay(&self) -> Duration {
        Duration::from_millis(self.animation_delay_ms)
    }

    /// Validate merge configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.animation_delay_ms > MAX_ANIMATION_DELAY_MS {
            return Err(ValidationError::InvalidMergeDelay);
        }
        Ok(())
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            animation_delay_ms: default_animation_delay_ms(),
        }
    }
}

fn default_animation_delay_ms() -> u64 {
    2000
}
