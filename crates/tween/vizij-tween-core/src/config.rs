//! Runtime configuration for vizij-tween-core.

use serde::{Deserialize, Serialize};

use crate::easing::Ease;
use crate::error::AnimatorError;

/// Sizing hints and builder defaults for a [`crate::Runtime`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Animations allocated into the pool when the runtime is created.
    pub pool_prewarm: usize,
    /// Upper bound on animations retained by the pool; extras are dropped.
    pub pool_max: usize,
    /// Initial capacity hint for the active/pending lists.
    pub initial_active_capacity: usize,

    /// Duration (seconds) used by builders that never set one.
    pub default_duration: f32,
    /// Curve used by builders that never set one.
    pub default_easing: Ease,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_prewarm: 16,
            pool_max: 256,
            initial_active_capacity: 64,
            default_duration: 1.0,
            default_easing: Ease::Linear,
        }
    }
}

impl Config {
    /// Parse a config document; absent keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, AnimatorError> {
        Ok(serde_json::from_str(json)?)
    }
}
