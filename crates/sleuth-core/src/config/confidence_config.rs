use serde::{Deserialize, Serialize};

use super::defaults;

/// Confidence tracker policy. Latest-wins unless decay is explicitly enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Decay categories that are not re-confirmed. Default: false.
    pub decay_enabled: bool,
    /// Rounds without a fresh finding before decay applies. Default: 2.
    pub decay_after_rounds: u32,
    /// Multiplier applied per decayed round, toward 0. Default: 0.5.
    pub decay_factor: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            decay_enabled: defaults::DEFAULT_DECAY_ENABLED,
            decay_after_rounds: defaults::DEFAULT_DECAY_AFTER_ROUNDS,
            decay_factor: defaults::DEFAULT_DECAY_FACTOR,
        }
    }
}
