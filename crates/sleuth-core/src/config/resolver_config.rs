use serde::{Deserialize, Serialize};

use super::defaults;

/// Root-cause resolver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum confidence for a `Primary` (and for `Contributing` over `Symptom`). Default: 0.5.
    pub min_primary_confidence: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_primary_confidence: defaults::DEFAULT_MIN_PRIMARY_CONFIDENCE,
        }
    }
}
