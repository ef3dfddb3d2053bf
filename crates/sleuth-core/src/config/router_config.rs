use serde::{Deserialize, Serialize};

use super::defaults;

/// Decision-tree thresholds for the router.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Categories whose confidence exceeds this get a targeted follow-up. Default: 0.6.
    pub high_confidence_threshold: f64,
    /// Maximum follow-up rounds during evidence collection. Default: 2.
    pub max_follow_up_depth: u32,
    /// Top-confidence change below which hypothesis testing is considered stable. Default: 0.02.
    pub stability_epsilon: f64,
    /// Iteration count at which hypothesis testing stops regardless of stability. Default: 8.
    pub hypothesis_iteration_cap: u32,
    /// Maximum specialists probed per hypothesis-testing round. Default: 3.
    pub hypothesis_fanout: usize,
    /// Per-task deadline handed to the dispatcher, in milliseconds. Default: 30_000.
    pub task_deadline_ms: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            high_confidence_threshold: defaults::DEFAULT_HIGH_CONFIDENCE_THRESHOLD,
            max_follow_up_depth: defaults::DEFAULT_MAX_FOLLOW_UP_DEPTH,
            stability_epsilon: defaults::DEFAULT_STABILITY_EPSILON,
            hypothesis_iteration_cap: defaults::DEFAULT_HYPOTHESIS_ITERATION_CAP,
            hypothesis_fanout: defaults::DEFAULT_HYPOTHESIS_FANOUT,
            task_deadline_ms: defaults::DEFAULT_TASK_DEADLINE_MS,
        }
    }
}
