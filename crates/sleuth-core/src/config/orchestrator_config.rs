use serde::{Deserialize, Serialize};

use super::defaults;

/// Investigation lifecycle bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Router cycles allowed before the run aborts. Default: 16.
    pub max_iterations: u32,
    /// Wall-clock budget for evidence gathering, in seconds. Default: 300.
    pub investigation_deadline_secs: u64,
    /// Emit a state snapshot to the sink after each phase transition. Default: true.
    pub emit_snapshots: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_iterations: defaults::DEFAULT_MAX_ITERATIONS,
            investigation_deadline_secs: defaults::DEFAULT_INVESTIGATION_DEADLINE_SECS,
            emit_snapshots: defaults::DEFAULT_EMIT_SNAPSHOTS,
        }
    }
}
