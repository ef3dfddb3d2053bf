use serde::{Deserialize, Serialize};

use super::defaults;

/// Specialist dispatcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Overall timeout for one batch, in milliseconds.
    pub batch_timeout_ms: u64,
    /// Worker pool size. 0 means one worker per distinct category in the batch.
    pub max_concurrency: usize,
    /// Extra attempts after a retryable specialist failure. Timeouts are not
    /// retried. Default: 1.
    pub max_retries: u32,
    /// Pause between attempts, in milliseconds.
    pub retry_backoff_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            batch_timeout_ms: defaults::DEFAULT_BATCH_TIMEOUT_MS,
            max_concurrency: defaults::DEFAULT_MAX_CONCURRENCY,
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            retry_backoff_ms: defaults::DEFAULT_RETRY_BACKOFF_MS,
        }
    }
}

impl DispatchConfig {
    /// Effective pool size for a batch spanning `distinct_categories` categories.
    pub fn concurrency_for(&self, distinct_categories: usize) -> usize {
        if self.max_concurrency == 0 {
            distinct_categories.max(1)
        } else {
            self.max_concurrency
        }
    }
}
