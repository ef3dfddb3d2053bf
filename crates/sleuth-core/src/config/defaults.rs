// Single source of truth for all default values.

// --- Router ---
pub const DEFAULT_HIGH_CONFIDENCE_THRESHOLD: f64 = 0.6;
pub const DEFAULT_MAX_FOLLOW_UP_DEPTH: u32 = 2;
pub const DEFAULT_STABILITY_EPSILON: f64 = 0.02;
pub const DEFAULT_HYPOTHESIS_ITERATION_CAP: u32 = 8;
pub const DEFAULT_HYPOTHESIS_FANOUT: usize = 3;
pub const DEFAULT_TASK_DEADLINE_MS: u64 = 30_000;

// --- Dispatch ---
pub const DEFAULT_BATCH_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_MAX_CONCURRENCY: usize = 0; // 0 = one worker per distinct category
pub const DEFAULT_MAX_RETRIES: u32 = 1;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 200;

// --- Resolver ---
pub const DEFAULT_MIN_PRIMARY_CONFIDENCE: f64 = 0.5;

// --- Confidence ---
pub const DEFAULT_DECAY_ENABLED: bool = false;
pub const DEFAULT_DECAY_AFTER_ROUNDS: u32 = 2;
pub const DEFAULT_DECAY_FACTOR: f64 = 0.5;

// --- Orchestrator ---
pub const DEFAULT_MAX_ITERATIONS: u32 = 16;
pub const DEFAULT_INVESTIGATION_DEADLINE_SECS: u64 = 300; // 5 minutes
pub const DEFAULT_EMIT_SNAPSHOTS: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_OUTPUT: bool = true;
