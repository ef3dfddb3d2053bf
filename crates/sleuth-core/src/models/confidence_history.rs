use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;
use crate::confidence::Confidence;

/// Where a confidence value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceSource {
    /// Reported by a specialist finding.
    Reported,
    /// Produced by the configured decay policy.
    Decayed,
}

/// One entry of the append-only confidence history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSnapshot {
    pub at: DateTime<Utc>,
    /// Merge round that produced the value.
    pub round: u32,
    pub category: Category,
    pub score: Confidence,
    pub source: ConfidenceSource,
}
