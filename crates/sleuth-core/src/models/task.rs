use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, FindingSummary, Symptoms};
use crate::confidence::Confidence;

/// Why a task was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Broad first pass during initial assessment.
    Baseline,
    /// Targeted deep-dive on a high-confidence category.
    FollowUp,
    /// Confirm or refute the leading hypothesis.
    HypothesisProbe,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::FollowUp => "follow_up",
            Self::HypothesisProbe => "hypothesis_probe",
        }
    }
}

/// Window covered by the evidence collected so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// The leading hypothesis a probe should gather evidence about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisFocus {
    pub category: Category,
    pub description: String,
    pub confidence: Confidence,
    /// Hypothesis-testing round this probe belongs to.
    pub round: u32,
}

/// Read-only slice of state handed to a specialist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskContext {
    pub symptoms: Symptoms,
    /// Findings from categories other than the task's own.
    pub related_findings: BTreeMap<Category, FindingSummary>,
    pub time_range: Option<TimeRange>,
    pub focus: Option<HypothesisFocus>,
}

/// Content-derived task key. Identical tasks share a key, which is how
/// duplicate results are discarded at merge time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A unit of dispatched work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialistTask {
    pub category: Category,
    pub kind: TaskKind,
    pub context: TaskContext,
    /// Higher runs first when the worker pool is saturated.
    pub priority: u32,
    /// Budget in milliseconds once the task starts running. The dispatcher
    /// turns it into an absolute deadline; the router never reads the clock.
    pub deadline_ms: u64,
}

impl SpecialistTask {
    /// Key over category, kind and context. Priority and deadline are
    /// scheduling hints and do not change what the task asks for.
    pub fn key(&self) -> TaskKey {
        let mut hasher = blake3::Hasher::new();
        field(&mut hasher, self.category.as_str());
        field(&mut hasher, self.kind.as_str());
        field(&mut hasher, &self.context.symptoms.description);
        for (category, summary) in &self.context.related_findings {
            field(&mut hasher, category.as_str());
            field(&mut hasher, &summary.analysis);
            hasher.update(&summary.confidence.value().to_bits().to_le_bytes());
            for component in &summary.affected_components {
                field(&mut hasher, component);
            }
            for cause in &summary.potential_causes {
                field(&mut hasher, cause);
            }
        }
        if let Some(range) = &self.context.time_range {
            field(&mut hasher, &range.start.to_rfc3339());
            field(&mut hasher, &range.end.to_rfc3339());
        }
        if let Some(focus) = &self.context.focus {
            field(&mut hasher, focus.category.as_str());
            field(&mut hasher, &focus.description);
            hasher.update(&focus.round.to_le_bytes());
        }
        let hex = hasher.finalize().to_hex();
        TaskKey(hex.as_str()[..24].to_string())
    }
}

fn field(hasher: &mut blake3::Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
