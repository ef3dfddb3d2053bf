use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Phase};

/// Classes of errors the engine recovers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveredErrorKind {
    SpecialistTimeout,
    SpecialistError,
    DependencyGraphUnavailable,
    DeadlineExceeded,
    NarratorFailed,
    SnapshotSinkFailed,
}

/// A recovered error, attached to the phase in which it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveredError {
    pub kind: RecoveredErrorKind,
    pub category: Option<Category>,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl RecoveredError {
    pub fn new(kind: RecoveredErrorKind, message: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            kind,
            category: None,
            message: message.into(),
            at,
        }
    }

    pub fn for_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

/// One entry of the phase history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub phase: Phase,
    pub entered_at: DateTime<Utc>,
    pub exited_at: Option<DateTime<Utc>>,
    /// Batches merged while in this phase.
    pub rounds: u32,
    /// Categories dispatched in this phase, in merge order, without repeats.
    pub dispatched: Vec<Category>,
    pub recovered_errors: Vec<RecoveredError>,
    /// Entered by a forced transition (deadline) rather than the router.
    pub forced: bool,
}

impl PhaseRecord {
    pub fn open(phase: Phase, at: DateTime<Utc>, forced: bool) -> Self {
        Self {
            phase,
            entered_at: at,
            exited_at: None,
            rounds: 0,
            dispatched: Vec::new(),
            recovered_errors: Vec::new(),
            forced,
        }
    }

    pub(crate) fn note_dispatched(&mut self, category: &Category) {
        if !self.dispatched.contains(category) {
            self.dispatched.push(category.clone());
        }
    }
}
