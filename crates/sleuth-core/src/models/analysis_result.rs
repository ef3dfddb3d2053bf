use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Category, ConfidenceSnapshot, InteractionRecord, Narrative, PhaseRecord, RecoveredError,
    RootCauseHypothesis,
};
use crate::confidence::Confidence;
use crate::errors::SleuthResult;

/// How the investigation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InvestigationOutcome {
    /// Hypotheses were resolved from the collected evidence.
    Resolved,
    /// No evidence was ever collected; the hypothesis list is empty on purpose.
    InsufficientEvidence { reason: String },
}

/// Final, serializable output of an investigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub investigation_id: String,
    /// Set when this run re-investigates an earlier one.
    pub parent_id: Option<String>,
    pub symptoms: String,
    pub outcome: InvestigationOutcome,
    pub phase_history: Vec<PhaseRecord>,
    pub confidence_history: Vec<ConfidenceSnapshot>,
    pub final_confidence: BTreeMap<Category, Confidence>,
    /// Primary first, then by confidence.
    pub hypotheses: Vec<RootCauseHypothesis>,
    pub primary_identified: bool,
    /// Any recovered error happened during the run.
    pub degraded: bool,
    pub evidence_count: usize,
    pub iterations: u32,
    pub narrative: Option<Narrative>,
    pub trace: Vec<InteractionRecord>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn primary(&self) -> Option<&RootCauseHypothesis> {
        self.hypotheses.iter().find(|h| h.is_primary())
    }

    pub fn is_insufficient_evidence(&self) -> bool {
        matches!(self.outcome, InvestigationOutcome::InsufficientEvidence { .. })
    }

    /// All recovered errors across phases, in phase order.
    pub fn recovered_errors(&self) -> impl Iterator<Item = &RecoveredError> {
        self.phase_history
            .iter()
            .flat_map(|record| record.recovered_errors.iter())
    }

    pub fn to_json(&self) -> SleuthResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> SleuthResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
