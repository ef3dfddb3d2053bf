//! Condensed view of an analysis result for reports and logs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use sleuth_core::models::{AnalysisResult, Category, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStatus {
    Resolved,
    /// Resolved, but some specialist, deadline or collaborator failure was recovered.
    Degraded,
    InsufficientEvidence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestigationSummary {
    pub status: SummaryStatus,
    pub symptoms: String,
    /// Phases exited before the investigation finished, in order.
    pub phases_completed: Vec<Phase>,
    pub specialists_activated: BTreeSet<Category>,
    /// Highest final category confidence.
    pub confidence: f64,
    /// Description of the primary root cause, if one was identified.
    pub primary: Option<String>,
}

impl InvestigationSummary {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let status = if result.is_insufficient_evidence() {
            SummaryStatus::InsufficientEvidence
        } else if result.degraded {
            SummaryStatus::Degraded
        } else {
            SummaryStatus::Resolved
        };
        Self {
            status,
            symptoms: result.symptoms.clone(),
            phases_completed: result
                .phase_history
                .iter()
                .filter(|record| !record.phase.is_terminal() && record.exited_at.is_some())
                .map(|record| record.phase)
                .collect(),
            specialists_activated: result
                .phase_history
                .iter()
                .flat_map(|record| record.dispatched.iter().cloned())
                .collect(),
            confidence: result
                .final_confidence
                .values()
                .map(|c| c.value())
                .fold(0.0, f64::max),
            primary: result.primary().map(|h| h.description.clone()),
        }
    }
}

impl From<&AnalysisResult> for InvestigationSummary {
    fn from(result: &AnalysisResult) -> Self {
        Self::from_result(result)
    }
}
