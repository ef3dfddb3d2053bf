use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Category, EvidenceRef, Observation, Phase, TaskKey};
use crate::confidence::Confidence;

/// What a specialist returns for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialistReport {
    pub analysis: String,
    pub confidence: f64,
    pub affected_components: BTreeSet<String>,
    /// Most likely first.
    pub potential_causes: Vec<String>,
    pub evidence: Vec<Observation>,
}

impl SpecialistReport {
    pub fn new(analysis: impl Into<String>, confidence: f64) -> Self {
        Self {
            analysis: analysis.into(),
            confidence,
            affected_components: BTreeSet::new(),
            potential_causes: Vec::new(),
            evidence: Vec::new(),
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.affected_components.insert(component.into());
        self
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.potential_causes.push(cause.into());
        self
    }

    pub fn with_evidence(mut self, observation: Observation) -> Self {
        self.evidence.push(observation);
        self
    }
}

/// Whether a finding carries real analysis or marks a failed invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FindingStatus {
    Available,
    Unavailable { reason: String },
}

/// Structured output of one specialist invocation. Never mutated once merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub category: Category,
    pub analysis: String,
    pub confidence: Confidence,
    pub affected_components: BTreeSet<String>,
    pub potential_causes: Vec<String>,
    pub related_evidence: Vec<EvidenceRef>,
    pub status: FindingStatus,
    /// Key of the task that produced it.
    pub task_key: TaskKey,
    /// Phase and merge round in which it was recorded.
    pub phase: Phase,
    pub round: u32,
}

impl Finding {
    /// Degraded finding recorded when a specialist times out or errors.
    pub fn unavailable(
        category: Category,
        reason: impl Into<String>,
        task_key: TaskKey,
        phase: Phase,
        round: u32,
    ) -> Self {
        let reason = reason.into();
        Self {
            category,
            analysis: format!("unavailable: {reason}"),
            confidence: Confidence::ZERO,
            affected_components: BTreeSet::new(),
            potential_causes: Vec::new(),
            related_evidence: Vec::new(),
            status: FindingStatus::Unavailable { reason },
            task_key,
            phase,
            round,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == FindingStatus::Available
    }

    /// Condensed view handed to other specialists as cross-category context.
    pub fn summary(&self) -> FindingSummary {
        FindingSummary {
            analysis: self.analysis.clone(),
            confidence: self.confidence,
            affected_components: self.affected_components.clone(),
            potential_causes: self.potential_causes.clone(),
        }
    }
}

/// Read-only digest of a finding, passed inside task context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingSummary {
    pub analysis: String,
    pub confidence: Confidence,
    pub affected_components: BTreeSet<String>,
    pub potential_causes: Vec<String>,
}
