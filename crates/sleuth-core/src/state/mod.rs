//! The single mutable aggregate for one investigation.
//!
//! Mutation happens only through the transition functions on
//! [`InvestigationState`]: iteration bookkeeping, phase advancement, batch
//! merge and hypothesis resolution. Everything else reads.

mod merge;
mod tracker;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub use merge::MergeReport;
pub use tracker::ConfidenceTracker;

use crate::config::ConfidenceConfig;
use crate::confidence::Confidence;
use crate::errors::{ResolveError, RouterError, SleuthError, SleuthResult};
use crate::models::{
    Category, Evidence, EvidenceRef, Finding, Phase, PhaseRecord, RecoveredError,
    RootCauseHypothesis, Symptoms, TaskKey, TimeRange,
};

/// Investigation state. Owned exclusively by the orchestrator; specialists
/// only ever see read-only slices of it through task context.
#[derive(Debug, Clone, Serialize)]
pub struct InvestigationState {
    id: Uuid,
    parent_id: Option<Uuid>,
    phase: Phase,
    symptoms: Symptoms,
    registered: BTreeSet<Category>,
    /// Ordered by `(observed_at, sequence)`.
    evidence: Vec<Evidence>,
    findings: BTreeMap<Category, Finding>,
    findings_history: Vec<Finding>,
    confidence: ConfidenceTracker,
    iteration_count: u32,
    /// Batches merged since entering the current phase.
    phase_rounds: u32,
    /// Batches merged over the whole investigation.
    round: u32,
    deep_dived: BTreeSet<Category>,
    hypotheses: Option<Vec<RootCauseHypothesis>>,
    phase_history: Vec<PhaseRecord>,
    #[serde(skip)]
    seen_task_keys: BTreeSet<TaskKey>,
    #[serde(skip)]
    failed_task_keys: BTreeSet<TaskKey>,
    #[serde(skip)]
    seen_fingerprints: BTreeMap<String, EvidenceRef>,
    next_sequence: u64,
    created_at: DateTime<Utc>,
}

impl InvestigationState {
    pub fn new(
        symptoms: Symptoms,
        registered: impl IntoIterator<Item = Category>,
        confidence_policy: ConfidenceConfig,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_id: None,
            phase: Phase::InitialAssessment,
            symptoms,
            registered: registered.into_iter().collect(),
            evidence: Vec::new(),
            findings: BTreeMap::new(),
            findings_history: Vec::new(),
            confidence: ConfidenceTracker::new(confidence_policy),
            iteration_count: 0,
            phase_rounds: 0,
            round: 0,
            deep_dived: BTreeSet::new(),
            hypotheses: None,
            phase_history: vec![PhaseRecord::open(Phase::InitialAssessment, at, false)],
            seen_task_keys: BTreeSet::new(),
            failed_task_keys: BTreeSet::new(),
            seen_fingerprints: BTreeMap::new(),
            next_sequence: 0,
            created_at: at,
        }
    }

    /// Link to a prior investigation. Re-investigation is the only way back
    /// to an earlier phase, and it always happens in a fresh state.
    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn parent_id(&self) -> Option<Uuid> {
        self.parent_id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn symptoms(&self) -> &Symptoms {
        &self.symptoms
    }

    pub fn registered(&self) -> &BTreeSet<Category> {
        &self.registered
    }

    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }

    pub fn findings(&self) -> &BTreeMap<Category, Finding> {
        &self.findings
    }

    /// Latest finding per category, carrying the category's current tracked
    /// confidence. Differs from [`Self::findings`] only once decay has
    /// lowered a score since the category last reported.
    pub fn current_findings(&self) -> BTreeMap<Category, Finding> {
        self.findings
            .iter()
            .map(|(category, finding)| {
                let mut finding = finding.clone();
                finding.confidence = self.confidence_of(category);
                (category.clone(), finding)
            })
            .collect()
    }

    pub fn findings_history(&self) -> &[Finding] {
        &self.findings_history
    }

    pub fn confidence(&self) -> &ConfidenceTracker {
        &self.confidence
    }

    pub fn iteration_count(&self) -> u32 {
        self.iteration_count
    }

    pub fn phase_rounds(&self) -> u32 {
        self.phase_rounds
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_deep_dived(&self, category: &Category) -> bool {
        self.deep_dived.contains(category)
    }

    pub fn hypotheses(&self) -> Option<&[RootCauseHypothesis]> {
        self.hypotheses.as_deref()
    }

    pub fn phase_history(&self) -> &[PhaseRecord] {
        &self.phase_history
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Current confidence for a category, zero when never reported.
    pub fn confidence_of(&self, category: &Category) -> Confidence {
        self.confidence.get(category).unwrap_or(Confidence::ZERO)
    }

    /// Earliest observation timestamp among a category's evidence.
    pub fn first_evidence_at(&self, category: &Category) -> Option<DateTime<Utc>> {
        // Evidence is time-ordered, so the first match is the earliest.
        self.evidence
            .iter()
            .find(|e| &e.category == category)
            .map(|e| e.observed_at)
    }

    /// Window spanned by the evidence collected so far.
    pub fn time_range(&self) -> Option<TimeRange> {
        let first = self.evidence.first()?;
        let last = self.evidence.last()?;
        Some(TimeRange {
            start: first.observed_at,
            end: last.observed_at,
        })
    }

    pub fn evidence_by_ref(&self, reference: EvidenceRef) -> Option<&Evidence> {
        self.evidence.iter().find(|e| e.reference() == reference)
    }

    /// True once any error was recovered or a phase was forced.
    pub fn has_degradation(&self) -> bool {
        self.phase_history
            .iter()
            .any(|r| r.forced || !r.recovered_errors.is_empty())
    }

    /// JSON dump used in fatal diagnostics.
    pub fn diagnostic_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|err| format!("{{\"diagnostic_error\":\"{err}\"}}"))
    }

    /// Start a router cycle. Fails once `max` cycles have already run.
    pub fn begin_iteration(&mut self, max: u32) -> SleuthResult<u32> {
        if self.iteration_count >= max {
            return Err(SleuthError::IterationLimitExceeded { max });
        }
        self.iteration_count += 1;
        Ok(self.iteration_count)
    }

    /// Move to the next phase. Only single forward steps are accepted.
    pub fn advance_phase(&mut self, to: Phase, at: DateTime<Utc>) -> Result<(), RouterError> {
        if self.phase.next() != Some(to) {
            return Err(self.invariant_violation(format!(
                "illegal transition {} -> {}",
                self.phase, to
            )));
        }
        self.enter(to, at, false);
        Ok(())
    }

    /// Jump forward to `to`, skipping intermediate phases. Used when the
    /// investigation deadline fires. Returns false when already at or past `to`.
    pub fn force_phase(&mut self, to: Phase, at: DateTime<Utc>) -> bool {
        if to <= self.phase {
            return false;
        }
        self.enter(to, at, true);
        true
    }

    fn enter(&mut self, to: Phase, at: DateTime<Utc>, forced: bool) {
        if let Some(record) = self.phase_history.last_mut() {
            record.exited_at = Some(at);
        }
        self.phase = to;
        self.phase_rounds = 0;
        let mut record = PhaseRecord::open(to, at, forced);
        if to.is_terminal() {
            record.exited_at = Some(at);
        }
        self.phase_history.push(record);
    }

    /// Attach a recovered error to the active phase record.
    pub fn record_recovered(&mut self, error: RecoveredError) {
        if let Some(record) = self.phase_history.last_mut() {
            record.recovered_errors.push(error);
        }
    }

    /// Store the resolved hypotheses. They are created exactly once.
    pub fn set_hypotheses(
        &mut self,
        hypotheses: Vec<RootCauseHypothesis>,
    ) -> Result<(), ResolveError> {
        if self.hypotheses.is_some() {
            return Err(ResolveError::HypothesesAlreadyResolved {
                investigation_id: self.id.to_string(),
            });
        }
        self.hypotheses = Some(hypotheses);
        Ok(())
    }

    /// Build the fatal error for an impossible router situation.
    pub fn invariant_violation(&self, reason: impl Into<String>) -> RouterError {
        RouterError::InvariantViolation {
            phase: self.phase,
            iteration: self.iteration_count,
            reason: reason.into(),
            diagnostic: self.diagnostic_json(),
        }
    }
}
