//! Batch merge: the one state transition that absorbs specialist results.

use chrono::{DateTime, Utc};

use super::InvestigationState;
use crate::confidence::Confidence;
use crate::models::{
    BatchOutcome, Category, Evidence, Finding, FindingStatus, RecoveredError,
    RecoveredErrorKind, TaskKey, TaskKind, TaskOutcome,
};

/// Counters describing what a merge changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub evidence_added: usize,
    pub evidence_deduplicated: usize,
    pub findings_recorded: usize,
    pub degraded: usize,
    pub duplicate_results: usize,
}

impl InvestigationState {
    /// Apply every outcome of one batch as a single transition.
    ///
    /// Outcomes are sorted by category, task key and content first so the
    /// resulting state does not depend on completion order. Results whose
    /// task key was already merged are discarded; evidence is deduplicated
    /// by fingerprint.
    pub fn merge_batch(&mut self, batch: BatchOutcome, at: DateTime<Utc>) -> MergeReport {
        let mut outcomes = batch.outcomes;
        outcomes.sort_by_cached_key(merge_order);

        let round = self.round + 1;
        let mut report = MergeReport::default();

        for outcome in outcomes {
            if self.seen_task_keys.contains(&outcome.key) {
                report.duplicate_results += 1;
                continue;
            }
            match outcome.result {
                Ok(_) => self.merge_success(outcome, round, at, &mut report),
                Err(_) => self.merge_failure(outcome, round, at, &mut report),
            }
        }

        self.round = round;
        self.phase_rounds += 1;
        if let Some(record) = self.phase_history.last_mut() {
            record.rounds += 1;
        }
        self.confidence.apply_decay(round, at);
        report
    }

    fn merge_success(
        &mut self,
        outcome: TaskOutcome,
        round: u32,
        at: DateTime<Utc>,
        report: &mut MergeReport,
    ) {
        let TaskOutcome {
            task, key, result, ..
        } = outcome;
        let Ok(specialist_report) = result else {
            return;
        };
        let category = task.category;

        let mut related = Vec::with_capacity(specialist_report.evidence.len());
        for observation in specialist_report.evidence {
            let fingerprint = observation.fingerprint(&category);
            if let Some(existing) = self.seen_fingerprints.get(&fingerprint) {
                report.evidence_deduplicated += 1;
                if !related.contains(existing) {
                    related.push(*existing);
                }
                continue;
            }
            let evidence = Evidence::from_observation(self.next_sequence, category.clone(), observation);
            self.next_sequence += 1;
            let reference = evidence.reference();
            self.seen_fingerprints.insert(fingerprint, reference);
            self.insert_evidence(evidence);
            related.push(reference);
            report.evidence_added += 1;
        }

        let confidence = Confidence::new(specialist_report.confidence);
        let finding = Finding {
            category: category.clone(),
            analysis: specialist_report.analysis,
            confidence,
            affected_components: specialist_report.affected_components,
            potential_causes: specialist_report.potential_causes,
            related_evidence: related,
            status: FindingStatus::Available,
            task_key: key.clone(),
            phase: self.phase,
            round,
        };

        self.confidence.update(&category, confidence, at, round);
        if task.kind == TaskKind::FollowUp {
            self.deep_dived.insert(category.clone());
        }
        if let Some(record) = self.phase_history.last_mut() {
            record.note_dispatched(&category);
        }
        self.findings_history.push(finding.clone());
        self.findings.insert(category, finding);
        self.seen_task_keys.insert(key);
        report.findings_recorded += 1;
    }

    fn merge_failure(
        &mut self,
        outcome: TaskOutcome,
        round: u32,
        at: DateTime<Utc>,
        report: &mut MergeReport,
    ) {
        let TaskOutcome {
            task, key, result, ..
        } = outcome;
        let Err(error) = result else {
            return;
        };
        // A repeated failure for the same task adds nothing new; a later
        // success for it is still accepted.
        if !self.failed_task_keys.insert(key.clone()) {
            report.duplicate_results += 1;
            return;
        }
        let category = task.category;

        let kind = if error.is_timeout() {
            RecoveredErrorKind::SpecialistTimeout
        } else {
            RecoveredErrorKind::SpecialistError
        };
        self.record_recovered(
            RecoveredError::new(kind, error.to_string(), at).for_category(category.clone()),
        );

        if task.kind == TaskKind::FollowUp {
            self.deep_dived.insert(category.clone());
        }
        if let Some(record) = self.phase_history.last_mut() {
            record.note_dispatched(&category);
        }

        let degraded = Finding::unavailable(category.clone(), error.to_string(), key, self.phase, round);
        self.findings_history.push(degraded.clone());
        // A failed follow-up never erases an earlier real finding.
        if !self.findings.contains_key(&category) {
            self.confidence.update(&category, Confidence::ZERO, at, round);
            self.findings.insert(category, degraded);
        }
        report.degraded += 1;
    }

    fn insert_evidence(&mut self, evidence: Evidence) {
        let key = evidence.order_key();
        let index = self.evidence.partition_point(|e| e.order_key() <= key);
        self.evidence.insert(index, evidence);
    }
}

/// Total merge order. Results sharing a task key are retries of the same
/// work: successes sort before failures, then by content.
fn merge_order(outcome: &TaskOutcome) -> (Category, TaskKey, u8, String) {
    let (rank, content) = match &outcome.result {
        Ok(report) => (0, serde_json::to_string(report).unwrap_or_default()),
        Err(error) => (1, error.to_string()),
    };
    (outcome.task.category.clone(), outcome.key.clone(), rank, content)
}
