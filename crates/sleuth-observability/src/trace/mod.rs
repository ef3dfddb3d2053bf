//! Orchestrator ↔ specialist interaction trace.

use chrono::{DateTime, Utc};

use sleuth_core::models::{InteractionRecord, SpecialistTask, TaskOutcome};

/// Name the orchestrator uses for itself in the trace.
pub const ORCHESTRATOR: &str = "orchestrator";

/// Append-only recorder of interactions, included in the analysis result.
#[derive(Debug, Clone, Default)]
pub struct InteractionTrace {
    records: Vec<InteractionRecord>,
}

impl InteractionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        message: impl Into<String>,
        at: DateTime<Utc>,
    ) {
        self.records.push(InteractionRecord::Message {
            at,
            from: from.into(),
            to: to.into(),
            message: message.into(),
        });
    }

    pub fn action(
        &mut self,
        actor: impl Into<String>,
        action: impl Into<String>,
        details: impl Into<String>,
        at: DateTime<Utc>,
    ) {
        self.records.push(InteractionRecord::Action {
            at,
            actor: actor.into(),
            action: action.into(),
            details: details.into(),
        });
    }

    /// Orchestrator hands a task to a specialist.
    pub fn dispatched(&mut self, task: &SpecialistTask, at: DateTime<Utc>) {
        let mut message = format!("{} task", task.kind.as_str());
        if let Some(focus) = &task.context.focus {
            message.push_str(&format!(" probing {}: {}", focus.category, focus.description));
        }
        self.message(ORCHESTRATOR, task.category.as_str(), message, at);
    }

    /// A specialist answers (or fails to).
    pub fn returned(&mut self, outcome: &TaskOutcome, at: DateTime<Utc>) {
        let message = match &outcome.result {
            Ok(report) => format!(
                "{} evidence items ({}% confidence)",
                report.evidence.len(),
                (report.confidence.clamp(0.0, 1.0) * 100.0).round() as u32
            ),
            Err(error) => format!("unavailable: {error}"),
        };
        self.message(outcome.task.category.as_str(), ORCHESTRATOR, message, at);
    }

    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<InteractionRecord> {
        self.records
    }
}
