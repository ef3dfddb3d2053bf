//! Structured log events for investigation milestones.
//!
//! Each function emits a `tracing` event with structured fields.

use sleuth_core::models::{Category, Phase, RecoveredError};

/// Log an investigation start.
pub fn investigation_started(investigation_id: &str, specialists: usize) {
    tracing::info!(
        event = "investigation_started",
        investigation_id = %investigation_id,
        specialists = specialists,
        "investigation started"
    );
}

/// Log a phase transition.
pub fn phase_advanced(from: Phase, to: Phase, forced: bool) {
    tracing::info!(
        event = "phase_advanced",
        from = %from,
        to = %to,
        forced = forced,
        "phase advanced"
    );
}

/// Log a dispatched batch.
pub fn batch_dispatched(phase: Phase, categories: &[Category]) {
    tracing::info!(
        event = "batch_dispatched",
        phase = %phase,
        categories = ?categories,
        "batch dispatched"
    );
}

/// Log a merged batch.
pub fn batch_merged(round: u32, findings: usize, evidence_added: usize, degraded: usize) {
    tracing::info!(
        event = "batch_merged",
        round = round,
        findings = findings,
        evidence_added = evidence_added,
        degraded = degraded,
        "batch merged"
    );
}

/// Log a specialist that timed out or failed.
pub fn specialist_degraded(category: &Category, reason: &str) {
    tracing::warn!(
        event = "specialist_degraded",
        category = %category,
        reason = %reason,
        "specialist degraded to zero confidence"
    );
}

/// Log any other recovered error.
pub fn error_recovered(error: &RecoveredError) {
    tracing::warn!(
        event = "error_recovered",
        kind = ?error.kind,
        category = ?error.category,
        message = %error.message,
        "recovered error"
    );
}

/// Log the investigation deadline firing.
pub fn deadline_exceeded(phase: Phase, elapsed_secs: u64) {
    tracing::warn!(
        event = "deadline_exceeded",
        phase = %phase,
        elapsed_secs = elapsed_secs,
        "investigation deadline exceeded, forcing root-cause determination"
    );
}

/// Log resolved hypotheses.
pub fn hypotheses_resolved(count: usize, primary: Option<&str>, graph_available: bool) {
    tracing::info!(
        event = "hypotheses_resolved",
        count = count,
        primary = ?primary,
        graph_available = graph_available,
        "hypotheses resolved"
    );
}

/// Log investigation completion.
pub fn investigation_completed(investigation_id: &str, iterations: u32, degraded: bool) {
    tracing::info!(
        event = "investigation_completed",
        investigation_id = %investigation_id,
        iterations = iterations,
        degraded = degraded,
        "investigation completed"
    );
}
