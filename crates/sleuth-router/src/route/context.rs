use std::collections::BTreeMap;

use sleuth_core::models::{Category, HypothesisFocus, TaskContext};
use sleuth_core::InvestigationState;

/// Read-only context for a task in `category`: symptoms, the available
/// findings of every other category and the evidence time window.
pub fn task_context(
    state: &InvestigationState,
    category: &Category,
    focus: Option<HypothesisFocus>,
) -> TaskContext {
    let related_findings: BTreeMap<_, _> = state
        .findings()
        .iter()
        .filter(|(other, finding)| *other != category && finding.is_available())
        .map(|(other, finding)| (other.clone(), finding.summary()))
        .collect();

    TaskContext {
        symptoms: state.symptoms().clone(),
        related_findings,
        time_range: state.time_range(),
        focus,
    }
}
