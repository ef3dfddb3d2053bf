use sleuth_core::config::RouterConfig;
use sleuth_core::errors::RouterError;
use sleuth_core::models::{SpecialistTask, TaskKind};
use sleuth_core::InvestigationState;

use super::{advance, task_context};
use crate::decision::{RouteDecision, TerminationReason};

/// Dispatch every registered category once, then move on.
pub(super) fn route(
    state: &InvestigationState,
    config: &RouterConfig,
) -> Result<RouteDecision, RouterError> {
    if state.registered().is_empty() {
        return Ok(RouteDecision::terminate(TerminationReason::NoSpecialists));
    }
    if state.phase_rounds() > 0 {
        return advance(state);
    }

    let profile = &state.symptoms().profile;
    let mut tasks: Vec<SpecialistTask> = state
        .registered()
        .iter()
        .map(|category| SpecialistTask {
            category: category.clone(),
            kind: TaskKind::Baseline,
            context: task_context(state, category, None),
            priority: profile.score(category),
            deadline_ms: config.task_deadline_ms,
        })
        .collect();
    tasks.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.category.cmp(&b.category)));
    Ok(RouteDecision::dispatch(tasks))
}
