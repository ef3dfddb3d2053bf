use sleuth_core::config::RouterConfig;
use sleuth_core::errors::RouterError;
use sleuth_core::models::{SpecialistTask, TaskKind};
use sleuth_core::InvestigationState;

use super::{advance, task_context};
use crate::decision::RouteDecision;
use crate::leader::ranked_categories;

/// Targeted follow-ups for high-confidence categories not yet deep-dived,
/// each carrying the other categories' findings for cross-correlation.
pub(super) fn route(
    state: &InvestigationState,
    config: &RouterConfig,
) -> Result<RouteDecision, RouterError> {
    if state.phase_rounds() >= config.max_follow_up_depth {
        return advance(state);
    }

    let tasks: Vec<SpecialistTask> = ranked_categories(state)
        .into_iter()
        .filter(|category| state.registered().contains(category))
        .filter(|category| !state.is_deep_dived(category))
        .filter(|category| state.confidence_of(category).exceeds(config.high_confidence_threshold))
        .map(|category| SpecialistTask {
            kind: TaskKind::FollowUp,
            context: task_context(state, &category, None),
            priority: state.confidence_of(&category).percent(),
            deadline_ms: config.task_deadline_ms,
            category,
        })
        .collect();

    if tasks.is_empty() {
        advance(state)
    } else {
        Ok(RouteDecision::dispatch(tasks))
    }
}
