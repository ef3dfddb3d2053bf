use sleuth_core::config::RouterConfig;
use sleuth_core::errors::RouterError;
use sleuth_core::models::{Category, HypothesisFocus, SpecialistTask, TaskKind};
use sleuth_core::InvestigationState;

use super::{advance, task_context};
use crate::decision::RouteDecision;
use crate::leader::ranked_categories;

/// Probe the leading hypothesis until top confidence stabilizes or the
/// iteration cap is reached.
pub(super) fn route(
    state: &InvestigationState,
    config: &RouterConfig,
) -> Result<RouteDecision, RouterError> {
    if state.iteration_count() >= config.hypothesis_iteration_cap {
        return advance(state);
    }
    if state.phase_rounds() > 0 && is_stable(state, config.stability_epsilon) {
        return advance(state);
    }

    let ranked: Vec<Category> = ranked_categories(state)
        .into_iter()
        .filter(|category| state.registered().contains(category))
        .collect();
    let Some(leader) = ranked.first() else {
        return advance(state);
    };

    let focus = focus_for(state, leader);
    let fanout = config.hypothesis_fanout.max(1);
    let tasks: Vec<SpecialistTask> = ranked
        .iter()
        .take(fanout)
        .enumerate()
        .map(|(rank, category)| SpecialistTask {
            category: category.clone(),
            kind: TaskKind::HypothesisProbe,
            context: task_context(state, category, Some(focus.clone())),
            priority: (fanout - rank) as u32,
            deadline_ms: config.task_deadline_ms,
        })
        .collect();
    Ok(RouteDecision::dispatch(tasks))
}

/// Change in top confidence between the last two merged rounds is below
/// `epsilon`.
pub fn is_stable(state: &InvestigationState, epsilon: f64) -> bool {
    let round = state.round();
    if round == 0 {
        return false;
    }
    let tracker = state.confidence();
    let current = tracker.top_at_round(round).map_or(0.0, |c| c.value());
    let previous = tracker.top_at_round(round - 1).map_or(0.0, |c| c.value());
    (current - previous).abs() < epsilon
}

fn focus_for(state: &InvestigationState, leader: &Category) -> HypothesisFocus {
    let description = state
        .findings()
        .get(leader)
        .map(|finding| {
            finding
                .potential_causes
                .first()
                .cloned()
                .unwrap_or_else(|| finding.analysis.clone())
        })
        .unwrap_or_default();
    HypothesisFocus {
        category: leader.clone(),
        description,
        confidence: state.confidence_of(leader),
        round: state.phase_rounds() + 1,
    }
}
