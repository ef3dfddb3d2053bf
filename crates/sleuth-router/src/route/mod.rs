//! Phase-by-phase routing policy, evaluated in fixed precedence order.

mod context;
mod evidence;
mod hypothesis;
mod initial;

use sleuth_core::config::RouterConfig;
use sleuth_core::errors::RouterError;
use sleuth_core::models::Phase;
use sleuth_core::InvestigationState;

use crate::decision::{RouteDecision, TerminationReason};

pub use context::task_context;
pub use hypothesis::is_stable;

/// Decide the next action for `state`.
///
/// Pure and deterministic. The only error is an invariant violation, which
/// means the caller kept routing a finished investigation.
pub fn route(state: &InvestigationState, config: &RouterConfig) -> Result<RouteDecision, RouterError> {
    let phase = state.phase();
    let decision = match phase {
        Phase::InitialAssessment => initial::route(state, config)?,
        Phase::EvidenceCollection => evidence::route(state, config)?,
        Phase::HypothesisTesting => hypothesis::route(state, config)?,
        // The orchestrator resolves hypotheses as it applies this transition.
        Phase::RootCauseDetermination => advance(state)?,
        Phase::RecommendationGeneration => RouteDecision::terminate(TerminationReason::Completed),
        Phase::Done => {
            return Err(state.invariant_violation("route called on a finished investigation"))
        }
    };
    check(state, decision)
}

pub(crate) fn advance(state: &InvestigationState) -> Result<RouteDecision, RouterError> {
    RouteDecision::advance(state.phase())
        .ok_or_else(|| state.invariant_violation("no phase follows the current one"))
}

/// Post-conditions every decision must satisfy.
fn check(state: &InvestigationState, decision: RouteDecision) -> Result<RouteDecision, RouterError> {
    if let RouteDecision::Dispatch { tasks } = &decision {
        if !state.phase().allows_dispatch() {
            return Err(state.invariant_violation(format!(
                "dispatch proposed in phase {}",
                state.phase()
            )));
        }
        if tasks.is_empty() {
            return Err(state.invariant_violation("empty dispatch batch"));
        }
        if let Some(task) = tasks.iter().find(|t| !state.registered().contains(&t.category)) {
            return Err(state.invariant_violation(format!(
                "task for unregistered category {}",
                task.category
            )));
        }
    }
    Ok(decision)
}
