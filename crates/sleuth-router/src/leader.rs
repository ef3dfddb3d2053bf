//! Ranking of categories by current belief.

use std::cmp::Ordering;

use sleuth_core::models::Category;
use sleuth_core::InvestigationState;

/// Categories with an available finding, best first: highest confidence,
/// ties broken by earliest first evidence (earlier issues are preferred as
/// cascade candidates), then by name.
pub fn ranked_categories(state: &InvestigationState) -> Vec<Category> {
    let mut ranked: Vec<&Category> = state
        .findings()
        .iter()
        .filter(|(_, finding)| finding.is_available())
        .map(|(category, _)| category)
        .collect();

    ranked.sort_by(|a, b| {
        state
            .confidence_of(b)
            .total_cmp(&state.confidence_of(a))
            .then_with(|| earliest_first(state, a, b))
            .then_with(|| a.cmp(b))
    });
    ranked.into_iter().cloned().collect()
}

/// The leading category, if any specialist produced an available finding.
pub fn leading_category(state: &InvestigationState) -> Option<Category> {
    ranked_categories(state).into_iter().next()
}

fn earliest_first(state: &InvestigationState, a: &Category, b: &Category) -> Ordering {
    match (state.first_evidence_at(a), state.first_evidence_at(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        // Categories with evidence rank ahead of those without.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
