//! Role assignment and output ordering.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use sleuth_core::models::{HypothesisFlag, HypothesisRole, RootCauseHypothesis};

use crate::candidates::Candidate;

/// Turn candidates into hypotheses.
///
/// Candidates without a predecessor whose confidence meets `min_primary`
/// compete for Primary: the most confident wins (ties: earliest evidence,
/// then id) and the rest become Contributing, flagged as competing root
/// causes. Every other candidate is Contributing when its confidence meets
/// `min_primary` and Symptom otherwise. Returned Primary first, then by
/// confidence descending.
pub fn assign(
    candidates: &[Candidate],
    predecessors: &[BTreeSet<usize>],
    min_primary: f64,
    reduced: bool,
) -> Vec<RootCauseHypothesis> {
    let qualifies = |c: &Candidate| c.confidence.meets(min_primary);

    let primary = (0..candidates.len())
        .filter(|&i| predecessors[i].is_empty() && qualifies(&candidates[i]))
        .min_by(|&a, &b| rank(&candidates[a], &candidates[b]));

    let mut hypotheses: Vec<RootCauseHypothesis> = candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let is_root = predecessors[i].is_empty();
            let mut flags = BTreeSet::new();
            let role = if Some(i) == primary {
                HypothesisRole::Primary
            } else if qualifies(candidate) {
                if is_root {
                    flags.insert(HypothesisFlag::CompetingRootCause);
                }
                HypothesisRole::Contributing
            } else {
                HypothesisRole::Symptom
            };
            if reduced {
                flags.insert(HypothesisFlag::RoleConfidenceReduced);
            }

            let mut causal_predecessors: Vec<_> = predecessors[i]
                .iter()
                .map(|&j| candidates[j].id.clone())
                .collect();
            causal_predecessors.sort();

            RootCauseHypothesis {
                id: candidate.id.clone(),
                description: candidate.description.clone(),
                category: candidate.category.clone(),
                confidence: candidate.confidence,
                supporting_evidence: candidate.supporting_evidence.iter().copied().collect(),
                affected_components: candidate.affected_components.clone(),
                role,
                causal_predecessors,
                first_observed_at: candidate.first_observed_at,
                flags,
            }
        })
        .collect();

    hypotheses.sort_by(|a, b| {
        a.role
            .cmp(&b.role)
            .then_with(|| b.confidence.total_cmp(&a.confidence))
            .then_with(|| earliest(a.first_observed_at, b.first_observed_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    hypotheses
}

/// Best candidate first: confidence, then earliest evidence, then id.
fn rank(a: &Candidate, b: &Candidate) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| earliest(a.first_observed_at, b.first_observed_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Earlier timestamps first; missing timestamps last.
fn earliest<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
