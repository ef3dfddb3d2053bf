//! Causal precedence between candidates.
//!
//! With a dependency graph, A precedes B when a component of A is upstream
//! of a different component of B. When they share a component and neither
//! is upstream of the other, the strictly earlier first evidence precedes.
//! Without a graph only timing is available: earlier precedes later.

use std::collections::BTreeSet;

use crate::candidates::Candidate;
use crate::graph::ComponentGraph;

/// For each candidate `i`, the indices of the candidates that precede it.
pub fn predecessors(candidates: &[Candidate], graph: Option<&ComponentGraph>) -> Vec<BTreeSet<usize>> {
    let mut result = vec![BTreeSet::new(); candidates.len()];
    for (i, later) in candidates.iter().enumerate() {
        for (j, earlier) in candidates.iter().enumerate() {
            if i != j && precedes(earlier, later, graph) {
                result[i].insert(j);
            }
        }
    }
    result
}

/// Whether `a` is a causal predecessor of `b`.
pub fn precedes(a: &Candidate, b: &Candidate, graph: Option<&ComponentGraph>) -> bool {
    let Some(graph) = graph else {
        return strictly_earlier(a, b);
    };
    match (upstream_of(graph, a, b), upstream_of(graph, b, a)) {
        (true, false) => true,
        (false, true) => false,
        // Components on both sides of each other: fall back to timing.
        (true, true) => strictly_earlier(a, b),
        (false, false) => shares_component(a, b) && strictly_earlier(a, b),
    }
}

fn upstream_of(graph: &ComponentGraph, a: &Candidate, b: &Candidate) -> bool {
    a.affected_components.iter().any(|upstream| {
        b.affected_components
            .iter()
            .any(|downstream| graph.is_upstream(upstream, downstream))
    })
}

fn shares_component(a: &Candidate, b: &Candidate) -> bool {
    !a.affected_components.is_disjoint(&b.affected_components)
}

fn strictly_earlier(a: &Candidate, b: &Candidate) -> bool {
    matches!((a.first_observed_at, b.first_observed_at), (Some(x), Some(y)) if x < y)
}
