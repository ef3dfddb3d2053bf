//! Root-cause resolution: candidates, causal ordering, roles.

use std::collections::BTreeMap;

use sleuth_core::config::ResolverConfig;
use sleuth_core::errors::ResolveError;
use sleuth_core::models::{Category, Evidence, Finding, HypothesisRole, RootCauseHypothesis};
use sleuth_core::traits::{DependencyEdge, DependencyGraphProvider};
use sleuth_observability::resolve_span;
use sleuth_observability::tracing_setup::events;

use crate::candidates;
use crate::graph::ComponentGraph;
use crate::ordering;
use crate::roles;

/// Output of one resolution.
#[derive(Debug)]
pub struct Resolution {
    /// Primary first, then Contributing, then Symptom; confidence descending
    /// within each role.
    pub hypotheses: Vec<RootCauseHypothesis>,
    /// Whether a dependency graph informed the ordering.
    pub graph_used: bool,
    /// Edges dropped because they would have closed a cycle.
    pub skipped_edges: Vec<DependencyEdge>,
    /// Set when the provider failed and ordering fell back to timing alone.
    pub graph_error: Option<ResolveError>,
}

impl Resolution {
    pub fn primary(&self) -> Option<&RootCauseHypothesis> {
        self.hypotheses.iter().find(|h| h.role == HypothesisRole::Primary)
    }
}

/// Pure function of (evidence, latest findings, dependency relation).
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve against the latest finding of each category, so a follow-up
    /// that lowered a category's confidence also lowers its hypotheses.
    pub fn resolve(
        &self,
        evidence: &[Evidence],
        findings: &BTreeMap<Category, Finding>,
        provider: Option<&dyn DependencyGraphProvider>,
    ) -> Resolution {
        let span = resolve_span!(findings.len(), evidence.len());
        let _guard = span.enter();

        let (graph, graph_error) = match provider.map(|p| p.dependencies()) {
            Some(Ok(edges)) => (Some(edges), None),
            Some(Err(err)) => {
                tracing::warn!(error = %err, "falling back to temporal ordering");
                (None, Some(err))
            }
            None => (None, None),
        };
        let (graph, skipped_edges) = match graph {
            Some(edges) => {
                let (graph, skipped) = ComponentGraph::from_edges(&edges);
                for edge in &skipped {
                    tracing::warn!(
                        upstream = %edge.upstream,
                        downstream = %edge.downstream,
                        "dependency edge rejected: would create a cycle"
                    );
                }
                (Some(graph), skipped)
            }
            None => (None, Vec::new()),
        };

        let candidates = candidates::generate(evidence, findings);
        let predecessors = ordering::predecessors(&candidates, graph.as_ref());
        let hypotheses = roles::assign(
            &candidates,
            &predecessors,
            self.config.min_primary_confidence,
            graph.is_none(),
        );

        let resolution = Resolution {
            hypotheses,
            graph_used: graph.is_some(),
            skipped_edges,
            graph_error,
        };
        events::hypotheses_resolved(
            resolution.hypotheses.len(),
            resolution.primary().map(|h| h.description.as_str()),
            resolution.graph_used,
        );
        resolution
    }
}
