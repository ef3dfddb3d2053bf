//! Property tests for the dependency graph and root-cause resolution.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::json;

use sleuth_causal::graph::dag_enforcement;
use sleuth_causal::{ComponentGraph, Resolver, StaticDependencyGraph};
use sleuth_core::config::{ConfidenceConfig, ResolverConfig};
use sleuth_core::models::*;
use sleuth_core::traits::{DependencyEdge, DependencyGraphProvider};
use sleuth_core::InvestigationState;

const COMPONENTS: [&str; 8] = [
    "control-plane-disk",
    "etcd",
    "kube-apiserver",
    "kubelet",
    "coredns",
    "pods",
    "services",
    "database",
];
const CATEGORIES: [&str; 5] = ["network", "resource", "memory", "cluster", "logs"];

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// (category, cause, confidence, component, minutes after t0)
type Report = (usize, usize, f64, usize, i64);

fn report_strategy() -> impl Strategy<Value = Report> {
    (0..CATEGORIES.len(), 0..3usize, 0.0..1.0f64, 0..COMPONENTS.len(), 0..30i64)
}

fn state_from(reports: &[Report]) -> InvestigationState {
    state_arriving(reports, false)
}

fn state_arriving(reports: &[Report], reversed: bool) -> InvestigationState {
    let mut state = InvestigationState::new(
        Symptoms::new("cluster degraded"),
        CATEGORIES.map(Category::new),
        ConfidenceConfig::default(),
        t0(),
    );
    let mut outcomes: Vec<TaskOutcome> = reports
        .iter()
        .enumerate()
        .map(|(i, &(category, cause, confidence, component, minutes))| {
            let report = SpecialistReport::new("analysis", confidence)
                .with_cause(format!("cause {cause}"))
                .with_component(COMPONENTS[component])
                .with_evidence(Observation::new(
                    "probe",
                    json!({ "i": i }),
                    t0() + Duration::minutes(minutes),
                ));
            let task = SpecialistTask {
                category: Category::new(CATEGORIES[category]),
                kind: TaskKind::Baseline,
                context: TaskContext {
                    // Distinct keys so every report is merged.
                    symptoms: Symptoms::new(format!("report {i}")),
                    related_findings: BTreeMap::new(),
                    time_range: None,
                    focus: None,
                },
                priority: 0,
                deadline_ms: 1_000,
            };
            TaskOutcome::new(task, Ok(report))
        })
        .collect();
    if reversed {
        outcomes.reverse();
    }
    state.merge_batch(
        BatchOutcome {
            outcomes,
            interruption: None,
        },
        t0(),
    );
    state
}

proptest! {
    #[test]
    fn graph_never_contains_a_cycle(
        pairs in prop::collection::vec((0..COMPONENTS.len(), 0..COMPONENTS.len()), 0..30)
    ) {
        let edges: Vec<_> = pairs
            .iter()
            .map(|&(u, d)| DependencyEdge::new(COMPONENTS[u], COMPONENTS[d]))
            .collect();
        let (graph, skipped) = ComponentGraph::from_edges(&edges);

        prop_assert!(dag_enforcement::find_cycles(&graph).is_empty());
        prop_assert!(graph.edge_count() + skipped.len() <= edges.len());
        for component in COMPONENTS {
            prop_assert!(!graph.is_upstream(component, component));
        }
    }

    #[test]
    fn at_most_one_primary_and_it_has_no_predecessor(
        reports in prop::collection::vec(report_strategy(), 1..8),
        use_graph in any::<bool>(),
    ) {
        let state = state_from(&reports);
        let graph = StaticDependencyGraph::kubernetes_control_plane();
        let provider: Option<&dyn DependencyGraphProvider> = use_graph.then_some(&graph as &dyn DependencyGraphProvider);
        let resolution = Resolver::new(ResolverConfig::default())
            .resolve(state.evidence(), state.findings(), provider);

        prop_assert!(!resolution.hypotheses.is_empty());
        let primaries: Vec<_> = resolution
            .hypotheses
            .iter()
            .filter(|h| h.role == HypothesisRole::Primary)
            .collect();
        prop_assert!(primaries.len() <= 1);
        if let Some(primary) = primaries.first() {
            prop_assert!(primary.causal_predecessors.is_empty());
            prop_assert!(primary.confidence.meets(0.5));
            prop_assert!(resolution.hypotheses[0].is_primary());
        }
        for hypothesis in &resolution.hypotheses {
            prop_assert!(!hypothesis.causal_predecessors.contains(&hypothesis.id));
            if hypothesis.role == HypothesisRole::Contributing {
                prop_assert!(hypothesis.confidence.meets(0.5));
            }
        }
    }

    #[test]
    fn upstream_component_always_precedes(
        upstream_confidence in 0.0..1.0f64,
        downstream_confidence in 0.0..1.0f64,
        upstream_minutes in 0..60i64,
        downstream_minutes in 0..60i64,
    ) {
        // etcd is upstream of pods regardless of which alerted first.
        let state = state_from(&[
            (3, 0, upstream_confidence, 1, upstream_minutes),
            (2, 0, downstream_confidence, 5, downstream_minutes),
        ]);
        let graph = StaticDependencyGraph::kubernetes_control_plane();
        let resolution = Resolver::default()
            .resolve(state.evidence(), state.findings(), Some(&graph));

        let cluster = resolution.hypotheses.iter().find(|h| h.category.as_str() == "cluster").unwrap();
        let memory = resolution.hypotheses.iter().find(|h| h.category.as_str() == "memory").unwrap();
        prop_assert!(cluster.causal_predecessors.is_empty());
        prop_assert_eq!(memory.causal_predecessors.clone(), vec![cluster.id.clone()]);
        prop_assert!(memory.role != HypothesisRole::Primary);
    }

    #[test]
    fn resolution_is_independent_of_arrival_order(
        reports in prop::collection::vec(report_strategy(), 1..8),
    ) {
        let graph = StaticDependencyGraph::kubernetes_control_plane();
        let resolver = Resolver::default();

        let forward = state_arriving(&reports, false);
        let reversed = state_arriving(&reports, true);
        let forward = resolver.resolve(forward.evidence(), forward.findings(), Some(&graph));
        let reversed = resolver.resolve(reversed.evidence(), reversed.findings(), Some(&graph));

        prop_assert_eq!(forward.hypotheses, reversed.hypotheses);
    }

    #[test]
    fn hypothesis_confidence_matches_latest_category_confidence(
        reports in prop::collection::vec(report_strategy(), 1..8),
    ) {
        let state = state_from(&reports);
        let resolution = Resolver::default().resolve(state.evidence(), state.findings(), None);

        for hypothesis in &resolution.hypotheses {
            prop_assert_eq!(hypothesis.confidence, state.confidence_of(&hypothesis.category));
        }
    }
}
