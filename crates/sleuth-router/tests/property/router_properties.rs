//! Property tests for the router: referential transparency and dispatch
//! post-conditions over randomly populated states.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::json;

use sleuth_core::config::{ConfidenceConfig, RouterConfig};
use sleuth_core::models::*;
use sleuth_core::InvestigationState;
use sleuth_router::{route, RouteDecision};

const CATEGORIES: [&str; 5] = ["network", "logs", "resource", "memory", "events"];

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// Build a state in `phase_index` after merging one baseline round with the
/// given (confidence, minute offset) per category.
fn build(scores: &[(f64, i64)], phase_index: usize) -> InvestigationState {
    let mut state = InvestigationState::new(
        Symptoms::new("cluster degraded"),
        CATEGORIES.map(Category::new),
        ConfidenceConfig::default(),
        t0(),
    );
    let outcomes = scores
        .iter()
        .zip(CATEGORIES)
        .map(|((confidence, minutes), category)| {
            let task = SpecialistTask {
                category: Category::new(category),
                kind: TaskKind::Baseline,
                context: TaskContext {
                    symptoms: Symptoms::new("cluster degraded"),
                    related_findings: BTreeMap::new(),
                    time_range: None,
                    focus: None,
                },
                priority: 0,
                deadline_ms: 1_000,
            };
            let report = SpecialistReport::new("analysis", *confidence)
                .with_cause(format!("{category} cause"))
                .with_evidence(Observation::new(
                    "probe",
                    json!({ "category": category }),
                    t0() + Duration::minutes(*minutes),
                ));
            TaskOutcome::new(task, Ok(report))
        })
        .collect();
    state.merge_batch(BatchOutcome { outcomes, interruption: None }, t0());

    for _ in 0..phase_index {
        if let Some(next) = state.phase().next() {
            state.advance_phase(next, t0()).unwrap();
        }
    }
    state
}

fn scores_strategy() -> impl Strategy<Value = Vec<(f64, i64)>> {
    prop::collection::vec((0.0_f64..1.0, 0_i64..60), 0..=CATEGORIES.len())
}

proptest! {
    #[test]
    fn route_is_referentially_transparent(scores in scores_strategy(), phase in 0_usize..5) {
        let state = build(&scores, phase);
        let config = RouterConfig::default();

        let first = route(&state, &config).unwrap();
        let second = route(&state, &config).unwrap();
        let from_clone = route(&state.clone(), &config).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &from_clone);
    }

    #[test]
    fn dispatch_only_targets_registered_categories_in_dispatch_phases(
        scores in scores_strategy(),
        phase in 0_usize..5,
    ) {
        let state = build(&scores, phase);
        let decision = route(&state, &RouterConfig::default()).unwrap();

        if let RouteDecision::Dispatch { tasks } = &decision {
            prop_assert!(state.phase().allows_dispatch());
            prop_assert!(!tasks.is_empty());
            for task in tasks {
                prop_assert!(state.registered().contains(&task.category));
            }
        }
    }

    #[test]
    fn probes_never_exceed_fanout(scores in scores_strategy(), fanout in 1_usize..5) {
        let state = build(&scores, 2);
        let config = RouterConfig { hypothesis_fanout: fanout, ..RouterConfig::default() };
        let decision = route(&state, &config).unwrap();
        prop_assert!(decision.tasks().len() <= fanout);
    }
}
