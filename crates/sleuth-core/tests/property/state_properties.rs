//! Property tests for the investigation state: idempotent merge, order
//! independence of merge, and monotonic phase.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::json;

use sleuth_core::config::ConfidenceConfig;
use sleuth_core::errors::DispatchError;
use sleuth_core::models::*;
use sleuth_core::InvestigationState;

const CATEGORIES: [&str; 4] = ["network", "logs", "resource", "memory"];

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn fresh() -> InvestigationState {
    InvestigationState::new(
        Symptoms::new("cluster degraded"),
        CATEGORIES.map(Category::new),
        ConfidenceConfig::default(),
        t0(),
    )
}

/// (category index, succeeded, confidence, evidence offsets in seconds)
type OutcomeSpec = (usize, bool, f64, Vec<i64>);

fn outcome(spec: &OutcomeSpec) -> TaskOutcome {
    let (index, succeeded, confidence, offsets) = spec;
    let category = Category::new(CATEGORIES[*index]);
    let task = SpecialistTask {
        category: category.clone(),
        kind: TaskKind::Baseline,
        context: TaskContext {
            symptoms: Symptoms::new("cluster degraded"),
            related_findings: BTreeMap::new(),
            time_range: None,
            focus: None,
        },
        priority: 0,
        deadline_ms: 500,
    };
    if *succeeded {
        let mut report = SpecialistReport::new("analysis", *confidence).with_cause("cause");
        for offset in offsets {
            report = report.with_evidence(Observation::new(
                "probe",
                json!({ "offset": offset }),
                t0() + Duration::seconds(*offset),
            ));
        }
        TaskOutcome::new(task, Ok(report))
    } else {
        TaskOutcome::new(
            task,
            Err(DispatchError::SpecialistFailed {
                category,
                attempts: 1,
                message: "failed".into(),
            }),
        )
    }
}

fn outcome_strategy() -> impl Strategy<Value = Vec<OutcomeSpec>> {
    let spec = (
        0..CATEGORIES.len(),
        any::<bool>(),
        0.0_f64..1.0,
        prop::collection::vec(0_i64..600, 0..4),
    );
    prop::collection::vec(spec, 1..6)
}

fn sizes(state: &InvestigationState) -> (usize, usize, usize) {
    (
        state.evidence().len(),
        state.findings().len(),
        state.findings_history().len(),
    )
}

proptest! {
    #[test]
    fn merging_a_batch_twice_equals_merging_it_once(specs in outcome_strategy()) {
        let outcomes: Vec<_> = specs.iter().map(outcome).collect();

        let mut once = fresh();
        once.merge_batch(BatchOutcome { outcomes: outcomes.clone(), interruption: None }, t0());

        let mut twice = fresh();
        twice.merge_batch(BatchOutcome { outcomes: outcomes.clone(), interruption: None }, t0());
        twice.merge_batch(BatchOutcome { outcomes, interruption: None }, t0());

        prop_assert_eq!(sizes(&once), sizes(&twice));
    }

    #[test]
    fn merge_order_does_not_change_the_result(specs in outcome_strategy()) {
        let outcomes: Vec<_> = specs.iter().map(outcome).collect();
        let mut reversed = outcomes.clone();
        reversed.reverse();

        let mut forward = fresh();
        forward.merge_batch(BatchOutcome { outcomes, interruption: None }, t0());
        let mut backward = fresh();
        backward.merge_batch(BatchOutcome { outcomes: reversed, interruption: None }, t0());

        prop_assert_eq!(forward.evidence(), backward.evidence());
        prop_assert_eq!(forward.findings(), backward.findings());
        prop_assert_eq!(forward.confidence().current(), backward.confidence().current());
    }

    #[test]
    fn evidence_stays_time_ordered(specs in outcome_strategy()) {
        let mut state = fresh();
        for spec in &specs {
            state.merge_batch(BatchOutcome { outcomes: vec![outcome(spec)], interruption: None }, t0());
        }
        let keys: Vec<_> = state.evidence().iter().map(|e| e.order_key()).collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn phase_never_moves_backwards(ops in prop::collection::vec((any::<bool>(), 0_usize..6), 0..20)) {
        const PHASES: [Phase; 6] = [
            Phase::InitialAssessment,
            Phase::EvidenceCollection,
            Phase::HypothesisTesting,
            Phase::RootCauseDetermination,
            Phase::RecommendationGeneration,
            Phase::Done,
        ];
        let mut state = fresh();
        let mut previous = state.phase();
        for (force, target) in ops {
            let to = PHASES[target];
            if force {
                state.force_phase(to, t0());
            } else {
                let _ = state.advance_phase(to, t0());
            }
            prop_assert!(state.phase() >= previous);
            previous = state.phase();
        }
    }
}
