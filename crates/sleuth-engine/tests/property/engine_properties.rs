//! Property tests for the investigation loop.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::json;

use sleuth_core::errors::SpecialistFailure;
use sleuth_core::models::*;
use sleuth_core::traits::Specialist;
use sleuth_core::SleuthConfig;
use sleuth_engine::Orchestrator;
use test_fixtures::ScriptedSpecialist;

const CATEGORIES: [&str; 5] = ["network", "resource", "memory", "logs", "events"];

/// Per category: `None` fails, `Some((confidence, minute, targeted))` reports.
type Script = Vec<Option<(f64, i64, f64)>>;

fn script_strategy() -> impl Strategy<Value = Script> {
    prop::collection::vec(
        prop::option::weighted(0.7, (0.0..1.0f64, 0..60i64, 0.0..1.0f64)),
        1..=CATEGORIES.len(),
    )
}

fn specialists(script: &Script) -> Vec<Arc<dyn Specialist>> {
    script
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let category = CATEGORIES[i];
            let specialist = match entry {
                None => ScriptedSpecialist::failing(category, SpecialistFailure::permanent("down")),
                Some((confidence, minute, targeted)) => {
                    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
                        + Duration::minutes(*minute);
                    let report = |confidence: f64| {
                        SpecialistReport::new(format!("{category} analysis"), confidence)
                            .with_component(format!("{category}-component"))
                            .with_cause(format!("{category} cause"))
                            .with_evidence(Observation::new("probe", json!({ "c": category }), at))
                    };
                    ScriptedSpecialist::reporting(category, report(*confidence))
                        .with_targeted(report(*targeted))
                }
            };
            Arc::new(specialist) as Arc<dyn Specialist>
        })
        .collect()
}

fn run(script: &Script, config: SleuthConfig) -> Result<AnalysisResult, sleuth_core::SleuthError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let orchestrator = Orchestrator::builder(config)
        .specialists(specialists(script))
        .build()
        .unwrap();
    runtime.block_on(orchestrator.run_investigation("pods restarting, DB timeouts"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn loop_is_bounded_and_phases_only_advance(script in script_strategy()) {
        let config = SleuthConfig::default();
        let max = config.orchestrator.max_iterations;
        let result = run(&script, config).unwrap();

        prop_assert!(result.iterations <= max);
        let phases: Vec<Phase> = result.phase_history.iter().map(|r| r.phase).collect();
        prop_assert!(phases.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(phases.last(), Some(&Phase::Done));
        for hypothesis in &result.hypotheses {
            prop_assert_eq!(
                Some(&hypothesis.confidence),
                result.final_confidence.get(&hypothesis.category)
            );
        }
    }

    #[test]
    fn tight_iteration_budget_ends_in_done_or_fatal(
        script in script_strategy(),
        max_iterations in 1u32..10,
    ) {
        let mut config = SleuthConfig::default();
        config.orchestrator.max_iterations = max_iterations;
        match run(&script, config) {
            Ok(result) => prop_assert!(result.iterations <= max_iterations),
            Err(err) => prop_assert!(err.is_fatal()),
        }
    }

    #[test]
    fn partial_failure_still_resolves(script in script_strategy()) {
        let failed = script.iter().filter(|e| e.is_none()).count();
        let result = run(&script, SleuthConfig::default()).unwrap();

        if failed == script.len() {
            prop_assert!(result.is_insufficient_evidence());
            prop_assert!(result.hypotheses.is_empty());
        } else {
            prop_assert!(result.evidence_count > 0);
            prop_assert!(!result.hypotheses.is_empty());
            prop_assert!(result
                .phase_history
                .iter()
                .any(|r| r.phase == Phase::RootCauseDetermination));
        }
        if failed > 0 {
            prop_assert!(result.degraded);
        }
    }
}
