use std::collections::BTreeMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;

use sleuth_core::config::ConfidenceConfig;
use sleuth_core::errors::{DispatchError, ResolveError, SleuthError};
use sleuth_core::models::*;
use sleuth_core::{Confidence, InvestigationState};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn state() -> InvestigationState {
    InvestigationState::new(
        Symptoms::new("pods restarting, DB timeouts"),
        ["network", "logs", "resource"].map(Category::new),
        ConfidenceConfig::default(),
        t0(),
    )
}

fn task(category: &str, kind: TaskKind) -> SpecialistTask {
    SpecialistTask {
        category: Category::new(category),
        kind,
        context: TaskContext {
            symptoms: Symptoms::new("pods restarting, DB timeouts"),
            related_findings: BTreeMap::new(),
            time_range: None,
            focus: None,
        },
        priority: 0,
        deadline_ms: 1_000,
    }
}

fn ok(category: &str, confidence: f64, at: DateTime<Utc>) -> TaskOutcome {
    let report = SpecialistReport::new(format!("{category} analysis"), confidence)
        .with_component(format!("{category}-component"))
        .with_cause(format!("{category} cause"))
        .with_evidence(Observation::new("probe", json!({ "category": category }), at));
    TaskOutcome::new(task(category, TaskKind::Baseline), Ok(report))
}

fn failed(category: &str) -> TaskOutcome {
    let err = DispatchError::SpecialistTimeout {
        category: Category::new(category),
        elapsed_ms: 1_000,
    };
    TaskOutcome::new(task(category, TaskKind::Baseline), Err(err))
}

fn batch(outcomes: Vec<TaskOutcome>) -> BatchOutcome {
    BatchOutcome {
        outcomes,
        interruption: None,
    }
}

#[test]
fn new_state_starts_in_initial_assessment() {
    let state = state();
    assert_eq!(state.phase(), Phase::InitialAssessment);
    assert_eq!(state.phase_history().len(), 1);
    assert_eq!(state.iteration_count(), 0);
    assert!(state.evidence().is_empty());
    assert!(state.hypotheses().is_none());
    assert!(!state.has_degradation());
}

#[test]
fn merge_records_findings_evidence_and_confidence() {
    let mut state = state();
    let report = state.merge_batch(
        batch(vec![ok("network", 0.85, t0()), ok("logs", 0.4, t0())]),
        t0(),
    );

    assert_eq!(report.findings_recorded, 2);
    assert_eq!(report.evidence_added, 2);
    assert_eq!(state.findings().len(), 2);
    assert_eq!(state.evidence().len(), 2);
    assert_eq!(state.confidence_of(&Category::new("network")), Confidence::new(0.85));
    assert_eq!(state.round(), 1);
    assert_eq!(state.phase_rounds(), 1);
}

#[test]
fn merging_the_same_batch_twice_adds_nothing() {
    let mut state = state();
    let outcomes = vec![ok("network", 0.85, t0()), failed("logs")];
    state.merge_batch(batch(outcomes.clone()), t0());
    let evidence = state.evidence().len();
    let findings = state.findings().len();
    let history = state.findings_history().len();

    let report = state.merge_batch(batch(outcomes), t0());
    assert_eq!(report.duplicate_results, 2);
    assert_eq!(state.evidence().len(), evidence);
    assert_eq!(state.findings().len(), findings);
    assert_eq!(state.findings_history().len(), history);
}

#[test]
fn evidence_is_ordered_by_observation_time_then_sequence() {
    let mut state = state();
    let late = ok("network", 0.5, t0() + Duration::minutes(5));
    let early = ok("resource", 0.7, t0());
    state.merge_batch(batch(vec![late, early]), t0());

    let times: Vec<_> = state.evidence().iter().map(|e| e.observed_at).collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(state.evidence()[0].category.as_str(), "resource");
    assert_eq!(
        state.first_evidence_at(&Category::new("network")),
        Some(t0() + Duration::minutes(5))
    );
}

#[test]
fn failure_degrades_category_to_zero_and_records_recovered_error() {
    let mut state = state();
    let report = state.merge_batch(batch(vec![ok("network", 0.8, t0()), failed("logs")]), t0());

    assert_eq!(report.degraded, 1);
    let logs = &state.findings()[&Category::new("logs")];
    assert!(!logs.is_available());
    assert_eq!(logs.confidence, Confidence::ZERO);
    assert!(state.has_degradation());

    let errors = &state.phase_history()[0].recovered_errors;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, RecoveredErrorKind::SpecialistTimeout);
    assert_eq!(errors[0].category, Some(Category::new("logs")));
}

#[test]
fn failed_follow_up_keeps_the_earlier_real_finding() {
    let mut state = state();
    state.merge_batch(batch(vec![ok("network", 0.8, t0())]), t0());

    let err = DispatchError::SpecialistFailed {
        category: Category::new("network"),
        attempts: 2,
        message: "connection refused".into(),
    };
    let follow_up = TaskOutcome::new(task("network", TaskKind::FollowUp), Err(err));
    state.merge_batch(batch(vec![follow_up]), t0());

    let network = &state.findings()[&Category::new("network")];
    assert!(network.is_available());
    assert_eq!(state.confidence_of(&Category::new("network")), Confidence::new(0.8));
    assert!(state.is_deep_dived(&Category::new("network")));
    assert_eq!(state.findings_history().len(), 2);
}

#[test]
fn identical_observations_are_deduplicated_across_tasks() {
    let mut state = state();
    let observation = Observation::new("kubectl-events", json!({ "reason": "Evicted" }), t0());
    let baseline = TaskOutcome::new(
        task("network", TaskKind::Baseline),
        Ok(SpecialistReport::new("first", 0.5).with_evidence(observation.clone())),
    );
    let follow_up = TaskOutcome::new(
        task("network", TaskKind::FollowUp),
        Ok(SpecialistReport::new("second", 0.7).with_evidence(observation)),
    );

    state.merge_batch(batch(vec![baseline]), t0());
    let report = state.merge_batch(batch(vec![follow_up]), t0());

    assert_eq!(report.evidence_deduplicated, 1);
    assert_eq!(state.evidence().len(), 1);
    let latest = &state.findings()[&Category::new("network")];
    assert_eq!(latest.analysis, "second");
    assert_eq!(latest.related_evidence, vec![EvidenceRef(0)]);
}

#[test]
fn phase_only_advances_one_step_forward() {
    let mut state = state();
    state.advance_phase(Phase::EvidenceCollection, t0()).unwrap();
    assert_eq!(state.phase(), Phase::EvidenceCollection);

    assert!(state.advance_phase(Phase::InitialAssessment, t0()).is_err());
    assert!(state.advance_phase(Phase::RootCauseDetermination, t0()).is_err());
    assert_eq!(state.phase(), Phase::EvidenceCollection);
    assert_eq!(state.phase_history().len(), 2);
    assert!(state.phase_history()[0].exited_at.is_some());
}

#[test]
fn forced_phase_skips_ahead_and_marks_degradation() {
    let mut state = state();
    assert!(state.force_phase(Phase::RootCauseDetermination, t0()));
    assert_eq!(state.phase(), Phase::RootCauseDetermination);
    assert!(state.phase_history().last().unwrap().forced);
    assert!(state.has_degradation());

    assert!(!state.force_phase(Phase::EvidenceCollection, t0()));
    assert_eq!(state.phase(), Phase::RootCauseDetermination);
}

#[test]
fn iteration_limit_is_fatal() {
    let mut state = state();
    assert_eq!(state.begin_iteration(2).unwrap(), 1);
    assert_eq!(state.begin_iteration(2).unwrap(), 2);
    let err = state.begin_iteration(2).unwrap_err();
    assert!(matches!(err, SleuthError::IterationLimitExceeded { max: 2 }));
    assert!(err.is_fatal());
}

#[test]
fn hypotheses_are_set_exactly_once() {
    let mut state = state();
    state.set_hypotheses(Vec::new()).unwrap();
    let err = state.set_hypotheses(Vec::new()).unwrap_err();
    assert!(matches!(err, ResolveError::HypothesesAlreadyResolved { .. }));
}

#[test]
fn reinvestigation_links_to_parent() {
    let prior = state();
    let next = state().with_parent(prior.id());
    assert_eq!(next.parent_id(), Some(prior.id()));
    assert_ne!(next.id(), prior.id());
}

#[test]
fn diagnostic_json_contains_phase_and_findings() {
    let mut state = state();
    state.merge_batch(batch(vec![ok("network", 0.85, t0())]), t0());
    let value: serde_json::Value = serde_json::from_str(&state.diagnostic_json()).unwrap();
    assert_eq!(value["phase"], "initial_assessment");
    assert!(value["findings"]["network"].is_object());
}

#[test]
fn time_range_spans_collected_evidence() {
    let mut state = state();
    assert!(state.time_range().is_none());
    state.merge_batch(
        batch(vec![
            ok("network", 0.5, t0() + Duration::minutes(3)),
            ok("resource", 0.7, t0()),
        ]),
        t0(),
    );
    let range = state.time_range().unwrap();
    assert_eq!(range.start, t0());
    assert_eq!(range.end, t0() + Duration::minutes(3));
}

fn reported_in_round(category: &str, confidence: f64, round: u32) -> TaskOutcome {
    let mut follow_up = task(category, TaskKind::FollowUp);
    follow_up.context.symptoms = Symptoms::new(format!("round {round}"));
    let report = SpecialistReport::new(format!("{category} analysis"), confidence)
        .with_evidence(Observation::new("probe", json!({ "category": category }), t0()));
    TaskOutcome::new(follow_up, Ok(report))
}

#[test]
fn decay_lowers_categories_not_reconfirmed_across_rounds() {
    let mut state = InvestigationState::new(
        Symptoms::new("pods restarting, DB timeouts"),
        ["network", "logs"].map(Category::new),
        ConfidenceConfig {
            decay_enabled: true,
            decay_after_rounds: 2,
            decay_factor: 0.5,
        },
        t0(),
    );
    state.merge_batch(batch(vec![ok("network", 0.8, t0()), ok("logs", 0.6, t0())]), t0());
    for round in 2..=4 {
        state.merge_batch(batch(vec![reported_in_round("logs", 0.6, round)]), t0());
    }

    let decayed: Vec<(u32, f64)> = state
        .confidence()
        .history()
        .iter()
        .filter(|e| e.source == ConfidenceSource::Decayed)
        .map(|e| {
            assert_eq!(e.category, Category::new("network"));
            (e.round, e.score.value())
        })
        .collect();
    assert_eq!(decayed.len(), 2);
    assert_eq!(decayed[0].0, 3);
    assert!((decayed[0].1 - 0.4).abs() < 1e-9);
    assert_eq!(decayed[1].0, 4);
    assert!((decayed[1].1 - 0.2).abs() < 1e-9);

    let network = Category::new("network");
    assert!((state.confidence_of(&network).value() - 0.2).abs() < 1e-9);
    assert!((state.confidence_of(&Category::new("logs")).value() - 0.6).abs() < 1e-9);
    // The finding keeps its reported score; the current view carries the decayed one.
    assert!((state.findings()[&network].confidence.value() - 0.8).abs() < 1e-9);
    assert!((state.current_findings()[&network].confidence.value() - 0.2).abs() < 1e-9);
}
