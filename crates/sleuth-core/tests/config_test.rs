use sleuth_core::config::*;
use sleuth_core::errors::ConfigError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = SleuthConfig::from_toml("").unwrap();

    // Router defaults
    assert_eq!(config.router.high_confidence_threshold, 0.6);
    assert_eq!(config.router.max_follow_up_depth, 2);
    assert_eq!(config.router.stability_epsilon, 0.02);
    assert_eq!(config.router.hypothesis_iteration_cap, 8);
    assert_eq!(config.router.hypothesis_fanout, 3);
    assert_eq!(config.router.task_deadline_ms, 30_000);

    // Dispatch defaults
    assert_eq!(config.dispatch.batch_timeout_ms, 60_000);
    assert_eq!(config.dispatch.max_concurrency, 0);
    assert_eq!(config.dispatch.max_retries, 1);
    assert_eq!(config.dispatch.retry_backoff_ms, 200);

    // Resolver / confidence defaults
    assert_eq!(config.resolver.min_primary_confidence, 0.5);
    assert!(!config.confidence.decay_enabled);
    assert_eq!(config.confidence.decay_after_rounds, 2);
    assert_eq!(config.confidence.decay_factor, 0.5);

    // Orchestrator defaults
    assert_eq!(config.orchestrator.max_iterations, 16);
    assert_eq!(config.orchestrator.investigation_deadline_secs, 300);
    assert!(config.orchestrator.emit_snapshots);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(config.observability.json_output);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[router]
high_confidence_threshold = 0.75
hypothesis_fanout = 5

[orchestrator]
max_iterations = 4
"#;
    let config = SleuthConfig::from_toml(toml).unwrap();
    assert_eq!(config.router.high_confidence_threshold, 0.75);
    assert_eq!(config.router.hypothesis_fanout, 5);
    // Non-overridden fields keep defaults
    assert_eq!(config.router.max_follow_up_depth, 2);
    assert_eq!(config.orchestrator.max_iterations, 4);
    assert_eq!(config.dispatch.batch_timeout_ms, 60_000);
}

#[test]
fn config_round_trips_through_toml() {
    let mut config = SleuthConfig::default();
    config.confidence.decay_enabled = true;
    config.dispatch.max_concurrency = 3;

    let text = config.to_toml().unwrap();
    let parsed = SleuthConfig::from_toml(&text).unwrap();
    assert!(parsed.confidence.decay_enabled);
    assert_eq!(parsed.dispatch.max_concurrency, 3);
}

#[test]
fn threshold_outside_unit_interval_is_rejected() {
    let err = SleuthConfig::from_toml("[router]\nhigh_confidence_threshold = 1.5\n").unwrap_err();
    match err {
        ConfigError::OutOfRange { field, .. } => {
            assert_eq!(field, "router.high_confidence_threshold")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_max_iterations_is_rejected() {
    let err = SleuthConfig::from_toml("[orchestrator]\nmax_iterations = 0\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::OutOfRange { field: "orchestrator.max_iterations", .. }
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = SleuthConfig::from_toml("[router\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn concurrency_defaults_to_distinct_categories() {
    let dispatch = DispatchConfig::default();
    assert_eq!(dispatch.concurrency_for(4), 4);
    assert_eq!(dispatch.concurrency_for(0), 1);

    let bounded = DispatchConfig {
        max_concurrency: 2,
        ..DispatchConfig::default()
    };
    assert_eq!(bounded.concurrency_for(9), 2);
}
