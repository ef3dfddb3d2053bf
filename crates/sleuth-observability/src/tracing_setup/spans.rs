//! Span definitions per operation: investigation, route, dispatch, resolve.

/// Create an investigation span.
#[macro_export]
macro_rules! investigation_span {
    ($investigation_id:expr) => {
        tracing::info_span!("sleuth.investigation", investigation_id = %$investigation_id)
    };
}

/// Create a routing span.
#[macro_export]
macro_rules! route_span {
    ($phase:expr, $iteration:expr) => {
        tracing::debug_span!("sleuth.route", phase = %$phase, iteration = $iteration)
    };
}

/// Create a dispatch span.
#[macro_export]
macro_rules! dispatch_span {
    ($task_count:expr, $concurrency:expr) => {
        tracing::info_span!("sleuth.dispatch", task_count = $task_count, concurrency = $concurrency)
    };
}

/// Create a root-cause resolution span.
#[macro_export]
macro_rules! resolve_span {
    ($finding_count:expr, $evidence_count:expr) => {
        tracing::info_span!(
            "sleuth.resolve",
            finding_count = $finding_count,
            evidence_count = $evidence_count
        )
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const INVESTIGATION: &str = "sleuth.investigation";
    pub const ROUTE: &str = "sleuth.route";
    pub const DISPATCH: &str = "sleuth.dispatch";
    pub const RESOLVE: &str = "sleuth.resolve";
}
