/// Root-cause resolution errors.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Recovered: the resolver falls back to temporal-only ordering.
    #[error("dependency graph unavailable: {reason}")]
    DependencyGraphUnavailable { reason: String },

    #[error("hypotheses already resolved for investigation {investigation_id}")]
    HypothesesAlreadyResolved { investigation_id: String },
}
