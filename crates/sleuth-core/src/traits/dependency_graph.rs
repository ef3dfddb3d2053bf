use serde::{Deserialize, Serialize};

use crate::errors::ResolveError;

/// `upstream` is depended upon by `downstream`: a failure in `upstream`
/// can cascade into `downstream`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub upstream: String,
    pub downstream: String,
}

impl DependencyEdge {
    pub fn new(upstream: impl Into<String>, downstream: impl Into<String>) -> Self {
        Self {
            upstream: upstream.into(),
            downstream: downstream.into(),
        }
    }
}

/// Source of the component dependency relation used for causal ordering.
pub trait DependencyGraphProvider: Send + Sync {
    fn dependencies(&self) -> Result<Vec<DependencyEdge>, ResolveError>;
}
