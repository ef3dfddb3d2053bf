use sleuth_core::errors::ResolveError;
use sleuth_core::traits::{DependencyEdge, DependencyGraphProvider};

/// Dependency graph built from explicit `(upstream, downstream)` pairs.
#[derive(Debug, Clone, Default)]
pub struct FixtureGraph {
    edges: Vec<DependencyEdge>,
}

impl FixtureGraph {
    pub fn new(edges: &[(&str, &str)]) -> Self {
        Self {
            edges: edges
                .iter()
                .map(|(upstream, downstream)| DependencyEdge::new(*upstream, *downstream))
                .collect(),
        }
    }

    pub fn from_edges(edges: Vec<DependencyEdge>) -> Self {
        Self { edges }
    }
}

impl DependencyGraphProvider for FixtureGraph {
    fn dependencies(&self) -> Result<Vec<DependencyEdge>, ResolveError> {
        Ok(self.edges.clone())
    }
}

/// A provider whose backing topology source is down.
#[derive(Debug, Clone, Default)]
pub struct UnavailableGraph;

impl DependencyGraphProvider for UnavailableGraph {
    fn dependencies(&self) -> Result<Vec<DependencyEdge>, ResolveError> {
        Err(ResolveError::DependencyGraphUnavailable {
            reason: "topology service unreachable".to_string(),
        })
    }
}
