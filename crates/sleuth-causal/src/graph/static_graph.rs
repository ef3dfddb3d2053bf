//! Static component dependency relations.

use sleuth_core::errors::ResolveError;
use sleuth_core::traits::{DependencyEdge, DependencyGraphProvider};

/// Fixed dependency relation supplied at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticDependencyGraph {
    edges: Vec<DependencyEdge>,
}

impl StaticDependencyGraph {
    pub fn new(edges: Vec<DependencyEdge>) -> Self {
        Self { edges }
    }

    /// Add `upstream → downstream`.
    pub fn with_edge(mut self, upstream: &str, downstream: &str) -> Self {
        self.edges.push(DependencyEdge::new(upstream, downstream));
        self
    }

    /// Default relation for a Kubernetes cluster and a typical service tier:
    /// control-plane disk → etcd → kube-apiserver → {scheduler,
    /// controller-manager, kubelet, coredns}; kubelet → pods;
    /// coredns → services; database → cache → api.
    pub fn kubernetes_control_plane() -> Self {
        Self::default()
            .with_edge("control-plane-disk", "etcd")
            .with_edge("etcd", "kube-apiserver")
            .with_edge("kube-apiserver", "kube-scheduler")
            .with_edge("kube-apiserver", "kube-controller-manager")
            .with_edge("kube-apiserver", "kubelet")
            .with_edge("kube-apiserver", "coredns")
            .with_edge("kubelet", "pods")
            .with_edge("coredns", "services")
            .with_edge("database", "cache")
            .with_edge("cache", "api")
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }
}

impl DependencyGraphProvider for StaticDependencyGraph {
    fn dependencies(&self) -> Result<Vec<DependencyEdge>, ResolveError> {
        Ok(self.edges.clone())
    }
}
