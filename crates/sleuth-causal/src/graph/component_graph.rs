//! petgraph::StableGraph wrapper over components (not hypotheses).

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Directed;
use serde::{Deserialize, Serialize};

use sleuth_core::traits::DependencyEdge;

use super::dag_enforcement;

/// A node in the dependency graph: one component identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentNode {
    pub component: String,
}

/// Edges point from upstream to downstream.
pub type ComponentStableGraph = StableGraph<ComponentNode, (), Directed>;

/// Dependency graph with indexed access. Always acyclic: edges that would
/// close a cycle are rejected on insertion.
#[derive(Debug, Clone, Default)]
pub struct ComponentGraph {
    pub graph: ComponentStableGraph,
    /// Map from component → NodeIndex for O(1) lookup.
    pub node_index: HashMap<String, NodeIndex>,
}

impl ComponentGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a dependency relation. Returns the graph and the edges
    /// that were skipped because they would have formed a cycle.
    pub fn from_edges(edges: &[DependencyEdge]) -> (Self, Vec<DependencyEdge>) {
        let mut graph = Self::new();
        let mut skipped = Vec::new();
        for edge in edges {
            if !graph.add_dependency(edge) {
                skipped.push(edge.clone());
            }
        }
        (graph, skipped)
    }

    /// Get or create the node for a component.
    pub fn ensure_node(&mut self, component: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(component) {
            return idx;
        }
        let idx = self.graph.add_node(ComponentNode {
            component: component.to_string(),
        });
        self.node_index.insert(component.to_string(), idx);
        idx
    }

    pub fn get_node(&self, component: &str) -> Option<NodeIndex> {
        self.node_index.get(component).copied()
    }

    /// Insert `upstream → downstream`. Returns false (and leaves the graph
    /// unchanged) when the edge would create a cycle.
    pub fn add_dependency(&mut self, edge: &DependencyEdge) -> bool {
        let source = self.ensure_node(&edge.upstream);
        let target = self.ensure_node(&edge.downstream);
        if self.graph.find_edge(source, target).is_some() {
            return true;
        }
        if dag_enforcement::would_create_cycle(self, source, target) {
            return false;
        }
        self.graph.add_edge(source, target, ());
        true
    }

    /// Whether `upstream` reaches a different component `downstream`
    /// through at least one edge.
    pub fn is_upstream(&self, upstream: &str, downstream: &str) -> bool {
        if upstream == downstream {
            return false;
        }
        match (self.get_node(upstream), self.get_node(downstream)) {
            (Some(from), Some(to)) => dag_enforcement::has_path(&self.graph, from, to),
            _ => false,
        }
    }

    pub fn contains(&self, component: &str) -> bool {
        self.node_index.contains_key(component)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
