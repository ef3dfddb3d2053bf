//! Cycle checks run before every edge insertion.

use petgraph::algo::tarjan_scc;
use petgraph::stable_graph::NodeIndex;
use petgraph::visit::Dfs;

use super::component_graph::{ComponentGraph, ComponentStableGraph};

/// Whether adding `source → target` would create a cycle.
pub fn would_create_cycle(graph: &ComponentGraph, source: NodeIndex, target: NodeIndex) -> bool {
    // Self-loops are always cycles.
    if source == target {
        return true;
    }
    // If target already reaches source, source → target closes a loop.
    has_path(&graph.graph, target, source)
}

/// DFS reachability: can we reach `to` from `from`?
pub fn has_path(graph: &ComponentStableGraph, from: NodeIndex, to: NodeIndex) -> bool {
    let mut dfs = Dfs::new(graph, from);
    while let Some(node) = dfs.next(graph) {
        if node == to && node != from {
            return true;
        }
    }
    false
}

/// Strongly connected components with more than one node (i.e., cycles).
/// Empty for any graph built through [`ComponentGraph::add_dependency`].
pub fn find_cycles(graph: &ComponentGraph) -> Vec<Vec<NodeIndex>> {
    tarjan_scc(&graph.graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .collect()
}
