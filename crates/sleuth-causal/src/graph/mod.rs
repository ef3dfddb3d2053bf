pub mod component_graph;
pub mod dag_enforcement;
pub mod static_graph;

pub use component_graph::{ComponentGraph, ComponentNode};
pub use static_graph::StaticDependencyGraph;
