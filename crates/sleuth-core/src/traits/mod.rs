mod dependency_graph;
mod narrator;
mod snapshot_sink;
mod specialist;

pub use dependency_graph::{DependencyEdge, DependencyGraphProvider};
pub use narrator::HypothesisNarrator;
pub use snapshot_sink::SnapshotSink;
pub use specialist::Specialist;
