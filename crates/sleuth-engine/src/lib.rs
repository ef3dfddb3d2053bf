//! # sleuth-engine
//!
//! Top-level driver. Owns the [`InvestigationState`](sleuth_core::InvestigationState)
//! for one incident and runs the route, dispatch and merge loop until the
//! router terminates, the investigation deadline forces root-cause
//! determination, or a fatal error aborts the run.

pub mod builder;
pub mod orchestrator;
pub mod sinks;
pub mod summary;

pub use builder::OrchestratorBuilder;
pub use orchestrator::Orchestrator;
pub use sinks::{JsonLinesSink, MemorySink};
pub use summary::{InvestigationSummary, SummaryStatus};
