//! # sleuth-observability
//!
//! Structured tracing with per-operation span definitions, structured log
//! events for investigation milestones, and the interaction trace recorded
//! into every analysis result.

pub mod trace;
pub mod tracing_setup;

pub use trace::InteractionTrace;
