//! # sleuth-router
//!
//! The decision tree. [`route`] is a pure function of the investigation
//! state and the router config: it never reads the clock, performs no I/O
//! and returns the same [`RouteDecision`] for the same inputs, which is what
//! makes an investigation replayable after the fact.
//!
//! Also hosts keyword [`triage`] of the free-text symptoms, used to
//! prioritize baseline specialists.

pub mod decision;
pub mod leader;
pub mod route;
pub mod triage;

pub use decision::{RouteDecision, TerminationReason};
pub use leader::{leading_category, ranked_categories};
pub use route::route;
pub use triage::triage;
