//! # sleuth-causal
//!
//! Correlation and root-cause resolution. Separates "what happened first"
//! (temporal ordering of evidence) from "what could have caused what" (the
//! component dependency graph), then assigns Primary / Contributing /
//! Symptom roles. Also ships the default Kubernetes dependency relation and
//! a deterministic template narrator.

pub mod candidates;
pub mod graph;
pub mod narrative;
pub mod ordering;
pub mod resolver;
pub mod roles;

pub use graph::{ComponentGraph, StaticDependencyGraph};
pub use narrative::TemplateNarrator;
pub use resolver::{Resolution, Resolver};
