//! # sleuth-core
//!
//! Foundation crate for the Sleuth investigation engine.
//! Defines the evidence/finding data model, config, errors, the confidence
//! tracker, the investigation state aggregate and the capability traits
//! implemented by specialists and other external collaborators.

pub mod confidence;
pub mod config;
pub mod errors;
pub mod models;
pub mod state;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use confidence::Confidence;
pub use config::SleuthConfig;
pub use errors::{SleuthError, SleuthResult};
pub use models::{Category, Evidence, Finding, Phase, RootCauseHypothesis, SpecialistTask};
pub use state::InvestigationState;
