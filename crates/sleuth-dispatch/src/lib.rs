//! # sleuth-dispatch
//!
//! Executes batches of specialist tasks on a bounded worker pool. Every task
//! has a deadline, every batch has an overall timeout, and no failure of a
//! single specialist fails the batch: it comes back as an error outcome the
//! state merge turns into a degraded finding.

pub mod dispatcher;
pub mod registry;
mod retry;

pub use dispatcher::Dispatcher;
pub use registry::SpecialistRegistry;
