use crate::models::Phase;

/// Phase-logic errors. Always fatal: they indicate a bug in the decision tree
/// or in the caller driving it.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("router invariant violated in phase {phase} at iteration {iteration}: {reason}")]
    InvariantViolation {
        phase: Phase,
        iteration: u32,
        reason: String,
        /// JSON dump of the investigation state at the time of the violation.
        diagnostic: String,
    },
}
