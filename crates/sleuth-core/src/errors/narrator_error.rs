/// Hypothesis narrator failures. Recovered: the result ships without a narrative.
#[derive(Debug, thiserror::Error)]
pub enum NarratorError {
    #[error("narrator unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("narrator produced invalid output: {reason}")]
    InvalidOutput { reason: String },
}
