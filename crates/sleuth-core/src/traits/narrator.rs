use async_trait::async_trait;

use crate::errors::NarratorError;
use crate::models::{Narrative, RootCauseHypothesis, Symptoms};

/// Turns resolved hypotheses into a human-readable narrative with
/// recommended actions. Invoked only after resolution; it never influences
/// routing or confidence.
#[async_trait]
pub trait HypothesisNarrator: Send + Sync {
    async fn narrate(
        &self,
        symptoms: &Symptoms,
        hypotheses: &[RootCauseHypothesis],
    ) -> Result<Narrative, NarratorError>;
}
