use crate::models::Category;

/// Failure reported by a specialist implementation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct SpecialistFailure {
    pub message: String,
    /// Whether another attempt may succeed.
    pub retryable: bool,
}

impl SpecialistFailure {
    pub fn retryable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
        }
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
        }
    }
}

/// Per-task dispatch errors. Recovered locally: the category degrades to a
/// zero-confidence finding and the investigation continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("specialist {category} timed out after {elapsed_ms}ms")]
    SpecialistTimeout { category: Category, elapsed_ms: u64 },

    #[error("specialist {category} failed after {attempts} attempt(s): {message}")]
    SpecialistFailed {
        category: Category,
        attempts: u32,
        message: String,
    },

    #[error("no specialist registered for category {category}")]
    Unregistered { category: Category },

    #[error("specialist {category} cancelled: {reason}")]
    Cancelled { category: Category, reason: String },

    #[error("specialist {category} panicked")]
    Panicked { category: Category },
}

impl DispatchError {
    /// Timeouts and cancellations count as timeouts in the phase history.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::SpecialistTimeout { .. } | Self::Cancelled { .. }
        )
    }

    pub fn category(&self) -> &Category {
        match self {
            Self::SpecialistTimeout { category, .. }
            | Self::SpecialistFailed { category, .. }
            | Self::Unregistered { category }
            | Self::Cancelled { category, .. }
            | Self::Panicked { category } => category,
        }
    }
}
