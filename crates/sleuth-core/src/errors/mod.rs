mod config_error;
mod dispatch_error;
mod narrator_error;
mod resolve_error;
mod router_error;
mod sink_error;

pub use config_error::ConfigError;
pub use dispatch_error::{DispatchError, SpecialistFailure};
pub use narrator_error::NarratorError;
pub use resolve_error::ResolveError;
pub use router_error::RouterError;
pub use sink_error::SinkError;

/// Top-level error for the investigation engine.
#[derive(Debug, thiserror::Error)]
pub enum SleuthError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Narrator(#[from] NarratorError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("iteration limit exceeded: max {max}")]
    IterationLimitExceeded { max: u32 },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SleuthError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl SleuthError {
    /// Fatal errors abort the investigation; everything else is recoverable.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Router(_) | Self::IterationLimitExceeded { .. } | Self::Config(_)
        )
    }
}

pub type SleuthResult<T> = Result<T, SleuthError>;
