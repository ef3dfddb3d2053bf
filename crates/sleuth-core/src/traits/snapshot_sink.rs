use crate::errors::SinkError;
use crate::state::InvestigationState;

/// Write-only destination for state snapshots, emitted after each phase
/// transition.
pub trait SnapshotSink: Send + Sync {
    fn emit(&self, state: &InvestigationState) -> Result<(), SinkError>;
}
