use async_trait::async_trait;

use crate::errors::SpecialistFailure;
use crate::models::{Category, SpecialistReport, SpecialistTask};

/// A pluggable analyzer for one domain category.
///
/// The core is agnostic to how a specialist derives its answer. It receives
/// a read-only task and returns an independent report; there is no shared
/// mutable state between concurrent invocations.
#[async_trait]
pub trait Specialist: Send + Sync {
    /// The category this specialist answers for.
    fn category(&self) -> Category;

    /// Analyze the task. Returning a retryable failure lets the dispatcher
    /// try again within the task deadline.
    async fn invoke(&self, task: SpecialistTask) -> Result<SpecialistReport, SpecialistFailure>;
}
