//! One task's lifetime: invoke, retry retryable failures, honor the deadline.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout_at, Instant};

use sleuth_core::errors::DispatchError;
use sleuth_core::models::{SpecialistReport, SpecialistTask};
use sleuth_core::traits::Specialist;

#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

/// Run `task` until it succeeds, fails permanently, exhausts its retries or
/// hits `deadline`. Returns the result and the number of attempts made.
pub(crate) async fn invoke_with_retries(
    specialist: Arc<dyn Specialist>,
    task: SpecialistTask,
    deadline: Instant,
    policy: RetryPolicy,
) -> (Result<SpecialistReport, DispatchError>, u32) {
    let category = task.category.clone();
    let started = Instant::now();
    let mut attempts = 0;

    loop {
        attempts += 1;
        match timeout_at(deadline, specialist.invoke(task.clone())).await {
            Ok(Ok(report)) => return (Ok(report), attempts),
            Ok(Err(failure)) => {
                // Linear backoff, and only if the retry can still finish in time.
                let backoff = policy.backoff * attempts;
                let retry = failure.retryable
                    && attempts <= policy.max_retries
                    && Instant::now() + backoff < deadline;
                if retry {
                    tracing::debug!(
                        category = %category,
                        attempt = attempts,
                        error = %failure,
                        "retrying specialist"
                    );
                    sleep(backoff).await;
                    continue;
                }
                let err = DispatchError::SpecialistFailed {
                    category,
                    attempts,
                    message: failure.message,
                };
                return (Err(err), attempts);
            }
            Err(_) => {
                let err = DispatchError::SpecialistTimeout {
                    category,
                    elapsed_ms: started.elapsed().as_millis() as u64,
                };
                return (Err(err), attempts);
            }
        }
    }
}
