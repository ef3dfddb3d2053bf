//! Bounded concurrent batch execution.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::{Id, JoinError, JoinSet};
use tokio::time::{timeout_at, Instant};
use tracing::Instrument;

use sleuth_core::config::DispatchConfig;
use sleuth_core::errors::DispatchError;
use sleuth_core::models::{BatchOutcome, Interruption, SpecialistReport, SpecialistTask, TaskOutcome};
use sleuth_observability::dispatch_span;

use crate::registry::SpecialistRegistry;
use crate::retry::{invoke_with_retries, RetryPolicy};

type Slot = (usize, Result<SpecialistReport, DispatchError>, u32, u64);

/// Executes batches of tasks against the registered specialists.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<SpecialistRegistry>,
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(registry: Arc<SpecialistRegistry>, config: DispatchConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &SpecialistRegistry {
        &self.registry
    }

    /// Run one batch to completion, to its overall timeout, or to `cutoff`
    /// (the investigation deadline), whichever comes first.
    ///
    /// Always returns one outcome per task. Tasks still in flight when the
    /// batch stops waiting are aborted and reported as timeouts; completed
    /// results are kept.
    pub async fn dispatch(&self, tasks: Vec<SpecialistTask>, cutoff: Option<Instant>) -> BatchOutcome {
        if tasks.is_empty() {
            return BatchOutcome::default();
        }

        let started = Instant::now();
        let batch_deadline = started + Duration::from_millis(self.config.batch_timeout_ms);
        let (deadline, interruption) = match cutoff {
            Some(cutoff) if cutoff < batch_deadline => (cutoff, Interruption::InvestigationDeadline),
            _ => (batch_deadline, Interruption::BatchTimeout),
        };

        let mut tasks = tasks;
        tasks.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.category.cmp(&b.category)));

        let distinct: BTreeSet<_> = tasks.iter().map(|t| &t.category).collect();
        let concurrency = self.config.concurrency_for(distinct.len());
        let span = dispatch_span!(tasks.len(), concurrency);
        self.execute(tasks, concurrency, deadline, interruption)
            .instrument(span)
            .await
    }

    async fn execute(
        &self,
        tasks: Vec<SpecialistTask>,
        concurrency: usize,
        deadline: Instant,
        interruption: Interruption,
    ) -> BatchOutcome {
        let started = Instant::now();
        let semaphore = Arc::new(Semaphore::new(concurrency));
        let policy = RetryPolicy {
            max_retries: self.config.max_retries,
            backoff: Duration::from_millis(self.config.retry_backoff_ms),
        };

        let mut slots: Vec<Option<(Result<SpecialistReport, DispatchError>, u32, u64)>> =
            vec![None; tasks.len()];
        let mut join_set: JoinSet<Slot> = JoinSet::new();
        let mut task_index = HashMap::new();
        let mut interrupted = false;

        for (index, task) in tasks.iter().enumerate() {
            let Some(specialist) = self.registry.get(&task.category) else {
                let err = DispatchError::Unregistered {
                    category: task.category.clone(),
                };
                slots[index] = Some((Err(err), 0, 0));
                continue;
            };
            // Permits are taken here, in priority order, so a saturated pool
            // starts tasks in that order on any runtime flavor.
            let permit = match timeout_at(deadline, Arc::clone(&semaphore).acquire_owned()).await {
                Ok(Ok(permit)) => permit,
                Ok(Err(_)) => {
                    let err = DispatchError::Cancelled {
                        category: task.category.clone(),
                        reason: "worker pool closed".to_string(),
                    };
                    slots[index] = Some((Err(err), 0, 0));
                    continue;
                }
                Err(_) => {
                    interrupted = true;
                    break;
                }
            };
            let task = task.clone();
            let handle = join_set.spawn(async move {
                let _permit = permit;
                let running = Instant::now();
                let task_deadline = (running + Duration::from_millis(task.deadline_ms)).min(deadline);
                let (result, attempts) = invoke_with_retries(specialist, task, task_deadline, policy).await;
                (index, result, attempts, running.elapsed().as_millis() as u64)
            });
            task_index.insert(handle.id(), index);
        }

        while !interrupted {
            match timeout_at(deadline, join_set.join_next_with_id()).await {
                Ok(Some(joined)) => record_joined(joined, &tasks, &task_index, &mut slots),
                Ok(None) => break,
                Err(_) => interrupted = true,
            }
        }

        if interrupted {
            // Keep whatever finished before the abort landed.
            join_set.abort_all();
            while let Some(joined) = join_set.join_next_with_id().await {
                record_joined(joined, &tasks, &task_index, &mut slots);
            }
        }

        let waited_ms = started.elapsed().as_millis() as u64;
        let outcomes: Vec<TaskOutcome> = tasks
            .into_iter()
            .zip(slots)
            .map(|(task, slot)| {
                let (result, attempts, elapsed_ms) = slot.unwrap_or_else(|| {
                    let category = task.category.clone();
                    let err = match interruption {
                        Interruption::InvestigationDeadline => DispatchError::Cancelled {
                            category,
                            reason: "investigation deadline exceeded".to_string(),
                        },
                        Interruption::BatchTimeout => DispatchError::SpecialistTimeout {
                            category,
                            elapsed_ms: waited_ms,
                        },
                    };
                    (Err(err), 1, waited_ms)
                });
                if let Err(err) = &result {
                    sleuth_observability::tracing_setup::events::specialist_degraded(
                        err.category(),
                        &err.to_string(),
                    );
                }
                let mut outcome = TaskOutcome::new(task, result);
                outcome.attempts = attempts;
                outcome.elapsed_ms = elapsed_ms;
                outcome
            })
            .collect();

        tracing::debug!(
            tasks = outcomes.len(),
            failed = outcomes.iter().filter(|o| o.result.is_err()).count(),
            interrupted = interrupted,
            waited_ms = waited_ms,
            "batch finished"
        );

        BatchOutcome {
            outcomes,
            interruption: interrupted.then_some(interruption),
        }
    }
}

fn record_joined(
    joined: Result<(Id, Slot), JoinError>,
    tasks: &[SpecialistTask],
    task_index: &HashMap<Id, usize>,
    slots: &mut [Option<(Result<SpecialistReport, DispatchError>, u32, u64)>],
) {
    match joined {
        Ok((_, (index, result, attempts, elapsed))) => {
            slots[index] = Some((result, attempts, elapsed));
        }
        // Cancelled tasks are reported by the interruption that aborted them.
        Err(join_error) if join_error.is_cancelled() => {}
        Err(join_error) => {
            let Some(&index) = task_index.get(&join_error.id()) else {
                return;
            };
            let category = tasks[index].category.clone();
            slots[index] = Some((Err(DispatchError::Panicked { category }), 1, 0));
        }
    }
}
