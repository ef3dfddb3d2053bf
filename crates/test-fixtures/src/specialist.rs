//! A specialist that replays canned answers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use sleuth_core::errors::SpecialistFailure;
use sleuth_core::models::{Category, SpecialistReport, SpecialistTask, TaskKind};
use sleuth_core::traits::Specialist;

/// Scripted specialist: canned report, optional delay, scripted failures
/// and a record of every task it received.
#[derive(Debug)]
pub struct ScriptedSpecialist {
    category: Category,
    report: SpecialistReport,
    /// Returned instead of `report` for follow-ups and probes when set.
    targeted: Option<SpecialistReport>,
    delay: Duration,
    failure: Option<SpecialistFailure>,
    /// Fail only the first N calls; `None` fails every call.
    fail_first: Option<usize>,
    panics: bool,
    calls: AtomicUsize,
    tasks: Mutex<Vec<SpecialistTask>>,
}

impl ScriptedSpecialist {
    pub fn reporting(category: impl Into<Category>, report: SpecialistReport) -> Self {
        Self {
            category: category.into(),
            report,
            targeted: None,
            delay: Duration::ZERO,
            failure: None,
            fail_first: None,
            panics: false,
            calls: AtomicUsize::new(0),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Always fails with `failure`.
    pub fn failing(category: impl Into<Category>, failure: SpecialistFailure) -> Self {
        let mut specialist = Self::reporting(category, SpecialistReport::new("unused", 0.0));
        specialist.failure = Some(failure);
        specialist
    }

    /// Fails the first `n` calls with `failure`, then reports normally.
    pub fn failing_first(mut self, n: usize, failure: SpecialistFailure) -> Self {
        self.failure = Some(failure);
        self.fail_first = Some(n);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_targeted(mut self, report: SpecialistReport) -> Self {
        self.targeted = Some(report);
        self
    }

    pub fn panicking(mut self) -> Self {
        self.panics = true;
        self
    }

    /// Number of `invoke` calls so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Tasks received so far, in call order.
    pub fn tasks(&self) -> Vec<SpecialistTask> {
        self.tasks.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Specialist for ScriptedSpecialist {
    fn category(&self) -> Category {
        self.category.clone()
    }

    async fn invoke(&self, task: SpecialistTask) -> Result<SpecialistReport, SpecialistFailure> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let kind = task.kind;
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.push(task);
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.panics {
            panic!("scripted panic in {}", self.category);
        }
        if let Some(failure) = &self.failure {
            if self.fail_first.map_or(true, |n| call < n) {
                return Err(failure.clone());
            }
        }
        match (&self.targeted, kind) {
            (Some(targeted), TaskKind::FollowUp | TaskKind::HypothesisProbe) => Ok(targeted.clone()),
            _ => Ok(self.report.clone()),
        }
    }
}
