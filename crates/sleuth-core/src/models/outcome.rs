use serde::{Deserialize, Serialize};

use super::{SpecialistReport, SpecialistTask, TaskKey};
use crate::errors::DispatchError;

/// Result of one dispatched task.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub task: SpecialistTask,
    pub key: TaskKey,
    pub result: Result<SpecialistReport, DispatchError>,
    pub attempts: u32,
    pub elapsed_ms: u64,
}

impl TaskOutcome {
    pub fn new(task: SpecialistTask, result: Result<SpecialistReport, DispatchError>) -> Self {
        let key = task.key();
        Self {
            task,
            key,
            result,
            attempts: 1,
            elapsed_ms: 0,
        }
    }
}

/// Why a batch stopped waiting before every task returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interruption {
    BatchTimeout,
    InvestigationDeadline,
}

/// All outcomes of one batch round, merged into state as a single transition.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub outcomes: Vec<TaskOutcome>,
    pub interruption: Option<Interruption>,
}

impl BatchOutcome {
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    pub fn deadline_exceeded(&self) -> bool {
        self.interruption == Some(Interruption::InvestigationDeadline)
    }
}
