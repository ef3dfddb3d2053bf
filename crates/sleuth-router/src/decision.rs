use std::fmt;

use serde::Serialize;

use sleuth_core::models::{Phase, SpecialistTask};

/// What the orchestrator should do next.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RouteDecision {
    /// Run these tasks as one concurrent batch.
    Dispatch { tasks: Vec<SpecialistTask> },
    /// Move to the next phase.
    AdvancePhase { from: Phase, to: Phase },
    /// Stop the loop.
    Terminate { reason: TerminationReason },
}

impl RouteDecision {
    pub fn dispatch(tasks: Vec<SpecialistTask>) -> Self {
        Self::Dispatch { tasks }
    }

    pub fn advance(from: Phase) -> Option<Self> {
        from.next().map(|to| Self::AdvancePhase { from, to })
    }

    pub fn terminate(reason: TerminationReason) -> Self {
        Self::Terminate { reason }
    }

    pub fn tasks(&self) -> &[SpecialistTask] {
        match self {
            Self::Dispatch { tasks } => tasks,
            _ => &[],
        }
    }
}

impl fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatch { tasks } => {
                let categories: Vec<&str> = tasks.iter().map(|t| t.category.as_str()).collect();
                write!(f, "dispatch [{}]", categories.join(", "))
            }
            Self::AdvancePhase { from, to } => write!(f, "advance {from} -> {to}"),
            Self::Terminate { reason } => write!(f, "terminate ({reason})"),
        }
    }
}

/// Why routing ended the investigation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Recommendations are ready; the investigation is done.
    Completed,
    /// No specialist is registered, so no evidence can ever be collected.
    NoSpecialists,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::NoSpecialists => f.write_str("no specialists registered"),
        }
    }
}
