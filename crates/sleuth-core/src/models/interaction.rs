use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of the orchestrator ↔ specialist interaction trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionRecord {
    /// A message between two participants.
    Message {
        at: DateTime<Utc>,
        from: String,
        to: String,
        message: String,
    },
    /// An action taken by one participant.
    Action {
        at: DateTime<Utc>,
        actor: String,
        action: String,
        details: String,
    },
}

impl InteractionRecord {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Self::Message { at, .. } | Self::Action { at, .. } => *at,
        }
    }
}
