use serde::{Deserialize, Serialize};
use std::fmt;

/// A specialist category identifier ("network", "logs", ...).
///
/// The router reasons only over categories, never over concrete analyzer
/// types. Identifiers are normalized to trimmed lowercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Categories with built-in triage patterns and remediation templates.
pub mod well_known {
    pub const NETWORK: &str = "network";
    pub const METRICS: &str = "metrics";
    pub const RESOURCE: &str = "resource";
    pub const MEMORY: &str = "memory";
    pub const CLUSTER: &str = "cluster";
    pub const LOGS: &str = "logs";
    pub const EVENTS: &str = "events";
    pub const STORAGE: &str = "storage";
    pub const SECURITY: &str = "security";

    pub const ALL: [&str; 9] = [
        NETWORK, METRICS, RESOURCE, MEMORY, CLUSTER, LOGS, EVENTS, STORAGE, SECURITY,
    ];
}
