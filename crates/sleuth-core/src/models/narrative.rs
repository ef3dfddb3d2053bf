use serde::{Deserialize, Serialize};

/// Urgency of a recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

/// One remediation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub action: String,
    pub component: Option<String>,
    pub priority: RecommendationPriority,
    pub rationale: String,
}

/// Human-readable account of the resolved hypotheses. Consumes hypotheses,
/// never influences routing or confidence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub summary: String,
    pub recommendations: Vec<Recommendation>,
    pub next_actions: Vec<String>,
    pub prevention_measures: Vec<String>,
}
