use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, EvidenceRef};
use crate::confidence::Confidence;

/// Role of a hypothesis in the causal picture. Ordered Primary first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HypothesisRole {
    Primary,
    Contributing,
    Symptom,
}

impl HypothesisRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Contributing => "contributing",
            Self::Symptom => "symptom",
        }
    }
}

impl fmt::Display for HypothesisRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Annotations surfaced to reporting layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HypothesisFlag {
    /// Another candidate without a causal predecessor lost the primary slot
    /// only on confidence: competing root cause, unresolved.
    CompetingRootCause,
    /// Roles were assigned without a dependency graph (temporal ordering only).
    RoleConfidenceReduced,
}

/// Stable identifier derived from category and normalized description.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HypothesisId(String);

impl HypothesisId {
    pub fn derive(category: &Category, normalized_description: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(category.as_str().as_bytes());
        hasher.update(b"\x1f");
        hasher.update(normalized_description.as_bytes());
        let hex = hasher.finalize().to_hex();
        Self(format!("hyp-{}", &hex.as_str()[..12]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HypothesisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate root cause with its assigned role. Created once, during
/// root-cause determination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootCauseHypothesis {
    pub id: HypothesisId,
    pub description: String,
    pub category: Category,
    pub confidence: Confidence,
    pub supporting_evidence: Vec<EvidenceRef>,
    pub affected_components: BTreeSet<String>,
    pub role: HypothesisRole,
    /// Hypotheses placed upstream of this one by timing or dependencies.
    pub causal_predecessors: Vec<HypothesisId>,
    /// Earliest `observed_at` among the supporting evidence.
    pub first_observed_at: Option<DateTime<Utc>>,
    pub flags: BTreeSet<HypothesisFlag>,
}

impl RootCauseHypothesis {
    pub fn has_flag(&self, flag: HypothesisFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn is_primary(&self) -> bool {
        self.role == HypothesisRole::Primary
    }
}
