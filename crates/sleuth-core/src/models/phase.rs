use serde::{Deserialize, Serialize};
use std::fmt;

/// Investigation phases, in the only order they may be traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    InitialAssessment,
    EvidenceCollection,
    HypothesisTesting,
    RootCauseDetermination,
    RecommendationGeneration,
    Done,
}

impl Phase {
    /// The phase that normally follows this one. `Done` has no successor.
    pub fn next(self) -> Option<Phase> {
        match self {
            Self::InitialAssessment => Some(Self::EvidenceCollection),
            Self::EvidenceCollection => Some(Self::HypothesisTesting),
            Self::HypothesisTesting => Some(Self::RootCauseDetermination),
            Self::RootCauseDetermination => Some(Self::RecommendationGeneration),
            Self::RecommendationGeneration => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Phases in which specialists may be dispatched.
    pub fn allows_dispatch(self) -> bool {
        matches!(
            self,
            Self::InitialAssessment | Self::EvidenceCollection | Self::HypothesisTesting
        )
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Done
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialAssessment => "initial_assessment",
            Self::EvidenceCollection => "evidence_collection",
            Self::HypothesisTesting => "hypothesis_testing",
            Self::RootCauseDetermination => "root_cause_determination",
            Self::RecommendationGeneration => "recommendation_generation",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
