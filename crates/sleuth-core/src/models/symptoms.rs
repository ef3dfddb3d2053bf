use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Category;

/// Entity names pulled out of the symptom text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomHints {
    pub namespace: Option<String>,
    pub node: Option<String>,
    pub deployment: Option<String>,
    pub service: Option<String>,
}

/// Keyword triage of the symptoms: per-category match counts plus hints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomProfile {
    pub category_scores: BTreeMap<Category, u32>,
    pub hints: SymptomHints,
}

impl SymptomProfile {
    pub fn score(&self, category: &Category) -> u32 {
        self.category_scores.get(category).copied().unwrap_or(0)
    }
}

/// The initial problem description. Immutable after the state is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptoms {
    pub description: String,
    pub profile: SymptomProfile,
}

impl Symptoms {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            profile: SymptomProfile::default(),
        }
    }

    pub fn with_profile(mut self, profile: SymptomProfile) -> Self {
        self.profile = profile;
        self
    }
}
