//! Deterministic narrative rendering from resolved hypotheses.

pub mod confidence;
pub mod templates;

use async_trait::async_trait;

use sleuth_core::errors::NarratorError;
use sleuth_core::models::{
    HypothesisFlag, HypothesisRole, Narrative, Recommendation, RecommendationPriority,
    RootCauseHypothesis, Symptoms,
};
use sleuth_core::traits::HypothesisNarrator;

pub use confidence::ConfidenceLevel;

/// Template-driven narrator. Same hypotheses, same narrative.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, symptoms: &Symptoms, hypotheses: &[RootCauseHypothesis]) -> Narrative {
        let mut narrative = Narrative {
            summary: summary(symptoms, hypotheses),
            ..Narrative::default()
        };

        for hypothesis in hypotheses {
            let template = templates::for_category(&hypothesis.category);
            let priority = match hypothesis.role {
                HypothesisRole::Primary => RecommendationPriority::High,
                HypothesisRole::Contributing => RecommendationPriority::Medium,
                HypothesisRole::Symptom => RecommendationPriority::Low,
            };
            narrative.recommendations.push(Recommendation {
                action: template.remediation.to_string(),
                component: hypothesis.affected_components.iter().next().cloned(),
                priority,
                rationale: format!(
                    "{} {} ({} confidence)",
                    hypothesis.role,
                    hypothesis.description,
                    ConfidenceLevel::of(hypothesis.confidence)
                ),
            });
            push_unique(&mut narrative.next_actions, template.next_action);
            push_unique(&mut narrative.prevention_measures, template.prevention);
        }
        narrative.recommendations.sort_by_key(|r| r.priority);
        narrative
    }
}

#[async_trait]
impl HypothesisNarrator for TemplateNarrator {
    async fn narrate(
        &self,
        symptoms: &Symptoms,
        hypotheses: &[RootCauseHypothesis],
    ) -> Result<Narrative, NarratorError> {
        Ok(self.render(symptoms, hypotheses))
    }
}

fn summary(symptoms: &Symptoms, hypotheses: &[RootCauseHypothesis]) -> String {
    let mut summary = match hypotheses.iter().find(|h| h.role == HypothesisRole::Primary) {
        Some(primary) => format!(
            "Primary root cause: {} [{}, {} confidence].",
            primary.description,
            primary.category,
            ConfidenceLevel::of(primary.confidence)
        ),
        None => format!(
            "No primary root cause identified for \"{}\".",
            symptoms.description
        ),
    };

    let contributing = hypotheses
        .iter()
        .filter(|h| h.role == HypothesisRole::Contributing)
        .count();
    if contributing > 0 {
        summary.push_str(&format!(" {contributing} contributing factor(s)."));
    }
    if hypotheses
        .iter()
        .any(|h| h.has_flag(HypothesisFlag::CompetingRootCause))
    {
        summary.push_str(" Competing root causes remain unresolved.");
    }
    if hypotheses
        .iter()
        .any(|h| h.has_flag(HypothesisFlag::RoleConfidenceReduced))
    {
        summary.push_str(" Ordering is based on timing only.");
    }
    summary
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}
