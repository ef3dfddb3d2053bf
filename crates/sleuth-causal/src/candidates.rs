//! Candidate generation: one candidate per distinct (category, normalized
//! cause) in the latest finding of each category.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use sleuth_core::models::{Category, Evidence, EvidenceRef, Finding, HypothesisId};
use sleuth_core::Confidence;

/// A root-cause candidate before roles are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: HypothesisId,
    /// Text as first reported.
    pub description: String,
    pub category: Category,
    /// Confidence of the category's latest finding.
    pub confidence: Confidence,
    pub supporting_evidence: BTreeSet<EvidenceRef>,
    pub affected_components: BTreeSet<String>,
    /// Earliest `observed_at` over the supporting evidence.
    pub first_observed_at: Option<DateTime<Utc>>,
}

/// Lowercase, collapse whitespace, drop trailing punctuation.
pub fn normalize(description: &str) -> String {
    description
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .trim_end_matches(['.', ',', ';', ':', '!'])
        .to_string()
}

/// Collect candidates from the latest finding of each category,
/// deduplicated by normalized description. Unavailable findings contribute
/// nothing. A finding that cites no evidence of its own is supported by all
/// evidence of its category. Output is sorted by (category, normalized
/// description).
pub fn generate(evidence: &[Evidence], findings: &BTreeMap<Category, Finding>) -> Vec<Candidate> {
    let by_ref: BTreeMap<EvidenceRef, &Evidence> =
        evidence.iter().map(|e| (e.reference(), e)).collect();
    let mut candidates: BTreeMap<(Category, String), Candidate> = BTreeMap::new();

    for finding in findings.values().filter(|f| f.is_available()) {
        let support: BTreeSet<EvidenceRef> = if finding.related_evidence.is_empty() {
            evidence
                .iter()
                .filter(|e| e.category == finding.category)
                .map(Evidence::reference)
                .collect()
        } else {
            finding.related_evidence.iter().copied().collect()
        };
        for (description, normalized) in descriptions(finding) {
            let key = (finding.category.clone(), normalized);
            let candidate = candidates.entry(key.clone()).or_insert_with(|| Candidate {
                id: HypothesisId::derive(&key.0, &key.1),
                description: description.trim().to_string(),
                category: finding.category.clone(),
                confidence: finding.confidence,
                supporting_evidence: BTreeSet::new(),
                affected_components: BTreeSet::new(),
                first_observed_at: None,
            });
            candidate.supporting_evidence.extend(support.iter().copied());
            candidate
                .affected_components
                .extend(finding.affected_components.iter().cloned());
        }
    }

    candidates
        .into_values()
        .map(|mut candidate| {
            candidate.first_observed_at = candidate
                .supporting_evidence
                .iter()
                .filter_map(|r| by_ref.get(r))
                .map(|e| e.observed_at)
                .min();
            candidate
        })
        .collect()
}

/// Potential causes paired with their normalized form. Falls back to the
/// analysis text, then to "<category> anomaly", when no cause survives
/// normalization, so an available finding always yields a candidate.
fn descriptions(finding: &Finding) -> Vec<(String, String)> {
    let causes: Vec<(String, String)> = finding
        .potential_causes
        .iter()
        .map(|cause| (cause.clone(), normalize(cause)))
        .filter(|(_, normalized)| !normalized.is_empty())
        .collect();
    if !causes.is_empty() {
        return causes;
    }
    let analysis = normalize(&finding.analysis);
    if !analysis.is_empty() {
        return vec![(finding.analysis.clone(), analysis)];
    }
    let fallback = format!("{} anomaly", finding.category);
    let normalized = normalize(&fallback);
    vec![(fallback, normalized)]
}
