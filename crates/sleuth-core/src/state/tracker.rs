//! Confidence tracker: latest-wins per category with an append-only history.
//! Decay toward zero exists only as an explicit, configured policy.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ConfidenceConfig;
use crate::confidence::Confidence;
use crate::models::{Category, ConfidenceSnapshot, ConfidenceSource};

/// Tracks per-category confidence over the life of an investigation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfidenceTracker {
    current: BTreeMap<Category, Confidence>,
    history: Vec<ConfidenceSnapshot>,
    /// Round in which each category was last confirmed by a finding.
    last_confirmed: BTreeMap<Category, u32>,
    policy: ConfidenceConfig,
}

impl ConfidenceTracker {
    pub fn new(policy: ConfidenceConfig) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Record a specialist-reported score. Appends to history and replaces
    /// the current value.
    pub fn update(&mut self, category: &Category, score: Confidence, at: DateTime<Utc>, round: u32) {
        self.current.insert(category.clone(), score);
        self.last_confirmed.insert(category.clone(), round);
        self.history.push(ConfidenceSnapshot {
            at,
            round,
            category: category.clone(),
            score,
            source: ConfidenceSource::Reported,
        });
    }

    /// Immutable copy of the current scores.
    pub fn snapshot(&self) -> BTreeMap<Category, Confidence> {
        self.current.clone()
    }

    pub fn get(&self, category: &Category) -> Option<Confidence> {
        self.current.get(category).copied()
    }

    pub fn current(&self) -> &BTreeMap<Category, Confidence> {
        &self.current
    }

    pub fn history(&self) -> &[ConfidenceSnapshot] {
        &self.history
    }

    /// Highest score as it stood at the end of `round`, replaying history.
    pub fn top_at_round(&self, round: u32) -> Option<Confidence> {
        let mut replay: BTreeMap<&Category, Confidence> = BTreeMap::new();
        for entry in self.history.iter().take_while(|e| e.round <= round) {
            replay.insert(&entry.category, entry.score);
        }
        replay.into_values().max_by(|a, b| a.total_cmp(b))
    }

    /// Distinct rounds that produced history entries, ascending.
    pub fn rounds(&self) -> Vec<u32> {
        let mut rounds: Vec<u32> = self.history.iter().map(|e| e.round).collect();
        rounds.dedup();
        rounds
    }

    /// Apply the decay policy for categories not re-confirmed within the
    /// configured number of rounds. Returns the decayed categories.
    pub fn apply_decay(&mut self, round: u32, at: DateTime<Utc>) -> Vec<Category> {
        if !self.policy.decay_enabled {
            return Vec::new();
        }
        let stale: Vec<Category> = self
            .last_confirmed
            .iter()
            .filter(|(_, &confirmed)| round.saturating_sub(confirmed) >= self.policy.decay_after_rounds)
            .map(|(category, _)| category.clone())
            .collect();

        let mut decayed = Vec::new();
        for category in stale {
            let Some(score) = self.current.get(&category).copied() else {
                continue;
            };
            if score.value() == 0.0 {
                continue;
            }
            let next = score * self.policy.decay_factor;
            self.current.insert(category.clone(), next);
            self.history.push(ConfidenceSnapshot {
                at,
                round,
                category: category.clone(),
                score: next,
                source: ConfidenceSource::Decayed,
            });
            decayed.push(category);
        }
        decayed
    }
}
