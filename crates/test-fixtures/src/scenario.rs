//! JSON incident scenarios: symptoms, per-category scripted answers, an
//! optional dependency graph and the expected resolution.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use sleuth_core::errors::SpecialistFailure;
use sleuth_core::models::{Observation, SpecialistReport};
use sleuth_core::traits::{DependencyEdge, Specialist};

use crate::graph::FixtureGraph;
use crate::specialist::ScriptedSpecialist;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub symptoms: String,
    /// `None` means no dependency graph provider is configured.
    #[serde(default)]
    pub graph: Option<Vec<DependencyEdge>>,
    pub specialists: Vec<ScenarioSpecialist>,
    #[serde(default)]
    pub expected: Expected,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioSpecialist {
    pub category: String,
    #[serde(default)]
    pub delay_ms: u64,
    /// When set, every call fails with this message.
    #[serde(default)]
    pub failure: Option<String>,
    #[serde(default)]
    pub report: ScenarioReport,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScenarioReport {
    pub analysis: String,
    pub confidence: f64,
    pub affected_components: BTreeSet<String>,
    pub potential_causes: Vec<String>,
    pub evidence: Vec<ScenarioObservation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioObservation {
    pub source_type: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub observed_at: DateTime<Utc>,
    #[serde(default = "full_reliability")]
    pub reliability: f64,
}

fn full_reliability() -> f64 {
    1.0
}

/// Expected resolution, keyed by hypothesis category.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Expected {
    pub primary_category: Option<String>,
    /// category → "primary" | "contributing" | "symptom"
    pub roles: BTreeMap<String, String>,
    pub degraded: bool,
}

impl From<&ScenarioReport> for SpecialistReport {
    fn from(report: &ScenarioReport) -> Self {
        SpecialistReport {
            analysis: report.analysis.clone(),
            confidence: report.confidence,
            affected_components: report.affected_components.clone(),
            potential_causes: report.potential_causes.clone(),
            evidence: report
                .evidence
                .iter()
                .map(|o| {
                    Observation::new(o.source_type.clone(), o.payload.clone(), o.observed_at)
                        .with_reliability(o.reliability)
                })
                .collect(),
        }
    }
}

impl Scenario {
    /// Scripted specialists for every entry in the scenario.
    pub fn specialists(&self) -> Vec<Arc<dyn Specialist>> {
        self.specialists
            .iter()
            .map(|entry| {
                let specialist = match &entry.failure {
                    Some(message) => ScriptedSpecialist::failing(
                        entry.category.as_str(),
                        SpecialistFailure::permanent(message.clone()),
                    ),
                    None => ScriptedSpecialist::reporting(
                        entry.category.as_str(),
                        SpecialistReport::from(&entry.report),
                    ),
                };
                Arc::new(specialist.with_delay(Duration::from_millis(entry.delay_ms)))
                    as Arc<dyn Specialist>
            })
            .collect()
    }

    pub fn dependency_graph(&self) -> Option<FixtureGraph> {
        self.graph.clone().map(FixtureGraph::from_edges)
    }
}

/// Load `scenarios/<name>.json`.
pub fn load_scenario(name: &str) -> Scenario {
    crate::load_fixture(&format!("scenarios/{name}.json"))
}
