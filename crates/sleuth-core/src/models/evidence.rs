use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/// Reference into the investigation's evidence log, by core-assigned sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceRef(pub u64);

/// One raw observation as reported by a specialist, before the core assigns
/// it a sequence number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Where the observation came from ("kubectl-events", "prometheus", ...).
    pub source_type: String,
    /// Opaque to the core.
    pub payload: serde_json::Value,
    /// Specialist-reported timestamp; clocks may skew.
    pub observed_at: DateTime<Utc>,
    /// Specialist confidence in the observation itself, 0.0–1.0.
    pub reliability: f64,
}

impl Observation {
    pub fn new(
        source_type: impl Into<String>,
        payload: serde_json::Value,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source_type: source_type.into(),
            payload,
            observed_at,
            reliability: 1.0,
        }
    }

    pub fn with_reliability(mut self, reliability: f64) -> Self {
        self.reliability = reliability;
        self
    }

    /// Content fingerprint used to discard duplicate observations at merge time.
    pub fn fingerprint(&self, category: &Category) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(category.as_str().as_bytes());
        hasher.update(b"\x1f");
        hasher.update(self.source_type.as_bytes());
        hasher.update(b"\x1f");
        hasher.update(self.observed_at.to_rfc3339().as_bytes());
        hasher.update(b"\x1f");
        hasher.update(self.payload.to_string().as_bytes());
        hasher.finalize().to_hex().to_string()
    }
}

/// An immutable, sequenced observation in the evidence log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub sequence: u64,
    /// Category of the specialist that contributed it.
    pub category: Category,
    pub source_type: String,
    pub payload: serde_json::Value,
    pub observed_at: DateTime<Utc>,
    pub reliability: f64,
    pub fingerprint: String,
}

impl Evidence {
    pub fn from_observation(sequence: u64, category: Category, observation: Observation) -> Self {
        let fingerprint = observation.fingerprint(&category);
        Self {
            sequence,
            category,
            source_type: observation.source_type,
            payload: observation.payload,
            observed_at: observation.observed_at,
            reliability: observation.reliability.clamp(0.0, 1.0),
            fingerprint,
        }
    }

    pub fn reference(&self) -> EvidenceRef {
        EvidenceRef(self.sequence)
    }

    /// Ordering key: observation time, ties broken by insertion sequence.
    pub fn order_key(&self) -> (DateTime<Utc>, u64) {
        (self.observed_at, self.sequence)
    }
}
