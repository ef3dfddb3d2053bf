use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// Confidence score clamped to [0.0, 1.0].
/// Used for category confidence, finding confidence and hypothesis confidence.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// Zero confidence, used for degraded findings.
    pub const ZERO: Confidence = Confidence(0.0);

    /// Create a new Confidence, clamping to [0.0, 1.0]. NaN collapses to 0.0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Strictly greater than the given threshold.
    pub fn exceeds(self, threshold: f64) -> bool {
        self.0 > threshold
    }

    /// Greater than or equal to the given threshold.
    pub fn meets(self, threshold: f64) -> bool {
        self.0 >= threshold
    }

    /// Whole-number percentage, for human-readable traces.
    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    /// Total order over confidences (values are never NaN).
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

impl Mul<f64> for Confidence {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.0 * rhs)
    }
}
