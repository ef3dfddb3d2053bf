//! Layered configuration. Every section defaults independently, so an empty
//! TOML document yields a fully usable config.
//!
//! # Examples
//!
//! ```
//! use sleuth_core::config::SleuthConfig;
//!
//! let config = SleuthConfig::from_toml("[router]\nmax_follow_up_depth = 4\n").unwrap();
//! assert_eq!(config.router.max_follow_up_depth, 4);
//! assert!((config.router.high_confidence_threshold - 0.6).abs() < f64::EPSILON);
//! ```

mod confidence_config;
pub mod defaults;
mod dispatch_config;
mod observability_config;
mod orchestrator_config;
mod resolver_config;
mod router_config;

pub use confidence_config::ConfidenceConfig;
pub use dispatch_config::DispatchConfig;
pub use observability_config::ObservabilityConfig;
pub use orchestrator_config::OrchestratorConfig;
pub use resolver_config::ResolverConfig;
pub use router_config::RouterConfig;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Top-level configuration for an investigation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SleuthConfig {
    pub router: RouterConfig,
    pub dispatch: DispatchConfig,
    pub resolver: ResolverConfig,
    pub confidence: ConfidenceConfig,
    pub orchestrator: OrchestratorConfig,
    pub observability: ObservabilityConfig,
}

impl SleuthConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Reject values the engine cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_interval("router.high_confidence_threshold", self.router.high_confidence_threshold)?;
        unit_interval("router.stability_epsilon", self.router.stability_epsilon)?;
        unit_interval("resolver.min_primary_confidence", self.resolver.min_primary_confidence)?;
        unit_interval("confidence.decay_factor", self.confidence.decay_factor)?;

        non_zero("router.task_deadline_ms", self.router.task_deadline_ms)?;
        non_zero("router.hypothesis_fanout", self.router.hypothesis_fanout as u64)?;
        non_zero("dispatch.batch_timeout_ms", self.dispatch.batch_timeout_ms)?;
        non_zero("orchestrator.max_iterations", u64::from(self.orchestrator.max_iterations))?;
        non_zero(
            "orchestrator.investigation_deadline_secs",
            self.orchestrator.investigation_deadline_secs,
        )?;
        if self.confidence.decay_enabled {
            non_zero(
                "confidence.decay_after_rounds",
                u64::from(self.confidence.decay_after_rounds),
            )?;
        }
        Ok(())
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: value.to_string(),
            expected: "a value in [0.0, 1.0]",
        })
    }
}

fn non_zero(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: value.to_string(),
            expected: "a value greater than zero",
        })
    }
}
