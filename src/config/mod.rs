//! Cycle cadence configuration.
//!
//! The cadence is fixed per phase and never user-controlled: filling
//! advances by a fixed step on a short interval, washing counts down
//! once per second.

use crate::core::{Phase, FULL_WATER_LEVEL};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod error;

pub use error::ConfigError;

/// Timing of the automatic progression.
///
/// Missing fields fall back to the defaults when deserializing.
///
/// # Example
///
/// ```rust
/// use washcycle::config::CycleConfig;
/// use std::time::Duration;
///
/// let config = CycleConfig::from_json(r#"{ "fill_interval_ms": 50 }"#).unwrap();
/// assert_eq!(config.fill_step, 5);
/// assert_eq!(config.fill_interval(), Duration::from_millis(50));
/// assert_eq!(config.wash_interval(), Duration::from_secs(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Water level gained per fill tick
    pub fill_step: u8,

    /// Milliseconds between fill ticks
    pub fill_interval_ms: u64,

    /// Milliseconds between countdown ticks
    pub wash_interval_ms: u64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            fill_step: 5,
            fill_interval_ms: 200,
            wash_interval_ms: 1000,
        }
    }
}

impl CycleConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config describes a progression that can complete.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fill_step == 0 || self.fill_step > FULL_WATER_LEVEL {
            return Err(ConfigError::InvalidFillStep(self.fill_step));
        }
        if self.fill_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "fill_interval_ms",
            });
        }
        if self.wash_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "wash_interval_ms",
            });
        }
        Ok(())
    }

    pub fn fill_interval(&self) -> Duration {
        Duration::from_millis(self.fill_interval_ms)
    }

    pub fn wash_interval(&self) -> Duration {
        Duration::from_millis(self.wash_interval_ms)
    }

    /// Ticker cadence for a phase, `None` for phases that do not tick.
    pub fn interval_for(&self, phase: Phase) -> Option<Duration> {
        match phase {
            Phase::Filling => Some(self.fill_interval()),
            Phase::Washing => Some(self.wash_interval()),
            Phase::Idle | Phase::Finished => None,
        }
    }
}
