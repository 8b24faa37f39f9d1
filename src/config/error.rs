//! Configuration error types.

use thiserror::Error;

/// Errors that can occur when loading or validating a cycle config
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Input was not valid JSON for a cycle config
    #[error("Failed to parse cycle config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Fill step outside 1..=100
    #[error("Fill step must be between 1 and 100, got {0}")]
    InvalidFillStep(u8),

    /// A ticker cadence of zero
    #[error("Interval '{name}' must be greater than zero")]
    ZeroInterval { name: &'static str },
}
