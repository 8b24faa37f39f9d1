//! Wash cycle phases.
//!
//! A machine is always in exactly one phase. `Filling` and `Washing` are
//! the active phases: they own a ticker and advance on their own.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mutually exclusive phases of the wash cycle.
///
/// `Idle` is the initial phase. `Finished` is reachable but not terminal:
/// it only exits through an explicit reset.
///
/// # Example
///
/// ```rust
/// use washcycle::core::Phase;
///
/// assert_eq!(Phase::default(), Phase::Idle);
/// assert!(Phase::Filling.is_active());
/// assert!(!Phase::Finished.is_active());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Waiting for the user; program and temperature are editable
    #[default]
    Idle,
    /// Drum is taking on water
    Filling,
    /// Countdown running
    Washing,
    /// Countdown reached zero
    Finished,
}

impl Phase {
    /// Get the phase's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Filling => "filling",
            Self::Washing => "washing",
            Self::Finished => "finished",
        }
    }

    /// Check if this phase advances automatically on a ticker.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Filling | Self::Washing)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
