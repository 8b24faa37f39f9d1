//! Phase transition history tracking.
//!
//! Provides immutable tracking of the phases a machine has passed through.

use super::phase::Phase;
use super::state::{PhaseChange, Trigger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single phase change at a point in time.
///
/// # Example
///
/// ```rust
/// use washcycle::core::{Phase, PhaseTransition, Trigger};
/// use chrono::Utc;
///
/// let transition = PhaseTransition {
///     from: Phase::Idle,
///     to: Phase::Filling,
///     trigger: Trigger::Start,
///     timestamp: Utc::now(),
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// The phase being left
    pub from: Phase,
    /// The phase being entered
    pub to: Phase,
    /// What caused the change
    pub trigger: Trigger,
    /// When the change occurred
    pub timestamp: DateTime<Utc>,
}

impl PhaseTransition {
    /// Stamp a phase change with the current time.
    pub fn now(change: PhaseChange) -> Self {
        Self {
            from: change.from,
            to: change.to,
            trigger: change.trigger,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of phase transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition added.
///
/// # Example
///
/// ```rust
/// use washcycle::core::{Phase, PhaseChange, PhaseHistory, PhaseTransition, Trigger};
///
/// let history = PhaseHistory::new().record(PhaseTransition::now(PhaseChange {
///     from: Phase::Idle,
///     to: Phase::Filling,
///     trigger: Trigger::Start,
/// }));
///
/// assert_eq!(history.path(), vec![&Phase::Idle, &Phase::Filling]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseHistory {
    transitions: Vec<PhaseTransition>,
}

impl PhaseHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: PhaseTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Record a transition, keeping at most `limit` of the newest entries.
    ///
    /// Older transitions are dropped from the front, so the path then
    /// starts at the oldest retained `from` phase.
    pub fn record_bounded(&self, transition: PhaseTransition, limit: usize) -> Self {
        let keep = self.transitions.len().min(limit.saturating_sub(1));
        let skip = self.transitions.len() - keep;
        let mut transitions = Vec::with_capacity(keep + 1);
        transitions.extend_from_slice(&self.transitions[skip..]);
        if limit > 0 {
            transitions.push(transition);
        }
        Self { transitions }
    }

    /// Get the path of phases traversed.
    ///
    /// Returns the `from` phase of the first transition followed by the
    /// `to` phase of each transition.
    pub fn path(&self) -> Vec<&Phase> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Time between the first and last transition, `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Most recent transition.
    pub fn last(&self) -> Option<&PhaseTransition> {
        self.transitions.last()
    }

    /// Get all transitions in order.
    pub fn transitions(&self) -> &[PhaseTransition] {
        &self.transitions
    }
}
