//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over [`MachineState`] that decide
//! whether a user-driven operation may run. A rejected operation is a
//! no-op, never an error.

use super::phase::Phase;
use super::state::MachineState;
use std::fmt;

/// Named pure predicate that determines if an operation can execute.
///
/// The name is carried for diagnostics so a rejected operation can be
/// logged with the rule that blocked it.
///
/// # Example
///
/// ```rust
/// use washcycle::core::{MachineState, Phase, IDLE_ONLY};
///
/// let mut state = MachineState::default();
/// assert!(IDLE_ONLY.check(&state));
///
/// state.start();
/// assert_eq!(state.phase(), Phase::Filling);
/// assert!(!IDLE_ONLY.check(&state));
/// ```
#[derive(Clone, Copy)]
pub struct Guard {
    name: &'static str,
    predicate: fn(&MachineState) -> bool,
}

/// Admits operations only while the machine is idle.
///
/// Gates `start`, program selection and temperature selection.
pub const IDLE_ONLY: Guard = Guard::new("idle_only", is_idle);

fn is_idle(state: &MachineState) -> bool {
    state.phase() == Phase::Idle
}

impl Guard {
    /// Create a guard from a name and a pure predicate.
    pub const fn new(name: &'static str, predicate: fn(&MachineState) -> bool) -> Self {
        Self { name, predicate }
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check if the guard allows the operation from this state.
    pub fn check(&self, state: &MachineState) -> bool {
        (self.predicate)(state)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
