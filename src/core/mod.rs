//! Core wash cycle types and logic.
//!
//! This module contains the pure core of the simulation:
//! - Phases and programs
//! - `MachineState` with its transition functions
//! - Guard predicates for user-driven operations
//! - Immutable phase history
//!
//! Nothing in this module schedules work or logs; timing belongs to
//! [`crate::controller`].

mod guard;
mod history;
mod phase;
mod program;
mod state;

pub use guard::{Guard, IDLE_ONLY};
pub use history::{PhaseHistory, PhaseTransition};
pub use phase::Phase;
pub use program::{ParseProgramError, Program};
pub use state::{
    InvalidStateError, MachineState, PhaseChange, Trigger, DEFAULT_TEMPERATURE, FULL_WATER_LEVEL, MAX_TEMPERATURE,
    MIN_TEMPERATURE,
};
