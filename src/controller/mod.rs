//! Timed driver around the pure core.
//!
//! - [`MachineController`] owns a state, its history and the single
//!   ticker of the active phase
//! - [`Ticker`] is the owned timer handle, cancelled by dropping
//! - [`spawn`] runs a controller as a serialized command loop and
//!   returns a [`ControllerHandle`]

mod error;
mod machine;
mod runtime;
mod ticker;

pub use error::ControllerError;
pub use machine::{MachineController, HISTORY_LIMIT};
pub use runtime::{spawn, Command, ControllerHandle};
pub use ticker::Ticker;
