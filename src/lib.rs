//! Washcycle: the state machine behind a washing machine widget
//!
//! A simulated machine moves through four phases: idle, filling, washing
//! and finished. Filling raises the water level on a short fixed cadence;
//! washing counts the selected program's duration down once per second.
//! The user can start, reset, pick a program and pick a temperature, the
//! last two only while idle.
//!
//! # Layout
//!
//! - [`core`]: pure state and transition functions, no timing
//! - [`config`]: cadence of the automatic progression
//! - [`controller`]: owned ticker and serialized command loop
//! - [`view`]: pure projection for a rendering layer
//! - [`logging`]: subscriber setup for binaries
//!
//! # Example
//!
//! ```rust
//! use washcycle::controller::MachineController;
//! use washcycle::core::{Phase, Program};
//! use washcycle::view::StatusView;
//!
//! let mut controller = MachineController::default();
//! controller.set_program(Program::Delicate);
//! controller.start();
//!
//! while controller.state().phase() == Phase::Filling {
//!     controller.tick();
//! }
//!
//! let view = StatusView::from(controller.state());
//! assert_eq!(view.status, "Washing: 15:00");
//! ```

pub mod config;
pub mod controller;
pub mod core;
pub mod logging;
pub mod view;

// Re-export commonly used types
pub use crate::config::CycleConfig;
pub use crate::controller::{spawn, ControllerHandle, MachineController};
pub use crate::core::{MachineState, Phase, Program};
pub use crate::view::StatusView;
