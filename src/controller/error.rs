//! Controller runtime error types.

use thiserror::Error;
use tokio::task::JoinError;

/// Errors surfaced by a [`ControllerHandle`](super::ControllerHandle)
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The controller task is no longer receiving commands
    #[error("Controller has stopped")]
    Stopped,

    /// The controller task panicked or was aborted
    #[error("Controller task failed: {0}")]
    Join(#[from] JoinError),
}
