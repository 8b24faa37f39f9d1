//! Serialized command loop around a [`MachineController`].
//!
//! The controller lives in a single tokio task. User commands and ticker
//! firings are handled one at a time, so no locking is needed; after each
//! event the task publishes the new state on a `watch` channel.

use crate::controller::error::ControllerError;
use crate::controller::machine::MachineController;
use crate::core::{MachineState, PhaseHistory, Program};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::info;

/// User-driven events accepted by a running controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Reset,
    SetProgram(Program),
    SetTemperature(i32),
    /// Stop the task and hand back the history
    Shutdown,
}

/// Control surface of a spawned controller.
///
/// Dropping every handle stops the task, which cancels its ticker.
#[derive(Debug)]
pub struct ControllerHandle {
    commands: mpsc::UnboundedSender<Envelope>,
    snapshots: watch::Receiver<MachineState>,
    task: JoinHandle<PhaseHistory>,
}

/// A queued command, optionally waiting for the state it produced.
struct Envelope {
    command: Command,
    ack: Option<oneshot::Sender<MachineState>>,
}

enum Wake {
    Command(Option<Envelope>),
    Tick,
}

/// Move a controller into its own task.
///
/// Must be called from within a tokio runtime.
pub fn spawn(controller: MachineController) -> ControllerHandle {
    let (commands, receiver) = mpsc::unbounded_channel();
    let (publisher, snapshots) = watch::channel(controller.state().clone());
    let task = tokio::spawn(run(controller, receiver, publisher));
    ControllerHandle {
        commands,
        snapshots,
        task,
    }
}

impl ControllerHandle {
    pub fn start(&self) -> Result<(), ControllerError> {
        self.send(Command::Start)
    }

    pub fn reset(&self) -> Result<(), ControllerError> {
        self.send(Command::Reset)
    }

    pub fn set_program(&self, program: Program) -> Result<(), ControllerError> {
        self.send(Command::SetProgram(program))
    }

    pub fn set_temperature(&self, temperature: i32) -> Result<(), ControllerError> {
        self.send(Command::SetTemperature(temperature))
    }

    /// Queue a command for the controller task without waiting for it.
    ///
    /// [`state`](Self::state) may still show the previous state until the
    /// task has run; use [`apply`](Self::apply) to observe the result.
    pub fn send(&self, command: Command) -> Result<(), ControllerError> {
        self.commands
            .send(Envelope { command, ack: None })
            .map_err(|_| ControllerError::Stopped)
    }

    /// Run a command and return the state right after it was handled.
    ///
    /// The returned state is also the one published to subscribers.
    pub async fn apply(&self, command: Command) -> Result<MachineState, ControllerError> {
        let (ack, done) = oneshot::channel();
        self.commands
            .send(Envelope {
                command,
                ack: Some(ack),
            })
            .map_err(|_| ControllerError::Stopped)?;
        done.await.map_err(|_| ControllerError::Stopped)
    }

    /// Latest published state.
    pub fn state(&self) -> MachineState {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<MachineState> {
        self.snapshots.clone()
    }

    /// Stop the controller and return its phase history.
    pub async fn shutdown(self) -> Result<PhaseHistory, ControllerError> {
        // The task may already be gone; joining reports why.
        let _ = self.send(Command::Shutdown);
        Ok(self.task.await?)
    }
}

async fn run(
    mut controller: MachineController,
    mut commands: mpsc::UnboundedReceiver<Envelope>,
    publisher: watch::Sender<MachineState>,
) -> PhaseHistory {
    info!("controller started");

    loop {
        let wake = tokio::select! {
            biased;
            command = commands.recv() => Wake::Command(command),
            () = controller.wait_tick() => Wake::Tick,
        };

        let ack = match wake {
            Wake::Command(None) => break,
            Wake::Command(Some(Envelope {
                command: Command::Shutdown,
                ..
            })) => break,
            Wake::Command(Some(Envelope { command, ack })) => {
                execute(&mut controller, command);
                ack
            }
            Wake::Tick => {
                controller.tick();
                None
            }
        };

        publisher.send_if_modified(|published| {
            if published == controller.state() {
                return false;
            }
            published.clone_from(controller.state());
            true
        });

        if let Some(ack) = ack {
            // The caller may have stopped waiting.
            let _ = ack.send(controller.state().clone());
        }
    }

    info!("controller stopped");
    controller.into_history()
}

fn execute(controller: &mut MachineController, command: Command) {
    match command {
        Command::Start => {
            controller.start();
        }
        Command::Reset => controller.reset(),
        Command::SetProgram(program) => {
            controller.set_program(program);
        }
        Command::SetTemperature(temperature) => {
            controller.set_temperature(temperature);
        }
        Command::Shutdown => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Phase;
    use crate::view::StatusView;

    #[tokio::test]
    async fn commands_are_applied_in_order() {
        let handle = spawn(MachineController::default());
        let mut updates = handle.subscribe();

        handle.set_program(Program::Heavy).unwrap();
        handle.set_temperature(75).unwrap();

        updates
            .wait_for(|s| s.temperature() == 75)
            .await
            .unwrap();
        let state = handle.state();
        assert_eq!(state.program(), Program::Heavy);
        assert_eq!(state.time_remaining(), 3600);
        assert_eq!(state.phase(), Phase::Idle);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(flavor = "current_thread")]
    async fn apply_returns_state_after_command() {
        let handle = spawn(MachineController::default());

        let state = handle.apply(Command::SetProgram(Program::Heavy)).await.unwrap();
        assert_eq!(state.program(), Program::Heavy);
        assert_eq!(handle.state(), state);
        assert_eq!(StatusView::from(&handle.state()).program_label, "Heavy Duty");

        let state = handle.apply(Command::Start).await.unwrap();
        assert_eq!(state.phase(), Phase::Filling);
        assert_eq!(StatusView::from(&state).status, "Filling...");

        handle.shutdown().await.unwrap();
    }

    #[tokio::test(flavor = "current_thread")]
    async fn send_alone_is_not_yet_visible() {
        let handle = spawn(MachineController::default());
        handle.set_program(Program::Heavy).unwrap();

        // the task has not run since nothing yielded
        assert_eq!(handle.state().program(), Program::Normal);

        let state = handle.apply(Command::Reset).await.unwrap();
        assert_eq!(state.program(), Program::Heavy);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn apply_after_shutdown_reports_stopped() {
        let handle = spawn(MachineController::default());
        let err = handle.apply(Command::Shutdown).await.unwrap_err();
        assert!(matches!(err, ControllerError::Stopped));
        assert!(matches!(handle.start(), Err(ControllerError::Stopped)));
    }

    #[tokio::test]
    async fn shutdown_returns_history() {
        let handle = spawn(MachineController::default());
        handle.start().unwrap();
        handle.reset().unwrap();

        let history = handle.shutdown().await.unwrap();
        assert_eq!(
            history.path(),
            vec![&Phase::Idle, &Phase::Filling, &Phase::Idle]
        );
    }
}
