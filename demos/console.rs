//! Console Washing Machine
//!
//! Drives a spawned controller from stdin and prints the rendered view
//! whenever the phase changes or a command is entered.
//!
//! Commands: start, reset, program <normal|delicate|heavy>, temp <20-90>,
//! status, quit
//!
//! Run with: cargo run --example console

use tokio::io::{AsyncBufReadExt, BufReader};
use washcycle::controller::{spawn, Command, MachineController};
use washcycle::core::Program;
use washcycle::logging::init_logging;
use washcycle::view::StatusView;

type DynError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), DynError> {
    init_logging("washcycle=info")?;

    let handle = spawn(MachineController::default());
    let mut updates = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_phase = handle.state().phase();

    println!("{}\n", StatusView::from(&handle.state()));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let state = match parse_command(line.trim()) {
                    Ok(Some(Command::Shutdown)) => break,
                    Ok(Some(command)) => handle.apply(command).await?,
                    Ok(None) => handle.state(),
                    Err(e) => {
                        eprintln!("{e}");
                        continue;
                    }
                };
                last_phase = state.phase();
                println!("{}\n", StatusView::from(&state));
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                if state.phase() != last_phase {
                    last_phase = state.phase();
                    println!("{}\n", StatusView::from(&state));
                }
            }
        }
    }

    let history = handle.shutdown().await?;
    println!("Phases visited: {}", history.path().len());
    Ok(())
}

/// Parse one input line. `Ok(None)` asks for the current status.
fn parse_command(line: &str) -> Result<Option<Command>, DynError> {
    let mut words = line.split_whitespace();
    let command = match (words.next(), words.next()) {
        (Some("start"), None) => Command::Start,
        (Some("reset"), None) => Command::Reset,
        (Some("program"), Some(id)) => Command::SetProgram(id.parse::<Program>()?),
        (Some("temp"), Some(value)) => Command::SetTemperature(value.parse()?),
        (Some("quit"), None) => Command::Shutdown,
        (Some("status") | None, None) => return Ok(None),
        _ => return Err(format!("unrecognised command: {line}").into()),
    };
    Ok(Some(command))
}
