//! Logging initialization.
//!
//! The library only emits `tracing` events; binaries and demos call
//! [`init_logging`] once to print them.

use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

/// Errors that can occur when installing the subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Install a global fmt subscriber writing to stderr.
///
/// Level comes from `RUST_LOG` when set, otherwise `default_filter`
/// (for example `"washcycle=info"`).
pub fn init_logging(default_filter: &str) -> Result<(), LoggingError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_fails() {
        let _ = init_logging("washcycle=debug");
        let err = init_logging("washcycle=debug").unwrap_err();
        assert!(err.to_string().contains("Failed to install"));
    }
}
