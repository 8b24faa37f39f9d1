//! Wash programs and their fixed durations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named preset controlling the total wash duration.
///
/// # Example
///
/// ```rust
/// use washcycle::core::Program;
///
/// let program: Program = "delicate".parse().unwrap();
/// assert_eq!(program.duration_secs(), 900);
/// assert_eq!(program.label(), "Delicate");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Program {
    #[default]
    Normal,
    Delicate,
    Heavy,
}

/// Errors that can occur when parsing a program id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseProgramError {
    #[error("Unknown program '{0}', expected one of: normal, delicate, heavy")]
    Unknown(String),
}

impl Program {
    /// All programs in selector order.
    pub const ALL: [Program; 3] = [Program::Normal, Program::Delicate, Program::Heavy];

    /// Total wash duration in seconds.
    pub fn duration_secs(&self) -> u32 {
        match self {
            Self::Normal => 1800,
            Self::Delicate => 900,
            Self::Heavy => 3600,
        }
    }

    /// Stable lowercase identifier, as accepted by `FromStr`.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Delicate => "delicate",
            Self::Heavy => "heavy",
        }
    }

    /// Human-facing selector label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Delicate => "Delicate",
            Self::Heavy => "Heavy Duty",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Program {
    type Err = ParseProgramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        Program::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| ParseProgramError::Unknown(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_match_presets() {
        assert_eq!(Program::Normal.duration_secs(), 1800);
        assert_eq!(Program::Delicate.duration_secs(), 900);
        assert_eq!(Program::Heavy.duration_secs(), 3600);
    }

    #[test]
    fn parse_accepts_ids_case_insensitively() {
        assert_eq!("heavy".parse::<Program>(), Ok(Program::Heavy));
        assert_eq!(" Delicate ".parse::<Program>(), Ok(Program::Delicate));
        assert_eq!("NORMAL".parse::<Program>(), Ok(Program::Normal));
    }

    #[test]
    fn parse_rejects_unknown_ids() {
        let err = "spin".parse::<Program>().unwrap_err();
        assert_eq!(err, ParseProgramError::Unknown("spin".to_string()));
        assert!(err.to_string().contains("spin"));
    }

    #[test]
    fn labels_follow_selector_order() {
        let labels: Vec<_> = Program::ALL.iter().map(Program::label).collect();
        assert_eq!(labels, vec!["Normal", "Delicate", "Heavy Duty"]);
    }

    #[test]
    fn program_serializes_as_id() {
        for program in Program::ALL {
            let json = serde_json::to_string(&program).unwrap();
            assert_eq!(json, format!("\"{}\"", program.id()));
        }
    }
}
