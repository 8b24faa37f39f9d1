//! Pure projection of machine state onto what a widget draws.
//!
//! No logic lives here beyond formatting: every field of [`StatusView`]
//! is derived from a [`MachineState`] and nothing else.

use crate::core::{MachineState, Phase, Program, FULL_WATER_LEVEL, IDLE_ONLY};
use serde::Serialize;
use std::fmt;

/// Which decorative animations should be running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Animation {
    /// Drum rotation
    pub drum_spinning: bool,
    /// Laundry items bouncing and pulsing
    pub laundry_moving: bool,
    /// Water surface waving
    pub water_waving: bool,
}

/// Enablement of each control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub start: bool,
    pub reset: bool,
    pub program: bool,
    pub temperature: bool,
}

/// Everything a rendering layer needs to draw the widget.
///
/// # Example
///
/// ```rust
/// use washcycle::core::MachineState;
/// use washcycle::view::StatusView;
///
/// let view = StatusView::from(&MachineState::default());
/// assert_eq!(view.status, "Ready");
/// assert_eq!(view.temperature_label, "30°C");
/// assert!(view.controls.start);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusView {
    pub phase: Phase,
    pub status: String,
    pub program: Program,
    pub program_label: &'static str,
    pub temperature_label: String,
    /// Water height as a fraction of the drum, 0.0..=1.0
    pub water_fraction: f32,
    pub animation: Animation,
    pub controls: Controls,
}

/// Status line for a state: `Ready`, `Filling...`, `Washing: MM:SS` or
/// `Finished!`.
pub fn status_text(state: &MachineState) -> String {
    match state.phase() {
        Phase::Idle => "Ready".to_string(),
        Phase::Filling => "Filling...".to_string(),
        Phase::Washing => format!("Washing: {}", format_clock(state.time_remaining())),
        Phase::Finished => "Finished!".to_string(),
    }
}

/// Format seconds as `MM:SS`; minutes are not wrapped into hours.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

impl From<&MachineState> for StatusView {
    fn from(state: &MachineState) -> Self {
        let active = state.phase().is_active();
        let editable = IDLE_ONLY.check(state);
        let water_fraction = if active {
            f32::from(state.water_level()) / f32::from(FULL_WATER_LEVEL)
        } else {
            0.0
        };

        Self {
            phase: state.phase(),
            status: status_text(state),
            program: state.program(),
            program_label: state.program().label(),
            temperature_label: format!("{}°C", state.temperature()),
            water_fraction,
            animation: Animation {
                drum_spinning: active,
                laundry_moving: active,
                water_waving: active,
            },
            controls: Controls {
                start: editable,
                reset: true,
                program: editable,
                temperature: editable,
            },
        }
    }
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const GAUGE_WIDTH: usize = 20;
        // fraction is within 0.0..=1.0
        let filled = (self.water_fraction * GAUGE_WIDTH as f32).round() as usize;
        let drum = if self.animation.drum_spinning { "spinning" } else { "still" };
        let lock = |enabled: bool| if enabled { "" } else { " (locked)" };

        writeln!(f, "{}", self.status)?;
        writeln!(
            f,
            "  water   [{}{}] {:>3.0}%",
            "#".repeat(filled),
            ".".repeat(GAUGE_WIDTH - filled),
            self.water_fraction * 100.0
        )?;
        writeln!(f, "  drum    {drum}")?;
        writeln!(f, "  program {}{}", self.program_label, lock(self.controls.program))?;
        write!(
            f,
            "  temp    {}{}",
            self.temperature_label,
            lock(self.controls.temperature)
        )
    }
}
