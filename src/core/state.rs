//! Machine state and its pure transition functions.
//!
//! Every function here is deterministic and side-effect free apart from
//! mutating the state it is called on. Scheduling lives in the controller.

use super::guard::IDLE_ONLY;
use super::phase::Phase;
use super::program::Program;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest selectable temperature in degrees.
pub const MIN_TEMPERATURE: u8 = 20;
/// Highest selectable temperature in degrees.
pub const MAX_TEMPERATURE: u8 = 90;
/// Temperature selected when the widget mounts.
pub const DEFAULT_TEMPERATURE: u8 = 30;
/// Water level at which filling hands over to washing.
pub const FULL_WATER_LEVEL: u8 = 100;

/// What caused a phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// User pressed start while idle
    Start,
    /// Water level reached full
    FillComplete,
    /// Countdown reached zero
    WashComplete,
    /// User pressed reset
    Reset,
}

/// A phase change produced by a transition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
    pub trigger: Trigger,
}

/// Full state of the simulated machine.
///
/// Fields are read through accessors. `water_level` and `time_remaining`
/// are only advanced by [`tick`](Self::tick); `program` and `temperature`
/// only change while idle.
///
/// # Example
///
/// ```rust
/// use washcycle::core::{MachineState, Phase, Program};
///
/// let mut state = MachineState::default();
/// state.set_program(Program::Delicate);
/// state.start();
///
/// while state.phase() == Phase::Filling {
///     state.tick(5);
/// }
/// assert_eq!(state.phase(), Phase::Washing);
/// assert_eq!(state.water_level(), 100);
/// assert_eq!(state.time_remaining(), 900);
/// ```
///
/// Direct writes do not compile:
///
/// ```compile_fail
/// use washcycle::core::MachineState;
///
/// let mut state = MachineState::default();
/// state.water_level = 250;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StateRecord")]
pub struct MachineState {
    phase: Phase,
    /// Percentage 0..=100, meaningful while filling or washing
    water_level: u8,
    /// Seconds left in the countdown
    time_remaining: u32,
    program: Program,
    /// Degrees, cosmetic only
    temperature: u8,
}

/// Wire form of [`MachineState`], checked before it becomes one.
#[derive(Deserialize)]
struct StateRecord {
    phase: Phase,
    water_level: u8,
    time_remaining: u32,
    program: Program,
    temperature: u8,
}

/// Errors that can occur when deserializing a machine state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidStateError {
    #[error("Water level {0} exceeds 100")]
    WaterLevel(u8),

    #[error("Temperature {0} outside 20..=90")]
    Temperature(u8),

    #[error("Time remaining {remaining}s exceeds the {program} duration")]
    TimeRemaining { remaining: u32, program: Program },
}

impl TryFrom<StateRecord> for MachineState {
    type Error = InvalidStateError;

    fn try_from(record: StateRecord) -> Result<Self, Self::Error> {
        if record.water_level > FULL_WATER_LEVEL {
            return Err(InvalidStateError::WaterLevel(record.water_level));
        }
        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&record.temperature) {
            return Err(InvalidStateError::Temperature(record.temperature));
        }
        if record.time_remaining > record.program.duration_secs() {
            return Err(InvalidStateError::TimeRemaining {
                remaining: record.time_remaining,
                program: record.program,
            });
        }
        Ok(Self {
            phase: record.phase,
            water_level: record.water_level,
            time_remaining: record.time_remaining,
            program: record.program,
            temperature: record.temperature,
        })
    }
}

impl Default for MachineState {
    fn default() -> Self {
        let program = Program::default();
        Self {
            phase: Phase::Idle,
            water_level: 0,
            time_remaining: program.duration_secs(),
            program,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl MachineState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Percentage 0..=100.
    pub fn water_level(&self) -> u8 {
        self.water_level
    }

    /// Seconds left in the countdown.
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn program(&self) -> Program {
        self.program
    }

    /// Degrees, cosmetic only.
    pub fn temperature(&self) -> u8 {
        self.temperature
    }

    /// Build a state at an arbitrary point of the cycle.
    #[cfg(test)]
    pub(crate) fn at(phase: Phase, water_level: u8, time_remaining: u32) -> Self {
        Self {
            phase,
            water_level,
            time_remaining,
            ..Self::default()
        }
    }

    /// Begin a cycle: idle → filling.
    ///
    /// Returns `None` (and leaves the state untouched) unless idle.
    pub fn start(&mut self) -> Option<PhaseChange> {
        if !IDLE_ONLY.check(self) {
            return None;
        }
        self.water_level = 0;
        self.time_remaining = self.program.duration_secs();
        Some(self.enter(Phase::Filling, Trigger::Start))
    }

    /// Return to idle from any phase, clearing transient progress.
    ///
    /// Returns `None` if the machine was already idle; the progress fields
    /// are cleared either way.
    pub fn reset(&mut self) -> Option<PhaseChange> {
        self.water_level = 0;
        self.time_remaining = self.program.duration_secs();
        if self.phase == Phase::Idle {
            return None;
        }
        Some(self.enter(Phase::Idle, Trigger::Reset))
    }

    /// Select a program while idle. Returns whether it was applied.
    pub fn set_program(&mut self, program: Program) -> bool {
        if !IDLE_ONLY.check(self) {
            return false;
        }
        self.program = program;
        self.time_remaining = program.duration_secs();
        true
    }

    /// Select a temperature while idle, clamped to the supported range.
    /// Returns whether it was applied.
    pub fn set_temperature(&mut self, temperature: i32) -> bool {
        if !IDLE_ONLY.check(self) {
            return false;
        }
        let clamped = temperature.clamp(i32::from(MIN_TEMPERATURE), i32::from(MAX_TEMPERATURE));
        // clamp keeps the value inside u8 range
        self.temperature = clamped as u8;
        true
    }

    /// Advance the active phase's counter by one step.
    ///
    /// While filling, the water level rises by `fill_step` (clamped to full)
    /// and the tick that reaches full moves to washing. While washing, the
    /// countdown drops by one second and the tick that reaches zero moves to
    /// finished. Idle and finished ignore ticks.
    pub fn tick(&mut self, fill_step: u8) -> Option<PhaseChange> {
        match self.phase {
            Phase::Filling => {
                self.water_level = self
                    .water_level
                    .saturating_add(fill_step)
                    .min(FULL_WATER_LEVEL);
                (self.water_level == FULL_WATER_LEVEL)
                    .then(|| self.enter(Phase::Washing, Trigger::FillComplete))
            }
            Phase::Washing => {
                self.time_remaining = self.time_remaining.saturating_sub(1);
                (self.time_remaining == 0)
                    .then(|| self.enter(Phase::Finished, Trigger::WashComplete))
            }
            Phase::Idle | Phase::Finished => None,
        }
    }

    fn enter(&mut self, to: Phase, trigger: Trigger) -> PhaseChange {
        let change = PhaseChange {
            from: self.phase,
            to,
            trigger,
        };
        self.phase = to;
        change
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(state: &mut MachineState) -> Vec<u8> {
        let mut levels = Vec::new();
        while state.phase == Phase::Filling {
            state.tick(5);
            levels.push(state.water_level);
        }
        levels
    }

    #[test]
    fn default_state_is_idle_normal() {
        let state = MachineState::default();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.program, Program::Normal);
        assert_eq!(state.temperature, 30);
        assert_eq!(state.time_remaining, 1800);
        assert_eq!(state.water_level, 0);
    }

    #[test]
    fn start_moves_idle_to_filling() {
        let mut state = MachineState::default();
        let change = state.start().unwrap();

        assert_eq!(change.from, Phase::Idle);
        assert_eq!(change.to, Phase::Filling);
        assert_eq!(change.trigger, Trigger::Start);
        assert_eq!(state.water_level, 0);
        assert_eq!(state.time_remaining, 1800);
    }

    #[test]
    fn start_is_noop_outside_idle() {
        let mut state = MachineState::default();
        state.start();
        state.tick(5);
        let before = state.clone();

        assert!(state.start().is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn filling_reaches_exactly_full_then_washes() {
        let mut state = MachineState::default();
        state.start();
        let levels = fill(&mut state);

        assert_eq!(levels.len(), 20);
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(levels.last(), Some(&100));
        assert_eq!(state.phase, Phase::Washing);
    }

    #[test]
    fn uneven_fill_step_is_clamped_to_full() {
        let mut state = MachineState::default();
        state.start();
        for _ in 0..3 {
            state.tick(30);
        }
        assert_eq!(state.water_level, 90);

        let change = state.tick(30).unwrap();
        assert_eq!(change.trigger, Trigger::FillComplete);
        assert_eq!(state.water_level, 100);
    }

    #[test]
    fn delicate_cycle_finishes_after_900_wash_ticks() {
        let mut state = MachineState::default();
        state.set_program(Program::Delicate);
        state.start();
        fill(&mut state);

        assert_eq!(state.phase, Phase::Washing);
        assert_eq!(state.time_remaining, 900);

        for tick in 1..=900u32 {
            let change = state.tick(5);
            assert_eq!(state.time_remaining, 900 - tick);
            assert_eq!(change.is_some(), tick == 900);
        }
        assert_eq!(state.phase, Phase::Finished);
        assert_eq!(state.time_remaining, 0);
    }

    #[test]
    fn finished_ignores_ticks() {
        let mut state = MachineState {
            phase: Phase::Finished,
            time_remaining: 0,
            water_level: 100,
            ..MachineState::default()
        };
        let before = state.clone();
        assert!(state.tick(5).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn reset_mid_fill_clears_progress() {
        let mut state = MachineState::default();
        state.start();
        for _ in 0..9 {
            state.tick(5);
        }
        assert_eq!(state.water_level, 45);

        let change = state.reset().unwrap();
        assert_eq!(change.from, Phase::Filling);
        assert_eq!(change.trigger, Trigger::Reset);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.water_level, 0);
        assert_eq!(state.time_remaining, 1800);
    }

    #[test]
    fn reset_while_idle_reports_no_change() {
        let mut state = MachineState::default();
        assert!(state.reset().is_none());
        assert_eq!(state, MachineState::default());
    }

    #[test]
    fn set_program_while_idle_updates_time() {
        let mut state = MachineState::default();
        assert!(state.set_program(Program::Heavy));
        assert_eq!(state.program, Program::Heavy);
        assert_eq!(state.time_remaining, 3600);
    }

    #[test]
    fn set_program_while_washing_is_noop() {
        let mut state = MachineState::default();
        state.start();
        fill(&mut state);
        state.tick(5);
        let before = state.clone();

        assert!(!state.set_program(Program::Heavy));
        assert_eq!(state, before);
    }

    #[test]
    fn set_temperature_clamps() {
        let mut state = MachineState::default();
        assert!(state.set_temperature(5));
        assert_eq!(state.temperature, MIN_TEMPERATURE);
        assert!(state.set_temperature(200));
        assert_eq!(state.temperature, MAX_TEMPERATURE);
        assert!(state.set_temperature(60));
        assert_eq!(state.temperature, 60);
    }

    #[test]
    fn set_temperature_outside_idle_is_noop() {
        let mut state = MachineState::default();
        state.start();
        assert!(!state.set_temperature(60));
        assert_eq!(state.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn deserializing_rejects_overfull_water() {
        let json = r#"{"phase":"washing","water_level":250,"time_remaining":10,"program":"normal","temperature":30}"#;
        let err = serde_json::from_str::<MachineState>(json).unwrap_err();
        assert!(err.to_string().contains("Water level 250"));
    }

    #[test]
    fn deserializing_rejects_out_of_range_temperature() {
        let json = r#"{"phase":"idle","water_level":0,"time_remaining":1800,"program":"normal","temperature":5}"#;
        assert!(serde_json::from_str::<MachineState>(json).is_err());
    }

    #[test]
    fn deserializing_rejects_time_beyond_program() {
        let json = r#"{"phase":"washing","water_level":100,"time_remaining":1000,"program":"delicate","temperature":30}"#;
        assert!(serde_json::from_str::<MachineState>(json).is_err());
    }

    #[test]
    fn deserializing_accepts_reachable_state() {
        let mut state = MachineState::default();
        state.start();
        state.tick(5);

        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(serde_json::from_str::<MachineState>(&json).unwrap(), state);
    }
}
