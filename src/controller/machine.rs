//! Controller that owns the machine state and its ticker.

use crate::config::{ConfigError, CycleConfig};
use crate::controller::ticker::Ticker;
use crate::core::{
    MachineState, PhaseChange, PhaseHistory, PhaseTransition, Program, IDLE_ONLY,
};
use tracing::{debug, info, trace};

/// Most recent phase transitions a controller retains.
pub const HISTORY_LIMIT: usize = 64;

/// Owns a [`MachineState`] and drives it through the wash cycle.
///
/// At most one [`Ticker`] exists at a time. Every phase change goes
/// through [`apply`](Self::apply), which cancels the previous ticker
/// before arming the next one, so two tickers can never advance the same
/// state. Dropping the controller cancels any pending ticker.
#[derive(Debug)]
pub struct MachineController {
    state: MachineState,
    config: CycleConfig,
    history: PhaseHistory,
    ticker: Option<Ticker>,
    generation: u64,
}

impl Default for MachineController {
    fn default() -> Self {
        Self::with_valid_config(CycleConfig::default())
    }
}

impl MachineController {
    /// Create an idle controller with the given cadence.
    pub fn new(config: CycleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: CycleConfig) -> Self {
        Self {
            state: MachineState::default(),
            config,
            history: PhaseHistory::new(),
            ticker: None,
            generation: 0,
        }
    }

    /// Get current state (pure)
    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Get phase history (pure)
    pub fn history(&self) -> &PhaseHistory {
        &self.history
    }

    /// The armed ticker, if the current phase is active.
    pub fn ticker(&self) -> Option<&Ticker> {
        self.ticker.as_ref()
    }

    /// Consume the controller, cancelling its ticker and returning the history.
    pub fn into_history(mut self) -> PhaseHistory {
        std::mem::take(&mut self.history)
    }

    /// Start a cycle. Returns whether the machine left idle.
    pub fn start(&mut self) -> bool {
        match self.state.start() {
            Some(change) => {
                self.apply(change);
                true
            }
            None => {
                debug!(guard = IDLE_ONLY.name(), phase = %self.state.phase(), "start ignored");
                false
            }
        }
    }

    /// Return to idle from any phase and cancel pending progression.
    pub fn reset(&mut self) {
        match self.state.reset() {
            Some(change) => self.apply(change),
            None => debug!("reset while idle"),
        }
    }

    /// Select a program. Returns whether it was applied.
    pub fn set_program(&mut self, program: Program) -> bool {
        let applied = self.state.set_program(program);
        if applied {
            info!(%program, time_remaining = self.state.time_remaining(), "program selected");
        } else {
            debug!(guard = IDLE_ONLY.name(), phase = %self.state.phase(), %program, "program change ignored");
        }
        applied
    }

    /// Select a temperature, clamped to the supported range. Returns
    /// whether it was applied.
    pub fn set_temperature(&mut self, temperature: i32) -> bool {
        let applied = self.state.set_temperature(temperature);
        if applied {
            info!(requested = temperature, temperature = self.state.temperature(), "temperature selected");
        } else {
            debug!(guard = IDLE_ONLY.name(), phase = %self.state.phase(), "temperature change ignored");
        }
        applied
    }

    /// Advance the active phase by one step.
    ///
    /// Normally called by [`next_tick`](Self::next_tick); calling it
    /// directly lets a caller drive the simulation on its own clock.
    pub fn tick(&mut self) -> Option<PhaseChange> {
        let change = self.state.tick(self.config.fill_step);
        trace!(
            phase = %self.state.phase(),
            water_level = self.state.water_level(),
            time_remaining = self.state.time_remaining(),
            "tick"
        );
        if let Some(change) = change {
            self.apply(change);
        }
        change
    }

    /// Wait until the armed ticker fires. Never completes while no phase
    /// is active. Cancel safe.
    pub async fn wait_tick(&mut self) {
        match self.ticker.as_mut() {
            Some(ticker) => ticker.wait().await,
            None => std::future::pending().await,
        }
    }

    /// Wait for the ticker and advance one step.
    pub async fn next_tick(&mut self) -> Option<PhaseChange> {
        self.wait_tick().await;
        self.tick()
    }

    fn apply(&mut self, change: PhaseChange) {
        info!(from = %change.from, to = %change.to, trigger = ?change.trigger, "phase changed");
        self.history = self
            .history
            .record_bounded(PhaseTransition::now(change), HISTORY_LIMIT);
        self.sync_ticker();
    }

    fn sync_ticker(&mut self) {
        let phase = self.state.phase();
        let Some(period) = self.config.interval_for(phase) else {
            if let Some(old) = self.ticker.take() {
                debug!(generation = old.generation(), "ticker cancelled");
            }
            return;
        };

        if self.ticker.as_ref().is_some_and(|t| t.phase() == phase) {
            return;
        }

        self.generation += 1;
        if let Some(old) = self.ticker.take() {
            debug!(generation = old.generation(), "ticker cancelled");
        }
        self.ticker = Some(Ticker::arm(phase, period, self.generation));
        debug!(
            generation = self.generation,
            %phase,
            period_ms = period.as_millis() as u64,
            "ticker armed"
        );
    }
}

impl Drop for MachineController {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            debug!(generation = ticker.generation(), "ticker cancelled on teardown");
        }
    }
}
