//! Owned repeating timer for the active phase.

use crate::core::Phase;
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// The single outstanding timer of a controller.
///
/// A ticker is armed for one phase and cancelled by dropping it. The
/// underlying interval is created on the first wait, so arming does not
/// need a running runtime; the first tick is still due one period after
/// arming.
#[derive(Debug)]
pub struct Ticker {
    phase: Phase,
    period: Duration,
    generation: u64,
    armed_at: Instant,
    interval: Option<Interval>,
}

impl Ticker {
    pub fn arm(phase: Phase, period: Duration, generation: u64) -> Self {
        Self {
            phase,
            period,
            generation,
            armed_at: Instant::now(),
            interval: None,
        }
    }

    /// Phase this ticker was armed for.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Arming sequence number, unique per controller.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Wait for the next tick. Cancel safe.
    pub async fn wait(&mut self) {
        let first = self.armed_at + self.period;
        let period = self.period;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        interval.tick().await;
    }
}
