//! Fixed-step scheduling and the round clock.

use serde::{Deserialize, Serialize};

/// Fixed-timestep accumulator.
///
/// Wall time is banked and paid out in whole simulation steps. The bank is
/// capped so a long stall cannot trigger an unbounded catch-up burst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedTimestep {
    step: f64,
    max_backlog: f64,
    accumulator: f64,
}

impl FixedTimestep {
    /// Create an accumulator paying out `step` seconds per tick with at most
    /// `max_backlog` seconds banked.
    #[must_use]
    pub fn new(step: f32, max_backlog: f32) -> Self {
        let step = f64::from(step).max(1e-4);
        Self {
            step,
            max_backlog: f64::from(max_backlog).max(step),
            accumulator: 0.0,
        }
    }

    /// Bank `dt` seconds and return how many steps to run now.
    ///
    /// Non-finite and negative deltas count as zero.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        let dt = if dt.is_finite() { f64::from(dt.max(0.0)) } else { 0.0 };
        self.accumulator = (self.accumulator + dt).min(self.max_backlog);

        let mut steps = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    /// Fraction of a step left in the bank, for render interpolation.
    #[must_use]
    pub fn interpolation_alpha(&self) -> f32 {
        (self.accumulator / self.step) as f32
    }

    /// Step length in seconds.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }
}

/// Whole-second countdown driven by wall-clock deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundClock {
    time_remaining: u32,
    wall: f64,
}

impl RoundClock {
    /// Start a countdown from `seconds`.
    #[must_use]
    pub const fn new(seconds: u32) -> Self {
        Self {
            time_remaining: seconds,
            wall: 0.0,
        }
    }

    /// Whole seconds left.
    #[must_use]
    pub const fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Whether the clock has run out.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.time_remaining == 0
    }

    /// Add `dt` seconds of wall time. Returns true on the call that reaches
    /// zero and never again.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.is_expired() {
            return false;
        }
        if dt.is_finite() {
            self.wall += f64::from(dt.max(0.0));
        }
        while self.wall >= 1.0 && self.time_remaining > 0 {
            self.wall -= 1.0;
            self.time_remaining -= 1;
        }
        self.is_expired()
    }
}
