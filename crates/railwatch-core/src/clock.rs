//! Looping simulation clock.
//!
//! The clock counts scenario minutes, not wall time. Callers advance it with
//! the wall-clock duration between ticks and it scales that by the active
//! rate, wrapping back to zero once the cycle is exceeded.

use chrono::NaiveTime;
use std::fmt;
use std::time::Duration;

/// Cadence the simulation driver is expected to tick at.
pub const DEFAULT_TICK: Duration = Duration::from_millis(200);

/// Wall-clock time the scenario starts at, for display only.
const CLOCK_ANCHOR: (u32, u32) = (12, 0);

// ---------------------------------------------------------------------------
// SimRate
// ---------------------------------------------------------------------------

/// Simulation speed as a multiplier: scenario minutes per wall-clock second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SimRate {
    X1,
    #[default]
    X5,
    X10,
}

impl SimRate {
    pub fn all() -> &'static [SimRate] {
        &[SimRate::X1, SimRate::X5, SimRate::X10]
    }

    pub fn minutes_per_second(self) -> f64 {
        match self {
            SimRate::X1 => 1.0,
            SimRate::X5 => 5.0,
            SimRate::X10 => 10.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SimRate::X1 => "1",
            SimRate::X5 => "5",
            SimRate::X10 => "10",
        }
    }
}

impl fmt::Display for SimRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.as_str())
    }
}

impl std::str::FromStr for SimRate {
    type Err = crate::error::RailwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" | "1x" => Ok(SimRate::X1),
            "5" | "5x" => Ok(SimRate::X5),
            "10" | "10x" => Ok(SimRate::X10),
            _ => Err(crate::error::RailwatchError::InvalidRate(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SimClock
// ---------------------------------------------------------------------------

/// Minute counter over a fixed cycle.
///
/// `advance` is the only mutator that moves time; pause simply makes it a
/// no-op, so a paused clock keeps returning the same minute.
#[derive(Debug, Clone)]
pub struct SimClock {
    minutes: f64,
    cycle: f64,
    rate: SimRate,
    paused: bool,
}

impl SimClock {
    pub fn new(cycle_minutes: f64) -> SimClock {
        SimClock {
            minutes: 0.0,
            cycle: cycle_minutes,
            rate: SimRate::default(),
            paused: false,
        }
    }

    pub fn minutes(&self) -> f64 {
        self.minutes
    }

    pub fn cycle(&self) -> f64 {
        self.cycle
    }

    pub fn rate(&self) -> SimRate {
        self.rate
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Changes the rate for subsequent ticks. The current minute is never
    /// rescaled, so a rate change mid-cycle does not jump the clock.
    pub fn set_rate(&mut self, rate: SimRate) {
        self.rate = rate;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Rewinds to minute zero. Pause state is left as-is.
    pub fn reset(&mut self) {
        self.minutes = 0.0;
    }

    /// Advances by `elapsed` of wall time scaled by the rate, wrapping to
    /// zero once the cycle end is strictly exceeded. Landing exactly on the
    /// cycle boundary holds that minute for one tick before wrapping.
    pub fn advance(&mut self, elapsed: Duration) -> f64 {
        if !self.paused {
            let next = self.minutes + self.rate.minutes_per_second() * elapsed.as_secs_f64();
            self.minutes = if next > self.cycle { 0.0 } else { next };
        }
        self.minutes
    }

    pub fn label(&self) -> String {
        clock_label(self.minutes)
    }
}

/// Formats a scenario minute as the wall-clock time it represents, anchored
/// at 12:00.
pub fn clock_label(minutes: f64) -> String {
    let anchor = NaiveTime::from_hms_opt(CLOCK_ANCHOR.0, CLOCK_ANCHOR.1, 0)
        .expect("fixed anchor is a valid time");
    let shown = anchor + chrono::Duration::minutes(minutes.floor() as i64);
    shown.format("%H:%M").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
