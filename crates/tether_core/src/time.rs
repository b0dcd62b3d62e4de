//! Deterministic time system
//!
//! Fixed tick rate; each tick hands scripts a [`Timestep`] in seconds.

use std::time::Duration;

/// Default simulation tick rate (60 Hz = 16.666ms per tick)
pub const TICK_RATE_HZ: u32 = 60;

/// Elapsed time for one update step, in seconds.
///
/// Always finite and non-negative; anything else is clamped to zero on
/// construction.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Timestep(f32);

impl Timestep {
    pub const ZERO: Self = Self(0.0);

    pub fn from_seconds(seconds: f32) -> Self {
        if seconds.is_finite() && seconds > 0.0 {
            Self(seconds)
        } else {
            Self(0.0)
        }
    }

    pub fn from_duration(duration: Duration) -> Self {
        Self::from_seconds(duration.as_secs_f32())
    }

    #[inline]
    pub fn seconds(self) -> f32 {
        self.0
    }
}

/// Simulation time tracker
pub struct SimulationTime {
    tick_duration: Duration,
    tick_count: u64,
    accumulated_time: Duration,
}

impl SimulationTime {
    /// Create a tracker ticking at `tick_rate_hz`. A rate of zero falls back
    /// to [`TICK_RATE_HZ`].
    pub fn new(tick_rate_hz: u32) -> Self {
        let rate = if tick_rate_hz == 0 { TICK_RATE_HZ } else { tick_rate_hz };
        Self {
            tick_duration: Duration::from_secs(1) / rate,
            tick_count: 0,
            accumulated_time: Duration::ZERO,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Advance one tick and return the step to hand to scripts.
    pub fn advance_tick(&mut self) -> Timestep {
        self.tick_count += 1;
        self.accumulated_time += self.tick_duration;
        Timestep::from_duration(self.tick_duration)
    }

    pub fn total_time(&self) -> Duration {
        self.accumulated_time
    }
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self::new(TICK_RATE_HZ)
    }
}
