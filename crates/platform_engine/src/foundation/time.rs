//! Time management utilities

use std::time::{Duration, Instant};

/// Wall-clock timer measuring the delta between consecutive ticks
///
/// The delta is never clamped: if the caller stalls, the next delta covers
/// the whole stall.
#[derive(Debug, Clone)]
pub struct Timer {
    last_tick: Instant,
    total_time: f64,
    tick_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            total_time: 0.0,
            tick_count: 0,
        }
    }

    /// Record a tick and return the seconds elapsed since the previous one
    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    /// Record a tick observed at `now`
    pub fn tick_at(&mut self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.last_tick);
        let dt = elapsed.as_secs_f64();
        self.total_time += dt;
        self.last_tick = now;
        self.tick_count += 1;
        dt
    }

    /// Restart measurement from now without counting a tick
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }

    /// Total time accumulated over all ticks
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Number of ticks recorded
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Instant of the most recent tick
    pub fn last_tick(&self) -> Instant {
        self.last_tick
    }

    /// Average ticks per second over the recorded ticks
    pub fn average_rate(&self) -> f64 {
        if self.total_time > 0.0 {
            self.tick_count as f64 / self.total_time
        } else {
            0.0
        }
    }
}

/// Duration of one tick at `rate_hz`
pub fn tick_period(rate_hz: f64) -> Duration {
    Duration::from_secs_f64(1.0 / rate_hz)
}
