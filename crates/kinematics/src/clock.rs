//! Wall-clock time for the elapsed-time readout.
//!
//! Elapsed time is a real-time signal, separate from the logical time
//! `steps × dt`. Ticks arrive close to, but not exactly at, the nominal
//! cadence, so the two readings drift apart and both are reported.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// A source of monotonic instants.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// The system monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
///
/// ```rust
/// use std::time::Duration;
/// use kinematics::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(16));
/// assert_eq!(clock.now() - start, Duration::from_millis(16));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// Start instant of the current run.
#[derive(Debug, Clone)]
pub struct RunClock<C> {
    clock: C,
    started: Instant,
}

impl<C: Clock> RunClock<C> {
    /// Starts timing now.
    pub fn new(clock: C) -> Self {
        let started = clock.now();
        Self { clock, started }
    }

    /// Restarts timing from the current instant.
    pub fn restart(&mut self) {
        self.started = self.clock.now();
    }

    /// Wall-clock time since the last (re)start.
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.started)
    }

    /// Underlying clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_clock_measures_since_restart() {
        let clock = ManualClock::new();
        let mut run = RunClock::new(clock.clone());

        clock.advance(Duration::from_secs(2));
        assert_eq!(run.elapsed(), Duration::from_secs(2));

        run.restart();
        assert_eq!(run.elapsed(), Duration::ZERO);

        clock.advance(Duration::from_millis(250));
        assert_eq!(run.elapsed(), Duration::from_millis(250));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let run = RunClock::new(SystemClock);
        let a = run.elapsed();
        let b = run.elapsed();
        assert!(b >= a);
    }
}
