//! Tick sources, render sinks, and a loop tying them to a controller.
//!
//! The controller never schedules itself. A [`Ticker`] decides when the next
//! tick happens and a [`RenderSink`] receives every frame; [`run`] starts a
//! run and ticks it until it settles or a tick budget runs out.

use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock::Clock;
use crate::controller::{Frame, SimulationController, TickOutcome};
use crate::telemetry::TelemetrySnapshot;

/// Paces ticks.
pub trait Ticker {
    /// Blocks until the next tick is due.
    fn wait(&mut self);
}

/// Ticks at a fixed cadence, sleeping out the rest of each interval.
///
/// A late tick does not cause a burst of catch-up ticks; the schedule
/// restarts from the late instant.
#[derive(Debug, Clone)]
pub struct FixedRateTicker {
    interval: Duration,
    next: Option<Instant>,
}

impl FixedRateTicker {
    /// Creates a ticker firing every `interval`.
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    /// Tick interval.
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl Ticker for FixedRateTicker {
    fn wait(&mut self) {
        let now = Instant::now();
        let due = *self.next.get_or_insert(now + self.interval);
        if due > now {
            thread::sleep(due - now);
        }
        self.next = Some(due.max(now) + self.interval);
    }
}

/// Ticks as fast as the loop can run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateTicker;

impl Ticker for ImmediateTicker {
    #[inline]
    fn wait(&mut self) {}
}

/// Receives one frame per tick.
pub trait RenderSink {
    /// Draws the body described by `frame`.
    fn render(&mut self, frame: &Frame, snapshot: &TelemetrySnapshot);
}

/// Discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    #[inline]
    fn render(&mut self, _frame: &Frame, _snapshot: &TelemetrySnapshot) {}
}

impl<F> RenderSink for F
where
    F: FnMut(&Frame, &TelemetrySnapshot),
{
    fn render(&mut self, frame: &Frame, snapshot: &TelemetrySnapshot) {
        self(frame, snapshot);
    }
}

/// How a driven run ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Whether the body settled within the tick budget.
    pub settled: bool,
    /// Ticks executed.
    pub ticks: u64,
    /// Bounces during the run.
    pub bounces: u64,
    /// Last frame.
    pub frame: Frame,
    /// Last telemetry.
    pub snapshot: TelemetrySnapshot,
}

/// Starts a run and ticks it until it settles or `max_ticks` is reached.
///
/// The sink sees the initial frame and then one frame per tick. A run that
/// hits the budget is stopped and reported with `settled == false`.
///
/// # Example
///
/// ```rust
/// use kinematics::driver::{self, ImmediateTicker, NullSink};
/// use kinematics::{Scenario, SimulationController};
///
/// let mut sim = SimulationController::new(Scenario::projectile());
/// let summary = driver::run(&mut sim, &mut ImmediateTicker, &mut NullSink, 100_000);
/// assert!(summary.settled);
/// ```
pub fn run<C, T, S>(
    sim: &mut SimulationController<C>,
    ticker: &mut T,
    sink: &mut S,
    max_ticks: u64,
) -> RunSummary
where
    C: Clock,
    T: Ticker + ?Sized,
    S: RenderSink + ?Sized,
{
    sim.start();
    sink.render(&sim.frame(), sim.snapshot());

    let mut ticks = 0;
    let mut settled = false;
    while ticks < max_ticks {
        ticker.wait();
        let report = sim.tick();
        ticks += 1;
        sink.render(&report.frame, &report.snapshot);
        if report.outcome == TickOutcome::Stop {
            settled = true;
            break;
        }
    }

    if !settled {
        warn!(max_ticks, "tick budget exhausted before the body settled");
        sim.stop();
    }

    RunSummary {
        settled,
        ticks,
        bounces: sim.bounces(),
        frame: sim.frame(),
        snapshot: *sim.snapshot(),
    }
}
