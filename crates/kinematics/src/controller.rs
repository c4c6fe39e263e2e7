//! Run lifecycle: reset, tick, settle.
//!
//! ```text
//!            start()              settled contact
//!   Idle ────────────▶ Running ───────────────────▶ Settled
//!    ▲                 │  ▲ tick()                    │
//!    └──── stop() ─────┘  └──────── start() ──────────┘
//! ```
//!
//! `start()` is accepted in every state and always begins a fresh run.
//! `tick()` does nothing unless the controller is running.

use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::body::Body;
use crate::clock::{Clock, RunClock, SystemClock};
use crate::collision::{CollisionHandler, Contact};
use crate::controls::{ControlHandle, Controls};
use crate::integrator;
use crate::params::{Bounds, SimulationParams};
use crate::scenario::Scenario;
use crate::telemetry::{Telemetry, TelemetrySnapshot};
use crate::vector::Point;

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// No run in progress.
    Idle,
    /// Ticking.
    Running,
    /// The body came to rest; no further ticks are needed.
    Settled,
}

/// What the tick source should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking.
    Continue,
    /// Stop ticking.
    Stop,
}

/// Everything a render sink needs to draw the body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Body centre.
    pub position: Point,
    /// Body radius.
    pub radius: f64,
    /// Domain size.
    pub bounds: Bounds,
}

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Continue or stop.
    pub outcome: TickOutcome,
    /// State after the tick.
    pub state: RunState,
    /// Frame to render.
    pub frame: Frame,
    /// Telemetry after the tick.
    pub snapshot: TelemetrySnapshot,
    /// Contacts resolved in this tick.
    pub contacts: Vec<Contact>,
}

/// Drives one body through runs of a [`Scenario`].
///
/// # Example
///
/// ```rust
/// use kinematics::{RunState, Scenario, SimulationController, TickOutcome};
///
/// let mut sim = SimulationController::new(Scenario::free_fall());
/// sim.start();
///
/// while sim.tick().outcome == TickOutcome::Continue {}
///
/// assert_eq!(sim.state(), RunState::Settled);
/// assert!(sim.body().is_at_rest());
/// ```
#[derive(Debug)]
pub struct SimulationController<C = SystemClock> {
    scenario: Scenario,
    params: SimulationParams,
    handler: CollisionHandler,
    controls: ControlHandle,
    state: RunState,
    body: Body,
    telemetry: Telemetry,
    clock: RunClock<C>,
    bounces: u64,
}

impl SimulationController<SystemClock> {
    /// Creates an idle controller timed by the system clock.
    ///
    /// The control values start from the scenario's `bounce` and `mass`.
    pub fn new(scenario: Scenario) -> Self {
        let controls = ControlHandle::new(Controls::new(scenario.params.bounce, scenario.mass));
        Self::with_parts(scenario, controls, SystemClock)
    }
}

impl<C: Clock> SimulationController<C> {
    /// Creates an idle controller with an explicit control handle and clock.
    pub fn with_parts(scenario: Scenario, controls: ControlHandle, clock: C) -> Self {
        let body = scenario.initial_body();
        Self {
            params: scenario.params,
            handler: scenario.variant.collision_handler(),
            telemetry: Telemetry::new(scenario.variant.distance_mode(), scenario.params.dt, &body),
            clock: RunClock::new(clock),
            scenario,
            controls,
            state: RunState::Idle,
            body,
            bounces: 0,
        }
    }

    /// Begins a fresh run from the scenario's initial conditions.
    pub fn start(&mut self) {
        self.body = self.scenario.initial_body();
        self.params = self.scenario.params;
        self.params.bounce = self.controls.snapshot().bounce;
        self.telemetry.reset(&self.body);
        self.clock.restart();
        self.bounces = 0;
        self.state = RunState::Running;
        info!(
            variant = self.scenario.variant.name(),
            bounce = self.params.bounce,
            "run started"
        );
    }

    /// Stops the current run, keeping the last body and snapshot readable.
    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            info!(steps = self.telemetry.latest().steps, "run stopped");
        }
        self.state = RunState::Idle;
    }

    /// Advances the run by one fixed step.
    ///
    /// Reads the control values, integrates, resolves contacts, and updates
    /// telemetry. Returns [`TickOutcome::Stop`] once the body has settled,
    /// and without doing anything if the controller is not running.
    pub fn tick(&mut self) -> TickReport {
        if self.state != RunState::Running {
            return self.report(TickOutcome::Stop, Vec::new());
        }

        self.params.bounce = self.controls.snapshot().bounce;

        let prev_speed = self.body.speed();
        let stepped = integrator::step(&self.body, &self.params);
        let resolution = self.handler.resolve(&stepped, &self.params);
        self.body = resolution.body;
        self.bounces += resolution.bounces() as u64;

        let snapshot = self
            .telemetry
            .update(prev_speed, &self.body, self.clock.elapsed());
        trace!(
            step = snapshot.steps,
            x = self.body.position.x,
            y = self.body.position.y,
            speed = snapshot.speed,
            "tick"
        );

        let outcome = if resolution.settled {
            self.state = RunState::Settled;
            info!(
                steps = snapshot.steps,
                bounces = self.bounces,
                elapsed_secs = snapshot.elapsed_secs,
                "body settled"
            );
            TickOutcome::Stop
        } else {
            TickOutcome::Continue
        };

        self.report(outcome, resolution.contacts)
    }

    fn report(&self, outcome: TickOutcome, contacts: Vec<Contact>) -> TickReport {
        TickReport {
            outcome,
            state: self.state,
            frame: self.frame(),
            snapshot: *self.telemetry.latest(),
            contacts,
        }
    }

    /// Current render frame.
    pub fn frame(&self) -> Frame {
        Frame {
            position: self.body.position,
            radius: self.body.radius(),
            bounds: self.params.bounds,
        }
    }

    /// Current state.
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Current body.
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Parameters in effect for the latest tick.
    pub const fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Scenario the controller restarts from.
    pub const fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Latest telemetry snapshot.
    pub const fn snapshot(&self) -> &TelemetrySnapshot {
        self.telemetry.latest()
    }

    /// Bounces in the current run.
    pub const fn bounces(&self) -> u64 {
        self.bounces
    }

    /// Handle for the control surface.
    pub fn controls(&self) -> ControlHandle {
        self.controls.clone()
    }

    /// Sets the restitution coefficient used from the next tick on.
    pub fn set_bounce(&self, bounce: f64) {
        self.controls.set_bounce(bounce);
    }

    /// Sets the displayed mass. Gravity is unaffected.
    pub fn set_mass(&self, mass: u32) {
        self.controls.set_mass(mass);
    }

    /// Displayed mass.
    pub fn mass(&self) -> u32 {
        self.controls.snapshot().mass
    }

    /// Run clock.
    pub const fn clock(&self) -> &RunClock<C> {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::clock::ManualClock;
    use crate::collision::{Boundary, ContactResponse};
    use crate::telemetry::Distance;

    const TOLERANCE: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn manual(scenario: Scenario) -> (SimulationController<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let controls = ControlHandle::new(Controls::new(scenario.params.bounce, scenario.mass));
        (
            SimulationController::with_parts(scenario, controls, clock.clone()),
            clock,
        )
    }

    #[test]
    fn idle_tick_is_a_no_op() {
        let mut sim = SimulationController::new(Scenario::free_fall());
        let before = *sim.body();
        let report = sim.tick();

        assert_eq!(report.outcome, TickOutcome::Stop);
        assert_eq!(report.state, RunState::Idle);
        assert_eq!(*sim.body(), before);
        assert_eq!(sim.snapshot().steps, 0);
    }

    #[test]
    fn first_tick_matches_semi_implicit_euler() {
        let mut sim = SimulationController::new(Scenario::free_fall());
        sim.start();
        let report = sim.tick();

        assert_eq!(report.outcome, TickOutcome::Continue);
        assert!(approx_eq(sim.body().velocity.y, 0.15696));
        assert!(approx_eq(sim.body().position.y, 150.002_511_36));
        assert!(approx_eq(report.frame.position.y, 150.002_511_36));
    }

    #[test]
    fn elapsed_follows_wall_clock_not_steps() {
        let (mut sim, clock) = manual(Scenario::free_fall());
        sim.start();
        clock.advance(Duration::from_millis(20));
        let snap = sim.tick().snapshot;

        assert!(approx_eq(snap.elapsed_secs, 0.020));
        assert!(approx_eq(snap.simulated_time, 0.016));
    }

    #[test]
    fn start_resets_everything() {
        let (mut sim, clock) = manual(Scenario::free_fall());
        sim.start();
        for _ in 0..100 {
            clock.advance(Duration::from_millis(16));
            sim.tick();
        }
        assert!(sim.snapshot().steps == 100);

        sim.start();
        assert_eq!(sim.state(), RunState::Running);
        assert_eq!(*sim.body(), Scenario::free_fall().initial_body());
        assert_eq!(sim.snapshot().steps, 0);
        assert_eq!(sim.snapshot().distance, Distance::Path { length: 0.0 });
        assert_eq!(sim.clock().elapsed(), Duration::ZERO);
        assert_eq!(sim.bounces(), 0);
    }

    #[test]
    fn stop_keeps_last_frame() {
        let mut sim = SimulationController::new(Scenario::projectile());
        sim.start();
        sim.tick();
        let frame = sim.frame();
        sim.stop();

        assert_eq!(sim.state(), RunState::Idle);
        assert_eq!(sim.tick().frame, frame);
    }

    #[test]
    fn zero_bounce_settles_on_first_contact() {
        let mut sim = SimulationController::new(Scenario::free_fall());
        sim.set_bounce(0.0);
        sim.start();

        let mut last = sim.tick();
        while last.outcome == TickOutcome::Continue {
            assert!(last.contacts.is_empty());
            last = sim.tick();
        }

        assert_eq!(last.contacts.len(), 1);
        assert_eq!(last.contacts[0].response, ContactResponse::Settled);
        assert!(last.contacts[0].impact_speed > 0.5);
        assert_eq!(sim.bounces(), 0);
        assert!(approx_eq(sim.body().position.y, 480.0));
    }

    #[test]
    fn bounce_change_applies_to_next_contact() {
        let mut sim = SimulationController::new(Scenario::projectile());
        sim.start();

        let report = loop {
            let report = sim.tick();
            if !report.contacts.is_empty() {
                break report;
            }
        };
        assert_eq!(report.contacts[0].boundary, Boundary::Floor);
        let after_first = sim.body().velocity.y;
        assert!(approx_eq(after_first, -0.7 * report.contacts[0].impact_speed));

        sim.set_bounce(0.5);
        // The bounce that already happened keeps its coefficient.
        assert!(approx_eq(sim.body().velocity.y, after_first));

        let report = loop {
            let report = sim.tick();
            if report
                .contacts
                .iter()
                .any(|c| c.boundary == Boundary::Floor)
            {
                break report;
            }
        };
        assert!(approx_eq(sim.params().bounce, 0.5));
        if report.contacts[0].response == ContactResponse::Bounced {
            assert!(approx_eq(
                sim.body().velocity.y,
                -0.5 * report.contacts[0].impact_speed
            ));
        }
    }

    #[test]
    fn mass_has_no_physical_effect() {
        let mut light = SimulationController::new(Scenario::free_fall());
        let mut heavy = SimulationController::new(Scenario::free_fall());
        light.set_mass(1);
        heavy.set_mass(50);
        light.start();
        heavy.start();

        for _ in 0..200 {
            light.tick();
            heavy.tick();
        }
        assert_eq!(light.body(), heavy.body());
        assert_eq!(light.mass(), 1);
        assert_eq!(heavy.mass(), 50);
    }

    #[test]
    fn settled_run_ignores_further_ticks() {
        let mut sim = SimulationController::new(Scenario::free_fall());
        sim.start();
        while sim.tick().outcome == TickOutcome::Continue {}

        let body = *sim.body();
        let steps = sim.snapshot().steps;
        for _ in 0..10 {
            let report = sim.tick();
            assert_eq!(report.state, RunState::Settled);
        }
        assert_eq!(*sim.body(), body);
        assert!(sim.body().is_at_rest());
        assert_eq!(sim.snapshot().steps, steps);
    }
}
