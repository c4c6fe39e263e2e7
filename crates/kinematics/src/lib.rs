#![forbid(unsafe_code)]
// Allow these clippy lints for physics/math code readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::module_name_repetitions)]

//! # Kinematics
//!
//! A fixed-step point-mass simulator for bouncing-ball animations.
//!
//! A body moves under constant gravity inside a rectangular domain, loses
//! energy at every boundary impact according to a restitution coefficient,
//! and eventually settles. Two variants share the same machinery:
//!
//! - **Free fall**: a vertical drop onto the floor
//! - **Projectile**: a thrown body bouncing off the floor and both walls
//!
//! ## Example
//!
//! ```rust
//! use kinematics::{Scenario, SimulationController, TickOutcome};
//!
//! let mut sim = SimulationController::new(Scenario::projectile());
//! sim.start();
//!
//! // A host calls tick() once per frame and draws report.frame.
//! loop {
//!     let report = sim.tick();
//!     if report.outcome == TickOutcome::Stop {
//!         break;
//!     }
//! }
//!
//! println!("settled after {} steps", sim.snapshot().steps);
//! ```
//!
//! ## Tick order
//!
//! Each tick reads the control values, integrates one semi-implicit Euler
//! step, resolves boundary contacts, then updates telemetry:
//!
//! ```text
//! controls ─▶ integrator::step ─▶ CollisionHandler::resolve ─▶ Telemetry::update
//! ```
//!
//! ## Coordinates
//!
//! Screen coordinates: origin top-left, `y` grows downward, gravity is
//! positive. The domain has a floor and two walls but no ceiling.

pub mod body;
pub mod clock;
pub mod collision;
pub mod controller;
pub mod controls;
pub mod driver;
mod error;
pub mod integrator;
pub mod params;
pub mod scenario;
pub mod telemetry;
mod vector;

pub use body::Body;
pub use clock::{Clock, ManualClock, RunClock, SystemClock};
pub use collision::{Axis, Boundary, CollisionHandler, Contact, ContactResponse, Resolution};
pub use controller::{Frame, RunState, SimulationController, TickOutcome, TickReport};
pub use controls::{ControlHandle, Controls};
pub use driver::RunSummary;
pub use error::ScenarioError;
pub use params::{fps, Bounds, SimulationParams, DEFAULT_TICK_INTERVAL, SETTLE_SPEED};
pub use scenario::{DistanceMode, InitialConditions, Scenario, Variant};
pub use telemetry::{Distance, Telemetry, TelemetrySnapshot};
pub use vector::{Point, Vector};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::controller::{RunState, SimulationController, TickOutcome};
    pub use crate::driver::{FixedRateTicker, ImmediateTicker, NullSink, RenderSink, Ticker};
    pub use crate::scenario::{Scenario, Variant};
    pub use crate::telemetry::{Distance, TelemetrySnapshot};
    pub use crate::vector::{Point, Vector};
}
