//! Simulation variants and their starting conditions.
//!
//! A [`Scenario`] is everything needed to (re)start a run: which variant,
//! the physical parameters, where the body starts, and the cosmetic mass
//! shown by free-fall hosts.

use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::collision::CollisionHandler;
use crate::error::ScenarioError;
use crate::params::{Bounds, MAX_BOUNCE, SimulationParams};
use crate::vector::{Point, Vector};

/// The two flavours of the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Vertical drop onto the floor, time measured in seconds.
    FreeFall,
    /// Thrown body bouncing between floor and walls, time measured in frames.
    Projectile,
}

impl Variant {
    /// Boundary set and settle rule of the variant.
    pub const fn collision_handler(self) -> CollisionHandler {
        match self {
            Variant::FreeFall => CollisionHandler::free_fall(),
            Variant::Projectile => CollisionHandler::projectile(),
        }
    }

    /// What the telemetry reports as distance.
    pub const fn distance_mode(self) -> DistanceMode {
        match self {
            Variant::FreeFall => DistanceMode::PathLength,
            Variant::Projectile => DistanceMode::Displacement,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Variant::FreeFall => "free-fall",
            Variant::Projectile => "projectile",
        }
    }
}

/// Telemetry distance flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMode {
    /// Trapezoidal integral of speed over the run.
    PathLength,
    /// Raw position of the body.
    Displacement,
}

/// Starting state of the body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialConditions {
    /// Centre at start. Free fall ignores `x` and centres the body.
    pub position: Point,
    /// Velocity at start. Free fall ignores `x`.
    pub velocity: Vector,
    /// Body radius.
    pub radius: f64,
}

/// A complete, restartable simulation setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Variant.
    pub variant: Variant,
    /// Physical parameters.
    pub params: SimulationParams,
    /// Body at start.
    pub initial: InitialConditions,
    /// Mass in kg, displayed only. Gravity does not depend on it.
    pub mass: u32,
}

impl Scenario {
    /// Ball dropped from rest at `y = 150` under `g = 9.81 px/s²`, 60 Hz steps.
    pub const fn free_fall() -> Self {
        let bounds = Bounds::new(600.0, 500.0);
        Self {
            variant: Variant::FreeFall,
            params: SimulationParams::new(9.81, 0.7, 0.016, bounds),
            initial: InitialConditions {
                position: Point::new(300.0, 150.0),
                velocity: Vector::zero(),
                radius: 20.0,
            },
            mass: 10,
        }
    }

    /// Ball thrown up and right from `(50, 400)` under `g = 0.2 px/frame²`.
    pub const fn projectile() -> Self {
        Self {
            variant: Variant::Projectile,
            params: SimulationParams::new(0.2, 0.7, 1.0, Bounds::new(800.0, 500.0)),
            initial: InitialConditions {
                position: Point::new(50.0, 400.0),
                velocity: Vector::new(3.0, -8.0),
                radius: 15.0,
            },
            mass: 10,
        }
    }

    /// Preset for `variant`.
    pub const fn preset(variant: Variant) -> Self {
        match variant {
            Variant::FreeFall => Self::free_fall(),
            Variant::Projectile => Self::projectile(),
        }
    }

    /// Builds the body a fresh run starts with.
    pub fn initial_body(&self) -> Body {
        let InitialConditions {
            position,
            velocity,
            radius,
        } = self.initial;
        match self.variant {
            Variant::FreeFall => Body::new(
                Point::new(self.params.bounds.width / 2.0, position.y),
                Vector::new(0.0, velocity.y),
                radius,
            ),
            Variant::Projectile => Body::new(position, velocity, radius),
        }
    }

    /// Checks that the scenario can be stepped.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScenarioError`] found.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let p = &self.params;
        positive("gravity", p.gravity)?;
        positive("dt", p.dt)?;
        positive("settle_speed", p.settle_speed)?;
        positive("width", p.bounds.width)?;
        positive("height", p.bounds.height)?;
        positive("radius", self.initial.radius)?;

        if !(0.0..=MAX_BOUNCE).contains(&p.bounce) {
            return Err(ScenarioError::BounceOutOfRange(p.bounce));
        }
        if !self.initial.position.is_finite() {
            return Err(ScenarioError::NotFinite("position"));
        }
        if !self.initial.velocity.is_finite() {
            return Err(ScenarioError::NotFinite("velocity"));
        }

        let body = self.initial_body();
        let r = body.radius();
        let Point { x, y } = body.position;
        let inside = x - r >= 0.0
            && x + r <= p.bounds.width
            && y - r >= 0.0
            && y + r <= p.bounds.height;
        if !inside {
            return Err(ScenarioError::OutOfBounds {
                x,
                y,
                radius: r,
                width: p.bounds.width,
                height: p.bounds.height,
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ScenarioError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ScenarioError::NotPositive { name, value })
    }
}
