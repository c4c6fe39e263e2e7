//! Kinematic state of the simulated point mass.

use serde::{Deserialize, Serialize};

use crate::vector::{Point, Vector};

/// A round point mass with position, velocity and a fixed radius.
///
/// The radius only matters for boundary contact: the body touches a
/// boundary when its edge, not its centre, reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Centre of the body.
    pub position: Point,
    /// Current velocity.
    pub velocity: Vector,
    radius: f64,
}

impl Body {
    /// Creates a body at `position` moving with `velocity`.
    #[inline]
    pub const fn new(position: Point, velocity: Vector, radius: f64) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    /// Creates a body at rest.
    #[inline]
    pub const fn at_rest(position: Point, radius: f64) -> Self {
        Self::new(position, Vector::zero(), radius)
    }

    /// Radius of the body, constant for a run.
    #[inline]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Euclidean norm of the velocity.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    /// Returns `true` if the body is not moving at all.
    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.velocity == Vector::zero()
    }
}
