//! Fixed-step semi-implicit Euler integration under constant gravity.
//!
//! Velocity is advanced first with the full step's acceleration and the
//! position then moves with the *updated* velocity:
//!
//! ```text
//! vx' = vx
//! vy' = vy + g·dt
//! x'  = x + vx'·dt
//! y'  = y + vy'·dt
//! ```
//!
//! From rest this gives `y₁ = y₀ + g·dt²` rather than the closed-form
//! `y₀ + ½·g·dt²`.

use crate::body::Body;
use crate::params::SimulationParams;
use crate::vector::Vector;

/// Advances `body` by one step of `params.dt`.
///
/// Gravity acts along `+y` only; the horizontal velocity is never changed
/// here. The function is pure: the input body is left untouched.
///
/// # Example
///
/// ```rust
/// use kinematics::{integrator, Body, Bounds, Point, SimulationParams};
///
/// let params = SimulationParams::new(9.81, 0.7, 0.016, Bounds::new(600.0, 500.0));
/// let body = Body::at_rest(Point::new(300.0, 150.0), 20.0);
///
/// let next = integrator::step(&body, &params);
/// assert!((next.velocity.y - 0.15696).abs() < 1e-12);
/// assert!((next.position.y - 150.0025113600).abs() < 1e-9);
/// ```
#[inline]
pub fn step(body: &Body, params: &SimulationParams) -> Body {
    let dt = params.dt;
    let velocity = Vector::new(body.velocity.x, body.velocity.y + params.gravity * dt);
    let position = body.position + velocity * dt;
    Body::new(position, velocity, body.radius())
}
