//! Physical and numerical parameters of a run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Speed below which a body in contact with a boundary is considered at rest.
pub const SETTLE_SPEED: f64 = 0.5;

/// Largest restitution coefficient the control surface accepts.
pub const MAX_BOUNCE: f64 = 0.99;

/// Nominal cadence of the tick source (~60 Hz).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Returns a time step for a given number of frames per second.
///
/// # Example
///
/// ```rust
/// use kinematics::fps;
///
/// assert!((fps(60) - 0.016_666).abs() < 1e-5);
/// ```
#[inline]
pub fn fps(n: u32) -> f64 {
    1.0 / f64::from(n)
}

/// Size of the rectangular domain, with the origin at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent; the floor sits at `y = height`.
    pub height: f64,
}

impl Bounds {
    /// Creates bounds of the given size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Parameters owned by the controller for the duration of a run.
///
/// `bounce` is the only field that changes mid-run; the controller copies it
/// from the control surface at the top of each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Gravitational acceleration along `+y`, in px per time unit squared.
    pub gravity: f64,
    /// Restitution coefficient in `[0, 0.99]`.
    pub bounce: f64,
    /// Fixed integration step.
    pub dt: f64,
    /// Contact speed below which the run settles.
    #[serde(default = "default_settle_speed")]
    pub settle_speed: f64,
    /// Domain size.
    pub bounds: Bounds,
}

const fn default_settle_speed() -> f64 {
    SETTLE_SPEED
}

impl SimulationParams {
    /// Creates parameters with the default settle threshold.
    pub const fn new(gravity: f64, bounce: f64, dt: f64, bounds: Bounds) -> Self {
        Self {
            gravity,
            bounce,
            dt,
            settle_speed: SETTLE_SPEED,
            bounds,
        }
    }

    /// Returns `true` when impacts absorb all energy.
    #[inline]
    pub fn is_inelastic(&self) -> bool {
        self.bounce <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_common_values() {
        assert!((fps(60) - 1.0 / 60.0).abs() < 1e-15);
        assert!((fps(1) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn new_uses_default_settle_speed() {
        let params = SimulationParams::new(9.81, 0.7, 0.016, Bounds::new(600.0, 500.0));
        assert_eq!(params.settle_speed, SETTLE_SPEED);
        assert!(!params.is_inelastic());
    }

    #[test]
    fn zero_bounce_is_inelastic() {
        let params = SimulationParams::new(9.81, 0.0, 0.016, Bounds::new(600.0, 500.0));
        assert!(params.is_inelastic());
    }

    #[test]
    fn settle_speed_defaults_when_missing() {
        let params: SimulationParams = serde_json::from_str(
            r#"{"gravity":0.2,"bounce":0.7,"dt":1.0,"bounds":{"width":800.0,"height":500.0}}"#,
        )
        .unwrap();
        assert_eq!(params.settle_speed, SETTLE_SPEED);
    }
}
