//! Scenario validation errors.

use thiserror::Error;

/// Reasons a scenario cannot be run.
///
/// Stepping itself never fails; these are only produced when a scenario is
/// built from outside input such as a config file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    /// A parameter that must be strictly positive was not.
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive {
        /// Field name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// Restitution coefficient outside `[0, 0.99]`.
    #[error("bounce must lie in [0, 0.99], got {0}")]
    BounceOutOfRange(f64),

    /// Initial position or velocity is NaN or infinite.
    #[error("initial {0} is not finite")]
    NotFinite(&'static str),

    /// The body does not fit inside the domain at its starting position.
    #[error("body of radius {radius} at ({x}, {y}) lies outside the {width}x{height} domain")]
    OutOfBounds {
        /// Initial centre x.
        x: f64,
        /// Initial centre y.
        y: f64,
        /// Body radius.
        radius: f64,
        /// Domain width.
        width: f64,
        /// Domain height.
        height: f64,
    },
}
