//! Externally owned control values.
//!
//! The control surface (sliders in a GUI, flags in a CLI) writes through a
//! [`ControlHandle`]; the controller copies the whole [`Controls`] value at
//! the top of every tick. Writes from another thread are whole-value and
//! never observed half-applied.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::params::MAX_BOUNCE;

/// Smallest mass the control surface accepts.
pub const MIN_MASS: u32 = 1;
/// Largest mass the control surface accepts.
pub const MAX_MASS: u32 = 50;

/// Values supplied by the control surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    /// Restitution coefficient, in hundredths within `[0, 0.99]`.
    pub bounce: f64,
    /// Displayed mass in kg. Has no effect on the physics.
    pub mass: u32,
}

impl Controls {
    /// Creates controls, clamping both values into their accepted ranges.
    pub fn new(bounce: f64, mass: u32) -> Self {
        Self {
            bounce: clamp_bounce(bounce),
            mass: mass.clamp(MIN_MASS, MAX_MASS),
        }
    }
}

/// Clamps to `[0, 0.99]` and rounds to the slider's 0.01 resolution.
pub fn clamp_bounce(bounce: f64) -> f64 {
    if bounce.is_nan() {
        return 0.0;
    }
    (bounce.clamp(0.0, MAX_BOUNCE) * 100.0).round() / 100.0
}

/// Shared handle to the control values. Clones refer to the same values.
///
/// ```rust
/// use kinematics::{ControlHandle, Controls};
///
/// let handle = ControlHandle::new(Controls::new(0.7, 10));
/// let slider = handle.clone();
/// slider.set_bounce(1.5);
/// assert_eq!(handle.snapshot().bounce, 0.99);
/// ```
#[derive(Debug, Clone)]
pub struct ControlHandle {
    inner: Arc<Mutex<Controls>>,
}

impl ControlHandle {
    /// Creates a handle holding `controls`.
    pub fn new(controls: Controls) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controls)),
        }
    }

    /// Copies the current values.
    pub fn snapshot(&self) -> Controls {
        *self.inner.lock()
    }

    /// Sets the restitution coefficient, clamped and rounded.
    pub fn set_bounce(&self, bounce: f64) {
        self.inner.lock().bounce = clamp_bounce(bounce);
    }

    /// Sets the displayed mass, clamped to `[1, 50]`.
    pub fn set_mass(&self, mass: u32) {
        self.inner.lock().mass = mass.clamp(MIN_MASS, MAX_MASS);
    }
}
