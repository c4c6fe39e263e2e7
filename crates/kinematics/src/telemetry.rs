//! Derived readouts: elapsed time, speed and distance.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::scenario::DistanceMode;
use crate::vector::Vector;

/// Distance readout, by variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Distance {
    /// Path length travelled since the run started.
    Path {
        /// Accumulated length.
        length: f64,
    },
    /// Absolute position of the body.
    Displacement {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
}

/// Telemetry for one tick. Plain numbers; formatting is up to the display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Wall-clock seconds since the run started.
    pub elapsed_secs: f64,
    /// Logical time, `steps × dt`.
    pub simulated_time: f64,
    /// Steps taken in this run.
    pub steps: u64,
    /// Norm of the body's velocity.
    pub speed: f64,
    /// Current velocity.
    pub velocity: Vector,
    /// Distance readout.
    pub distance: Distance,
}

impl TelemetrySnapshot {
    /// Readout before the first tick of a run.
    pub fn initial(body: &Body, mode: DistanceMode) -> Self {
        Self {
            elapsed_secs: 0.0,
            simulated_time: 0.0,
            steps: 0,
            speed: body.speed(),
            velocity: body.velocity,
            distance: match mode {
                DistanceMode::PathLength => Distance::Path { length: 0.0 },
                DistanceMode::Displacement => Distance::Displacement {
                    x: body.position.x,
                    y: body.position.y,
                },
            },
        }
    }
}

/// Accumulates telemetry over a run.
///
/// Path length uses the trapezoidal rule over the speed at the start of the
/// tick and the speed once the tick has been fully resolved:
///
/// ```text
/// distance += (|v_prev| + |v_curr|) / 2 · dt
/// ```
#[derive(Debug, Clone)]
pub struct Telemetry {
    mode: DistanceMode,
    dt: f64,
    path_length: f64,
    steps: u64,
    latest: TelemetrySnapshot,
}

impl Telemetry {
    /// Starts a fresh accumulator for a run beginning with `body`.
    pub fn new(mode: DistanceMode, dt: f64, body: &Body) -> Self {
        Self {
            mode,
            dt,
            path_length: 0.0,
            steps: 0,
            latest: TelemetrySnapshot::initial(body, mode),
        }
    }

    /// Clears accumulators for a new run.
    pub fn reset(&mut self, body: &Body) {
        self.path_length = 0.0;
        self.steps = 0;
        self.latest = TelemetrySnapshot::initial(body, self.mode);
    }

    /// Records one completed tick.
    ///
    /// `prev_speed` is the speed the body had before the tick's integration
    /// step; `body` is the body after collision resolution.
    pub fn update(&mut self, prev_speed: f64, body: &Body, elapsed: Duration) -> TelemetrySnapshot {
        self.steps += 1;
        let speed = body.speed();

        let distance = match self.mode {
            DistanceMode::PathLength => {
                self.path_length += (prev_speed.abs() + speed) / 2.0 * self.dt;
                Distance::Path {
                    length: self.path_length,
                }
            }
            DistanceMode::Displacement => Distance::Displacement {
                x: body.position.x,
                y: body.position.y,
            },
        };

        #[allow(clippy::cast_precision_loss)]
        let simulated_time = self.steps as f64 * self.dt;

        self.latest = TelemetrySnapshot {
            elapsed_secs: elapsed.as_secs_f64(),
            simulated_time,
            steps: self.steps,
            speed,
            velocity: body.velocity,
            distance,
        };
        self.latest
    }

    /// Most recent snapshot.
    pub const fn latest(&self) -> &TelemetrySnapshot {
        &self.latest
    }
}
