//! Run configuration resolved from presets, config files and flags.
//!
//! Precedence, lowest to highest:
//!
//! 1. the variant's preset ([`Scenario::preset`]),
//! 2. a TOML file given with `--config`,
//! 3. environment variables and command-line flags.
//!
//! The file format mirrors what `kinematics presets` prints:
//!
//! ```toml
//! gravity = 0.2
//! bounce = 0.7
//! dt = 1.0
//! width = 800.0
//! height = 500.0
//!
//! [initial]
//! x = 50.0
//! y = 400.0
//! vx = 3.0
//! vy = -8.0
//! radius = 15.0
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use kinematics::controls::{clamp_bounce, MAX_MASS, MIN_MASS};
use kinematics::{Scenario, ScenarioError, Variant};
use serde::{Deserialize, Serialize};

use crate::cli::{FreeFallArgs, RenderMode, RunArgs};

/// Optional overrides for every scenario field.
///
/// Missing fields keep the preset's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    /// Gravitational acceleration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f64>,
    /// Restitution coefficient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounce: Option<f64>,
    /// Integration step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dt: Option<f64>,
    /// Settle threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settle_speed: Option<f64>,
    /// Domain width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Domain height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Displayed mass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass: Option<u32>,
    /// Starting state of the ball.
    #[serde(default, skip_serializing_if = "InitialFile::is_empty")]
    pub initial: InitialFile,
}

/// Optional overrides for the initial conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InitialFile {
    /// Centre x.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Centre y.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Horizontal velocity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vx: Option<f64>,
    /// Vertical velocity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vy: Option<f64>,
    /// Ball radius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl InitialFile {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ScenarioFile {
    /// Reads overrides from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Every field of `scenario`, as a file would spell it.
    pub fn from_scenario(scenario: &Scenario) -> Self {
        let p = &scenario.params;
        let i = &scenario.initial;
        let free_fall = scenario.variant == Variant::FreeFall;
        Self {
            gravity: Some(p.gravity),
            bounce: Some(p.bounce),
            dt: Some(p.dt),
            settle_speed: Some(p.settle_speed),
            width: Some(p.bounds.width),
            height: Some(p.bounds.height),
            mass: free_fall.then_some(scenario.mass),
            initial: InitialFile {
                // Free fall always starts centred and without sideways speed.
                x: (!free_fall).then_some(i.position.x),
                y: Some(i.position.y),
                vx: (!free_fall).then_some(i.velocity.x),
                vy: Some(i.velocity.y),
                radius: Some(i.radius),
            },
        }
    }

    /// Writes the overrides as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialisation fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(ConfigError::Serialize)
    }

    /// Applies the overrides present in the file.
    pub fn apply(&self, scenario: &mut Scenario) {
        let p = &mut scenario.params;
        set(&mut p.gravity, self.gravity);
        set(&mut p.bounce, self.bounce);
        set(&mut p.dt, self.dt);
        set(&mut p.settle_speed, self.settle_speed);
        set(&mut p.bounds.width, self.width);
        set(&mut p.bounds.height, self.height);
        set(&mut scenario.mass, self.mass);

        let i = &mut scenario.initial;
        set(&mut i.position.x, self.initial.x);
        set(&mut i.position.y, self.initial.y);
        set(&mut i.velocity.x, self.initial.vx);
        set(&mut i.velocity.y, self.initial.vy);
        set(&mut i.radius, self.initial.radius);
    }
}

#[allow(clippy::float_cmp)]
fn on_bounce_grid(bounce: f64) -> bool {
    clamp_bounce(bounce) == bounce
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Scenario to simulate.
    pub scenario: Scenario,
    /// Real-time tick interval.
    pub tick: Duration,
    /// Skip sleeping between ticks.
    pub fast: bool,
    /// Tick budget.
    pub max_ticks: u64,
    /// Telemetry print interval in ticks; 0 prints only the final state.
    pub every: u64,
    /// Render mode.
    pub render: RenderMode,
    /// ASCII canvas size in characters.
    pub canvas: (usize, usize),
    /// Emit JSON instead of text.
    pub json: bool,
}

impl RunConfig {
    /// Resolves a free-fall run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unreadable config files or invalid scenarios.
    pub fn free_fall(args: &FreeFallArgs) -> Result<Self, ConfigError> {
        Self::resolve(Variant::FreeFall, &args.run, args.mass)
    }

    /// Resolves a projectile run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unreadable config files or invalid scenarios.
    pub fn projectile(args: &RunArgs) -> Result<Self, ConfigError> {
        Self::resolve(Variant::Projectile, args, None)
    }

    fn resolve(variant: Variant, args: &RunArgs, mass: Option<u32>) -> Result<Self, ConfigError> {
        let mut scenario = Scenario::preset(variant);
        if let Some(path) = &args.config {
            ScenarioFile::load(path)?.apply(&mut scenario);
        }

        let p = &mut scenario.params;
        set(&mut p.bounce, args.bounce.map(clamp_bounce));
        set(&mut p.bounds.width, args.width);
        set(&mut p.bounds.height, args.height);
        set(&mut scenario.mass, mass.map(|m| m.clamp(MIN_MASS, MAX_MASS)));

        scenario.validate()?;
        // The controller rounds bounce and clamps mass; file values must
        // already be what the run will use.
        if !on_bounce_grid(scenario.params.bounce) {
            return Err(ConfigError::BounceStep(scenario.params.bounce));
        }
        if !(MIN_MASS..=MAX_MASS).contains(&scenario.mass) {
            return Err(ConfigError::MassOutOfRange(scenario.mass));
        }
        if args.columns < 3 || args.rows < 3 {
            return Err(ConfigError::CanvasTooSmall {
                columns: args.columns,
                rows: args.rows,
            });
        }

        Ok(Self {
            scenario,
            tick: Duration::from_millis(args.tick_ms),
            fast: args.fast,
            max_ticks: args.max_ticks,
            every: args.every,
            render: args.render,
            canvas: (args.columns, args.rows),
            json: args.json,
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Cannot read config file {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Config file is not valid TOML for a scenario.
    #[error("Invalid config file {path}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },

    /// Scenario could not be written as TOML.
    #[error("Cannot serialize scenario: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The resolved scenario is not runnable.
    #[error("Invalid scenario: {0}")]
    Scenario(#[from] ScenarioError),

    /// Bounce is not on the 0.01 grid of the control surface.
    #[error("Bounce {0} is not a multiple of 0.01")]
    BounceStep(f64),

    /// Mass outside the accepted range.
    #[error("Mass must lie in [1, 50] kg, got {0}")]
    MassOutOfRange(u32),

    /// ASCII canvas cannot hold a border and a ball.
    #[error("Canvas of {columns}x{rows} characters is too small (minimum 3x3)")]
    CanvasTooSmall {
        /// Requested columns.
        columns: usize,
        /// Requested rows.
        rows: usize,
    },
}
