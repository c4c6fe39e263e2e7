//! Command-line interface for the `kinematics` binary.
//!
//! # Examples
//!
//! ```bash
//! # Drop a ball in real time, printing telemetry ten times a second
//! kinematics free-fall --every 6
//!
//! # Throw a less bouncy ball and run it as fast as possible
//! kinematics projectile --bounce 0.5 --fast --render ascii
//!
//! # Print the preset as a config file to edit
//! kinematics presets projectile > projectile.toml
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Bouncing-ball kinematics simulator.
///
/// Runs a free-fall or projectile simulation headlessly, ticking at a
/// fixed cadence until the ball settles.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "kinematics",
    author,
    version,
    about = "Bouncing-ball kinematics simulator",
    long_about = "Runs a free-fall or projectile simulation headlessly, ticking at a \
                  fixed cadence until the ball settles."
)]
pub struct Cli {
    /// Enable verbose logging (repeat for more)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value = "text", env = "KINEMATICS_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Simulation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Drop a ball straight down onto the floor
    FreeFall(FreeFallArgs),

    /// Throw a ball that bounces off the floor and both walls
    Projectile(RunArgs),

    /// Print a preset scenario as a TOML config
    Presets(PresetArgs),
}

/// Options shared by both simulations.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// TOML file overriding preset scenario values
    #[arg(long, short = 'c', env = "KINEMATICS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Restitution coefficient, clamped to [0, 0.99]
    #[arg(long, short = 'b', env = "KINEMATICS_BOUNCE")]
    pub bounce: Option<f64>,

    /// Domain width in px
    #[arg(long)]
    pub width: Option<f64>,

    /// Domain height in px
    #[arg(long)]
    pub height: Option<f64>,

    /// Tick interval in milliseconds
    #[arg(long, default_value_t = 16, env = "KINEMATICS_TICK_MS")]
    pub tick_ms: u64,

    /// Tick as fast as possible instead of in real time
    #[arg(long)]
    pub fast: bool,

    /// Give up after this many ticks
    #[arg(long, default_value_t = 1_000_000)]
    pub max_ticks: u64,

    /// Print telemetry every N ticks (0 prints only the final state)
    #[arg(long, short = 'e', default_value_t = 0)]
    pub every: u64,

    /// How to draw the ball
    #[arg(long, value_enum, default_value = "none")]
    pub render: RenderMode,

    /// Canvas width in characters for ASCII rendering
    #[arg(long, default_value_t = 60)]
    pub columns: usize,

    /// Canvas height in characters for ASCII rendering
    #[arg(long, default_value_t = 20)]
    pub rows: usize,

    /// Emit the final summary as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Options for the free-fall simulation.
#[derive(Args, Debug, Clone)]
pub struct FreeFallArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Displayed mass in kg, clamped to [1, 50] (no effect on the fall)
    #[arg(long, short = 'm', env = "KINEMATICS_MASS")]
    pub mass: Option<u32>,
}

/// Arguments for the presets subcommand.
#[derive(Args, Debug, Clone)]
pub struct PresetArgs {
    /// Which preset to print
    #[arg(value_enum)]
    pub variant: VariantArg,
}

/// Variant names as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantArg {
    /// Vertical drop
    FreeFall,
    /// Thrown ball
    Projectile,
}

impl From<VariantArg> for kinematics::Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::FreeFall => Self::FreeFall,
            VariantArg::Projectile => Self::Projectile,
        }
    }
}

/// Render modes.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Telemetry text only
    #[default]
    None,
    /// Character-grid drawing of the domain
    Ascii,
}

/// Log formats.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable compact lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Default log directive for the verbosity count.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
