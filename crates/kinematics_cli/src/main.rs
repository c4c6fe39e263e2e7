#![forbid(unsafe_code)]

//! # kinematics
//!
//! Runs bouncing-ball simulations from the command line.
//!
//! ```bash
//! kinematics free-fall --every 6
//! kinematics projectile --fast --json
//! ```

use kinematics_cli::{app, logging, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    logging::init(cli.log_level(), cli.log_format);
    app::run(cli)
}
