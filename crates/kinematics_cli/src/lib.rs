#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]

//! Headless host for the [`kinematics`] simulator.
//!
//! Parses the command line, resolves presets, config files and flags into a
//! [`config::RunConfig`], and drives a run to completion while printing
//! telemetry and optional ASCII frames.

pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod logging;
pub mod render;

pub use cli::Cli;
pub use config::{ConfigError, RunConfig, ScenarioFile};
