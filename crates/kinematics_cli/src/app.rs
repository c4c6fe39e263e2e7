//! Subcommand dispatch.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use kinematics::driver::{self, FixedRateTicker, ImmediateTicker, RunSummary, Ticker};
use kinematics::{Scenario, SimulationController, Variant};
use serde::Serialize;
use tracing::info;

use crate::cli::{Cli, Command, RenderMode};
use crate::config::{RunConfig, ScenarioFile};
use crate::display::{self, ControlReadout};
use crate::render::{AsciiCanvas, ConsoleSink};

/// Final report emitted by `--json`.
#[derive(Debug, Serialize)]
struct RunReport<'a> {
    variant: Variant,
    scenario: &'a Scenario,
    mass: u32,
    bounce: f64,
    summary: &'a RunSummary,
}

/// Runs the selected subcommand, writing results to stdout.
///
/// # Errors
///
/// Returns an error for invalid configuration, failed output, or a run that
/// does not settle within its tick budget.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::FreeFall(args) => simulate(&RunConfig::free_fall(&args)?),
        Command::Projectile(args) => simulate(&RunConfig::projectile(&args)?),
        Command::Presets(args) => presets(args.variant.into()),
    }
}

fn simulate(config: &RunConfig) -> Result<()> {
    let scenario = config.scenario;
    let mut sim = SimulationController::new(scenario);
    let controls = (scenario.variant == Variant::FreeFall).then(|| sim.controls());
    let canvas = (config.render == RenderMode::Ascii)
        .then(|| AsciiCanvas::new(config.canvas.0, config.canvas.1));

    let mut ticker: Box<dyn Ticker> = if config.fast {
        Box::new(ImmediateTicker)
    } else {
        Box::new(FixedRateTicker::new(config.tick))
    };

    info!(
        variant = scenario.variant.name(),
        fast = config.fast,
        max_ticks = config.max_ticks,
        "simulating"
    );

    let stdout = io::stdout();
    let mut sink = ConsoleSink::new(stdout.lock(), config.every, canvas, controls);
    let summary = driver::run(&mut sim, ticker.as_mut(), &mut sink, config.max_ticks);
    let final_shown = sink.last_written() == Some(summary.snapshot.steps);
    let mut out = sink.finish().context("Failed to write frames")?;

    let current = sim.controls().snapshot();
    if config.json {
        let report = RunReport {
            variant: scenario.variant,
            scenario: &scenario,
            mass: current.mass,
            bounce: current.bounce,
            summary: &summary,
        };
        serde_json::to_writer_pretty(&mut out, &report).context("Failed to write summary")?;
        writeln!(out)?;
    } else {
        if !final_shown {
            if let Some(canvas) = &canvas {
                out.write_all(canvas.draw(&summary.frame).as_bytes())?;
            }
            let readout = (scenario.variant == Variant::FreeFall).then_some(ControlReadout {
                mass: current.mass,
                bounce: current.bounce,
            });
            writeln!(out, "{}", display::telemetry_line(&summary.snapshot, readout))?;
        }
        writeln!(
            out,
            "{} after {} ticks ({} bounces, {} simulated)",
            if summary.settled { "Settled" } else { "Stopped" },
            summary.ticks,
            summary.bounces,
            display::format_seconds(summary.snapshot.simulated_time)
        )?;
    }
    out.flush()?;

    if !summary.settled {
        bail!(
            "{} simulation did not settle within {} ticks",
            scenario.variant.name(),
            config.max_ticks
        );
    }
    Ok(())
}

fn presets(variant: Variant) -> Result<()> {
    let text = ScenarioFile::from_scenario(&Scenario::preset(variant)).to_toml()?;
    let mut out = io::stdout().lock();
    write!(out, "{text}")?;
    out.flush()?;
    Ok(())
}
