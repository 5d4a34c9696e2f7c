//! Headless driver for the Contrail steering simulation.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use contrail::{
    init_logging, AngleDifference, Frame, RunOutcome, Scenario, Simulation, SimulationConfig,
    SteeringEngine,
};
use figment::providers::Serialized;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// Fly an airplane between clouds using local steering
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file layered over the built-in defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for scenario generation; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of clouds to place
    #[arg(long)]
    obstacles: Option<usize>,

    /// Tick budget before giving up
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Angle measure used to choose the avoidance side
    #[arg(long, value_enum)]
    angle_difference: Option<AngleMode>,

    /// Pace ticks at the configured tick rate
    #[arg(long)]
    realtime: bool,

    /// Write the scenario and one JSON frame per tick to this file (`-` for stdout)
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum AngleMode {
    Literal,
    Wrapped,
}

impl From<AngleMode> for AngleDifference {
    fn from(mode: AngleMode) -> Self {
        match mode {
            AngleMode::Literal => Self::Literal,
            AngleMode::Wrapped => Self::Wrapped,
        }
    }
}

#[derive(Serialize)]
struct Header<'a> {
    seed: u64,
    scenario: &'a Scenario,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut figment = SimulationConfig::figment(args.config.as_deref());
    if let Some(count) = args.obstacles {
        figment = figment.merge(Serialized::default("obstacle_count", count));
    }
    if let Some(ticks) = args.max_ticks {
        figment = figment.merge(Serialized::default("max_ticks", ticks));
    }
    if let Some(mode) = args.angle_difference {
        figment = figment.merge(Serialized::default(
            "angle_difference",
            AngleDifference::from(mode),
        ));
    }
    SimulationConfig::from_figment(&figment).context("loading simulation config")
}

fn frame_sink(path: Option<&PathBuf>) -> Result<Option<BufWriter<Box<dyn Write>>>> {
    let Some(target) = path else {
        return Ok(None);
    };
    let writer: Box<dyn Write> = if target.as_os_str() == "-" {
        Box::new(io::stdout().lock())
    } else {
        let file = File::create(target)
            .with_context(|| format!("creating frame file {}", target.display()))?;
        Box::new(file)
    };
    Ok(Some(BufWriter::new(writer)))
}

fn write_line<W: Write, T: Serialize>(sink: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *sink, value)?;
    sink.write_all(b"\n")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Scenario seed {seed}");

    let mut rng = StdRng::seed_from_u64(seed);
    let scenario = Scenario::generate(&config, &mut rng).context("generating scenario")?;
    let agent = scenario.agent(&config).context("building agent")?;

    let mut sink = frame_sink(args.frames.as_ref())?;
    if let Some(out) = sink.as_mut() {
        write_line(out, &Header {
            seed,
            scenario: &scenario,
        })
        .context("writing scenario header")?;
    }

    let pause = args
        .realtime
        .then(|| Duration::from_secs_f64(config.tick_rate.recip()));
    let mut write_error = None;
    let mut simulation = Simulation::new(
        agent,
        scenario.obstacles.clone(),
        SteeringEngine::new(&config),
    );
    let outcome = simulation.run_with(config.max_ticks, |frame: &Frame| {
        if write_error.is_none() {
            if let Some(out) = sink.as_mut() {
                write_error = write_line(out, frame).err();
            }
        }
        if let Some(interval) = pause {
            thread::sleep(interval);
        }
    });
    if let Some(err) = write_error {
        return Err(err).context("writing frames");
    }
    if let Some(mut out) = sink {
        out.flush().context("flushing frames")?;
    }

    match outcome {
        RunOutcome::Arrived { ticks } => info!("Reached destination in {ticks} ticks"),
        RunOutcome::Exhausted { ticks } => info!("Stopped after {ticks} ticks without arriving"),
    }
    Ok(())
}
