//! Plumber Sim entry point
//!
//! Headless runner: loads a config, drives the simulation with the seeded
//! autopilot or a replayed input script, and hands every frame to the trace
//! renderer.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use plumber_sim::GameConfig;
use plumber_sim::platform::{Autopilot, FixedStep, InputSource, ScriptedInput};
use plumber_sim::renderer::{RenderFrame, Renderer, TraceRenderer};
use plumber_sim::sim::{GameState, tick};

/// Run the platformer simulation without a window
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file (tuning and level); built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// Autopilot seed
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Replay a JSON array of per-tick inputs instead of the autopilot
    #[arg(short, long)]
    inputs: Option<PathBuf>,

    /// Pace ticks against the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Print the final state as JSON on stdout
    #[arg(long)]
    snapshot: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn step(state: &mut GameState, pilot: &mut dyn InputSource) {
    let input = pilot.poll(state);
    tick(state, &input);
    for event in &state.events {
        log::debug!("tick {}: {:?}", state.time_ticks, event);
    }
}

fn run(args: &Args) -> Result<GameState, plumber_sim::ConfigError> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let mut state = GameState::new(config)?;
    let (mut pilot, limit): (Box<dyn InputSource>, u64) = match &args.inputs {
        Some(path) => {
            let script = ScriptedInput::from_json(&std::fs::read_to_string(path)?)?;
            log::info!("Replaying {} inputs from {}", script.len(), path.display());
            let limit = args.ticks.min(script.len() as u64);
            (Box::new(script), limit)
        }
        None => {
            log::info!("Autopilot seed: {}", args.seed);
            (Box::new(Autopilot::new(args.seed)), args.ticks)
        }
    };
    let mut renderer = TraceRenderer::new();

    if args.realtime {
        let mut pacing = FixedStep::new();
        let mut last = Instant::now();
        while state.time_ticks < limit && !state.is_over() {
            let now = Instant::now();
            let substeps = pacing.advance(now.duration_since(last).as_secs_f32());
            last = now;
            for _ in 0..substeps {
                if state.time_ticks >= limit || state.is_over() {
                    break;
                }
                step(&mut state, pilot.as_mut());
            }
            if substeps > 0 {
                renderer.draw(&RenderFrame::capture(&state));
            }
            std::thread::sleep(Duration::from_millis(1));
        }
    } else {
        while state.time_ticks < limit && !state.is_over() {
            step(&mut state, pilot.as_mut());
            renderer.draw(&RenderFrame::capture(&state));
        }
    }

    log::info!(
        "Stopped at tick {} ({:?}), player at {:?}, {} frames drawn",
        state.time_ticks,
        state.phase,
        state.player.rect().midbottom(),
        renderer.frames()
    );
    Ok(state)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    log::info!("Plumber Sim starting...");

    let state = match run(&args) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.snapshot {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Failed to serialize snapshot: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
