//! Headless fleet simulation run
//! Ticks an engine as fast as possible and writes the final snapshot as JSON

use clap::Parser;
use fleet_sim::core::config::SimulationConfig;
use fleet_sim::core::error::Result;
use fleet_sim::simulation::engine::SimulationEngine;
use fleet_sim::simulation::tick::SimulationEvent;
use std::path::PathBuf;
use std::time::Instant;

/// Headless run - advance the fleet a fixed number of ticks with advice enabled
#[derive(Parser, Debug)]
#[command(name = "headless_run")]
#[command(about = "Run a fleet simulation without a console and dump the final state")]
struct Args {
    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 480)]
    ticks: u64,

    /// Fleet size override
    #[arg(long)]
    fleet_size: Option<usize>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the final snapshot
    #[arg(long, default_value = "fleet_output.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("fleet_sim=warn")
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(fleet_size) = args.fleet_size {
        config.fleet_size = fleet_size;
    }

    println!("Starting Headless Fleet Simulation");
    println!("==================================");
    println!("Seed: {}", config.seed);
    println!("Fleet: {} vehicles", config.fleet_size);
    println!("Simulating {} ticks...", args.ticks);
    println!();

    let mut engine = SimulationEngine::new(config)?;
    engine.start();

    let mut arrivals = 0usize;
    let mut status_changes = 0usize;
    let mut decisions = 0usize;

    let start = Instant::now();
    for _ in 0..args.ticks {
        let report = engine.tick();
        decisions += report.decisions.len();
        for event in &report.events {
            match event {
                SimulationEvent::VehicleArrived { .. } => arrivals += 1,
                SimulationEvent::StatusChanged { .. } => status_changes += 1,
                _ => {}
            }
        }
    }
    let elapsed = start.elapsed();
    engine.pause();

    let snapshot = engine.snapshot();
    println!("{}", snapshot.summary());
    println!("Actual time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);

    snapshot.write_json(&args.output)?;
    println!("\nFull output written to {}", args.output.display());

    println!("\n--- Run Summary ---");
    println!("Arrivals: {}", arrivals);
    println!("Status changes: {}", status_changes);
    println!("Decisions: {}", decisions);

    Ok(())
}
