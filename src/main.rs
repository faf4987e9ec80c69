//! Fleet Sim - Entry Point
//!
//! Interactive console for a live fleet simulation. The tick loop runs on the
//! tokio runtime in the background while this loop reads commands.

use clap::Parser;
use fleet_sim::core::config::SimulationConfig;
use fleet_sim::core::error::Result;
use fleet_sim::runtime::TickScheduler;
use fleet_sim::simulation::decision_log::DECISION_LOG_CAPACITY;
use fleet_sim::simulation::engine::SimulationEngine;
use fleet_sim::simulation::output::FleetSnapshot;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "fleet-sim")]
#[command(about = "Run an interactive fleet simulation")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured random seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("fleet_sim=info")
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    tracing::info!(seed = config.seed, fleet_size = config.fleet_size, "Fleet Sim starting...");

    let rt = Runtime::new()?;
    let engine = SimulationEngine::new(config)?;
    let mut scheduler = TickScheduler::new(engine);

    println!("\n=== FLEET SIM ===");
    println!("Live fleet simulation with dispatch advice");
    println!();
    println!("Commands:");
    println!("  start             - Start ticking on the configured cadence");
    println!("  pause             - Pause ticking, keeping state");
    println!("  restart           - Regenerate the fleet and stop");
    println!("  tick / t          - Advance one tick by hand");
    println!("  fleet <n>         - Resize the fleet");
    println!("  speed <x>         - Set the speed multiplier");
    println!("  interval <secs>   - Set the base tick period");
    println!("  vehicle <id>      - Show one vehicle");
    println!("  log [n]           - Show the n most recent decisions");
    println!("  status / s        - Show detailed status");
    println!("  quit / q          - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, arg) = match input.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (input, ""),
        };

        match command {
            "quit" | "q" => break,
            "start" => {
                if rt.block_on(scheduler.start()) {
                    println!("Running.");
                } else {
                    println!("Already running.");
                }
            }
            "pause" => {
                if rt.block_on(scheduler.pause()) {
                    println!("Paused.");
                } else {
                    println!("Not running.");
                }
            }
            "restart" => {
                rt.block_on(scheduler.restart());
                println!("Restarted. Simulation stopped.");
            }
            "tick" | "t" => {
                let report = rt.block_on(async { scheduler.lock().await.tick() });
                println!(
                    "Tick {} ({}) complete: {} events, utilization {}%.",
                    report.tick,
                    report.time,
                    report.events.len(),
                    report.utilization
                );
            }
            "fleet" => match arg.parse::<usize>() {
                Ok(n) => match rt.block_on(scheduler.set_fleet_size(n)) {
                    Ok(outcome) => println!("Fleet resized: {:?}.", outcome),
                    Err(e) => println!("{}", e),
                },
                Err(_) => println!("Usage: fleet <number>"),
            },
            "speed" => match arg.parse::<f64>() {
                Ok(x) => match rt.block_on(scheduler.set_speed_multiplier(x)) {
                    Ok(()) => println!("Speed set to {}x.", x),
                    Err(e) => println!("{}", e),
                },
                Err(_) => println!("Usage: speed <multiplier>"),
            },
            "interval" => match arg.parse::<f64>().ok().and_then(|s| Duration::try_from_secs_f64(s).ok()) {
                Some(period) => match rt.block_on(scheduler.set_tick_period(period)) {
                    Ok(()) => println!("Tick period set to {:?}.", period),
                    Err(e) => println!("{}", e),
                },
                None => println!("Usage: interval <seconds>"),
            },
            "vehicle" => {
                let engine = rt.block_on(scheduler.lock());
                match engine.vehicle(arg) {
                    Ok(v) => {
                        println!("{} [{}]", v.id, v.status);
                        println!("  Position: ({:.4}, {:.4})", v.position.lat, v.position.lng);
                        println!("  Route:    {}", v.route);
                        println!("  ETA:      {} min", v.eta);
                        println!("  Fuel:     {}%", v.fuel());
                        println!("  Updated:  tick {}", v.last_update);
                    }
                    Err(e) => println!("{}", e),
                }
            }
            "log" => {
                let count = if arg.is_empty() {
                    Ok(DECISION_LOG_CAPACITY)
                } else {
                    arg.parse::<usize>()
                };
                let Ok(count) = count else {
                    println!("Usage: log [count]");
                    continue;
                };
                let engine = rt.block_on(scheduler.lock());
                if engine.decision_log().is_empty() {
                    println!("No decisions yet.");
                }
                for entry in engine.decision_log().recent(count) {
                    println!(
                        "  #{} {} [{}] {}: {}",
                        entry.id, entry.time, entry.impact, entry.action, entry.reason
                    );
                }
            }
            "status" | "s" => {
                let snapshot = rt.block_on(scheduler.snapshot());
                display_detailed_status(&snapshot);
            }
            _ => println!("Unknown command: {}", input),
        }
    }

    rt.block_on(scheduler.pause());
    tracing::info!("Fleet Sim shutting down");
    Ok(())
}

fn display_detailed_status(snapshot: &FleetSnapshot) {
    println!();
    println!("{}", snapshot.summary());

    println!("\nDemand:");
    for zone in &snapshot.demand_zones {
        println!("  {:<16} {:>3} requests ({})", zone.name, zone.requests(), zone.level());
    }

    println!("\nTraffic:");
    for record in &snapshot.traffic {
        println!(
            "  {:<16} {:<6} {} incidents",
            record.area, record.congestion, record.incidents
        );
    }

    let history: Vec<String> = snapshot
        .metrics
        .utilization_history
        .iter()
        .map(|u| u.to_string())
        .collect();
    println!("\nUtilization history: {}", history.join(" "));
    println!(
        "Avg response {:.1} min, fuel efficiency {:.1}, revenue/h {}, score {}",
        snapshot.metrics.avg_response_time,
        snapshot.metrics.fuel_efficiency,
        snapshot.metrics.revenue_per_hour,
        snapshot.metrics.performance_score
    );
    println!();
}
