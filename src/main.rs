//! Void Armada - Entry Point
//!
//! Runs a headless fleet battle and prints the narrative log plus the
//! final status report, as text or JSON.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use void_armada::battle::{BattleState, ShipReport};
use void_armada::core::config::BattleConfig;
use void_armada::core::error::Result;
use void_armada::dice::SeededRoller;
use void_armada::fleet::{demo_fleet, load_fleet};

/// Run a fleet battle simulation
#[derive(Parser, Debug)]
#[command(name = "void-armada")]
#[command(about = "Run a deterministic fleet battle simulation")]
struct Args {
    /// Number of rounds to simulate
    #[arg(long, default_value_t = 3)]
    rounds: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Fleet definition file (TOML); the built-in demo fleet when omitted
    #[arg(long)]
    fleet: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    rounds: u32,
    survivors: usize,
    report: Vec<ShipReport>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("void_armada=info")
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, rounds = args.rounds, "battle starting");

    let fleet = match &args.fleet {
        Some(path) => load_fleet(path)?,
        None => demo_fleet()?,
    };

    let mut config = BattleConfig::new();
    config.rounds = args.rounds;

    let mut state = BattleState::new(fleet, config)?;
    let mut roller = SeededRoller::seed_from_u64(seed);
    state.run(&mut roller)?;

    let report = state.final_report();
    let summary = RunSummary {
        seed,
        rounds: state.round,
        survivors: report.iter().filter(|s| !s.destroyed).count(),
        report,
    };

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ => {
            for event in &state.battle_log.events {
                println!("{}", event.description);
            }
            println!();
            for line in &summary.report {
                let status = if line.destroyed {
                    "DESTROYED".to_string()
                } else {
                    format!("Hull {}", line.hull)
                };
                println!("{}: {}", line.name, status);
            }
            println!("Seed: {}", summary.seed);
        }
    }

    Ok(())
}
