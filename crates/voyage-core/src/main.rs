//! Headless voyage runner
//!
//! Plays a whole voyage with the autopilot and reports how it went.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use voyage_core::{Autopilot, EventLogger, Voyage, VoyageConfig};

/// Command line arguments for the runner
#[derive(Parser, Debug)]
#[command(name = "voyage_sim")]
#[command(about = "Runs a survival voyage headless with the autopilot")]
struct Args {
    /// Random seed for reproducibility (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Path to the voyage TOML config (defaults to ./voyage.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of days to survive (overrides the config)
    #[arg(long)]
    days: Option<u32>,

    /// Write every event as JSONL to this file
    #[arg(long)]
    events: Option<PathBuf>,

    /// Write the final voyage state as JSON to this file
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => VoyageConfig::from_file(path)?,
        None => VoyageConfig::load_or_default(),
    };
    if let Some(seed) = args.seed {
        config.voyage.seed = seed;
    }
    if let Some(days) = args.days {
        config.voyage.max_days = days;
    }

    let mut voyage = Voyage::new(&config)?;
    let mut pilot = Autopilot::new(&config);
    let mut logger = match &args.events {
        Some(path) => EventLogger::new(path)?,
        None => EventLogger::null(),
    };

    println!("Voyage Simulation");
    println!("=================");
    println!("Seed: {}", config.voyage.seed);
    println!("Days to survive: {}", config.voyage.max_days);
    println!("Crew: {}", voyage.crew_members().len());
    println!();

    let outcome = loop {
        let log = pilot.play_day(&mut voyage)?;
        logger.log_batch(&voyage.drain_events())?;

        let hauled: u32 = log.haul.iter().map(|(_, count)| count).sum();
        println!(
            "[Day {:>3}] hauled {:>2} | handed out {:>2} | repaired {:>4.1} | crew {}/{} | hull {:>5.1}",
            log.day,
            hauled,
            log.allocations.len(),
            log.repaired,
            voyage.alive_count(),
            voyage.crew_members().len(),
            log.report.hull_after
        );
        for crew_id in &log.report.deaths {
            if let Some(member) = voyage.crew(*crew_id) {
                println!("          {} ({}) died", member.name(), crew_id);
            }
        }

        if let Some(outcome) = log.report.outcome {
            break outcome;
        }
    };
    logger.flush()?;

    println!();
    println!("{}", outcome);

    if let Some(path) = &args.snapshot {
        let json = serde_json::to_string_pretty(&voyage.snapshot())?;
        fs::write(path, json)?;
        println!("Wrote snapshot to {}", path.display());
    }
    if let Some(path) = &args.events {
        println!("Logged {} events to {}", logger.event_count(), path.display());
    }

    Ok(())
}
