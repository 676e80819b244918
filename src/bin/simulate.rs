//! Balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 200 runs per matchup
//!   cargo run --bin simulate -- -n 50 -l 20     # 50 runs at level 20
//!   cargo run --bin simulate -- --seed 42       # Reproducible run

use starfall::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("=== STARFALL BALANCE SIMULATOR ===");
    println!();
    println!("Configuration:");
    println!("  Runs/matchup:  {}", config.num_runs);
    println!("  Level:         {}", config.level);
    println!("  Ascension:     {}", config.ascension);
    println!("  Team size:     {}", config.team_size);
    if let Some(seed) = config.seed {
        println!("  Seed:          {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        println!("{}", report.to_json());
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if let Some(value) = args.get(i + 1).and_then(|v| v.parse().ok()) {
                    config.num_runs = value;
                }
                i += 2;
            }
            "-l" | "--level" => {
                if let Some(value) = args.get(i + 1).and_then(|v| v.parse().ok()) {
                    config.level = value;
                }
                i += 2;
            }
            "-a" | "--ascension" => {
                if let Some(value) = args.get(i + 1).and_then(|v| v.parse().ok()) {
                    config.ascension = value;
                }
                i += 2;
            }
            "-t" | "--team-size" => {
                if let Some(value) = args.get(i + 1).and_then(|v| v.parse().ok()) {
                    config.team_size = value;
                }
                i += 2;
            }
            "--seed" => {
                if let Some(value) = args.get(i + 1).and_then(|v| v.parse().ok()) {
                    config.seed = Some(value);
                }
                i += 2;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
                i += 1;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
                i += 1;
            }
            _ => {
                i += 1;
            }
        }
    }

    config
}
