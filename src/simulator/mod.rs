//! Balance simulator for Monte Carlo analysis.
//!
//! Runs role-vs-role battle grids and expedition reward sweeps to check:
//! - win-rate spread across role matchups
//! - average battle length per matchup
//! - expedition clear and bonus-pull rates per duration tier
//!
//! The simulator drives the real engine entry points, so its numbers
//! match live gameplay behavior.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{MatchupStats, SimReport, TierStats};
pub use runner::run_simulation;
