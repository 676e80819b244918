//! Core balance constants and the stat model.

pub mod constants;
pub mod stats;

pub use constants::*;
pub use stats::{compute_stats, team_power, unit_power, Stats};
