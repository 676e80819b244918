//! Stat derivation and the team power heuristic.
//!
//! Combat stats are a pure function of role base stats, rarity, level,
//! ascension tier and an optional content override multiplier. Out-of-range
//! levels or ascensions are accepted as given; validation belongs to the
//! content editors, not the engine.

use super::constants::*;
use serde::{Deserialize, Serialize};

/// A unit's derived combat stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spd: u32,
}

impl Stats {
    pub fn new(hp: u32, atk: u32, def: u32, spd: u32) -> Self {
        Self { hp, atk, def, spd }
    }
}

/// Derives combat stats from base stats and progression.
///
/// Each stat is `floor(base * rarity_mult * level_scale * ascension_scale
/// * override_mult)`. SPD is exempt from level and ascension scaling; only
/// the rarity and override multipliers apply to it.
pub fn compute_stats(
    base: Stats,
    rarity_mult: f64,
    level: u32,
    ascension: u32,
    override_mult: f64,
) -> Stats {
    let level_scale = 1.0 + (level.saturating_sub(1) as f64) * LEVEL_STAT_BONUS;
    let ascension_scale = 1.0 + (ascension as f64) * ASCENSION_STAT_BONUS;
    let full = rarity_mult * level_scale * ascension_scale * override_mult;
    let spd_only = rarity_mult * override_mult;

    Stats {
        hp: scale_stat(base.hp, full),
        atk: scale_stat(base.atk, full),
        def: scale_stat(base.def, full),
        spd: scale_stat(base.spd, spd_only),
    }
}

fn scale_stat(base: u32, mult: f64) -> u32 {
    (base as f64 * mult).max(0.0) as u32
}

/// Scalar power heuristic for one unit. Used only by the expedition
/// resolver; the battle engine never consults it.
pub fn unit_power(stats: &Stats) -> f64 {
    stats.hp as f64 * POWER_HP_WEIGHT
        + stats.atk as f64 * POWER_ATK_WEIGHT
        + stats.def as f64 * POWER_DEF_WEIGHT
        + stats.spd as f64 * POWER_SPD_WEIGHT
}

/// Aggregate power for a team of units.
pub fn team_power<'a>(units: impl IntoIterator<Item = &'a Stats>) -> f64 {
    units.into_iter().map(unit_power).sum()
}
