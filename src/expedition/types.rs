//! Expedition configuration and result types.

use crate::core::constants::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One admin-tunable expedition duration tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationTier {
    pub id: String,
    pub name: String,
    pub hours: u32,
    pub total_waves: u32,
    /// Team power at which a wave-one clear is near certain.
    pub required_power: f64,
    /// Stat scaling for rendered wave encounters. The pass-chance formula
    /// reads only `required_power`; this feeds the presentation layer.
    pub enemy_power_mult: f64,
    pub xp_mult: f64,
    pub gold_mult: f64,
    pub gacha_chance_mult: f64,
}

/// Expedition tuning. Read-only input to the resolver, normally authored
/// by the admin subsystem; the default mirrors `core::constants`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpeditionConfig {
    pub max_team_size: u32,
    pub base_xp_per_wave: f64,
    pub base_gold_per_wave: f64,
    pub base_gacha_chance: f64,
    pub power_ratio_gacha_bonus: f64,
    pub max_gacha_chance: f64,
    pub tiers: Vec<DurationTier>,
}

impl Default for ExpeditionConfig {
    fn default() -> Self {
        let tier = |id: &str, name: &str, hours, total_waves, required_power, enemy, xp, gold, gacha| {
            DurationTier {
                id: id.to_string(),
                name: name.to_string(),
                hours,
                total_waves,
                required_power,
                enemy_power_mult: enemy,
                xp_mult: xp,
                gold_mult: gold,
                gacha_chance_mult: gacha,
            }
        };
        Self {
            max_team_size: EXPEDITION_MAX_TEAM_SIZE,
            base_xp_per_wave: BASE_XP_PER_WAVE,
            base_gold_per_wave: BASE_GOLD_PER_WAVE,
            base_gacha_chance: BASE_GACHA_CHANCE,
            power_ratio_gacha_bonus: POWER_RATIO_GACHA_BONUS,
            max_gacha_chance: MAX_GACHA_CHANCE,
            tiers: vec![
                tier("short", "Scouting Run", 1, 5, 300.0, 1.0, 1.0, 1.0, 1.0),
                tier("medium", "Border Patrol", 4, 10, 600.0, 1.1, 1.25, 1.25, 1.5),
                tier("long", "Deep Venture", 8, 15, 1000.0, 1.2, 1.5, 1.5, 2.0),
                tier("epic", "Grand Crusade", 24, 20, 1800.0, 1.35, 2.0, 2.0, 3.0),
            ],
        }
    }
}

impl ExpeditionConfig {
    pub fn tier(&self, id: &str) -> Option<&DurationTier> {
        self.tiers.iter().find(|t| t.id == id)
    }
}

/// A dispatched expedition awaiting collection. Pure snapshot: the
/// resolver reads only this plus the config, so re-running it against a
/// fixed random draw is idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveExpedition {
    pub id: Uuid,
    pub character_ids: Vec<String>,
    pub tier_id: String,
    pub started_at: DateTime<Utc>,
    pub completes_at: DateTime<Utc>,
    /// Team power frozen at departure.
    pub team_power: f64,
}

impl ActiveExpedition {
    pub fn is_complete(&self, now: DateTime<Utc>) -> bool {
        now >= self.completes_at
    }
}

/// Outcome of one resolved expedition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpeditionResult {
    pub waves_cleared: u32,
    pub total_waves: u32,
    pub full_clear: bool,
    pub xp_earned: u64,
    pub gold_earned: u64,
    pub gacha_pull_won: bool,
    /// The chance the bonus-pull roll was made at, for the result screen.
    pub gacha_chance: f64,
}

impl ExpeditionResult {
    /// Zeroed result, used as the silent fallback for inconsistent input
    /// (for example a tier id missing from the config).
    pub fn empty() -> Self {
        Self {
            waves_cleared: 0,
            total_waves: 0,
            full_clear: false,
            xp_earned: 0,
            gold_earned: 0,
            gacha_pull_won: false,
            gacha_chance: 0.0,
        }
    }
}

/// Expectation-only estimate shown before committing a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpeditionPreview {
    pub expected_waves: f64,
    pub full_clear_chance: f64,
    pub expected_xp: f64,
    pub expected_gold: f64,
    pub gacha_chance: f64,
}
