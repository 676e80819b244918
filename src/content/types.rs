//! Content catalog types.
//!
//! Everything here is authored by the admin/content subsystem and is
//! read-only to the engine. The engine receives lookups through a
//! [`ContentIndex`] built at simulation-construction time; it never reads
//! ambient global state.

use crate::core::constants::{RARITY_MULTIPLIERS, ROLE_BASE_STATS};
use crate::core::stats::Stats;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Combat role. Determines base stats, preferred grid row and default
/// targeting behavior (see `battle::roles`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Tank,
    Warrior,
    Archer,
    Mage,
    Assassin,
    Healer,
    Summoner,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Tank,
        Role::Warrior,
        Role::Archer,
        Role::Mage,
        Role::Assassin,
        Role::Healer,
        Role::Summoner,
    ];

    fn index(self) -> usize {
        match self {
            Role::Tank => 0,
            Role::Warrior => 1,
            Role::Archer => 2,
            Role::Mage => 3,
            Role::Assassin => 4,
            Role::Healer => 5,
            Role::Summoner => 6,
        }
    }

    /// Unmodified base stats for this role.
    pub fn base_stats(self) -> Stats {
        let (hp, atk, def, spd) = ROLE_BASE_STATS[self.index()];
        Stats::new(hp, atk, def, spd)
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Tank => "Tank",
            Role::Warrior => "Warrior",
            Role::Archer => "Archer",
            Role::Mage => "Mage",
            Role::Assassin => "Assassin",
            Role::Healer => "Healer",
            Role::Summoner => "Summoner",
        }
    }
}

/// Gacha rarity, one through five stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    OneStar,
    TwoStar,
    ThreeStar,
    FourStar,
    FiveStar,
}

impl Rarity {
    pub fn stars(self) -> u32 {
        match self {
            Rarity::OneStar => 1,
            Rarity::TwoStar => 2,
            Rarity::ThreeStar => 3,
            Rarity::FourStar => 4,
            Rarity::FiveStar => 5,
        }
    }

    pub fn stat_multiplier(self) -> f64 {
        RARITY_MULTIPLIERS[(self.stars() - 1) as usize]
    }
}

/// How an ability selects its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetingMode {
    SingleClosest,
    SingleLowestHp,
    SingleBackRow,
    AoeFirstN,
    AoeRandomN,
    HealLowestAlly,
}

impl TargetingMode {
    pub fn is_heal(self) -> bool {
        matches!(self, TargetingMode::HealLowestAlly)
    }
}

fn default_power_mult() -> f64 {
    1.0
}

fn default_target_count() -> u32 {
    1
}

fn default_heal_threshold() -> f64 {
    0.5
}

/// An ability as authored in the content catalog. Referenced by id from
/// characters, enemies and bosses; immutable during battle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub id: String,
    pub name: String,
    pub targeting: TargetingMode,
    /// Damage or healing as a multiple of the caster's ATK.
    #[serde(default = "default_power_mult")]
    pub power_mult: f64,
    /// Number of targets for the AoE modes.
    #[serde(default = "default_target_count")]
    pub target_count: u32,
    #[serde(default)]
    pub ignore_defense: bool,
    /// Heal eligibility cutoff as a fraction of max HP. Only read for
    /// `heal_lowest_ally`.
    #[serde(default = "default_heal_threshold")]
    pub heal_threshold: f64,
    /// Turns between casts. `None` means no cooldown.
    #[serde(default)]
    pub cooldown: Option<u32>,
}

/// Summoner tuning carried by a character or enemy template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummonerConfig {
    /// Enemy-template ids the summoner may bring in, cast in rotation.
    pub summon_template_ids: Vec<String>,
    /// Cap on simultaneously alive summons (clamped to 1..=3 in battle).
    pub max_summons: u32,
}

fn default_stat_mult() -> f64 {
    1.0
}

/// A playable character as authored in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDefinition {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub rarity: Rarity,
    #[serde(default)]
    pub ability_ids: Vec<String>,
    /// Flat multiplier applied on top of role base stats.
    #[serde(default = "default_stat_mult")]
    pub stat_mult: f64,
    #[serde(default)]
    pub summoner: Option<SummonerConfig>,
}

/// An enemy (or summonable unit) template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub rarity: Rarity,
    pub level: u32,
    #[serde(default)]
    pub ability_ids: Vec<String>,
    #[serde(default = "default_stat_mult")]
    pub stat_mult: f64,
    #[serde(default)]
    pub boss: bool,
    #[serde(default)]
    pub summoner: Option<SummonerConfig>,
}

/// One room of a dungeon: enemies plus reward tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DungeonRoom {
    pub enemy_ids: Vec<String>,
    #[serde(default = "default_stat_mult")]
    pub difficulty_mult: f64,
    #[serde(default)]
    pub xp_reward: u64,
    #[serde(default)]
    pub gold_reward: u64,
}

/// One floor of an endless tower. Floors reuse the dungeon-room battle
/// path with their own difficulty ramp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerFloor {
    pub floor: u32,
    pub enemy_ids: Vec<String>,
    #[serde(default = "default_stat_mult")]
    pub difficulty_mult: f64,
}

/// Immutable by-id lookups handed to the engine at construction time.
#[derive(Debug, Clone, Default)]
pub struct ContentIndex {
    abilities: HashMap<String, AbilityDefinition>,
    enemies: HashMap<String, EnemyTemplate>,
}

impl ContentIndex {
    pub fn new(
        abilities: impl IntoIterator<Item = AbilityDefinition>,
        enemies: impl IntoIterator<Item = EnemyTemplate>,
    ) -> Self {
        Self {
            abilities: abilities.into_iter().map(|a| (a.id.clone(), a)).collect(),
            enemies: enemies.into_iter().map(|e| (e.id.clone(), e)).collect(),
        }
    }

    pub fn ability(&self, id: &str) -> Option<&AbilityDefinition> {
        self.abilities.get(id)
    }

    pub fn enemy(&self, id: &str) -> Option<&EnemyTemplate> {
        self.enemies.get(id)
    }
}
