//! Engine balance constants.
//!
//! All combat and expedition tuning lives here so balance passes touch one
//! file. Runtime overrides for the probabilistic knobs go through
//! `battle::BattleTuning`; these are the shipped defaults.

// Stat scaling
pub const LEVEL_STAT_BONUS: f64 = 0.05;
pub const ASCENSION_STAT_BONUS: f64 = 0.10;
pub const MAX_ASCENSION: u32 = 5;

// Combat chances and multipliers
pub const ABILITY_TRIGGER_CHANCE: f64 = 0.35;
pub const DAMAGE_VARIANCE: f64 = 0.15;
pub const CRIT_CHANCE: f64 = 0.10;
pub const CRIT_MULTIPLIER: f64 = 1.5;
pub const DEFENSE_SOFTCAP: f64 = 100.0;

// Battle loop bounds
pub const MAX_TURNS: u32 = 50;
pub const GRID_ROWS: u8 = 3;
pub const GRID_COLS: u8 = 3;

// Summoning
pub const MIN_ACTIVE_SUMMONS: u32 = 1;
pub const MAX_ACTIVE_SUMMONS: u32 = 3;

// Role base stats: (hp, atk, def, spd)
// Indexed by Role::index(). SPD never scales with level/ascension.
pub const ROLE_BASE_STATS: [(u32, u32, u32, u32); 7] = [
    (1000, 80, 150, 50), // Tank
    (800, 110, 100, 65), // Warrior
    (500, 150, 40, 90),  // Archer
    (450, 170, 30, 70),  // Mage
    (550, 160, 35, 110), // Assassin
    (600, 90, 60, 60),   // Healer
    (650, 120, 50, 55),  // Summoner
];

// Rarity stat multipliers, 1-star through 5-star
pub const RARITY_MULTIPLIERS: [f64; 5] = [1.0, 1.15, 1.35, 1.6, 2.0];

// Team power heuristic weights (expedition resolver only)
pub const POWER_HP_WEIGHT: f64 = 0.1;
pub const POWER_ATK_WEIGHT: f64 = 1.0;
pub const POWER_DEF_WEIGHT: f64 = 0.8;
pub const POWER_SPD_WEIGHT: f64 = 0.5;

// Expedition wave resolution
pub const WAVE_PASS_FACTOR: f64 = 0.9;
pub const WAVE_PASS_CAP: f64 = 0.99;
pub const WAVE_DIFFICULTY_RAMP: f64 = 0.5;
/// Power ratio substituted when a tier's required power is zero, keeping
/// every downstream formula finite.
pub const FULL_POWER_RATIO: f64 = 99.0;

// Expedition rewards
pub const BASE_XP_PER_WAVE: f64 = 50.0;
pub const BASE_GOLD_PER_WAVE: f64 = 25.0;
pub const BASE_GACHA_CHANCE: f64 = 0.05;
pub const POWER_RATIO_GACHA_BONUS: f64 = 0.02;
pub const MAX_GACHA_CHANCE: f64 = 0.50;
pub const EXPEDITION_MAX_TEAM_SIZE: u32 = 4;
