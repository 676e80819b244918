//! Battle-local types: units, the action log and the result.

use crate::content::{CharacterDefinition, EnemyTemplate, SummonerConfig, Role};
use crate::core::stats::{compute_stats, Stats};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which side of the battle a unit fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
        }
    }
}

/// Position on a team's 3x3 formation grid. Row 0 is the front rank,
/// nearest the opposing team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: u8,
    pub col: u8,
}

/// A unit participating in one battle. Created from catalog definitions at
/// battle start, mutated only by the simulation, discarded at battle end.
/// HP carry-over between dungeon rooms goes through [`CombatUnit::with_current_hp`],
/// not unit identity persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatUnit {
    /// Battle-local id, unique within one simulation (summons included).
    pub id: u32,
    /// Catalog id this unit was built from.
    pub source_id: String,
    pub name: String,
    pub team: Team,
    pub role: Role,
    pub stats: Stats,
    pub current_hp: u32,
    pub position: GridPosition,
    pub alive: bool,
    pub ability_ids: Vec<String>,
    pub boss: bool,
    pub level: u32,
    pub ascension: u32,
    #[serde(default)]
    pub summoner: Option<SummonerConfig>,
    #[serde(default)]
    pub is_summon: bool,
    /// Battle-local id of the summoner that owns this unit.
    #[serde(default)]
    pub owner_id: Option<u32>,
    /// Round-robin cursor over `ability_ids` for multi-ability bosses.
    #[serde(default)]
    pub ability_cursor: usize,
    /// Remaining cooldown turns per ability id.
    #[serde(default)]
    pub cooldowns: HashMap<String, u32>,
}

impl CombatUnit {
    /// Builds a battle unit from a playable character at the given
    /// progression. Grid position is assigned later by the simulation.
    pub fn from_character(
        def: &CharacterDefinition,
        level: u32,
        ascension: u32,
        team: Team,
        id: u32,
    ) -> Self {
        let stats = compute_stats(
            def.role.base_stats(),
            def.rarity.stat_multiplier(),
            level,
            ascension,
            def.stat_mult,
        );
        Self {
            id,
            source_id: def.id.clone(),
            name: def.name.clone(),
            team,
            role: def.role,
            stats,
            current_hp: stats.hp,
            position: GridPosition { row: 0, col: 0 },
            alive: stats.hp > 0,
            ability_ids: def.ability_ids.clone(),
            boss: false,
            level,
            ascension,
            summoner: def.summoner.clone(),
            is_summon: false,
            owner_id: None,
            ability_cursor: 0,
            cooldowns: HashMap::new(),
        }
    }

    /// Builds a battle unit from an enemy template, scaled by a room or
    /// floor difficulty multiplier.
    pub fn from_template(tmpl: &EnemyTemplate, difficulty_mult: f64, team: Team, id: u32) -> Self {
        let stats = compute_stats(
            tmpl.role.base_stats(),
            tmpl.rarity.stat_multiplier(),
            tmpl.level,
            0,
            tmpl.stat_mult * difficulty_mult,
        );
        Self {
            id,
            source_id: tmpl.id.clone(),
            name: tmpl.name.clone(),
            team,
            role: tmpl.role,
            stats,
            current_hp: stats.hp,
            position: GridPosition { row: 0, col: 0 },
            alive: stats.hp > 0,
            ability_ids: tmpl.ability_ids.clone(),
            boss: tmpl.boss,
            level: tmpl.level,
            ascension: 0,
            summoner: tmpl.summoner.clone(),
            is_summon: false,
            owner_id: None,
            ability_cursor: 0,
            cooldowns: HashMap::new(),
        }
    }

    /// Applies an HP snapshot from a previous room. Clamped to max HP;
    /// zero HP enters the battle already dead.
    pub fn with_current_hp(mut self, hp: u32) -> Self {
        self.current_hp = hp.min(self.stats.hp);
        self.alive = self.current_hp > 0;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.alive && self.current_hp > 0
    }

    /// Applies damage. Returns true if this killed the unit.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.current_hp = self.current_hp.saturating_sub(amount);
        if self.current_hp == 0 && self.alive {
            self.alive = false;
            return true;
        }
        false
    }

    /// Applies healing, clamped at max HP.
    pub fn heal(&mut self, amount: u32) {
        if self.alive {
            self.current_hp = (self.current_hp + amount).min(self.stats.hp);
        }
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.stats.hp == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.stats.hp as f64
    }
}

/// One damage entry of a multi-target ability cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityHit {
    pub target: u32,
    pub damage: u32,
    pub crit: bool,
}

/// One entry of the battle action log. The log is a total order consistent
/// with turn order; replaying it from the initial roster reproduces the
/// final HP and alive state exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CombatAction {
    Attack {
        actor: u32,
        target: u32,
        damage: u32,
        crit: bool,
    },
    Ability {
        actor: u32,
        ability: String,
        hits: Vec<AbilityHit>,
    },
    Heal {
        actor: u32,
        target: u32,
        amount: u32,
    },
    Death {
        unit: u32,
    },
    Summon {
        summoner: u32,
        unit: Box<CombatUnit>,
    },
}

/// Final outcome of one battle simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleResult {
    pub winner: Team,
    pub action_log: Vec<CombatAction>,
    pub turns: u32,
}
