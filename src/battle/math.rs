//! Pure combat math shared by the battle engine and the simulator.
//!
//! Every probabilistic function takes `&mut impl Rng`; the engine decides
//! which seeded generator backs it. The same tuning and RNG stream always
//! produce the same numbers.

use crate::core::constants::*;
use rand::Rng;

/// Runtime overrides for the probabilistic combat knobs. Defaults come
/// from `core::constants`; tests and the simulator pin individual fields.
#[derive(Debug, Clone, Copy)]
pub struct BattleTuning {
    pub ability_trigger_chance: f64,
    pub damage_variance: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub max_turns: u32,
}

impl Default for BattleTuning {
    fn default() -> Self {
        Self {
            ability_trigger_chance: ABILITY_TRIGGER_CHANCE,
            damage_variance: DAMAGE_VARIANCE,
            crit_chance: CRIT_CHANCE,
            crit_multiplier: CRIT_MULTIPLIER,
            max_turns: MAX_TURNS,
        }
    }
}

impl BattleTuning {
    /// Tuning with all randomness stripped: no ability triggers, no
    /// variance, no crits. Battles become fully deterministic exchanges
    /// of basic attacks.
    pub fn deterministic() -> Self {
        Self {
            ability_trigger_chance: 0.0,
            damage_variance: 0.0,
            crit_chance: 0.0,
            ..Self::default()
        }
    }
}

/// Outcome of one damage roll.
#[derive(Debug, Clone, Copy)]
pub struct DamageRoll {
    pub damage: u32,
    pub crit: bool,
}

/// Defense mitigation factor: `1 - def / (def + softcap)`.
/// DEF 100 halves incoming damage at the default softcap.
pub fn mitigation(def: u32) -> f64 {
    1.0 - def as f64 / (def as f64 + DEFENSE_SOFTCAP)
}

/// Rolls damage for a basic attack or damaging ability.
///
/// `raw = atk * power_mult`, mitigated by the target's DEF unless the
/// ability ignores defense, then uniform variance and an independent crit
/// roll, floored to an integer. Both rolls are always consumed so the RNG
/// stream position does not depend on the outcome.
pub fn attack_damage(
    atk: u32,
    power_mult: f64,
    target_def: u32,
    ignore_defense: bool,
    tuning: &BattleTuning,
    rng: &mut impl Rng,
) -> DamageRoll {
    let raw = atk as f64 * power_mult;
    let mitigated = if ignore_defense {
        raw
    } else {
        raw * mitigation(target_def)
    };

    let v = tuning.damage_variance;
    let variance = rng.gen_range(-v..=v);
    let crit = rng.gen::<f64>() < tuning.crit_chance;

    let mut damage = mitigated * (1.0 + variance);
    if crit {
        damage *= tuning.crit_multiplier;
    }

    DamageRoll {
        damage: damage.max(0.0) as u32,
        crit,
    }
}

/// Healing amount: `atk * power_mult`, floored. The caller clamps at the
/// target's max HP.
pub fn heal_amount(atk: u32, power_mult: f64) -> u32 {
    (atk as f64 * power_mult).max(0.0) as u32
}

/// Rolls whether the acting unit uses its ability this turn.
pub fn roll_ability_trigger(tuning: &BattleTuning, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < tuning.ability_trigger_chance
}
