//! Target selection.
//!
//! Pure resolution from a targeting mode and the current unit list to a
//! set of unit indices. Dead units are never candidates, as actor or as
//! target. Returns an empty set when no legal target exists; the engine
//! falls back to a basic attack in that case.

use super::types::CombatUnit;
use crate::content::TargetingMode;
use rand::Rng;

/// Selects target indices into `units` for the given mode.
///
/// `count` only matters for the AoE modes; `heal_threshold` only for
/// `heal_lowest_ally`.
pub fn select_targets(
    mode: TargetingMode,
    actor_idx: usize,
    units: &[CombatUnit],
    count: u32,
    heal_threshold: f64,
    rng: &mut impl Rng,
) -> Vec<usize> {
    let actor = &units[actor_idx];
    if !actor.is_alive() {
        return Vec::new();
    }

    match mode {
        TargetingMode::SingleClosest => closest_enemy(actor_idx, units).into_iter().collect(),
        TargetingMode::SingleLowestHp => {
            let enemies = living_enemies(actor_idx, units);
            pick_min_tie_rng(&enemies, |i| units[*i].current_hp, rng)
                .into_iter()
                .collect()
        }
        TargetingMode::SingleBackRow => {
            let enemies = living_enemies(actor_idx, units);
            // Highest row index = furthest from the front rank
            pick_min_tie_rng(&enemies, |i| u8::MAX - units[*i].position.row, rng)
                .into_iter()
                .collect()
        }
        TargetingMode::AoeFirstN => {
            let enemies = living_enemies(actor_idx, units);
            enemies.into_iter().take(count.max(1) as usize).collect()
        }
        TargetingMode::AoeRandomN => {
            let enemies = living_enemies(actor_idx, units);
            let amount = (count.max(1) as usize).min(enemies.len());
            if amount == 0 {
                return Vec::new();
            }
            rand::seq::index::sample(rng, enemies.len(), amount)
                .into_iter()
                .map(|i| enemies[i])
                .collect()
        }
        TargetingMode::HealLowestAlly => {
            heal_target(actor_idx, units, heal_threshold).into_iter().collect()
        }
    }
}

/// Living enemies of the actor, in roster order.
fn living_enemies(actor_idx: usize, units: &[CombatUnit]) -> Vec<usize> {
    let team = units[actor_idx].team;
    units
        .iter()
        .enumerate()
        .filter(|(_, u)| u.team != team && u.is_alive())
        .map(|(i, _)| i)
        .collect()
}

/// Nearest living enemy: minimal (enemy row, column distance to the
/// actor); enemy row 0 is the rank facing the actor's team. Ties resolve
/// to roster order.
fn closest_enemy(actor_idx: usize, units: &[CombatUnit]) -> Option<usize> {
    let actor_col = units[actor_idx].position.col;
    living_enemies(actor_idx, units).into_iter().min_by_key(|&i| {
        let pos = units[i].position;
        (pos.row, pos.col.abs_diff(actor_col))
    })
}

/// Minimum by key with seeded-RNG tie-break among equal minima.
fn pick_min_tie_rng<K: Ord>(
    candidates: &[usize],
    key: impl Fn(&usize) -> K,
    rng: &mut impl Rng,
) -> Option<usize> {
    let best = candidates.iter().map(&key).min()?;
    let tied: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|i| key(i) == best)
        .collect();
    if tied.len() == 1 {
        return Some(tied[0]);
    }
    Some(tied[rng.gen_range(0..tied.len())])
}

/// Living ally below the heal threshold with the lowest HP fraction, the
/// caster included. `None` when every ally is healthy enough.
fn heal_target(actor_idx: usize, units: &[CombatUnit], threshold: f64) -> Option<usize> {
    let team = units[actor_idx].team;
    units
        .iter()
        .enumerate()
        .filter(|(_, u)| u.team == team && u.is_alive() && u.hp_fraction() < threshold)
        .min_by(|(_, a), (_, b)| {
            a.hp_fraction()
                .partial_cmp(&b.hp_fraction())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::types::{GridPosition, Team};
    use crate::content::{default_characters, Role};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn unit(id: u32, team: Team, row: u8, col: u8, hp: u32) -> CombatUnit {
        let def = default_characters()
            .into_iter()
            .find(|c| c.role == Role::Warrior)
            .unwrap();
        let mut u = CombatUnit::from_character(&def, 1, 0, team, id);
        u.position = GridPosition { row, col };
        u.stats.hp = 100;
        u.current_hp = hp.min(100);
        u.alive = hp > 0;
        u
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_closest_prefers_front_rank() {
        let units = vec![
            unit(0, Team::Player, 0, 1, 100),
            unit(1, Team::Enemy, 2, 1, 100),
            unit(2, Team::Enemy, 0, 2, 100),
        ];
        let targets =
            select_targets(TargetingMode::SingleClosest, 0, &units, 1, 0.5, &mut rng());
        assert_eq!(targets, vec![2], "front-rank enemy must be selected first");
    }

    #[test]
    fn test_closest_breaks_row_ties_by_column_distance() {
        let units = vec![
            unit(0, Team::Player, 0, 0, 100),
            unit(1, Team::Enemy, 0, 2, 100),
            unit(2, Team::Enemy, 0, 0, 100),
        ];
        let targets =
            select_targets(TargetingMode::SingleClosest, 0, &units, 1, 0.5, &mut rng());
        assert_eq!(targets, vec![2]);
    }

    #[test]
    fn test_lowest_hp_skips_dead_units() {
        let units = vec![
            unit(0, Team::Player, 0, 0, 100),
            unit(1, Team::Enemy, 0, 0, 0),
            unit(2, Team::Enemy, 0, 1, 30),
            unit(3, Team::Enemy, 0, 2, 80),
        ];
        let targets =
            select_targets(TargetingMode::SingleLowestHp, 0, &units, 1, 0.5, &mut rng());
        assert_eq!(targets, vec![2]);
    }

    #[test]
    fn test_back_row_picks_highest_row() {
        let units = vec![
            unit(0, Team::Player, 0, 0, 100),
            unit(1, Team::Enemy, 0, 0, 100),
            unit(2, Team::Enemy, 2, 1, 100),
            unit(3, Team::Enemy, 1, 2, 100),
        ];
        let targets =
            select_targets(TargetingMode::SingleBackRow, 0, &units, 1, 0.5, &mut rng());
        assert_eq!(targets, vec![2]);
    }

    #[test]
    fn test_aoe_first_n_takes_roster_order() {
        let units = vec![
            unit(0, Team::Player, 0, 0, 100),
            unit(1, Team::Enemy, 2, 0, 100),
            unit(2, Team::Enemy, 0, 0, 100),
            unit(3, Team::Enemy, 1, 0, 100),
        ];
        let targets = select_targets(TargetingMode::AoeFirstN, 0, &units, 2, 0.5, &mut rng());
        assert_eq!(targets, vec![1, 2]);
    }

    #[test]
    fn test_aoe_random_n_distinct_targets() {
        let units = vec![
            unit(0, Team::Player, 0, 0, 100),
            unit(1, Team::Enemy, 0, 0, 100),
            unit(2, Team::Enemy, 0, 1, 100),
            unit(3, Team::Enemy, 0, 2, 100),
        ];
        let mut r = rng();
        for _ in 0..20 {
            let mut targets =
                select_targets(TargetingMode::AoeRandomN, 0, &units, 2, 0.5, &mut r);
            assert_eq!(targets.len(), 2);
            targets.sort_unstable();
            targets.dedup();
            assert_eq!(targets.len(), 2, "targets must be distinct");
        }
    }

    #[test]
    fn test_aoe_random_n_caps_at_living_count() {
        let units = vec![unit(0, Team::Player, 0, 0, 100), unit(1, Team::Enemy, 0, 0, 100)];
        let targets = select_targets(TargetingMode::AoeRandomN, 0, &units, 3, 0.5, &mut rng());
        assert_eq!(targets, vec![1]);
    }

    #[test]
    fn test_heal_requires_threshold() {
        let units = vec![
            unit(0, Team::Player, 2, 0, 100),
            unit(1, Team::Player, 0, 0, 80),
            unit(2, Team::Enemy, 0, 0, 10),
        ];
        // 80% HP is above the 0.5 threshold: nobody qualifies
        let targets =
            select_targets(TargetingMode::HealLowestAlly, 0, &units, 1, 0.5, &mut rng());
        assert!(targets.is_empty());

        // Raising the threshold makes the wounded ally eligible
        let targets =
            select_targets(TargetingMode::HealLowestAlly, 0, &units, 1, 0.9, &mut rng());
        assert_eq!(targets, vec![1]);
    }

    #[test]
    fn test_heal_picks_lowest_fraction() {
        let units = vec![
            unit(0, Team::Player, 2, 0, 100),
            unit(1, Team::Player, 0, 0, 40),
            unit(2, Team::Player, 0, 1, 25),
        ];
        let targets =
            select_targets(TargetingMode::HealLowestAlly, 0, &units, 1, 0.5, &mut rng());
        assert_eq!(targets, vec![2]);
    }

    #[test]
    fn test_dead_actor_selects_nothing() {
        let units = vec![unit(0, Team::Player, 0, 0, 0), unit(1, Team::Enemy, 0, 0, 100)];
        let targets =
            select_targets(TargetingMode::SingleClosest, 0, &units, 1, 0.5, &mut rng());
        assert!(targets.is_empty());
    }

    #[test]
    fn test_no_living_enemies_selects_nothing() {
        let units = vec![unit(0, Team::Player, 0, 0, 100), unit(1, Team::Enemy, 0, 0, 0)];
        for mode in [
            TargetingMode::SingleClosest,
            TargetingMode::SingleLowestHp,
            TargetingMode::SingleBackRow,
            TargetingMode::AoeFirstN,
            TargetingMode::AoeRandomN,
        ] {
            let targets = select_targets(mode, 0, &units, 2, 0.5, &mut rng());
            assert!(targets.is_empty(), "{:?} must find no target", mode);
        }
    }
}
