//! Summon lifecycle management.
//!
//! Summons are real combat units owned by their summoner. Capacity counts
//! only living summons, so a summon's death frees its slot immediately;
//! the summoner may cast again on its next eligible turn.

use super::types::{CombatUnit, GridPosition, Team};
use crate::content::ContentIndex;
use crate::core::constants::{GRID_COLS, GRID_ROWS, MAX_ACTIVE_SUMMONS, MIN_ACTIVE_SUMMONS};
use crate::core::stats::compute_stats;

/// Number of living summons owned by the given summoner.
pub fn active_summons(units: &[CombatUnit], owner_id: u32) -> u32 {
    units
        .iter()
        .filter(|u| u.owner_id == Some(owner_id) && u.is_alive())
        .count() as u32
}

/// Whether the summoner at `summoner_idx` can bring in another unit.
/// False for units without summoner config or with no summonable grid cell.
pub fn can_summon(units: &[CombatUnit], summoner_idx: usize) -> bool {
    let summoner = &units[summoner_idx];
    let Some(config) = &summoner.summoner else {
        return false;
    };
    if config.summon_template_ids.is_empty() {
        return false;
    }
    let cap = config.max_summons.clamp(MIN_ACTIVE_SUMMONS, MAX_ACTIVE_SUMMONS);
    active_summons(units, summoner.id) < cap && first_free_cell(units, summoner.team).is_some()
}

/// First unoccupied cell of a team's grid, scanning row-major from the
/// front rank. Dead units do not block a cell.
pub fn first_free_cell(units: &[CombatUnit], team: Team) -> Option<GridPosition> {
    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            let occupied = units.iter().any(|u| {
                u.team == team && u.is_alive() && u.position.row == row && u.position.col == col
            });
            if !occupied {
                return Some(GridPosition { row, col });
            }
        }
    }
    None
}

/// Instantiates the summoner's next summon and appends it to the unit
/// list. Templates rotate in config order. Returns the new unit's index,
/// or `None` when capacity, templates or grid space are exhausted.
pub fn perform_summon(
    units: &mut Vec<CombatUnit>,
    summoner_idx: usize,
    content: &ContentIndex,
    next_id: &mut u32,
) -> Option<usize> {
    if !can_summon(units, summoner_idx) {
        return None;
    }
    let summoner = &units[summoner_idx];
    let config = summoner.summoner.as_ref()?;

    let template_id =
        &config.summon_template_ids[summoner.ability_cursor % config.summon_template_ids.len()];
    let tmpl = content.enemy(template_id)?;
    let cell = first_free_cell(units, summoner.team)?;

    let mut summon = CombatUnit::from_template(tmpl, 1.0, summoner.team, *next_id);
    // The summon inherits its summoner's progression, not the template's.
    summon.level = summoner.level;
    summon.ascension = summoner.ascension;
    summon.stats = compute_stats(
        tmpl.role.base_stats(),
        tmpl.rarity.stat_multiplier(),
        summoner.level,
        summoner.ascension,
        tmpl.stat_mult,
    );
    summon.current_hp = summon.stats.hp;
    summon.alive = summon.stats.hp > 0;
    summon.position = cell;
    summon.is_summon = true;
    summon.owner_id = Some(summoner.id);
    *next_id += 1;

    units[summoner_idx].ability_cursor = units[summoner_idx].ability_cursor.wrapping_add(1);
    units.push(summon);
    Some(units.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{default_characters, default_content_index, Role};

    fn summoner_roster() -> (Vec<CombatUnit>, ContentIndex) {
        let def = default_characters()
            .into_iter()
            .find(|c| c.role == Role::Summoner)
            .unwrap();
        let mut unit = CombatUnit::from_character(&def, 10, 1, Team::Player, 0);
        unit.position = GridPosition { row: 2, col: 0 };
        (vec![unit], default_content_index())
    }

    #[test]
    fn test_summon_enters_first_free_cell() {
        let (mut units, content) = summoner_roster();
        let mut next_id = 1;
        let idx = perform_summon(&mut units, 0, &content, &mut next_id).unwrap();
        assert_eq!(units[idx].position, GridPosition { row: 0, col: 0 });
        assert!(units[idx].is_summon);
        assert_eq!(units[idx].owner_id, Some(0));
        assert_eq!(units[idx].team, Team::Player);
    }

    #[test]
    fn test_summon_inherits_summoner_progression() {
        let (mut units, content) = summoner_roster();
        let mut next_id = 1;
        let idx = perform_summon(&mut units, 0, &content, &mut next_id).unwrap();
        assert_eq!(units[idx].level, 10);
        assert_eq!(units[idx].ascension, 1);
    }

    #[test]
    fn test_summon_cap_enforced() {
        let (mut units, content) = summoner_roster();
        let mut next_id = 1;
        // Default config caps at 2 active wolves
        assert!(perform_summon(&mut units, 0, &content, &mut next_id).is_some());
        assert!(perform_summon(&mut units, 0, &content, &mut next_id).is_some());
        assert!(perform_summon(&mut units, 0, &content, &mut next_id).is_none());
        assert_eq!(active_summons(&units, 0), 2);
    }

    #[test]
    fn test_dead_summon_frees_slot() {
        let (mut units, content) = summoner_roster();
        let mut next_id = 1;
        perform_summon(&mut units, 0, &content, &mut next_id).unwrap();
        perform_summon(&mut units, 0, &content, &mut next_id).unwrap();

        let hp = units[1].stats.hp;
        units[1].take_damage(hp);
        assert!(can_summon(&units, 0), "a dead summon must free its slot");
        assert!(perform_summon(&mut units, 0, &content, &mut next_id).is_some());
        assert_eq!(active_summons(&units, 0), 2);
    }

    #[test]
    fn test_non_summoner_cannot_summon() {
        let def = default_characters()
            .into_iter()
            .find(|c| c.role == Role::Warrior)
            .unwrap();
        let units = vec![CombatUnit::from_character(&def, 5, 0, Team::Player, 0)];
        assert!(!can_summon(&units, 0));
    }
}
