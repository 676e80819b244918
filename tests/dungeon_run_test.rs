//! Integration test: dungeon and tower runs.
//!
//! Clears the default dungeon room by room, carrying survivor HP between
//! rooms as an explicit snapshot, accumulates the room rewards, and climbs
//! the endless-tower floors through the same battle path.

use starfall::battle::{build_floor_enemies, BattleSimulation, CombatUnit, Team};
use starfall::content::{
    default_characters, default_content_index, default_dungeon_rooms, default_tower_floors,
};

fn party(level: u32) -> Vec<CombatUnit> {
    default_characters()
        .into_iter()
        .filter(|c| {
            matches!(
                c.id.as_str(),
                "starter_tank" | "starter_warrior" | "starter_archer" | "starter_healer"
            )
        })
        .enumerate()
        .map(|(i, def)| CombatUnit::from_character(&def, level, 2, Team::Player, i as u32))
        .collect()
}

#[test]
fn test_full_dungeon_clear_with_hp_carry_over() {
    let content = default_content_index();
    let rooms = default_dungeon_rooms();
    assert_eq!(rooms.len(), 3);

    let mut roster = party(30);
    let full_hp: u32 = roster.iter().map(|u| u.stats.hp).sum();
    let mut xp_earned = 0;
    let mut gold_earned = 0;

    for (room_index, room) in rooms.iter().enumerate() {
        let enemies = starfall::battle::build_room_enemies(room, &content);
        assert!(!enemies.is_empty());

        let seed = 1000 + room_index as u64;
        let mut sim = BattleSimulation::new(roster, enemies, &content, seed);
        let result = sim.run();
        assert_eq!(
            result.winner,
            Team::Player,
            "a level 30 party must clear room {}",
            room_index
        );

        xp_earned += room.xp_reward;
        gold_earned += room.gold_reward;

        // Survivor snapshot feeds the next room; summons do not persist
        roster = sim
            .units()
            .iter()
            .filter(|u| u.team == Team::Player && !u.is_summon)
            .cloned()
            .collect();
    }

    assert_eq!(xp_earned, 650);
    assert_eq!(gold_earned, 325);
    assert!(roster.iter().any(|u| u.is_alive()), "someone must survive");
    let remaining: u32 = roster.iter().map(|u| u.current_hp).sum();
    assert!(remaining <= full_hp, "carry-over must never heal the party");
}

#[test]
fn test_wounded_party_enters_next_room_wounded() {
    let content = default_content_index();
    let rooms = default_dungeon_rooms();

    let roster: Vec<CombatUnit> = party(30)
        .into_iter()
        .map(|u| {
            let half = u.stats.hp / 2;
            u.with_current_hp(half)
        })
        .collect();

    let mut sim = BattleSimulation::new(roster, starfall::battle::build_room_enemies(&rooms[0], &content), &content, 3);
    for unit in sim.units().iter().filter(|u| u.team == Team::Player) {
        assert_eq!(unit.current_hp, unit.stats.hp / 2);
    }
    let result = sim.run();
    assert_eq!(result.winner, Team::Player);
}

#[test]
fn test_tower_climb_through_boss_floor() {
    let content = default_content_index();
    let floors = default_tower_floors();

    let mut roster = party(40);
    for floor in floors.iter().take(5) {
        let enemies = build_floor_enemies(floor, &content);
        assert!(!enemies.is_empty());
        if floor.floor == 5 {
            assert!(enemies.iter().any(|u| u.boss), "floor 5 must host a boss");
        }

        let mut sim = BattleSimulation::new(roster, enemies, &content, 400 + floor.floor as u64);
        let result = sim.run();
        assert_eq!(
            result.winner,
            Team::Player,
            "a level 40 party must clear floor {}",
            floor.floor
        );

        roster = sim
            .units()
            .iter()
            .filter(|u| u.team == Team::Player && !u.is_summon)
            .cloned()
            .collect();
    }
    assert!(roster.iter().any(|u| u.is_alive()));
}

#[test]
fn test_tower_floor_difficulty_ramps() {
    let content = default_content_index();
    let floors = default_tower_floors();

    // Floors 1 and 2 field the same templates at a steeper multiplier
    let first = build_floor_enemies(&floors[0], &content);
    let second = build_floor_enemies(&floors[1], &content);
    assert_eq!(first.len(), second.len());
    for (weak, strong) in first.iter().zip(second.iter()) {
        assert_eq!(weak.source_id, strong.source_id);
        assert!(strong.stats.hp > weak.stats.hp);
        assert!(strong.stats.atk > weak.stats.atk);
    }
}
