//! Built-in content catalog.
//!
//! A small default set of abilities, characters and enemies used by the
//! balance simulator and the test suites. A live deployment replaces this
//! wholesale with admin-authored JSON documents; the engine only ever sees
//! the resulting [`ContentIndex`].

use super::types::*;

fn ability(id: &str, name: &str, targeting: TargetingMode, power_mult: f64) -> AbilityDefinition {
    AbilityDefinition {
        id: id.to_string(),
        name: name.to_string(),
        targeting,
        power_mult,
        target_count: 1,
        ignore_defense: false,
        heal_threshold: 0.5,
        cooldown: None,
    }
}

/// Returns the default ability set: one signature ability per role plus
/// the shared boss kit.
pub fn default_abilities() -> Vec<AbilityDefinition> {
    vec![
        ability("shield_bash", "Shield Bash", TargetingMode::SingleClosest, 1.2),
        AbilityDefinition {
            target_count: 2,
            ..ability("cleave", "Cleave", TargetingMode::AoeFirstN, 0.8)
        },
        AbilityDefinition {
            ignore_defense: true,
            ..ability("piercing_shot", "Piercing Shot", TargetingMode::SingleLowestHp, 1.5)
        },
        AbilityDefinition {
            target_count: 2,
            cooldown: Some(2),
            ..ability("fireball", "Fireball", TargetingMode::AoeRandomN, 1.4)
        },
        ability("shadowstrike", "Shadowstrike", TargetingMode::SingleBackRow, 1.8),
        AbilityDefinition {
            heal_threshold: 0.6,
            ..ability("mending_light", "Mending Light", TargetingMode::HealLowestAlly, 1.5)
        },
        // Boss kit
        AbilityDefinition {
            cooldown: Some(1),
            ..ability("crushing_blow", "Crushing Blow", TargetingMode::SingleClosest, 2.0)
        },
        AbilityDefinition {
            target_count: 3,
            cooldown: Some(2),
            ..ability("earthshatter", "Earthshatter", TargetingMode::AoeFirstN, 1.2)
        },
    ]
}

/// Signature ability id for a role, if the default set carries one.
pub fn role_ability_id(role: Role) -> Option<&'static str> {
    match role {
        Role::Tank => Some("shield_bash"),
        Role::Warrior => Some("cleave"),
        Role::Archer => Some("piercing_shot"),
        Role::Mage => Some("fireball"),
        Role::Assassin => Some("shadowstrike"),
        Role::Healer => Some("mending_light"),
        // Summoners special-case into the summon path; no catalog ability.
        Role::Summoner => None,
    }
}

/// Returns the default enemy and summon templates.
pub fn default_enemies() -> Vec<EnemyTemplate> {
    vec![
        EnemyTemplate {
            id: "goblin_grunt".to_string(),
            name: "Goblin Grunt".to_string(),
            role: Role::Warrior,
            rarity: Rarity::OneStar,
            level: 5,
            ability_ids: vec!["cleave".to_string()],
            stat_mult: 1.0,
            boss: false,
            summoner: None,
        },
        EnemyTemplate {
            id: "goblin_archer".to_string(),
            name: "Goblin Archer".to_string(),
            role: Role::Archer,
            rarity: Rarity::OneStar,
            level: 5,
            ability_ids: vec!["piercing_shot".to_string()],
            stat_mult: 1.0,
            boss: false,
            summoner: None,
        },
        EnemyTemplate {
            id: "cave_shaman".to_string(),
            name: "Cave Shaman".to_string(),
            role: Role::Healer,
            rarity: Rarity::TwoStar,
            level: 6,
            ability_ids: vec!["mending_light".to_string()],
            stat_mult: 1.0,
            boss: false,
            summoner: None,
        },
        EnemyTemplate {
            id: "war_wolf".to_string(),
            name: "War Wolf".to_string(),
            role: Role::Warrior,
            rarity: Rarity::OneStar,
            level: 1,
            ability_ids: Vec::new(),
            stat_mult: 0.6,
            boss: false,
            summoner: None,
        },
        EnemyTemplate {
            id: "wolf_matriarch".to_string(),
            name: "Wolf Matriarch".to_string(),
            role: Role::Summoner,
            rarity: Rarity::ThreeStar,
            level: 8,
            ability_ids: Vec::new(),
            stat_mult: 1.4,
            boss: true,
            summoner: Some(SummonerConfig {
                summon_template_ids: vec!["war_wolf".to_string()],
                max_summons: 2,
            }),
        },
        EnemyTemplate {
            id: "stone_colossus".to_string(),
            name: "Stone Colossus".to_string(),
            role: Role::Tank,
            rarity: Rarity::FourStar,
            level: 10,
            ability_ids: vec!["crushing_blow".to_string(), "earthshatter".to_string()],
            stat_mult: 1.8,
            boss: true,
            summoner: None,
        },
    ]
}

/// Returns the default starter roster.
pub fn default_characters() -> Vec<CharacterDefinition> {
    Role::ALL
        .iter()
        .map(|&role| CharacterDefinition {
            id: format!("starter_{}", role.name().to_lowercase()),
            name: format!("Starter {}", role.name()),
            role,
            rarity: Rarity::TwoStar,
            ability_ids: role_ability_id(role)
                .map(|id| vec![id.to_string()])
                .unwrap_or_default(),
            stat_mult: 1.0,
            summoner: (role == Role::Summoner).then(|| SummonerConfig {
                summon_template_ids: vec!["war_wolf".to_string()],
                max_summons: 2,
            }),
        })
        .collect()
}

/// Default three-room dungeon: two trash packs and a boss room.
pub fn default_dungeon_rooms() -> Vec<DungeonRoom> {
    vec![
        DungeonRoom {
            enemy_ids: vec!["goblin_grunt".to_string(), "goblin_archer".to_string()],
            difficulty_mult: 1.0,
            xp_reward: 100,
            gold_reward: 50,
        },
        DungeonRoom {
            enemy_ids: vec![
                "goblin_grunt".to_string(),
                "goblin_archer".to_string(),
                "cave_shaman".to_string(),
            ],
            difficulty_mult: 1.15,
            xp_reward: 150,
            gold_reward: 75,
        },
        DungeonRoom {
            enemy_ids: vec!["wolf_matriarch".to_string(), "goblin_grunt".to_string()],
            difficulty_mult: 1.3,
            xp_reward: 400,
            gold_reward: 200,
        },
    ]
}

/// Default tower floors with a compounding difficulty ramp.
pub fn default_tower_floors() -> Vec<TowerFloor> {
    (1..=10)
        .map(|floor| TowerFloor {
            floor,
            enemy_ids: if floor % 5 == 0 {
                vec!["stone_colossus".to_string()]
            } else {
                vec!["goblin_grunt".to_string(), "goblin_archer".to_string()]
            },
            difficulty_mult: 1.0 + 0.1 * (floor - 1) as f64,
        })
        .collect()
}

/// Builds a [`ContentIndex`] over the default catalog.
pub fn default_content_index() -> ContentIndex {
    ContentIndex::new(default_abilities(), default_enemies())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_references_resolve() {
        let index = default_content_index();
        for enemy in default_enemies() {
            for ability_id in &enemy.ability_ids {
                assert!(
                    index.ability(ability_id).is_some(),
                    "enemy {} references missing ability {}",
                    enemy.id,
                    ability_id
                );
            }
            if let Some(summoner) = &enemy.summoner {
                for template_id in &summoner.summon_template_ids {
                    assert!(
                        index.enemy(template_id).is_some(),
                        "summoner {} references missing template {}",
                        enemy.id,
                        template_id
                    );
                }
            }
        }
        for character in default_characters() {
            for ability_id in &character.ability_ids {
                assert!(index.ability(ability_id).is_some());
            }
        }
    }

    #[test]
    fn test_default_dungeon_rooms_reference_known_enemies() {
        let index = default_content_index();
        for room in default_dungeon_rooms() {
            assert!(!room.enemy_ids.is_empty());
            for id in &room.enemy_ids {
                assert!(index.enemy(id).is_some(), "unknown enemy {} in room", id);
            }
        }
    }

    #[test]
    fn test_every_combat_role_has_signature_ability() {
        for role in Role::ALL {
            if role != Role::Summoner {
                assert!(role_ability_id(role).is_some());
            }
        }
    }
}
