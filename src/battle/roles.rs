//! Per-role battle behavior table.
//!
//! One mapping from role to formation row and basic-attack targeting,
//! instead of role branches scattered through the turn loop. The healer
//! and summoner special cases (conditional ability use) live in the engine
//! because they need battle state, but they key off this table too.

use crate::content::{Role, TargetingMode};

/// Static battle behavior for one role.
#[derive(Debug, Clone, Copy)]
pub struct RoleStrategy {
    /// Grid row the role prefers at formation time (0 = front rank).
    pub preferred_row: u8,
    /// Targeting used for basic attacks, mirroring the role's ability
    /// default: front-liners swing at the closest enemy, ranged and
    /// caster roles pick off the weakest, assassins reach the back row.
    pub basic_attack: TargetingMode,
}

/// Looks up the strategy row for a role.
pub fn strategy(role: Role) -> RoleStrategy {
    match role {
        Role::Tank => RoleStrategy {
            preferred_row: 0,
            basic_attack: TargetingMode::SingleClosest,
        },
        Role::Warrior => RoleStrategy {
            preferred_row: 0,
            basic_attack: TargetingMode::SingleClosest,
        },
        Role::Archer => RoleStrategy {
            preferred_row: 1,
            basic_attack: TargetingMode::SingleLowestHp,
        },
        Role::Assassin => RoleStrategy {
            preferred_row: 1,
            basic_attack: TargetingMode::SingleBackRow,
        },
        Role::Mage => RoleStrategy {
            preferred_row: 2,
            basic_attack: TargetingMode::SingleLowestHp,
        },
        Role::Healer => RoleStrategy {
            preferred_row: 2,
            basic_attack: TargetingMode::SingleLowestHp,
        },
        Role::Summoner => RoleStrategy {
            preferred_row: 2,
            basic_attack: TargetingMode::SingleLowestHp,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_line_roles_sit_in_row_zero() {
        assert_eq!(strategy(Role::Tank).preferred_row, 0);
        assert_eq!(strategy(Role::Warrior).preferred_row, 0);
    }

    #[test]
    fn test_basic_attack_mirrors_role_defaults() {
        assert_eq!(strategy(Role::Tank).basic_attack, TargetingMode::SingleClosest);
        assert_eq!(strategy(Role::Archer).basic_attack, TargetingMode::SingleLowestHp);
        assert_eq!(strategy(Role::Assassin).basic_attack, TargetingMode::SingleBackRow);
    }

    #[test]
    fn test_every_role_has_a_strategy_row() {
        for role in Role::ALL {
            let row = strategy(role).preferred_row;
            assert!(row <= 2);
        }
    }
}
