//! Deterministic turn-based battle engine.

pub mod logic;
pub mod math;
pub mod roles;
pub mod summons;
pub mod targeting;
pub mod types;

pub use logic::{build_floor_enemies, build_room_enemies, simulate_battle, BattleSimulation};
pub use math::BattleTuning;
pub use types::{AbilityHit, BattleResult, CombatAction, CombatUnit, GridPosition, Team};
