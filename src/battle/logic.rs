//! The turn-based battle simulation.
//!
//! `BattleSimulation` owns the full battle state: the unit list, the
//! seeded RNG, the tuning knobs and the action log. One call to [`run`]
//! drives the battle from formation to a terminal state and returns the
//! result with an ordered, replayable action log. The engine performs no
//! I/O and never reads the wall clock; the same rosters, content and seed
//! always reproduce the identical log.
//!
//! [`run`]: BattleSimulation::run

use super::math::{attack_damage, heal_amount, roll_ability_trigger, BattleTuning};
use super::roles::strategy;
use super::summons::{can_summon, perform_summon};
use super::targeting::select_targets;
use super::types::{AbilityHit, BattleResult, CombatAction, CombatUnit, GridPosition, Team};
use crate::content::{AbilityDefinition, ContentIndex, DungeonRoom, Role, TargetingMode, TowerFloor};
use crate::core::constants::{GRID_COLS, GRID_ROWS};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One battle from formation to resolution.
pub struct BattleSimulation<'a> {
    units: Vec<CombatUnit>,
    content: &'a ContentIndex,
    tuning: BattleTuning,
    rng: ChaCha8Rng,
    log: Vec<CombatAction>,
    next_id: u32,
}

impl<'a> BattleSimulation<'a> {
    /// Builds a battle from the two rosters. Unit ids are reassigned
    /// battle-locally and grid cells are dealt out by role-preferred row;
    /// carried-over HP on the incoming units is preserved.
    pub fn new(
        player_units: Vec<CombatUnit>,
        enemy_units: Vec<CombatUnit>,
        content: &'a ContentIndex,
        seed: u64,
    ) -> Self {
        Self::with_tuning(player_units, enemy_units, content, seed, BattleTuning::default())
    }

    pub fn with_tuning(
        player_units: Vec<CombatUnit>,
        enemy_units: Vec<CombatUnit>,
        content: &'a ContentIndex,
        seed: u64,
        tuning: BattleTuning,
    ) -> Self {
        let mut units = Vec::with_capacity(player_units.len() + enemy_units.len());
        let mut next_id = 0;
        for (team, roster) in [(Team::Player, player_units), (Team::Enemy, enemy_units)] {
            for mut unit in roster {
                unit.id = next_id;
                unit.team = team;
                unit.owner_id = None;
                unit.is_summon = false;
                unit.ability_cursor = 0;
                unit.cooldowns.clear();
                next_id += 1;
                units.push(unit);
            }
        }
        assign_positions(&mut units);

        Self {
            units,
            content,
            tuning,
            rng: ChaCha8Rng::seed_from_u64(seed),
            log: Vec::new(),
            next_id,
        }
    }

    /// The unit list. Positions and battle-local ids are final once `new`
    /// returns (which is what log replay starts from); after [`run`] this
    /// holds the final HP state the progression layer snapshots for
    /// dungeon-room carry-over.
    ///
    /// [`run`]: BattleSimulation::run
    pub fn units(&self) -> &[CombatUnit] {
        &self.units
    }

    /// Runs the battle to completion.
    pub fn run(&mut self) -> BattleResult {
        // An empty or fully dead roster loses on the spot, no turns
        // simulated. Player side is checked first per the defender policy.
        if !self.side_has_living(Team::Player) {
            return self.finish(Team::Enemy, 0);
        }
        if !self.side_has_living(Team::Enemy) {
            return self.finish(Team::Player, 0);
        }

        let mut round = 0;
        loop {
            round += 1;
            if round > self.tuning.max_turns {
                let winner = self.tie_break();
                return self.finish(winner, self.tuning.max_turns);
            }
            if let Some(winner) = self.decided() {
                return self.finish(winner, round - 1);
            }

            for idx in self.turn_order() {
                if !self.units[idx].is_alive() {
                    continue;
                }
                self.take_turn(idx);
                if let Some(winner) = self.decided() {
                    return self.finish(winner, round);
                }
            }
        }
    }

    fn finish(&mut self, winner: Team, turns: u32) -> BattleResult {
        BattleResult {
            winner,
            action_log: std::mem::take(&mut self.log),
            turns,
        }
    }

    fn side_has_living(&self, team: Team) -> bool {
        self.units.iter().any(|u| u.team == team && u.is_alive())
    }

    fn decided(&self) -> Option<Team> {
        if !self.side_has_living(Team::Enemy) {
            Some(Team::Player)
        } else if !self.side_has_living(Team::Player) {
            Some(Team::Enemy)
        } else {
            None
        }
    }

    /// Past the round cap the side with the higher aggregate HP fraction
    /// wins; an exact tie goes to the player as the defending side.
    fn tie_break(&self) -> Team {
        let ratio = |team: Team| -> f64 {
            self.units
                .iter()
                .filter(|u| u.team == team && u.is_alive())
                .map(|u| u.hp_fraction())
                .sum()
        };
        if ratio(Team::Enemy) > ratio(Team::Player) {
            Team::Enemy
        } else {
            Team::Player
        }
    }

    /// Living units ordered by descending SPD. One tie-break draw is
    /// consumed per living unit every round, so the RNG stream position
    /// never depends on whether ties actually occurred.
    fn turn_order(&mut self) -> Vec<usize> {
        let mut order: Vec<(usize, u32, u32)> = Vec::new();
        for (idx, unit) in self.units.iter().enumerate() {
            if unit.is_alive() {
                order.push((idx, unit.stats.spd, self.rng.gen()));
            }
        }
        order.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        order.into_iter().map(|(idx, _, _)| idx).collect()
    }

    fn take_turn(&mut self, idx: usize) {
        for remaining in self.units[idx].cooldowns.values_mut() {
            *remaining = remaining.saturating_sub(1);
        }

        let triggered = roll_ability_trigger(&self.tuning, &mut self.rng);
        let role = self.units[idx].role;

        match role {
            Role::Summoner => {
                if triggered && can_summon(&self.units, idx) {
                    self.summon(idx);
                } else {
                    self.basic_attack(idx);
                }
            }
            Role::Healer => {
                match self.healer_ability(idx) {
                    Some(ability) if triggered => {
                        // Heal only lands when an ally actually qualifies
                        if !self.cast_heal(idx, &ability) {
                            self.basic_attack(idx);
                        }
                    }
                    _ => self.basic_attack(idx),
                }
            }
            _ => {
                let ability = if triggered { self.select_ability(idx) } else { None };
                match ability {
                    Some(ability) => {
                        if !self.cast_ability(idx, &ability) {
                            self.basic_attack(idx);
                        }
                    }
                    None => self.basic_attack(idx),
                }
            }
        }
    }

    /// The healer's heal ability, if its kit resolves to one that is off
    /// cooldown. Same gate as [`select_ability`].
    ///
    /// [`select_ability`]: BattleSimulation::select_ability
    fn healer_ability(&self, idx: usize) -> Option<AbilityDefinition> {
        let unit = &self.units[idx];
        unit.ability_ids
            .iter()
            .filter_map(|id| self.content.ability(id))
            .find(|a| {
                a.targeting.is_heal() && !unit.cooldowns.get(&a.id).is_some_and(|&r| r > 0)
            })
            .cloned()
    }

    /// Picks the next castable ability, rotating round-robin through the
    /// unit's kit (the multi-ability boss policy). Unknown ids and
    /// abilities still on cooldown are skipped; `None` means basic attack.
    fn select_ability(&mut self, idx: usize) -> Option<AbilityDefinition> {
        let known: Vec<AbilityDefinition> = self.units[idx]
            .ability_ids
            .iter()
            .filter_map(|id| self.content.ability(id))
            .cloned()
            .collect();
        if known.is_empty() {
            return None;
        }
        let cursor = self.units[idx].ability_cursor;
        for offset in 0..known.len() {
            let pick = (cursor + offset) % known.len();
            let ability = &known[pick];
            let on_cooldown = self.units[idx]
                .cooldowns
                .get(&ability.id)
                .is_some_and(|&r| r > 0);
            if !on_cooldown {
                self.units[idx].ability_cursor = pick + 1;
                return Some(ability.clone());
            }
        }
        None
    }

    /// Casts a damaging or healing ability. Returns false when no legal
    /// target existed, in which case the caller falls back to a basic
    /// attack and the cooldown is not spent.
    fn cast_ability(&mut self, idx: usize, ability: &AbilityDefinition) -> bool {
        if ability.targeting.is_heal() {
            return self.cast_heal(idx, ability);
        }

        let targets = select_targets(
            ability.targeting,
            idx,
            &self.units,
            ability.target_count,
            ability.heal_threshold,
            &mut self.rng,
        );
        if targets.is_empty() {
            return false;
        }

        let atk = self.units[idx].stats.atk;
        let mut hits = Vec::with_capacity(targets.len());
        let mut deaths = Vec::new();
        for target_idx in targets {
            let roll = attack_damage(
                atk,
                ability.power_mult,
                self.units[target_idx].stats.def,
                ability.ignore_defense,
                &self.tuning,
                &mut self.rng,
            );
            let died = self.units[target_idx].take_damage(roll.damage);
            hits.push(AbilityHit {
                target: self.units[target_idx].id,
                damage: roll.damage,
                crit: roll.crit,
            });
            if died {
                deaths.push(self.units[target_idx].id);
            }
        }

        self.log.push(CombatAction::Ability {
            actor: self.units[idx].id,
            ability: ability.id.clone(),
            hits,
        });
        for unit in deaths {
            self.log.push(CombatAction::Death { unit });
        }
        if let Some(cooldown) = ability.cooldown {
            self.units[idx].cooldowns.insert(ability.id.clone(), cooldown);
        }
        true
    }

    /// Heals the lowest ally below the ability's threshold. Returns false
    /// when nobody qualifies.
    fn cast_heal(&mut self, idx: usize, ability: &AbilityDefinition) -> bool {
        let targets = select_targets(
            TargetingMode::HealLowestAlly,
            idx,
            &self.units,
            1,
            ability.heal_threshold,
            &mut self.rng,
        );
        let Some(&target_idx) = targets.first() else {
            return false;
        };

        let amount = heal_amount(self.units[idx].stats.atk, ability.power_mult);
        let before = self.units[target_idx].current_hp;
        self.units[target_idx].heal(amount);
        let applied = self.units[target_idx].current_hp - before;

        self.log.push(CombatAction::Heal {
            actor: self.units[idx].id,
            target: self.units[target_idx].id,
            amount: applied,
        });
        if let Some(cooldown) = ability.cooldown {
            self.units[idx].cooldowns.insert(ability.id.clone(), cooldown);
        }
        true
    }

    fn summon(&mut self, idx: usize) {
        let Some(summon_idx) = perform_summon(&mut self.units, idx, self.content, &mut self.next_id)
        else {
            self.basic_attack(idx);
            return;
        };
        self.log.push(CombatAction::Summon {
            summoner: self.units[idx].id,
            unit: Box::new(self.units[summon_idx].clone()),
        });
    }

    /// Plain attack with the role's default targeting at 1.0x ATK.
    fn basic_attack(&mut self, idx: usize) {
        let mode = strategy(self.units[idx].role).basic_attack;
        let targets = select_targets(mode, idx, &self.units, 1, 0.0, &mut self.rng);
        let Some(&target_idx) = targets.first() else {
            return;
        };

        let roll = attack_damage(
            self.units[idx].stats.atk,
            1.0,
            self.units[target_idx].stats.def,
            false,
            &self.tuning,
            &mut self.rng,
        );
        let died = self.units[target_idx].take_damage(roll.damage);
        self.log.push(CombatAction::Attack {
            actor: self.units[idx].id,
            target: self.units[target_idx].id,
            damage: roll.damage,
            crit: roll.crit,
        });
        if died {
            self.log.push(CombatAction::Death {
                unit: self.units[target_idx].id,
            });
        }
    }
}

/// Deals grid cells to each team: every unit tries its role's preferred
/// row first, then the following rows, scanning columns left to right.
fn assign_positions(units: &mut [CombatUnit]) {
    for team in [Team::Player, Team::Enemy] {
        let mut taken: Vec<GridPosition> = Vec::new();
        for unit in units.iter_mut().filter(|u| u.team == team) {
            let preferred = strategy(unit.role).preferred_row;
            let mut assigned = None;
            'rows: for row_offset in 0..GRID_ROWS {
                let row = (preferred + row_offset) % GRID_ROWS;
                for col in 0..GRID_COLS {
                    let cell = GridPosition { row, col };
                    if !taken.contains(&cell) {
                        assigned = Some(cell);
                        break 'rows;
                    }
                }
            }
            // More units than grid cells stack on the last cell
            let cell = assigned.unwrap_or(GridPosition {
                row: GRID_ROWS - 1,
                col: GRID_COLS - 1,
            });
            taken.push(cell);
            unit.position = cell;
        }
    }
}

/// Convenience wrapper: one battle with default tuning.
pub fn simulate_battle(
    player_units: Vec<CombatUnit>,
    enemy_units: Vec<CombatUnit>,
    content: &ContentIndex,
    seed: u64,
) -> BattleResult {
    let mut sim = BattleSimulation::new(player_units, enemy_units, content, seed);
    sim.run()
}

/// Builds the enemy side for a dungeon room, applying the room's
/// difficulty multiplier. Unknown template ids are skipped (the admin
/// layer owns content consistency; the engine degrades quietly).
pub fn build_room_enemies(room: &DungeonRoom, content: &ContentIndex) -> Vec<CombatUnit> {
    room.enemy_ids
        .iter()
        .filter_map(|id| content.enemy(id))
        .enumerate()
        .map(|(i, tmpl)| CombatUnit::from_template(tmpl, room.difficulty_mult, Team::Enemy, i as u32))
        .collect()
}

/// Builds the enemy side for a tower floor, with the floor's difficulty
/// ramp applied. Same quiet-skip policy as dungeon rooms.
pub fn build_floor_enemies(floor: &TowerFloor, content: &ContentIndex) -> Vec<CombatUnit> {
    floor
        .enemy_ids
        .iter()
        .filter_map(|id| content.enemy(id))
        .enumerate()
        .map(|(i, tmpl)| CombatUnit::from_template(tmpl, floor.difficulty_mult, Team::Enemy, i as u32))
        .collect()
}
