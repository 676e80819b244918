//! Monte Carlo balance runner.
//!
//! Drives the real battle and expedition engines, never a parallel
//! reimplementation, so simulator output matches live behavior. Each run
//! gets its own seed derived from the base seed, matching how battle
//! replays are keyed in production.

use super::config::SimConfig;
use super::report::{MatchupStats, SimReport, TierStats};
use crate::battle::{simulate_battle, CombatUnit, Team};
use crate::content::{default_characters, default_content_index, CharacterDefinition, Role};
use crate::core::constants::MAX_ASCENSION;
use crate::core::stats::team_power;
use crate::expedition::{dispatch_expedition, resolve_expedition, ExpeditionConfig};
use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Runs the full matchup grid plus expedition sweep and returns a report.
/// Ascension input is clamped to the progression cap.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut config = config.clone();
    config.ascension = config.ascension.min(MAX_ASCENSION);
    let config = &config;

    let base_seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let catalog = default_characters();
    let content = default_content_index();

    let mut matchups = Vec::new();
    for attacker_role in Role::ALL {
        for defender_role in Role::ALL {
            let mut wins = 0;
            let mut total_turns = 0u64;
            for run in 0..config.num_runs {
                let seed = derive_seed(base_seed, attacker_role, defender_role, run);
                let player = build_team(&catalog, attacker_role, config);
                let enemy = build_team(&catalog, defender_role, config);
                let result = simulate_battle(player, enemy, &content, seed);
                if result.winner == Team::Player {
                    wins += 1;
                }
                total_turns += result.turns as u64;
            }
            let stats = MatchupStats {
                attacker: attacker_role.name().to_string(),
                defender: defender_role.name().to_string(),
                runs: config.num_runs,
                wins,
                avg_turns: total_turns as f64 / config.num_runs.max(1) as f64,
            };
            if config.verbosity >= 2 {
                println!(
                    "{} vs {}: {:.1}% over {} runs, {:.1} turns avg",
                    stats.attacker,
                    stats.defender,
                    stats.win_rate() * 100.0,
                    stats.runs,
                    stats.avg_turns
                );
            }
            matchups.push(stats);
        }
    }

    let tiers = run_expedition_sweep(config, &catalog, base_seed);
    SimReport::new(config.num_runs, matchups, tiers)
}

fn derive_seed(base: u64, attacker: Role, defender: Role, run: u32) -> u64 {
    let a = attacker as u64;
    let d = defender as u64;
    base.wrapping_mul(1_000_003)
        .wrapping_add(a * 7919)
        .wrapping_add(d * 104_729)
        .wrapping_add(run as u64)
}

/// A team of `team_size` units led by the given role, padded with the
/// rest of the starter roster.
fn build_team(catalog: &[CharacterDefinition], lead: Role, config: &SimConfig) -> Vec<CombatUnit> {
    let mut defs: Vec<&CharacterDefinition> = Vec::new();
    if let Some(lead_def) = catalog.iter().find(|c| c.role == lead) {
        defs.push(lead_def);
    }
    for def in catalog {
        if defs.len() >= config.team_size {
            break;
        }
        if def.role != lead {
            defs.push(def);
        }
    }
    defs.into_iter()
        .enumerate()
        .map(|(i, def)| {
            CombatUnit::from_character(def, config.level, config.ascension, Team::Player, i as u32)
        })
        .collect()
}

fn run_expedition_sweep(
    config: &SimConfig,
    catalog: &[CharacterDefinition],
    base_seed: u64,
) -> Vec<TierStats> {
    let expedition_config = ExpeditionConfig::default();
    let team: Vec<CombatUnit> = catalog
        .iter()
        .take(expedition_config.max_team_size as usize)
        .enumerate()
        .map(|(i, def)| {
            CombatUnit::from_character(def, config.level, config.ascension, Team::Player, i as u32)
        })
        .collect();
    let power = team_power(team.iter().map(|u| &u.stats));
    let character_ids: Vec<String> = team.iter().map(|u| u.source_id.clone()).collect();

    expedition_config
        .tiers
        .iter()
        .map(|tier| {
            let mut rng = ChaCha8Rng::seed_from_u64(base_seed ^ tier.total_waves as u64);
            let mut waves = 0u64;
            let mut full_clears = 0;
            let mut gacha_wins = 0;
            let mut xp = 0u64;
            for _ in 0..config.num_runs {
                let expedition = dispatch_expedition(
                    character_ids.clone(),
                    power,
                    tier,
                    &expedition_config,
                    Utc::now(),
                );
                let result = resolve_expedition(&expedition, &expedition_config, &mut rng);
                waves += result.waves_cleared as u64;
                if result.full_clear {
                    full_clears += 1;
                }
                if result.gacha_pull_won {
                    gacha_wins += 1;
                }
                xp += result.xp_earned;
            }
            let runs = config.num_runs.max(1) as f64;
            TierStats {
                tier_id: tier.id.clone(),
                team_power: power,
                avg_waves: waves as f64 / runs,
                total_waves: tier.total_waves,
                full_clear_rate: full_clears as f64 / runs,
                gacha_win_rate: gacha_wins as f64 / runs,
                avg_xp: xp as f64 / runs,
            }
        })
        .collect()
}
