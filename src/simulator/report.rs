//! Simulation report generation.

use serde::Serialize;

/// Win-rate stats for one role-vs-role matchup.
#[derive(Debug, Clone, Serialize)]
pub struct MatchupStats {
    pub attacker: String,
    pub defender: String,
    pub runs: u32,
    pub wins: u32,
    pub avg_turns: f64,
}

impl MatchupStats {
    pub fn win_rate(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.wins as f64 / self.runs as f64
    }
}

/// Aggregated expedition outcomes for one duration tier.
#[derive(Debug, Clone, Serialize)]
pub struct TierStats {
    pub tier_id: String,
    pub team_power: f64,
    pub avg_waves: f64,
    pub total_waves: u32,
    pub full_clear_rate: f64,
    pub gacha_win_rate: f64,
    pub avg_xp: f64,
}

/// Full report over one simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub runs_per_matchup: u32,
    pub matchups: Vec<MatchupStats>,
    pub tiers: Vec<TierStats>,
}

impl SimReport {
    pub fn new(runs_per_matchup: u32, matchups: Vec<MatchupStats>, tiers: Vec<TierStats>) -> Self {
        Self {
            runs_per_matchup,
            matchups,
            tiers,
        }
    }

    /// Human-readable summary for the terminal.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Role matchup win rates (attacker perspective) ===\n");
        for stats in &self.matchups {
            out.push_str(&format!(
                "  {:<9} vs {:<9} {:>5.1}%  ({:.1} turns avg)\n",
                stats.attacker,
                stats.defender,
                stats.win_rate() * 100.0,
                stats.avg_turns
            ));
        }
        out.push_str("\n=== Expedition tiers ===\n");
        for tier in &self.tiers {
            out.push_str(&format!(
                "  {:<8} power {:>7.0}: {:.1}/{} waves, {:>5.1}% full clear, {:>5.1}% bonus pull, {:.0} xp avg\n",
                tier.tier_id,
                tier.team_power,
                tier.avg_waves,
                tier.total_waves,
                tier.full_clear_rate * 100.0,
                tier.gacha_win_rate * 100.0,
                tier.avg_xp
            ));
        }
        out
    }

    /// JSON dump for tooling.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
