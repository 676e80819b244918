//! Simulation configuration.

/// Configuration for a balance simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Battles per role matchup and resolutions per expedition tier
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Character level for every simulated unit
    pub level: u32,

    /// Ascension tier for every simulated unit
    pub ascension: u32,

    /// Team size per side for the matchup battles
    pub team_size: usize,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per-matchup detail)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            level: 10,
            ascension: 0,
            team_size: 1,
            verbosity: 1,
        }
    }
}
