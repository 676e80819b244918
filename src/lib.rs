//! Starfall - Gacha RPG Simulation Engine
//!
//! Deterministic, replayable turn-based battles plus a probabilistic
//! offline expedition resolver, driven by an admin-authored content
//! catalog. The engine is a pure library: combat is a function of
//! (rosters, content, seed) -> (outcome, action log), expeditions of
//! (team power snapshot, tier, config) -> (waves, rewards). Rendering,
//! content editing and persistence are the caller's concern.

pub mod battle;
pub mod content;
pub mod core;
pub mod expedition;
pub mod simulator;
