//! Timed expeditions: dispatch, wave-clear resolution and previews.

pub mod logic;
pub mod types;

pub use logic::{
    dispatch_expedition, preview_expedition, resolve_expedition, resolve_expedition_seeded,
};
pub use types::{
    ActiveExpedition, DurationTier, ExpeditionConfig, ExpeditionPreview, ExpeditionResult,
};
