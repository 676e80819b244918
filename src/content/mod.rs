//! Content catalog: the admin-authored definitions the engine consumes.

pub mod data;
pub mod types;

pub use data::*;
pub use types::*;
