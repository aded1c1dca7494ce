//! Points and general-classification aggregation.
//!
//! - `points`: per-race scoring from a series configuration
//! - `teams`: per-race team scoring for team-race series
//! - `compute`: folding every stored race into category standings
//! - `types`: the aggregate records handed to presentation

pub mod compute;
pub mod points;
pub mod teams;
pub mod types;

pub use compute::compute_gc;
pub use types::*;
