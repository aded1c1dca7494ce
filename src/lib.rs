//! Zwift Series GC Library
//!
//! Turns pasted race-result sheets into ranked rider entries, reconciles
//! rider names across races, and folds every stored race into per-category
//! general-classification standings.
//!
//! ## Features
//!
//! - **Result Parsing**: Category headers, name and time lines, gaps and tied positions
//! - **Name Reconciliation**: Fuzzy match suggestions that only apply once approved
//! - **Flexible Scoring**: Fixed 100, field-size or custom points with podium bonus
//! - **Team Races**: Top-X riders per team, sticky team assignments
//! - **Local Storage**: SQLite-backed series configuration, races and aliases
//!
//! ## Quick Start
//!
//! ```rust
//! use zwift_gc::{compute_gc, parse_results, PointsSystem, SeriesConfig};
//!
//! let text = "A\nJohn Smith\n12:34\n250w\n3.5w/kg\n90rpm";
//! let entries = parse_results(text);
//! assert_eq!(entries[0].position, 1);
//!
//! let config = SeriesConfig::new("Tuesday Crits", 1, PointsSystem::Fixed100);
//! let standings = compute_gc(&config, &[Some(entries)]);
//! assert_eq!(standings.len(), 1);
//! ```
//!
//! ## Environment Configuration
//!
//! Point the CLI at a series database without passing `--db` every time:
//! ```bash
//! export ZWIFT_GC_DB=~/series/winter.db
//! ```

/// Compile a regex literal once and reuse it.
macro_rules! static_regex {
    ($re:literal) => {{
        static REGEX: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        REGEX.get_or_init(|| regex::Regex::new($re).expect("invalid regex literal"))
    }};
}

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gc;
pub mod names;
pub mod parse;
pub mod ranking;
pub mod reconcile;
pub mod results;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{category::Category, race::RaceNumber};
pub use config::{GcBasis, PointsSystem, SeriesConfig};
pub use error::{GcError, Result};
pub use gc::{compute_gc, CategoryStandings, RiderGc, Standings, TeamGc};
pub use parse::parse_results;
pub use reconcile::{ImportSession, DEFAULT_MATCH_THRESHOLD};
pub use results::RaceEntry;

pub const DB_PATH_ENV_VAR: &str = "ZWIFT_GC_DB";
