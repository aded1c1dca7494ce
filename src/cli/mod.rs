//! CLI argument definitions and parsing.

pub mod types;

use crate::config::{GcBasis, PointsSystemKind};
use crate::reconcile::DEFAULT_MATCH_THRESHOLD;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{category::Category, race::RaceNumber, team::TeamAssignment};

#[derive(Debug, Parser)]
#[clap(
    name = "zwift-gc",
    version,
    about = "General classification for multi-race Zwift series"
)]
pub struct ZwiftGc {
    /// Series database file (or set `ZWIFT_GC_DB`).
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log progress to stderr (overridden by `RUST_LOG`).
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create or inspect the series configuration
    Config {
        #[clap(subcommand)]
        cmd: ConfigCmd,
    },

    /// Parse, import and list race results
    Race {
        #[clap(subcommand)]
        cmd: RaceCmd,
    },

    /// Print the general classification
    Standings {
        /// Only show one category.
        #[clap(long, short)]
        category: Option<Category>,

        /// Output standings as JSON instead of tables.
        #[clap(long)]
        json: bool,
    },

    /// Map misspelled rider names to a canonical name
    Alias {
        #[clap(subcommand)]
        cmd: AliasCmd,
    },

    /// Delete the configuration, all races and all aliases
    Clear {
        /// Confirm deleting everything.
        #[clap(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCmd {
    /// Save a new series configuration, replacing the current one
    Set(ConfigSetArgs),

    /// Show the saved configuration
    Show {
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
pub struct ConfigSetArgs {
    /// Series name.
    #[clap(long)]
    pub name: String,

    #[clap(long)]
    pub description: Option<String>,

    /// Number of races (1-20).
    #[clap(long)]
    pub races: u32,

    #[clap(long, value_enum, default_value_t = PointsSystemKind::Fixed100)]
    pub points: PointsSystemKind,

    /// Points by position for `--points custom`, e.g. "50,45,40".
    #[clap(long)]
    pub custom_points: Option<String>,

    /// Podium bonus for 1st-3rd, e.g. "10,5,3".
    #[clap(long)]
    pub bonus: Option<String>,

    #[clap(long, value_enum, default_value_t = GcBasis::Points)]
    pub gc_basis: GcBasis,

    /// Score teams instead of individual riders.
    #[clap(long)]
    pub team_race: bool,

    /// Riders counted per team per race (team races only).
    #[clap(long)]
    pub top_x: Option<u32>,

    /// Description of each race in order (repeatable).
    #[clap(long = "race-description")]
    pub race_descriptions: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum RaceCmd {
    /// Preview parsed results without saving them
    Parse {
        /// Pasted results file, or `-` for stdin.
        #[clap(long, short)]
        file: PathBuf,

        #[clap(long)]
        json: bool,
    },

    /// Parse, reconcile names and save one race
    Import(RaceImportArgs),

    /// Show which races have results
    List,
}

#[derive(Debug, Args)]
pub struct RaceImportArgs {
    /// Race number; defaults to the next race without results.
    #[clap(long, short)]
    pub race: Option<RaceNumber>,

    /// Pasted results file, or `-` for stdin.
    #[clap(long, short)]
    pub file: PathBuf,

    /// Approve the name suggestion with this index (repeatable).
    #[clap(long)]
    pub approve: Vec<usize>,

    /// Approve every name suggestion.
    #[clap(long, conflicts_with = "approve")]
    pub approve_all: bool,

    /// Team for a rider without an earlier team: "Rider Name=Team" (repeatable).
    #[clap(long = "team")]
    pub teams: Vec<TeamAssignment>,

    /// Similarity a name must exceed to be suggested, from 0 up to but not including 1.
    #[clap(long, default_value_t = DEFAULT_MATCH_THRESHOLD)]
    pub threshold: f64,

    /// Show suggestions and missing teams without saving.
    #[clap(long)]
    pub dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum AliasCmd {
    /// Show `alias` as `canonical` in standings
    Add {
        #[clap(long)]
        alias: String,

        #[clap(long)]
        canonical: String,
    },

    /// List stored aliases
    List,
}
