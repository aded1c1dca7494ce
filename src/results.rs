//! Race result records shared by the parser, reconciliation and GC engine.

use crate::cli::types::{category::Category, race::RaceNumber};
use serde::{Deserialize, Serialize};


/// One rider's result in one race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceEntry {
    pub category: Category,
    /// Display name as read from the sheet (or as approved during import).
    pub name: String,
    /// `MM:SS` finish time.
    pub time: String,
    /// `+MM:SS` or `+SS` gap to the category leader; empty for the leader.
    #[serde(default)]
    pub gap: String,
    /// Parsed time plus parsed gap.
    pub total_seconds: f64,
    /// Standard competition rank within the category for this race.
    pub position: u32,
    /// Points from the built-in default ladder, for previews only.
    /// Standings always derive points from `position` and the series config.
    pub points: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

impl RaceEntry {
    /// The team name, if one is set and non-blank.
    pub fn team_name(&self) -> Option<&str> {
        self.team
            .as_deref()
            .map(str::trim)
            .filter(|team| !team.is_empty())
    }

    /// Total seconds with millisecond precision, e.g. `754.000`.
    pub fn total_seconds_display(&self) -> String {
        format!("{:.3}", self.total_seconds)
    }
}

/// Results of one race, ordered by category then position.
pub type Race = Vec<RaceEntry>;

/// Storage state of one race slot in a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaceStatus {
    pub race: RaceNumber,
    /// Number of stored entries, `None` if the race has not been entered.
    pub entries: Option<usize>,
}

/// Per-race storage status for races `1..=num_races`.
pub fn race_statuses(races: &[Option<Race>], num_races: u32) -> Vec<RaceStatus> {
    (0..num_races as usize)
        .map(|idx| RaceStatus {
            race: RaceNumber::from_index(idx),
            entries: races.get(idx).and_then(|race| race.as_ref().map(Vec::len)),
        })
        .collect()
}

/// First race without stored results, or the last race when all are stored.
pub fn next_race_number(races: &[Option<Race>], num_races: u32) -> RaceNumber {
    (0..num_races as usize)
        .find(|idx| !matches!(races.get(*idx), Some(Some(_))))
        .map(RaceNumber::from_index)
        .unwrap_or(RaceNumber::new(num_races.max(1)))
}

/// Format seconds as `M:SS`, e.g. `3725.4` -> `62:05`.
pub fn format_seconds(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
