//! Series configuration: scoring scheme, GC basis and team-race options.
//!
//! A [`SeriesConfig`] is validated once at the boundary (on save and on load)
//! so the scoring and aggregation code can rely on its invariants.

use crate::cli::types::race::MAX_RACES;
use crate::error::{GcError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;


/// Upper bound on riders counted per team per race.
pub const MAX_TOP_X_RIDERS: u32 = 20;

/// Largest magnitude allowed for a custom or bonus points value.
pub const MAX_POINTS_VALUE: i32 = 1_000_000;

/// Base points scheme applied per race and category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "system", content = "points", rename_all = "lowercase")]
pub enum PointsSystem {
    /// 100 for the winner, one less per place, never below zero.
    Fixed100,
    /// Winner gets the category field size, last finisher gets 1.
    RaceSize,
    /// Points by position, indexed by `position - 1`; positions past the end score 0.
    Custom(Vec<i32>),
}

impl PointsSystem {
    pub fn label(&self) -> &'static str {
        match self {
            PointsSystem::Fixed100 => "fixed100",
            PointsSystem::RaceSize => "racesize",
            PointsSystem::Custom(_) => "custom",
        }
    }
}

/// Points scheme as chosen on the command line, before custom values are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PointsSystemKind {
    #[default]
    Fixed100,
    Racesize,
    Custom,
}

impl PointsSystemKind {
    /// Build the points system, taking custom values from `custom_points`.
    ///
    /// Custom values are required for `custom` and rejected otherwise.
    pub fn with_points(self, custom_points: Option<&str>) -> Result<PointsSystem> {
        match (self, custom_points) {
            (PointsSystemKind::Custom, Some(list)) => {
                Ok(PointsSystem::Custom(parse_points_list(list, "custom points")?))
            }
            (PointsSystemKind::Custom, None) => Err(GcError::invalid_config(
                "custom points system requires --custom-points",
            )),
            (_, Some(_)) => Err(GcError::invalid_config(
                "--custom-points only applies to the custom points system",
            )),
            (PointsSystemKind::Fixed100, None) => Ok(PointsSystem::Fixed100),
            (PointsSystemKind::Racesize, None) => Ok(PointsSystem::RaceSize),
        }
    }
}

/// What the individual general classification is ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GcBasis {
    /// Total points, highest first. Every rider is ranked.
    #[default]
    Points,
    /// Total time, lowest first. Only riders who finished every race are ranked.
    Time,
}

impl fmt::Display for GcBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GcBasis::Points => "Total Points",
            GcBasis::Time => "Total Time",
        };
        write!(f, "{}", s)
    }
}

/// Configuration of one race series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub num_races: u32,
    pub points_system: PointsSystem,
    /// Podium bonus for positions 1-3, added on top of the base scheme.
    #[serde(default)]
    pub bonus_points: Option<[i32; 3]>,
    #[serde(default)]
    pub gc_basis: GcBasis,
    #[serde(default)]
    pub team_race: bool,
    /// Riders counted per team per race; all riders when unset.
    #[serde(default)]
    pub top_x_riders_count: Option<u32>,
    #[serde(default)]
    pub race_descriptions: Vec<String>,
}

impl SeriesConfig {
    /// Minimal points-based individual series, handy for tests and defaults.
    pub fn new(name: impl Into<String>, num_races: u32, points_system: PointsSystem) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            num_races,
            points_system,
            bonus_points: None,
            gc_basis: GcBasis::Points,
            team_race: false,
            top_x_riders_count: None,
            race_descriptions: Vec::new(),
        }
    }

    /// Check the configuration invariants.
    ///
    /// Rejects an empty name, a race count outside `1..=20`, an empty custom
    /// points list, points values beyond [`MAX_POINTS_VALUE`], a top-X count
    /// outside `1..=20`, and time-based GC in team-race mode.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GcError::invalid_config("series name is required"));
        }
        if self.num_races == 0 || self.num_races > MAX_RACES {
            return Err(GcError::invalid_config(format!(
                "number of races must be between 1 and {}, got {}",
                MAX_RACES, self.num_races
            )));
        }
        if let PointsSystem::Custom(points) = &self.points_system {
            if points.is_empty() {
                return Err(GcError::invalid_config(
                    "custom points system requires at least one value",
                ));
            }
            check_points_values(points, "custom points")?;
        }
        if let Some(bonus) = &self.bonus_points {
            check_points_values(bonus, "bonus points")?;
        }
        if let Some(count) = self.top_x_riders_count {
            if count == 0 || count > MAX_TOP_X_RIDERS {
                return Err(GcError::invalid_config(format!(
                    "top X riders count must be between 1 and {}, got {}",
                    MAX_TOP_X_RIDERS, count
                )));
            }
        }
        if self.team_race && self.gc_basis == GcBasis::Time {
            return Err(GcError::invalid_config(
                "team race mode only supports points-based GC",
            ));
        }
        Ok(())
    }

    pub fn bonus_enabled(&self) -> bool {
        self.bonus_points.is_some()
    }

    /// Description for a 1-based race number, if one was given.
    pub fn race_description(&self, race: u32) -> Option<&str> {
        let idx = race.checked_sub(1)? as usize;
        self.race_descriptions
            .get(idx)
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
    }

    /// One-line summary, e.g. `GC based on: Total Points | Race Type: Team (Top 3 riders/team)`.
    pub fn summary(&self) -> String {
        let race_type = if self.team_race { "Team" } else { "Individual" };
        let top_x = match (self.team_race, self.top_x_riders_count) {
            (true, Some(count)) => format!(" (Top {} riders/team)", count),
            _ => String::new(),
        };
        format!(
            "GC based on: {} | Race Type: {}{}",
            self.gc_basis, race_type, top_x
        )
    }
}

fn check_points_values(values: &[i32], what: &str) -> Result<()> {
    match values
        .iter()
        .find(|value| value.unsigned_abs() > MAX_POINTS_VALUE.unsigned_abs())
    {
        Some(value) => Err(GcError::invalid_config(format!(
            "{} must be within +/-{}, got {}",
            what, MAX_POINTS_VALUE, value
        ))),
        None => Ok(()),
    }
}

/// Parse a comma-separated list of integers, e.g. `"50, 45, 40"`.
pub fn parse_points_list(input: &str, what: &str) -> Result<Vec<i32>> {
    input
        .split(',')
        .map(|part| {
            part.trim().parse::<i32>().map_err(|_| {
                GcError::invalid_config(format!("{} must be comma-separated numbers", what))
            })
        })
        .collect()
}

/// Parse exactly three comma-separated podium bonus values.
pub fn parse_bonus_points(input: &str) -> Result<[i32; 3]> {
    let values = parse_points_list(input, "bonus points")?;
    match values.as_slice() {
        [first, second, third] => Ok([*first, *second, *third]),
        _ => Err(GcError::invalid_config(format!(
            "bonus points must be exactly 3 comma-separated numbers, got {}",
            values.len()
        ))),
    }
}
