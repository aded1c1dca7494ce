//! Aggregate records produced by the GC engine.
//!
//! These are derived on every computation and never persisted.

use crate::cli::types::category::Category;
use crate::results::RaceEntry;
use serde::Serialize;
use std::collections::BTreeMap;

/// One rider's result in one race, as scored under the series configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceResult {
    pub position: u32,
    pub points: i32,
    pub time: String,
    pub gap: String,
    pub total_seconds: f64,
}

/// Cumulative record for one rider in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiderGc {
    /// Display name from the rider's first appearance.
    pub name: String,
    pub normalized_name: String,
    pub category: Category,
    pub total_points: i32,
    pub total_seconds: f64,
    pub races_completed: u32,
    /// First non-empty team the rider was seen with.
    pub team: Option<String>,
    /// One slot per configured race, `None` where the rider has no result.
    pub races: Vec<Option<RaceResult>>,
    /// GC position; `None` for unranked (incomplete, time-based) riders.
    pub gc_position: Option<u32>,
}

impl RiderGc {
    pub(crate) fn new(entry: &RaceEntry, normalized_name: String, num_races: usize) -> Self {
        Self {
            name: entry.name.clone(),
            normalized_name,
            category: entry.category,
            total_points: 0,
            total_seconds: 0.0,
            races_completed: 0,
            team: None,
            races: vec![None; num_races],
            gc_position: None,
        }
    }

    /// Fold one race result into the totals. Returns `false` (and changes
    /// nothing) if this race slot is already filled.
    pub(crate) fn record(&mut self, race_idx: usize, entry: &RaceEntry, points: i32) -> bool {
        match self.races.get(race_idx) {
            Some(None) => {}
            _ => return false,
        }

        self.total_points = self.total_points.saturating_add(points);
        self.total_seconds += entry.total_seconds;
        self.races_completed += 1;
        self.races[race_idx] = Some(RaceResult {
            position: entry.position,
            points,
            time: entry.time.clone(),
            gap: entry.gap.clone(),
            total_seconds: entry.total_seconds,
        });
        if self.team.is_none() {
            self.team = entry.team_name().map(str::to_string);
        }
        true
    }

    pub fn is_complete(&self, num_races: u32) -> bool {
        self.races_completed == num_races
    }
}

/// Cumulative record for one team in one category (team-race series only).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamGc {
    /// Team name as first written in a race.
    pub name: String,
    pub normalized_team: String,
    pub category: Category,
    /// Sum of the team's per-race positions; lower is better.
    pub total_team_points: u32,
    pub team_races_completed: u32,
    /// Team position per configured race.
    pub races: Vec<Option<u32>>,
    /// Members in this category, best individual points first.
    pub riders: Vec<RiderGc>,
    pub gc_position: Option<u32>,
}

/// Standings for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CategoryStandings {
    Individual {
        /// Ranked riders, best first.
        ranked: Vec<RiderGc>,
        /// Riders missing races in a time-based GC, alphabetical and unranked.
        incomplete: Vec<RiderGc>,
    },
    Team {
        teams: Vec<TeamGc>,
    },
}

/// Standings for every category that has results.
pub type Standings = BTreeMap<Category, CategoryStandings>;
