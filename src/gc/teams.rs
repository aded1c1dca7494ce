//! Per-race team scoring for team-race series.
//!
//! In each race and category, a team's score is the sum of the points of its
//! best `top_x_riders_count` riders (all riders when unset). Teams are then
//! placed by that score, highest first, and the GC adds up those placings.

use crate::cli::types::category::Category;
use crate::config::SeriesConfig;
use crate::names::normalize_team;
use crate::ranking::competition_ranks;
use crate::results::RaceEntry;
use serde::Serialize;
use std::collections::BTreeMap;

/// A team's placing in one race and category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRaceScore {
    pub category: Category,
    pub normalized_team: String,
    /// Team name as written on the team's first entry in this race.
    pub name: String,
    /// Sum of the counted riders' points.
    pub counted_points: i32,
    pub riders_counted: usize,
    /// Team position within the category, 1 for the highest score.
    pub position: u32,
}

/// Place every team in one race.
///
/// `points` holds the authoritative points of each entry, index-aligned with
/// `entries`. Entries without a team are ignored. Output is ordered by
/// category, then team position.
pub fn score_team_race(
    config: &SeriesConfig,
    entries: &[RaceEntry],
    points: &[i32],
) -> Vec<TeamRaceScore> {
    let mut groups: BTreeMap<(Category, String), Vec<(&RaceEntry, i32)>> = BTreeMap::new();
    for (entry, pts) in entries.iter().zip(points) {
        let normalized = normalize_team(entry.team.as_deref().unwrap_or_default());
        if normalized.is_empty() {
            continue;
        }
        groups
            .entry((entry.category, normalized))
            .or_default()
            .push((entry, *pts));
    }

    let mut by_category: BTreeMap<Category, Vec<TeamRaceScore>> = BTreeMap::new();
    for ((category, normalized_team), mut members) in groups {
        let name = members
            .first()
            .and_then(|(entry, _)| entry.team_name())
            .unwrap_or_default()
            .to_string();

        members.sort_by(|(a, _), (b, _)| {
            a.position
                .cmp(&b.position)
                .then(a.total_seconds.total_cmp(&b.total_seconds))
        });
        let cap = config
            .top_x_riders_count
            .map(|count| count as usize)
            .unwrap_or(members.len());
        let counted = &members[..cap.min(members.len())];

        by_category
            .entry(category)
            .or_default()
            .push(TeamRaceScore {
                category,
                normalized_team,
                name,
                counted_points: counted
                    .iter()
                    .fold(0i32, |sum, (_, pts)| sum.saturating_add(*pts)),
                riders_counted: counted.len(),
                position: 0,
            });
    }

    let mut scores = Vec::new();
    for (_, mut teams) in by_category {
        teams.sort_by(|a, b| b.counted_points.cmp(&a.counted_points));
        let positions = competition_ranks(&teams, |prev, curr| {
            prev.counted_points == curr.counted_points
        });
        for (mut team, position) in teams.into_iter().zip(positions) {
            team.position = position;
            scores.push(team);
        }
    }
    scores
}
