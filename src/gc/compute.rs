use super::points::score_race;
use super::teams::score_team_race;
use super::types::{CategoryStandings, RiderGc, Standings, TeamGc};
use crate::cli::types::category::Category;
use crate::config::{GcBasis, SeriesConfig};
use crate::names::{normalize_name, normalize_team};
use crate::ranking::{competition_ranks, times_tie};
use crate::results::{Race, RaceEntry};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};


type RiderKey = (Category, String);
type TeamKey = (Category, String);

/// Fold every stored race into per-category standings.
///
/// `races[i]` holds race `i + 1`, `None` where nothing has been entered.
/// Points are always recomputed from each entry's position and `config`;
/// the input entries are not modified. Races past `config.num_races` are
/// ignored.
///
/// Riders are keyed by normalized name and category, so the same name in two
/// categories is two riders. A rider appearing twice in one race only counts
/// once.
pub fn compute_gc(config: &SeriesConfig, races: &[Option<Race>]) -> Standings {
    let num_races = config.num_races as usize;
    let mut riders: BTreeMap<RiderKey, RiderGc> = BTreeMap::new();
    let mut teams: BTreeMap<TeamKey, TeamGc> = BTreeMap::new();
    let mut folded = 0;

    for (race_idx, race) in races.iter().enumerate() {
        let Some(entries) = race else {
            continue;
        };
        if race_idx >= num_races {
            warn!(
                race = race_idx + 1,
                num_races, "ignoring stored race beyond the series length"
            );
            continue;
        }

        let points = score_race(config, entries);
        for (entry, pts) in entries.iter().zip(&points) {
            let normalized = normalize_name(&entry.name);
            let rider = riders
                .entry((entry.category, normalized.clone()))
                .or_insert_with(|| RiderGc::new(entry, normalized, num_races));
            if !rider.record(race_idx, entry, *pts) {
                debug!(
                    race = race_idx + 1,
                    name = %entry.name,
                    "duplicate rider in race, keeping first result"
                );
            }
        }

        if config.team_race {
            fold_team_race(config, race_idx, entries, &points, &mut teams);
        }
        folded += 1;
    }
    info!(races = folded, riders = riders.len(), "computed GC");

    let mut by_category: BTreeMap<Category, Vec<RiderGc>> = BTreeMap::new();
    for ((category, _), rider) in riders {
        by_category.entry(category).or_default().push(rider);
    }

    let mut teams_by_category: BTreeMap<Category, Vec<TeamGc>> = BTreeMap::new();
    for ((category, _), team) in teams {
        teams_by_category.entry(category).or_default().push(team);
    }

    by_category
        .into_iter()
        .map(|(category, riders)| {
            let standings = if config.team_race {
                let ranked = rank_by_points(riders);
                let teams = teams_by_category.remove(&category).unwrap_or_default();
                CategoryStandings::Team {
                    teams: rank_teams(teams, &ranked),
                }
            } else {
                individual_standings(config, riders)
            };
            (category, standings)
        })
        .collect()
}

fn fold_team_race(
    config: &SeriesConfig,
    race_idx: usize,
    entries: &[RaceEntry],
    points: &[i32],
    teams: &mut BTreeMap<TeamKey, TeamGc>,
) {
    let num_races = config.num_races as usize;
    for score in score_team_race(config, entries, points) {
        let team = teams
            .entry((score.category, score.normalized_team.clone()))
            .or_insert_with(|| TeamGc {
                name: score.name.clone(),
                normalized_team: score.normalized_team.clone(),
                category: score.category,
                total_team_points: 0,
                team_races_completed: 0,
                races: vec![None; num_races],
                riders: Vec::new(),
                gc_position: None,
            });
        team.total_team_points += score.position;
        team.races[race_idx] = Some(score.position);
        team.team_races_completed += 1;
    }
}

fn individual_standings(config: &SeriesConfig, riders: Vec<RiderGc>) -> CategoryStandings {
    match config.gc_basis {
        GcBasis::Points => CategoryStandings::Individual {
            ranked: rank_by_points(riders),
            incomplete: Vec::new(),
        },
        GcBasis::Time => {
            let (complete, mut incomplete): (Vec<_>, Vec<_>) = riders
                .into_iter()
                .partition(|rider| rider.is_complete(config.num_races));
            incomplete.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.name.cmp(&b.name))
            });
            CategoryStandings::Individual {
                ranked: rank_by_time(complete),
                incomplete,
            }
        }
    }
}

fn rank_by_points(mut riders: Vec<RiderGc>) -> Vec<RiderGc> {
    riders.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    let positions = competition_ranks(&riders, |prev, curr| {
        prev.total_points == curr.total_points
    });
    for (rider, position) in riders.iter_mut().zip(positions) {
        rider.gc_position = Some(position);
    }
    riders
}

fn rank_by_time(mut riders: Vec<RiderGc>) -> Vec<RiderGc> {
    riders.sort_by(|a, b| a.total_seconds.total_cmp(&b.total_seconds));
    let positions = competition_ranks(&riders, |prev, curr| {
        times_tie(prev.total_seconds, curr.total_seconds)
    });
    for (rider, position) in riders.iter_mut().zip(positions) {
        rider.gc_position = Some(position);
    }
    riders
}

/// Attach members, drop teams without any, and place teams by their summed
/// race positions, lowest first.
fn rank_teams(teams: Vec<TeamGc>, riders: &[RiderGc]) -> Vec<TeamGc> {
    let mut teams: Vec<TeamGc> = teams
        .into_iter()
        .filter_map(|mut team| {
            team.riders = riders
                .iter()
                .filter(|rider| {
                    normalize_team(rider.team.as_deref().unwrap_or_default())
                        == team.normalized_team
                })
                .cloned()
                .collect();
            (!team.riders.is_empty()).then_some(team)
        })
        .collect();

    teams.sort_by(|a, b| a.total_team_points.cmp(&b.total_team_points));
    let positions = competition_ranks(&teams, |prev, curr| {
        prev.total_team_points == curr.total_team_points
    });
    for (team, position) in teams.iter_mut().zip(positions) {
        team.gc_position = Some(position);
    }
    teams
}
