//! `standings`: compute and print the general classification.

use crate::{
    cli::types::category::Category,
    config::{GcBasis, SeriesConfig},
    gc::{compute_gc, CategoryStandings, RiderGc, Standings, TeamGc},
    results::format_seconds,
    Result,
};
use std::fmt::Write as _;
use std::path::PathBuf;

use super::common::CommandContext;

/// Parameters for `standings`
#[derive(Debug, Clone, Default)]
pub struct StandingsParams {
    pub category: Option<Category>,
    pub as_json: bool,
}

/// Load the stored series and compute its standings, optionally for one category
pub fn load_standings(
    ctx: &CommandContext,
    category: Option<Category>,
) -> Result<(SeriesConfig, Standings)> {
    let config = ctx.require_config()?;
    let races = ctx.load_races()?;
    let mut standings = compute_gc(&config, &races);
    if let Some(category) = category {
        standings.retain(|c, _| *c == category);
    }
    Ok((config, standings))
}

pub fn render_standings_text(config: &SeriesConfig, standings: &Standings) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", config.name);
    let _ = writeln!(out, "{}", config.summary());
    if standings.is_empty() {
        let _ = writeln!(out, "\nNo results yet");
        return out;
    }

    for (category, category_standings) in standings {
        let _ = writeln!(out, "\nCategory {}", category);
        match category_standings {
            CategoryStandings::Individual { ranked, incomplete } => {
                render_riders(&mut out, config, ranked);
                if !incomplete.is_empty() {
                    let _ = writeln!(out, "  Incomplete (not ranked):");
                    render_riders(&mut out, config, incomplete);
                }
            }
            CategoryStandings::Team { teams } => render_teams(&mut out, config, teams),
        }
    }
    out
}

fn position_label(position: Option<u32>) -> String {
    position.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string())
}

fn render_riders(out: &mut String, config: &SeriesConfig, riders: &[RiderGc]) {
    for rider in riders {
        let total = match config.gc_basis {
            GcBasis::Points => format!("{} pts", rider.total_points),
            GcBasis::Time => format_seconds(rider.total_seconds),
        };
        let per_race: Vec<String> = rider
            .races
            .iter()
            .map(|slot| match (slot, config.gc_basis) {
                (Some(result), GcBasis::Points) => result.points.to_string(),
                (Some(result), GcBasis::Time) => format_seconds(result.total_seconds),
                (None, _) => "-".to_string(),
            })
            .collect();
        let team = rider
            .team
            .as_deref()
            .map(|t| format!(" [{}]", t))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:>3}  {:<28} {:>10}  {}/{} races  {}{}",
            position_label(rider.gc_position),
            rider.name,
            total,
            rider.races_completed,
            config.num_races,
            per_race.join(" "),
            team
        );
    }
}

fn render_teams(out: &mut String, config: &SeriesConfig, teams: &[TeamGc]) {
    if teams.is_empty() {
        let _ = writeln!(out, "  No teams yet");
        return;
    }
    for team in teams {
        let per_race: Vec<String> = team
            .races
            .iter()
            .map(|slot| slot.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()))
            .collect();
        let _ = writeln!(
            out,
            "  {:>3}  {:<28} {:>4}  {}/{} races  {}",
            position_label(team.gc_position),
            team.name,
            team.total_team_points,
            team.team_races_completed,
            config.num_races,
            per_race.join(" ")
        );
        for rider in &team.riders {
            let _ = writeln!(
                out,
                "         {:<26} {:>4} pts",
                rider.name, rider.total_points
            );
        }
    }
}

/// Handle `standings`
pub fn handle_standings(db: Option<PathBuf>, params: StandingsParams) -> Result<()> {
    let ctx = CommandContext::open(db)?;
    let (config, standings) = load_standings(&ctx, params.category)?;

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&standings)?);
    } else {
        print!("{}", render_standings_text(&config, &standings));
    }
    Ok(())
}
