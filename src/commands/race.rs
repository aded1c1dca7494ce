//! `race parse`, `race import` and `race list`.

use crate::{
    cli::types::{race::RaceNumber, team::TeamAssignment},
    config::SeriesConfig,
    gc::points::podium_bonus,
    parse::parse_results,
    reconcile::{ImportSession, NameSuggestion},
    results::{next_race_number, race_statuses, Race, RaceEntry},
    storage::SeriesStore,
    Result,
};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

use super::common::{read_input, CommandContext};

/// Parameters for `race parse`
#[derive(Debug, Clone)]
pub struct RaceParseParams {
    pub file: PathBuf,
    pub as_json: bool,
}

/// Parameters for `race import`
#[derive(Debug, Clone)]
pub struct RaceImportParams {
    /// Target race; the next race without results when unset.
    pub race: Option<RaceNumber>,
    pub file: PathBuf,
    /// Suggestion indices to approve.
    pub approve: Vec<usize>,
    pub approve_all: bool,
    pub teams: Vec<TeamAssignment>,
    pub threshold: f64,
    pub dry_run: bool,
}

/// What an import did, or would do on a dry run
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub race: RaceNumber,
    pub entries: Vec<RaceEntry>,
    pub suggestions: Vec<NameSuggestion>,
    pub approved: Vec<bool>,
    /// Riders still without a team (team-race series only).
    pub missing_teams: Vec<String>,
    pub renamed: usize,
    pub saved: bool,
}

/// Parsed entries with their default-ladder points, plus podium bonus when
/// the series has one.
pub fn render_preview(entries: &[RaceEntry], config: Option<&SeriesConfig>) -> String {
    let bonus = config.and_then(|c| c.bonus_points.as_ref());
    let mut out = String::new();
    let mut category = None;
    for entry in entries {
        if category != Some(entry.category) {
            category = Some(entry.category);
            let _ = writeln!(out, "Category {}", entry.category);
        }
        let extra = podium_bonus(bonus, entry.position);
        let points = if extra > 0 {
            format!("{} pts (+{} bonus)", entry.points, extra)
        } else {
            format!("{} pts", entry.points)
        };
        let _ = writeln!(
            out,
            "  {:>3}  {:<28} {:>6} {:>7}  {}",
            entry.position, entry.name, entry.time, entry.gap, points
        );
    }
    let _ = writeln!(out, "{} rider(s) parsed", entries.len());
    out
}

/// Handle `race parse`: preview only, nothing is stored
pub fn handle_race_parse(db: Option<PathBuf>, params: RaceParseParams) -> Result<()> {
    let text = read_input(&params.file)?;
    let entries = parse_results(&text);

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No riders found in the pasted results");
        return Ok(());
    }

    let config = CommandContext::open(db)?.store.load_series_config()?;
    print!("{}", render_preview(&entries, config.as_ref()));
    Ok(())
}

/// Parse, reconcile and (unless a dry run) save one race.
///
/// Nothing is written if parsing finds no riders, the race number is outside
/// the series, or a team-race import still lacks teams.
pub fn import_race(
    ctx: &mut CommandContext,
    text: &str,
    params: &RaceImportParams,
) -> Result<ImportOutcome> {
    let config = ctx.require_config()?;
    let existing = ctx.load_races()?;
    let race = params
        .race
        .unwrap_or_else(|| next_race_number(&existing, config.num_races));

    // A re-imported race is matched against the other races, not its old self.
    // Team locks only come from races before it.
    let mut history = existing;
    if let Some(slot) = history.get_mut(race.index()) {
        *slot = None;
    }

    let entries = parse_results(text);
    let mut session = ImportSession::new(&config, race, entries, &history, params.threshold)?;

    if params.approve_all {
        session.approve_all();
    } else {
        for index in &params.approve {
            session.approve(*index)?;
        }
    }
    for assignment in &params.teams {
        session.set_team_by_name(&assignment.rider, &assignment.team)?;
    }

    let suggestions = session.suggestions().to_vec();
    let approved: Vec<bool> = (0..suggestions.len())
        .map(|idx| session.is_approved(idx))
        .collect();

    if params.dry_run {
        return Ok(ImportOutcome {
            race,
            entries: session.entries().to_vec(),
            suggestions,
            approved,
            missing_teams: session.missing_teams(),
            renamed: 0,
            saved: false,
        });
    }

    let committed = session.commit()?;
    save_committed(&mut ctx.store, committed.race, &committed.entries)?;
    Ok(ImportOutcome {
        race: committed.race,
        entries: committed.entries,
        suggestions,
        approved,
        missing_teams: Vec::new(),
        renamed: committed.renamed,
        saved: true,
    })
}

fn save_committed(store: &mut SeriesStore, race: RaceNumber, entries: &[RaceEntry]) -> Result<()> {
    store.save_race_results(race, entries)?;
    info!(race = %race, entries = entries.len(), "race results saved");
    Ok(())
}

pub fn render_import_outcome(outcome: &ImportOutcome) -> String {
    let mut out = String::new();
    if outcome.suggestions.is_empty() {
        let _ = writeln!(out, "No fuzzy name matches (exact matches are ignored)");
    } else {
        let _ = writeln!(out, "Suggested name matches:");
        for (idx, suggestion) in outcome.suggestions.iter().enumerate() {
            let mark = if outcome.approved.get(idx).copied().unwrap_or(false) {
                "x"
            } else {
                " "
            };
            let _ = writeln!(
                out,
                "  [{}] {:>2}: {} -> {} ({}%, category {})",
                mark,
                idx,
                suggestion.original_name,
                suggestion.suggested_name,
                suggestion.score_percent(),
                suggestion.category
            );
        }
    }
    if !outcome.missing_teams.is_empty() {
        let _ = writeln!(
            out,
            "Team needed (--team \"Rider Name=Team\"): {}",
            outcome.missing_teams.join(", ")
        );
    }

    if outcome.saved {
        let _ = writeln!(
            out,
            "✓ Race {} saved: {} rider(s), {} renamed",
            outcome.race,
            outcome.entries.len(),
            outcome.renamed
        );
    } else {
        let _ = writeln!(
            out,
            "Dry run: race {} would save {} rider(s)",
            outcome.race,
            outcome.entries.len()
        );
    }
    out
}

/// Handle `race import`
pub fn handle_race_import(db: Option<PathBuf>, params: RaceImportParams) -> Result<()> {
    let text = read_input(&params.file)?;
    let mut ctx = CommandContext::open(db)?;
    let outcome = import_race(&mut ctx, &text, &params)?;
    print!("{}", render_import_outcome(&outcome));
    Ok(())
}

/// One line per configured race: saved with rider count, or not entered
pub fn render_race_list(config: &SeriesConfig, races: &[Option<Race>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} races)", config.name, config.num_races);
    for status in race_statuses(races, config.num_races) {
        let state = match status.entries {
            Some(count) => format!("saved, {} rider(s)", count),
            None => "not entered".to_string(),
        };
        let description = config
            .race_description(status.race.as_u32())
            .map(|d| format!(" - {}", d))
            .unwrap_or_default();
        let _ = writeln!(out, "  Race {:>2}: {}{}", status.race.as_u32(), state, description);
    }
    let _ = writeln!(
        out,
        "Next race: {}",
        next_race_number(races, config.num_races)
    );
    out
}

/// Handle `race list`
pub fn handle_race_list(db: Option<PathBuf>) -> Result<()> {
    let ctx = CommandContext::open(db)?;
    let config = ctx.require_config()?;
    let races = ctx.store.load_all_races()?;
    print!("{}", render_race_list(&config, &races));
    Ok(())
}
