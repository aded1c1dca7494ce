//! Identity reconciliation for a newly parsed race.
//!
//! Fuzzy name matching proposes renames against every rider seen in earlier
//! races; nothing is renamed until a suggestion is approved. In team-race
//! series a rider's earlier team is pre-filled and locked, and every other
//! rider needs a team before the race can be committed.
//!
//! [`ImportSession`] carries the pending entries, suggestions, approvals and
//! target race from the proposal step to [`ImportSession::commit`].

use crate::cli::types::{category::Category, race::RaceNumber};
use crate::config::SeriesConfig;
use crate::error::{GcError, Result};
use crate::names::{normalize_name, normalize_team, similarity};
use crate::results::{Race, RaceEntry};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

#[cfg(test)]
mod tests;

/// Scores must be strictly above this to be suggested.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.82;

/// A rider as first seen in the stored races.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnownRider {
    pub name: String,
    pub category: Category,
}

/// Every rider seen in earlier races, keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct KnownRiders {
    riders: BTreeMap<String, KnownRider>,
}

impl KnownRiders {
    /// Collect riders from stored races. The first appearance of a
    /// normalized name supplies its display name and category.
    pub fn from_races(races: &[Option<Race>]) -> Self {
        let mut riders = BTreeMap::new();
        for entry in races.iter().flatten().flatten() {
            riders
                .entry(normalize_name(&entry.name))
                .or_insert_with(|| KnownRider {
                    name: entry.name.clone(),
                    category: entry.category,
                });
        }
        Self { riders }
    }

    pub fn len(&self) -> usize {
        self.riders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.riders.is_empty()
    }

    pub fn contains(&self, normalized: &str) -> bool {
        self.riders.contains_key(normalized)
    }

    /// Closest known rider scoring above `threshold` and below 1.0.
    /// On equal scores the first in normalized-name order wins.
    pub fn best_match(&self, normalized: &str, threshold: f64) -> Option<(&KnownRider, f64)> {
        let mut best: Option<(&KnownRider, f64)> = None;
        for (known, rider) in &self.riders {
            let score = similarity(normalized, known);
            if score <= threshold || score >= 1.0 {
                continue;
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((rider, score));
            }
        }
        best
    }
}

/// A proposed rename of one parsed entry to a known rider's name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameSuggestion {
    pub original_name: String,
    pub suggested_name: String,
    pub score: f64,
    pub category: Category,
    /// Index into the parsed entries.
    pub entry_index: usize,
}

impl NameSuggestion {
    /// Score as a whole percentage, e.g. `0.9` -> `90`.
    pub fn score_percent(&self) -> u32 {
        (self.score * 100.0).round() as u32
    }
}

/// Propose at most one rename per entry.
///
/// Entries whose normalized name is already known need no reconciliation and
/// get no suggestion.
pub fn suggest_matches(
    entries: &[RaceEntry],
    known: &KnownRiders,
    threshold: f64,
) -> Vec<NameSuggestion> {
    let suggestions: Vec<NameSuggestion> = entries
        .iter()
        .enumerate()
        .filter_map(|(entry_index, entry)| {
            let normalized = normalize_name(&entry.name);
            if known.contains(&normalized) {
                return None;
            }
            let (rider, score) = known.best_match(&normalized, threshold)?;
            Some(NameSuggestion {
                original_name: entry.name.clone(),
                suggested_name: rider.name.clone(),
                score,
                category: entry.category,
                entry_index,
            })
        })
        .collect();

    info!(
        entries = entries.len(),
        known = known.len(),
        suggestions = suggestions.len(),
        "name matching done"
    );
    suggestions
}

/// Team each rider was last recorded with, per category.
#[derive(Debug, Clone, Default)]
pub struct TeamHistory {
    teams: BTreeMap<(String, Category), String>,
}

impl TeamHistory {
    pub fn from_races(races: &[Option<Race>]) -> Self {
        let mut teams = BTreeMap::new();
        for entry in races.iter().flatten().flatten() {
            if let Some(team) = entry.team_name() {
                teams.insert(
                    (normalize_name(&entry.name), entry.category),
                    team.to_string(),
                );
            }
        }
        Self { teams }
    }

    pub fn team_for(&self, name: &str, category: Category) -> Option<&str> {
        self.teams
            .get(&(normalize_name(name), category))
            .map(String::as_str)
    }

    /// Every recorded team name, sorted and deduplicated.
    pub fn known_teams(&self) -> Vec<String> {
        let names: BTreeSet<&String> = self.teams.values().collect();
        names.into_iter().cloned().collect()
    }
}

/// Entries ready to be saved for one race.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedRace {
    pub race: RaceNumber,
    pub entries: Vec<RaceEntry>,
    /// Number of entries renamed by approved suggestions.
    pub renamed: usize,
}

/// Pending import of one race, from parse to commit.
#[derive(Debug, Clone)]
pub struct ImportSession {
    race: RaceNumber,
    team_race: bool,
    entries: Vec<RaceEntry>,
    suggestions: Vec<NameSuggestion>,
    approved: Vec<bool>,
    history: TeamHistory,
    /// Team fixed by history, per entry.
    locked: Vec<Option<String>>,
}

impl ImportSession {
    /// Start an import of `entries` as race `race`.
    ///
    /// `threshold` must lie in `[0, 1)`.
    ///
    /// Every race in `existing_races` supplies known riders for name
    /// suggestions. Only races before `race` supply the team history.
    pub fn new(
        config: &SeriesConfig,
        race: RaceNumber,
        entries: Vec<RaceEntry>,
        existing_races: &[Option<Race>],
        threshold: f64,
    ) -> Result<Self> {
        race.check_within(config.num_races)?;
        if !(0.0..1.0).contains(&threshold) {
            return Err(GcError::invalid_config(format!(
                "match threshold must be at least 0 and below 1, got {}",
                threshold
            )));
        }
        if entries.is_empty() {
            return Err(GcError::ParseEmpty);
        }

        let known = KnownRiders::from_races(existing_races);
        let suggestions = suggest_matches(&entries, &known, threshold);
        let history = if config.team_race {
            let earlier = race.index().min(existing_races.len());
            TeamHistory::from_races(&existing_races[..earlier])
        } else {
            TeamHistory::default()
        };

        let mut session = Self {
            race,
            team_race: config.team_race,
            approved: vec![false; suggestions.len()],
            locked: vec![None; entries.len()],
            entries,
            suggestions,
            history,
        };
        session.fill_locked_teams();
        Ok(session)
    }

    pub fn race(&self) -> RaceNumber {
        self.race
    }

    pub fn entries(&self) -> &[RaceEntry] {
        &self.entries
    }

    pub fn suggestions(&self) -> &[NameSuggestion] {
        &self.suggestions
    }

    pub fn is_approved(&self, index: usize) -> bool {
        self.approved.get(index).copied().unwrap_or(false)
    }

    /// Team locked by history for an entry, if any.
    pub fn locked_team(&self, entry_index: usize) -> Option<&str> {
        self.locked.get(entry_index).and_then(|team| team.as_deref())
    }

    pub fn known_teams(&self) -> Vec<String> {
        self.history.known_teams()
    }

    pub fn approve(&mut self, index: usize) -> Result<()> {
        let slot = self
            .approved
            .get_mut(index)
            .ok_or(GcError::UnknownSuggestion { index })?;
        *slot = true;
        Ok(())
    }

    pub fn approve_all(&mut self) {
        self.approved.iter_mut().for_each(|slot| *slot = true);
    }

    /// Set the team of one entry. A blank team clears it.
    ///
    /// Fails with [`GcError::TeamLocked`] if the entry's team is fixed from an
    /// earlier race and `team` names a different one.
    pub fn set_team(&mut self, entry_index: usize, team: &str) -> Result<()> {
        let entry = self
            .entries
            .get_mut(entry_index)
            .ok_or(GcError::UnknownEntry { index: entry_index })?;
        if let Some(locked) = &self.locked[entry_index] {
            if normalize_team(locked) != normalize_team(team) {
                return Err(GcError::TeamLocked {
                    name: entry.name.clone(),
                    team: locked.clone(),
                });
            }
            return Ok(());
        }

        let team = team.trim();
        entry.team = (!team.is_empty()).then(|| team.to_string());
        Ok(())
    }

    /// Set the team of every entry whose normalized name matches `name`.
    /// Returns the number of entries updated.
    pub fn set_team_by_name(&mut self, name: &str, team: &str) -> Result<usize> {
        let wanted = normalize_name(name);
        let indices: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| normalize_name(&entry.name) == wanted)
            .map(|(idx, _)| idx)
            .collect();
        if indices.is_empty() {
            return Err(GcError::UnknownRider {
                name: name.to_string(),
            });
        }
        for idx in &indices {
            self.set_team(*idx, team)?;
        }
        Ok(indices.len())
    }

    /// Riders that still need a team. Always empty outside team-race series.
    pub fn missing_teams(&self) -> Vec<String> {
        if !self.team_race {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| entry.team_name().is_none())
            .map(|entry| entry.name.clone())
            .collect()
    }

    /// Apply approved renames and hand back the entries to save.
    ///
    /// A renamed rider picks up the locked team of the name they were merged
    /// into. Fails without saving anything if any team is still missing.
    pub fn commit(mut self) -> Result<CommittedRace> {
        let mut renamed = 0;
        for (suggestion, approved) in self.suggestions.iter().zip(&self.approved) {
            if !approved {
                continue;
            }
            if let Some(entry) = self.entries.get_mut(suggestion.entry_index) {
                debug!(
                    from = %entry.name,
                    to = %suggestion.suggested_name,
                    "applying approved rename"
                );
                entry.name = suggestion.suggested_name.clone();
                renamed += 1;
            }
        }
        self.fill_locked_teams();

        let missing = self.missing_teams();
        if !missing.is_empty() {
            return Err(GcError::IncompleteTeamAssignment { riders: missing });
        }

        info!(race = %self.race, entries = self.entries.len(), renamed, "race committed");
        Ok(CommittedRace {
            race: self.race,
            entries: self.entries,
            renamed,
        })
    }

    fn fill_locked_teams(&mut self) {
        if !self.team_race {
            return;
        }
        for (entry, locked) in self.entries.iter_mut().zip(self.locked.iter_mut()) {
            if let Some(team) = self.history.team_for(&entry.name, entry.category) {
                entry.team = Some(team.to_string());
                *locked = Some(team.to_string());
            }
        }
    }
}
