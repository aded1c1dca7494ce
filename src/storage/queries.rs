//! Load and save operations
//!
//! Stored state that cannot be decoded is logged and treated as absent, so a
//! damaged row never blocks the rest of the series.

use super::schema::SeriesStore;
use crate::cli::types::race::{RaceNumber, MAX_RACES};
use crate::config::SeriesConfig;
use crate::error::GcError;
use crate::names::{normalize_name, AliasMap};
use crate::results::{Race, RaceEntry};
use anyhow::Result;
use rusqlite::{params, OptionalExtension};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

impl SeriesStore {
    /// Stored configuration, or `None` if absent, undecodable or invalid
    pub fn load_series_config(&self) -> Result<Option<SeriesConfig>> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT config_json FROM series_config WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let Some(json) = json else {
            return Ok(None);
        };
        let config = match serde_json::from_str::<SeriesConfig>(&json) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "stored series config is malformed, ignoring it");
                return Ok(None);
            }
        };
        if let Err(e) = config.validate() {
            warn!(error = %e, "stored series config is invalid, ignoring it");
            return Ok(None);
        }
        Ok(Some(config))
    }

    /// Validate and store the configuration, replacing any existing one
    pub fn save_series_config(&mut self, config: &SeriesConfig) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string(config)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO series_config (id, config_json) VALUES (1, ?)",
            params![json],
        )?;
        Ok(())
    }

    /// Every stored race, index `i` holding race `i + 1`.
    ///
    /// The sequence runs up to the highest stored race number; missing and
    /// undecodable races are `None`.
    pub fn load_all_races(&self) -> Result<Vec<Option<Race>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT race_number, entries_json FROM race_results ORDER BY race_number")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut races: Vec<Option<Race>> = Vec::new();
        for (race_number, json) in rows {
            if race_number == 0 || race_number > MAX_RACES {
                warn!(race = race_number, "ignoring stored race with invalid number");
                continue;
            }
            let race = RaceNumber::new(race_number);
            let entries = match serde_json::from_str::<Vec<RaceEntry>>(&json) {
                Ok(entries) => Some(entries),
                Err(e) => {
                    warn!(race = %race, error = %e, "stored race is malformed, treating as not entered");
                    None
                }
            };
            if races.len() <= race.index() {
                races.resize(race.index() + 1, None);
            }
            races[race.index()] = entries;
        }
        debug!(slots = races.len(), "loaded races");
        Ok(races)
    }

    /// Store the entries of one race, replacing any earlier save of it
    pub fn save_race_results(&mut self, race: RaceNumber, entries: &[RaceEntry]) -> Result<()> {
        race.check_within(MAX_RACES)?;
        let json = serde_json::to_string(entries)?;
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        self.conn.execute(
            "INSERT OR REPLACE INTO race_results (race_number, entries_json, updated_at)
             VALUES (?, ?, ?)",
            params![race.as_u32(), json, now],
        )?;
        Ok(())
    }

    pub fn load_rider_aliases(&self) -> Result<AliasMap> {
        let mut stmt = self
            .conn
            .prepare("SELECT alias, canonical FROM rider_aliases")?;
        let aliases = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<rusqlite::Result<AliasMap>>()?;
        Ok(aliases)
    }

    /// Map `alias` (stored by its normalized form) to `canonical`
    pub fn save_rider_alias(&mut self, alias: &str, canonical: &str) -> Result<()> {
        let key = normalize_name(alias);
        let canonical = canonical.trim();
        if key.is_empty() || canonical.is_empty() {
            return Err(GcError::invalid_config("alias and canonical name must not be empty").into());
        }
        self.conn.execute(
            "INSERT OR REPLACE INTO rider_aliases (alias, canonical) VALUES (?, ?)",
            params![key, canonical],
        )?;
        Ok(())
    }

    /// Delete the configuration, every race and every alias
    pub fn clear_all(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM series_config", [])?;
        tx.execute("DELETE FROM race_results", [])?;
        tx.execute("DELETE FROM rider_aliases", [])?;
        tx.commit()?;
        Ok(())
    }
}
