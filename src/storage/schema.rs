//! Database schema and connection management

use crate::error::GcError;
use anyhow::Result;
use dirs::data_dir;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Connection to the series database
pub struct SeriesStore {
    pub(crate) conn: Connection,
}

impl SeriesStore {
    /// Open the database at the default location, creating it if needed
    pub fn new() -> Result<Self> {
        Self::open(&Self::database_path()?)
    }

    /// Open (or create) the database at `path` and ensure tables exist
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Throwaway in-memory database
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Default database file under the user data directory
    pub fn database_path() -> Result<PathBuf> {
        let data_dir = data_dir().ok_or_else(|| GcError::Storage {
            message: "Could not determine data directory".to_string(),
        })?;
        Ok(data_dir.join("zwift-gc").join("series.db"))
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        // Single-row table; id is always 1
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS series_config (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                config_json TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS race_results (
                race_number INTEGER PRIMARY KEY,
                entries_json TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS rider_aliases (
                alias TEXT PRIMARY KEY,
                canonical TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }
}
