//! Command implementations for the series GC CLI

pub mod alias;
pub mod clear;
pub mod common;
pub mod config;
pub mod race;
pub mod standings;

#[cfg(test)]
mod tests;

use crate::{storage::SeriesStore, Result, DB_PATH_ENV_VAR};
use std::path::PathBuf;

/// Resolve the database path from `--db`, then the environment, then the
/// default data directory.
pub fn resolve_db_path(db: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = db {
        return Ok(path);
    }
    match std::env::var(DB_PATH_ENV_VAR) {
        Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(SeriesStore::database_path()?),
    }
}
