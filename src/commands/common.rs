//! Shared setup for command handlers.

use crate::{
    config::SeriesConfig,
    error::GcError,
    names::apply_aliases,
    results::Race,
    storage::SeriesStore,
    Result,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::resolve_db_path;

/// Resources needed by most commands
pub struct CommandContext {
    pub store: SeriesStore,
}

impl CommandContext {
    /// Open the series database at the resolved path
    pub fn open(db: Option<PathBuf>) -> Result<Self> {
        let path = resolve_db_path(db)?;
        debug!(path = %path.display(), "opening series database");
        let store = SeriesStore::open(&path)?;
        Ok(Self { store })
    }

    pub fn from_store(store: SeriesStore) -> Self {
        Self { store }
    }

    /// The stored configuration, failing if none has been saved
    pub fn require_config(&self) -> Result<SeriesConfig> {
        self.store
            .load_series_config()?
            .ok_or(GcError::NoSeriesConfigured)
    }

    /// Every stored race with rider aliases applied
    pub fn load_races(&self) -> Result<Vec<Option<Race>>> {
        let mut races = self.store.load_all_races()?;
        let aliases = self.store.load_rider_aliases()?;
        let renamed = apply_aliases(&mut races, &aliases);
        if renamed > 0 {
            info!(renamed, "applied rider aliases");
        }
        Ok(races)
    }
}

/// Read pasted results from a file, or from stdin when the path is `-`
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(std::fs::read_to_string(path)?)
}
