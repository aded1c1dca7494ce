//! Error types for the series GC calculator

use thiserror::Error;


pub type Result<T> = std::result::Result<T, GcError>;

#[derive(Error, Debug)]
pub enum GcError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("No riders could be parsed from the pasted results")]
    ParseEmpty,

    #[error("Invalid series configuration: {message}")]
    InvalidConfig { message: String },

    #[error("No series configured yet")]
    NoSeriesConfigured,

    #[error("Race {race} is outside the series (1-{num_races})")]
    InvalidRaceNumber { race: u32, num_races: u32 },

    #[error("Invalid category: {category}")]
    InvalidCategory { category: String },

    #[error("Team missing for {} rider(s): {}", riders.len(), riders.join(", "))]
    IncompleteTeamAssignment { riders: Vec<String> },

    #[error("Team for {name} is fixed to {team} from an earlier race")]
    TeamLocked { name: String, team: String },

    #[error("No name suggestion at index {index}")]
    UnknownSuggestion { index: usize },

    #[error("No parsed entry at index {index}")]
    UnknownEntry { index: usize },

    #[error("No parsed entry for rider {name:?}")]
    UnknownRider { name: String },

    #[error("Invalid team assignment {input:?}, expected \"Rider Name=Team\"")]
    InvalidTeamAssignment { input: String },
}

impl GcError {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        GcError::InvalidConfig {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for GcError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<GcError>() {
            Ok(inner) => inner,
            Err(err) => GcError::Storage {
                message: err.to_string(),
            },
        }
    }
}
