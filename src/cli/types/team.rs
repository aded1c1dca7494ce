//! `Rider Name=Team` assignments supplied on the command line.

use crate::error::{GcError, Result};
use std::str::FromStr;

/// Team for one rider, written as `Rider Name=Team`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamAssignment {
    pub rider: String,
    pub team: String,
}

impl FromStr for TeamAssignment {
    type Err = GcError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || GcError::InvalidTeamAssignment {
            input: s.to_string(),
        };
        let (rider, team) = s.split_once('=').ok_or_else(invalid)?;
        let (rider, team) = (rider.trim(), team.trim());
        if rider.is_empty() || team.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            rider: rider.to_string(),
            team: team.to_string(),
        })
    }
}
