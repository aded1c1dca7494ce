//! Race numbering within a series.

use crate::error::{GcError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest number of races a series may hold.
pub const MAX_RACES: u32 = 20;

/// Type-safe wrapper for 1-based race numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RaceNumber(pub u32);

impl RaceNumber {
    pub fn new(race: u32) -> Self {
        Self(race)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Zero-based slot in a race sequence.
    pub fn index(&self) -> usize {
        self.0.saturating_sub(1) as usize
    }

    /// Race number for a zero-based slot.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// Check that this race belongs to a series of `num_races` races.
    pub fn check_within(&self, num_races: u32) -> Result<()> {
        if self.0 == 0 || self.0 > num_races {
            return Err(GcError::InvalidRaceNumber {
                race: self.0,
                num_races,
            });
        }
        Ok(())
    }
}

impl Default for RaceNumber {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for RaceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RaceNumber {
    type Err = GcError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}
