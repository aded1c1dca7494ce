//! Rider categories (skill/age divisions).

use crate::error::GcError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Race category, a single letter `A` through `G`.
///
/// Riders are ranked separately per category, both within a race and in the
/// general classification.
///
/// # Examples
///
/// ```rust
/// use zwift_gc::Category;
///
/// let cat: Category = "b".parse().unwrap();
/// assert_eq!(cat, Category::B);
/// assert_eq!(cat.to_string(), "B");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::A,
        Category::B,
        Category::C,
        Category::D,
        Category::E,
        Category::F,
        Category::G,
    ];

    /// Map an uppercase letter to its category. Lowercase letters are not categories.
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'A' => Some(Category::A),
            'B' => Some(Category::B),
            'C' => Some(Category::C),
            'D' => Some(Category::D),
            'E' => Some(Category::E),
            'F' => Some(Category::F),
            'G' => Some(Category::G),
            _ => None,
        }
    }

    /// Recognize a result-sheet header line: exactly one uppercase letter A-G.
    pub fn from_header(line: &str) -> Option<Self> {
        let mut chars = line.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_letter(c),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Category::A => 'A',
            Category::B => 'B',
            Category::C => 'C',
            Category::D => 'D',
            Category::E => 'E',
            Category::F => 'F',
            Category::G => 'G',
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Category {
    type Err = GcError;

    /// Case-insensitive, for command-line use.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::from_header(&upper).ok_or_else(|| GcError::InvalidCategory {
            category: s.to_string(),
        })
    }
}
