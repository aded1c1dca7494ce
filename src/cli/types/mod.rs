//! Type-safe wrappers and enums for series result data.

pub mod category;
pub mod race;
pub mod team;
