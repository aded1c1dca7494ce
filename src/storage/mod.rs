//! Storage layer for series data
//!
//! A thin SQLite store holding the series configuration, one JSON blob of
//! entries per race, and rider aliases:
//! - `schema`: Database connection and schema management
//! - `queries`: Load and save operations

pub mod queries;
pub mod schema;


pub use schema::SeriesStore;
