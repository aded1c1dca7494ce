use crate::cli::types::category::Category;
use crate::config::{PointsSystem, SeriesConfig};
use crate::results::RaceEntry;
use std::collections::BTreeMap;


/// Base points for a finishing position under a points system.
/// `field_size` is the number of finishers in the rider's category.
pub fn base_points(system: &PointsSystem, position: u32, field_size: usize) -> i32 {
    let position = i64::from(position);
    let points = match system {
        PointsSystem::Fixed100 => (101 - position).max(0),
        PointsSystem::RaceSize => (field_size as i64 - position + 1).max(0),
        PointsSystem::Custom(table) => position
            .checked_sub(1)
            .and_then(|idx| usize::try_from(idx).ok())
            .and_then(|idx| table.get(idx))
            .map(|p| i64::from(*p))
            .unwrap_or(0),
    };
    points as i32
}

/// Podium bonus for positions 1-3, zero otherwise or when bonuses are off.
pub fn podium_bonus(bonus: Option<&[i32; 3]>, position: u32) -> i32 {
    match (bonus, position) {
        (Some(table), 1..=3) => table[position as usize - 1],
        _ => 0,
    }
}

/// Authoritative points for one result: base scheme plus podium bonus.
pub fn race_points(config: &SeriesConfig, position: u32, field_size: usize) -> i32 {
    base_points(&config.points_system, position, field_size)
        .saturating_add(podium_bonus(config.bonus_points.as_ref(), position))
}

/// Finishers per category in one race.
pub fn category_sizes(entries: &[RaceEntry]) -> BTreeMap<Category, usize> {
    let mut sizes = BTreeMap::new();
    for entry in entries {
        *sizes.entry(entry.category).or_insert(0) += 1;
    }
    sizes
}

/// Points for every entry of one race, index-aligned with `entries`.
pub fn score_race(config: &SeriesConfig, entries: &[RaceEntry]) -> Vec<i32> {
    let sizes = category_sizes(entries);
    entries
        .iter()
        .map(|entry| {
            let field_size = sizes.get(&entry.category).copied().unwrap_or(1);
            race_points(config, entry.position, field_size)
        })
        .collect()
}
