//! Parser for pasted race result sheets.
//!
//! # Input format
//!
//! The sheet is read line by line (trimmed, blank lines dropped):
//!
//! ```text
//! A                  <- category header, a single letter A-G
//! 1. John Smith      <- rider name line (within 3 lines above the time)
//! 12:34              <- time line "MM:SS", optionally "MM:SS +GAP"
//! 310w               <- three power/metadata lines, always present
//! 4.2w/kg
//! 92rpm
//! ```
//!
//! The name is the nearest line above the time that looks like a name,
//! starting with the line directly above (not two lines up).
//!
//! Every accepted rider block is assumed to be followed by exactly
//! [`METADATA_LINES_PER_RIDER`] lines, which are skipped without inspection.
//! Anything that does not fit is skipped; a bad block never fails the paste.

use crate::cli::types::category::Category;
use crate::results::RaceEntry;
use crate::ranking::{competition_ranks, times_tie};
use std::collections::BTreeMap;
use tracing::{debug, info};


/// Lines following each time line that carry power data.
pub const METADATA_LINES_PER_RIDER: usize = 3;

/// How far above a time line the parser looks for the rider name.
const NAME_LOOKBACK: usize = 3;

/// A rider block as read from the sheet, before ranking.
#[derive(Debug, Clone, PartialEq)]
struct RawEntry {
    category: Category,
    name: String,
    time: String,
    gap: String,
}

/// Parse a pasted result sheet into entries ordered by category, then position.
///
/// Returns an empty vector when nothing recognizable is found; callers treat
/// that as "no data" rather than a failure.
///
/// ```rust
/// use zwift_gc::parse::parse_results;
///
/// let entries = parse_results("A\nJohn Smith\n12:34\n100W\n200W\n50rpm");
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].name, "John Smith");
/// assert_eq!(entries[0].position, 1);
/// ```
pub fn parse_results(text: &str) -> Vec<RaceEntry> {
    let normalized = text.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let raw = scan_lines(&lines);
    let entries = rank_entries(raw);
    info!(riders = entries.len(), "parsed result sheet");
    entries
}

fn scan_lines(lines: &[&str]) -> Vec<RawEntry> {
    let mut raw = Vec::new();
    let mut current: Option<Category> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(category) = Category::from_header(line) {
            current = Some(category);
            i += 1;
            continue;
        }

        let Some(category) = current else {
            i += 1;
            continue;
        };

        if line.contains(':') {
            if let Some(entry) = read_rider_block(lines, i, category) {
                raw.push(entry);
                i += 1 + METADATA_LINES_PER_RIDER;
                continue;
            }
        }

        i += 1;
    }

    raw
}

/// Build an entry from the time line at `idx`, or `None` if the block is unusable.
fn read_rider_block(lines: &[&str], idx: usize, category: Category) -> Option<RawEntry> {
    let candidate = find_name_line(lines, idx)?;
    let name = clean_name(candidate);
    if name.chars().count() < 4 || !has_letter_pair(&name) {
        debug!(line = idx, candidate, "skipping time line without a usable name");
        return None;
    }

    let (time, gap) = split_time_line(lines[idx]);
    if !static_regex!(r"^\d{2}:\d{2}$").is_match(&time) {
        debug!(line = idx, time = %time, "skipping malformed time");
        return None;
    }

    Some(RawEntry {
        category,
        name,
        time,
        gap,
    })
}

/// The nearest of the three lines above `idx` that looks like a name,
/// falling back to the line directly above.
fn find_name_line<'a>(lines: &[&'a str], idx: usize) -> Option<&'a str> {
    let above = idx.checked_sub(1)?;
    (1..=NAME_LOOKBACK)
        .filter_map(|back| idx.checked_sub(back))
        .map(|i| lines[i])
        .find(|line| looks_like_name(line))
        .or(Some(lines[above]))
}

fn looks_like_name(line: &str) -> bool {
    line.chars().count() >= 8
        && !line.starts_with(|c: char| c.is_ascii_digit())
        && has_letter_pair(line)
}

fn has_letter_pair(s: &str) -> bool {
    static_regex!(r"[a-zA-Z]{2,}").is_match(s)
}

/// Strip rank prefixes, trailing rider ids, trailing annotations and team tags.
fn clean_name(line: &str) -> String {
    let name = static_regex!(r"^\d+\.?\s*").replace(line, "");
    let name = static_regex!(r"\d{4,}$").replace(&name, "");
    let name = static_regex!(r"\s*\(.*?\)$").replace(&name, "");
    let name = static_regex!(r"\s*\[.*?\]").replace_all(&name, "");
    let name = static_regex!(r"\s{2,}").replace_all(&name, " ");
    name.trim().to_string()
}

/// Split `"12:34 +0:05"` into `("12:34", "+0:05")`.
fn split_time_line(line: &str) -> (String, String) {
    let mut parts = line.split('+');
    let time = parts.next().unwrap_or_default().trim().to_string();
    let gap = parts
        .next()
        .map(|gap| format!("+{}", gap.trim()))
        .unwrap_or_default();
    (time, gap)
}

/// Seconds in an `MM:SS` string; unparseable parts count as zero.
pub fn clock_seconds(clock: &str) -> f64 {
    let mut parts = clock.split(':');
    let minutes = parts
        .next()
        .and_then(|m| m.trim().parse::<f64>().ok())
        .unwrap_or(0.0);
    let seconds = parts
        .next()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(0.0);
    minutes * 60.0 + seconds
}

/// Seconds in a gap such as `+1:05`, `+7` or `+7.5s`; empty or garbage is zero.
pub fn gap_seconds(gap: &str) -> f64 {
    let g = gap.replace(['+', 's'], "");
    let g = g.trim();
    if g.is_empty() {
        return 0.0;
    }
    if g.contains(':') {
        clock_seconds(g)
    } else {
        g.parse::<f64>().unwrap_or(0.0)
    }
}

/// Built-in points ladder used for previews: 50/45/40 for the podium,
/// `41 - position` through 10th, `21 - position` through 20th, then 1.
pub fn default_points(position: u32) -> i32 {
    let position = position as i32;
    match position {
        1 => 50,
        2 => 45,
        3 => 40,
        4..=10 => 41 - position,
        11..=20 => 21 - position,
        _ => 1,
    }
}

fn rank_entries(raw: Vec<RawEntry>) -> Vec<RaceEntry> {
    let mut by_category: BTreeMap<Category, Vec<(RawEntry, f64)>> = BTreeMap::new();
    for entry in raw {
        let total = clock_seconds(&entry.time) + gap_seconds(&entry.gap);
        by_category
            .entry(entry.category)
            .or_default()
            .push((entry, total));
    }

    let mut results = Vec::new();
    for (_, mut group) in by_category {
        group.sort_by(|a, b| a.1.total_cmp(&b.1));
        let positions = competition_ranks(&group, |prev, curr| times_tie(prev.1, curr.1));

        for ((entry, total_seconds), position) in group.into_iter().zip(positions) {
            results.push(RaceEntry {
                category: entry.category,
                name: entry.name,
                time: entry.time,
                gap: entry.gap,
                total_seconds,
                position,
                points: default_points(position),
                team: None,
            });
        }
    }
    results
}
