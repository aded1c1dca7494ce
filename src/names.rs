//! Rider and team name canonicalization, fuzzy similarity and alias lookup.

use crate::results::Race;
use std::collections::BTreeMap;


/// Normalized alias -> canonical display name.
pub type AliasMap = BTreeMap<String, String>;

/// Identity key for a rider name.
///
/// Lowercases, drops `[tags]`, `(annotations)` and digit runs of four or more,
/// keeps only ASCII letters and whitespace, and collapses whitespace.
///
/// ```rust
/// use zwift_gc::names::normalize_name;
///
/// assert_eq!(normalize_name("  John SMITH [ZWB] (aged 14) 3935"), "john smith");
/// ```
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = static_regex!(r"\s*\[.*?\]").replace_all(lowered.trim(), "");
    let stripped = static_regex!(r"\s*\(.*?\)").replace_all(&stripped, "");
    let stripped = static_regex!(r"\d{4,}").replace_all(&stripped, "");
    let stripped = static_regex!(r"[^a-z\s]").replace_all(&stripped, "");
    collapse_whitespace(&stripped)
}

/// Identity key for a team name. Blank input gives an empty key, which
/// never forms a team.
pub fn normalize_team(team: &str) -> String {
    let lowered = team.to_lowercase();
    let collapsed = static_regex!(r"\s{2,}").replace_all(lowered.trim(), " ");
    static_regex!(r"[^a-z0-9\s]")
        .replace_all(&collapsed, "")
        .trim()
        .to_string()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Classic Levenshtein distance over chars (insert, delete, substitute all cost 1).
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Similarity in `[0, 1]`: `1 - distance / longer length`, exactly 1.0 for
/// identical strings (including two empty strings).
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let longest = a.chars().count().max(b.chars().count());
    1.0 - edit_distance(a, b) as f64 / longest as f64
}

/// Canonical name for `name` if an alias is stored for it.
pub fn resolve_alias<'a>(name: &'a str, aliases: &'a AliasMap) -> &'a str {
    aliases
        .get(&normalize_name(name))
        .map(String::as_str)
        .unwrap_or(name)
}

/// Rewrite entry names that have a stored alias. Returns the number of entries renamed.
pub fn apply_aliases(races: &mut [Option<Race>], aliases: &AliasMap) -> usize {
    if aliases.is_empty() {
        return 0;
    }
    let mut renamed = 0;
    for entry in races.iter_mut().flatten().flatten() {
        let canonical = resolve_alias(&entry.name, aliases);
        if canonical != entry.name {
            entry.name = canonical.to_string();
            renamed += 1;
        }
    }
    renamed
}
