//! Standard competition ranking ("1224") shared by race results and GC tables.

#[cfg(test)]
mod tests;

/// Two times within this many seconds are a tie.
pub const TIME_TIE_TOLERANCE: f64 = 0.01;

pub fn times_tie(a: f64, b: f64) -> bool {
    (a - b).abs() < TIME_TIE_TOLERANCE
}

/// Assign 1-based positions to an already-sorted slice.
///
/// An item that ties with the item immediately before it shares that item's
/// position; otherwise its position is its 1-based index. Ties are only
/// checked against the direct predecessor, so a chain of near-equal times
/// keeps the first position of the chain.
pub fn competition_ranks<T, F>(sorted: &[T], ties: F) -> Vec<u32>
where
    F: Fn(&T, &T) -> bool,
{
    let mut ranks = Vec::with_capacity(sorted.len());
    let mut current = 1;
    for (idx, item) in sorted.iter().enumerate() {
        if idx == 0 || !ties(&sorted[idx - 1], item) {
            current = idx as u32 + 1;
        }
        ranks.push(current);
    }
    ranks
}
