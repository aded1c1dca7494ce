//! Unit tests for competition ranking

use super::*;

#[test]
fn test_distinct_values_rank_by_index() {
    let values = [10, 20, 30];
    assert_eq!(competition_ranks(&values, |a, b| a == b), vec![1, 2, 3]);
}

#[test]
fn test_ties_share_position_and_skip_next() {
    let values = [50, 50, 40, 40, 40, 10];
    assert_eq!(
        competition_ranks(&values, |a, b| a == b),
        vec![1, 1, 3, 3, 3, 6]
    );
}

#[test]
fn test_time_tolerance() {
    let times = [600.0, 600.005, 601.0];
    assert_eq!(
        competition_ranks(&times, |a, b| times_tie(*a, *b)),
        vec![1, 1, 3]
    );
    assert!(!times_tie(600.0, 600.01));
}

#[test]
fn test_tie_chain_compares_with_predecessor_only() {
    let times = [100.0, 100.008, 100.016];
    assert_eq!(
        competition_ranks(&times, |a, b| times_tie(*a, *b)),
        vec![1, 1, 1]
    );
}

#[test]
fn test_empty_input() {
    let values: [u32; 0] = [];
    assert!(competition_ranks(&values, |a, b| a == b).is_empty());
}
