//! Tests for search tables: killer moves, history and repetition counts.

use super::sq;
use crate::board::{Color, HistoryTable, KillerTable, Move, Piece, RepetitionTable, SearchState};
use crate::tt::BoundType;

fn quiet(from: &str, to: &str) -> Move {
    Move::new(sq(from), sq(to), Piece::Knight, Color::White)
}

// ============================================================================
// Killer Move Tests
// ============================================================================

#[test]
fn test_killer_empty_initially() {
    let table = KillerTable::new();
    for ply in 0..10 {
        assert_eq!(table.primary(ply), None);
        assert_eq!(table.secondary(ply), None);
    }
}

#[test]
fn test_killer_update_shifts_to_secondary() {
    let mut table = KillerTable::new();
    let mv1 = quiet("g1", "f3");
    let mv2 = quiet("b1", "c3");

    table.update(0, mv1);
    assert_eq!(table.primary(0), Some(mv1));
    table.update(0, mv2);

    assert_eq!(table.primary(0), Some(mv2));
    assert_eq!(table.secondary(0), Some(mv1));
    assert_eq!(table.slot_of(0, mv1), Some(1));
    assert_eq!(table.slot_of(1, mv1), None);
}

#[test]
fn test_killer_same_move_no_duplicate() {
    let mut table = KillerTable::new();
    let mv = quiet("g1", "f3");

    table.update(0, mv);
    table.update(0, mv);

    assert_eq!(table.primary(0), Some(mv));
    assert_eq!(table.secondary(0), None);
}

#[test]
fn test_killer_matches_across_context_bits() {
    let mut table = KillerTable::new();
    let mv = quiet("g1", "f3");
    table.update(3, mv);
    let same_action = mv.with_context(0b0001, Some(sq("e6")));
    assert_eq!(table.slot_of(3, same_action), Some(0));
}

#[test]
fn test_killer_ignores_out_of_range_ply() {
    let mut table = KillerTable::new();
    table.update(10_000, quiet("g1", "f3"));
    assert_eq!(table.primary(10_000), None);
}

// ============================================================================
// History Tests
// ============================================================================

#[test]
fn test_history_rewards_depth_squared() {
    let mut table = HistoryTable::new();
    let mv = quiet("g1", "f3");
    table.update(mv, 3);
    table.update(mv, 2);
    assert_eq!(table.score(mv), 13);
    assert_eq!(table.score(quiet("b1", "c3")), 0);

    table.clear();
    assert_eq!(table.score(mv), 0);
}

// ============================================================================
// Repetition and State Tests
// ============================================================================

#[test]
fn test_repetition_counts() {
    let mut table = RepetitionTable::new();
    assert_eq!(table.count(42), 0);
    table.record(42);
    table.record(42);
    table.record(7);
    assert_eq!(table.count(42), 2);
    assert_eq!(table.count(7), 1);
    table.clear();
    assert_eq!(table.count(42), 0);
}

#[test]
fn test_new_search_keeps_tt_and_repetitions() {
    let mut state = SearchState::new(1);
    let mv = quiet("g1", "f3");
    state.killers.update(0, mv);
    state.history.update(mv, 4);
    state.tt.store(99, 5, 12, BoundType::Exact, Some(mv));
    state.record_position(99);

    state.new_search();

    assert_eq!(state.killers.primary(0), None);
    assert_eq!(state.history.score(mv), 0);
    assert_eq!(state.tt.probe(99).and_then(|e| e.best_move()), Some(mv));
    assert_eq!(state.repetitions.count(99), 1);

    state.clear();
    assert!(state.tt.probe(99).is_none());
    assert_eq!(state.repetitions.count(99), 0);
}
