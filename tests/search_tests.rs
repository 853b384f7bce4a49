//! Search tests to verify the engine finds correct moves in various positions.

use std::sync::atomic::AtomicBool;
use std::time::Duration;

use magic_chess::board::{
    find_best_move, AttackTables, Color, Piece, Position, PositionBuilder, SearchConfig,
    SearchResult, SearchState, Square,
};
use magic_chess::{Evaluator, MaterialEvaluator};

fn sq(s: &str) -> Square {
    s.parse().expect("valid square")
}

fn search_with<E: Evaluator>(pos: &Position, evaluator: &E, depth: u32) -> SearchResult {
    let tables = AttackTables::shared().expect("attack tables");
    let mut state = SearchState::new(16);
    let stop = AtomicBool::new(false);
    find_best_move(pos, tables, evaluator, &mut state, &SearchConfig::depth(depth), &stop)
}

/// Test that the engine finds a simple mate in 1
#[test]
fn finds_mate_in_one_back_rank() {
    // White to move, Re8# is mate
    let pos = PositionBuilder::new()
        .piece(sq("g8"), Color::Black, Piece::King)
        .piece(sq("f7"), Color::Black, Piece::Pawn)
        .piece(sq("g7"), Color::Black, Piece::Pawn)
        .piece(sq("h7"), Color::Black, Piece::Pawn)
        .piece(sq("e1"), Color::White, Piece::Rook)
        .piece(sq("h1"), Color::White, Piece::King)
        .build()
        .expect("valid position");

    let result = search_with(&pos, &MaterialEvaluator, 4);
    let mv = result.best_move.expect("Should find a move");
    assert_eq!(mv.to_string(), "e1e8", "Should find Re8# (back rank mate)");
    assert!(result.is_mate());
}

/// Test that the engine captures free material
#[test]
fn captures_free_piece() {
    // White to move, undefended knight on c6
    let pos = PositionBuilder::new()
        .piece(sq("e8"), Color::Black, Piece::King)
        .piece(sq("c6"), Color::Black, Piece::Knight)
        .piece(sq("e1"), Color::White, Piece::King)
        .piece(sq("c1"), Color::White, Piece::Rook)
        .build()
        .expect("valid position");

    let result = search_with(&pos, &MaterialEvaluator, 4);
    assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("c1c6"));
}

/// Test that a promotion is found and preferred as a queen
#[test]
fn promotes_to_queen() {
    let pos = PositionBuilder::new()
        .piece(sq("a8"), Color::Black, Piece::King)
        .piece(sq("g7"), Color::White, Piece::Pawn)
        .piece(sq("c1"), Color::White, Piece::King)
        .build()
        .expect("valid position");

    let result = search_with(&pos, &MaterialEvaluator, 3);
    assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("g7g8q"));
}

/// A custom evaluator is consulted instead of material
#[test]
fn uses_supplied_evaluator() {
    // Rewards White for having the king on h1; the only way there is Kg1-h1
    let likes_h1 = |pos: &Position| {
        if pos.king_square(Color::White) == Some(sq("h1")) {
            1_000
        } else {
            0
        }
    };
    let pos = PositionBuilder::new()
        .piece(sq("a8"), Color::Black, Piece::King)
        .piece(sq("g1"), Color::White, Piece::King)
        .build()
        .expect("valid position");

    let result = search_with(&pos, &likes_h1, 1);
    assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("g1h1"));
}

/// Search under a short time budget still returns a legal move
#[test]
fn respects_time_budget() {
    let tables = AttackTables::shared().expect("attack tables");
    let pos = Position::startpos();
    let mut state = SearchState::new(16);
    let stop = AtomicBool::new(false);
    let config = SearchConfig::time(Duration::from_millis(100)).with_max_depth(64);

    let result = find_best_move(&pos, tables, &MaterialEvaluator, &mut state, &config, &stop);

    let mv = result.best_move.expect("a move");
    assert!(pos.is_legal_move(tables, mv));
    assert!(result.depth >= 1);
    assert!(result.elapsed < Duration::from_secs(2));
}
