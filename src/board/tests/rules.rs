//! Check, mate, stalemate and castling legality.

use super::{position, sq, tables};
use crate::board::{CastleSide, Color, Move, Piece, Position};

#[test]
fn test_back_rank_mate_is_checkmate() {
    let tables = tables();
    let pos = position("R5k1/5ppp/8/8/8/8/8/6K1 b - -");
    assert!(pos.is_in_check(tables, Color::Black));
    assert!(pos.is_checkmate(tables));
    assert!(!pos.is_stalemate(tables));
    assert!(pos.generate_moves(tables).is_empty());
}

#[test]
fn test_stalemate() {
    let tables = tables();
    let pos = position("7k/5Q2/6K1/8/8/8/8/8 b - -");
    assert!(!pos.is_in_check(tables, Color::Black));
    assert!(pos.is_stalemate(tables));
    assert!(!pos.is_checkmate(tables));
}

#[test]
fn test_cannot_castle_through_attacked_square() {
    let tables = tables();
    let pos = position("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq -");
    assert!(!pos.can_castle(tables, Color::White, CastleSide::King));
    assert!(pos.can_castle(tables, Color::White, CastleSide::Queen));
    assert!(pos.generate_moves(tables).iter().all(|m| m.to_string() != "e1g1"));
}

#[test]
fn test_cannot_castle_out_of_check_or_through_pieces() {
    let tables = tables();
    let checked = position("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq -");
    assert!(!checked.can_castle(tables, Color::White, CastleSide::King));
    assert!(!checked.can_castle(tables, Color::White, CastleSide::Queen));

    let start = Position::startpos();
    assert!(!start.can_castle(tables, Color::White, CastleSide::King));
    assert!(!start.can_castle(tables, Color::Black, CastleSide::Queen));
}

#[test]
fn test_queenside_castle_allows_attacked_b_file() {
    let tables = tables();
    // b1 is attacked, but the king never crosses it
    let pos = position("1r2k3/8/8/8/8/8/8/R3K3 w Q -");
    assert!(pos.can_castle(tables, Color::White, CastleSide::Queen));
}

#[test]
fn test_pinned_piece_has_no_moves() {
    let tables = tables();
    let pos = position("4k3/4r3/8/8/8/8/4B3/4K3 w - -");
    let moves = pos.generate_moves(tables);
    assert!(moves.iter().all(|m| m.piece() != Piece::Bishop));
    let pinned = Move::new(sq("e2"), sq("d3"), Piece::Bishop, Color::White);
    assert!(!pos.is_legal_move(tables, pinned));
    let king_step = Move::new(sq("e1"), sq("d1"), Piece::King, Color::White);
    assert!(pos.is_legal_move(tables, king_step));
}

#[test]
fn test_square_attacks_and_checks() {
    let tables = tables();
    let pos = Position::startpos();
    assert!(pos.is_square_attacked(tables, sq("f3"), Color::White));
    assert!(!pos.is_square_attacked(tables, sq("e4"), Color::White));
    assert!(pos.is_square_attacked(tables, sq("f6"), Color::Black));

    let pos = position("6k1/5ppp/8/8/8/8/8/R5K1 w - -");
    let mate = pos
        .generate_moves(tables)
        .iter()
        .copied()
        .find(|m| m.to_string() == "a1a8")
        .expect("legal");
    assert!(pos.gives_check(tables, mate));
    assert!(pos.applied(mate).is_checkmate(tables));
}

#[test]
fn test_captures_are_generated_first() {
    let tables = tables();
    let pos = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    let moves = pos.generate_moves(tables);
    let first_quiet = moves
        .iter()
        .position(|m| !m.is_capture())
        .expect("quiet moves exist");
    assert!(first_quiet > 0);
    assert!(moves.as_slice()[first_quiet..].iter().all(|m| !m.is_capture()));
}

#[test]
fn test_capture_generation_is_subset_of_legal_moves() {
    let tables = tables();
    let pos = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    let all = pos.generate_moves(tables);
    let captures = pos.generate_captures(tables);
    assert_eq!(captures.len(), all.iter().filter(|m| m.is_capture()).count());
    assert!(captures.iter().all(|m| all.contains(*m)));
}

#[test]
fn test_en_passant_only_into_target() {
    let tables = tables();
    let pos = position("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6");
    let ep_moves: Vec<_> = pos
        .generate_moves(tables)
        .iter()
        .filter(|m| m.is_en_passant())
        .map(|m| m.to_string())
        .collect();
    assert_eq!(ep_moves, vec!["e5f6".to_string()]);
}
