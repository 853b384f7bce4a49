//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Node counts for move generation correctness
//! - `make_unmake.rs` - Apply/undo round trips and incremental hashing
//! - `attack_tables.rs` - Magic lookups against ray casting
//! - `rules.rs` - Check, mate, stalemate and castling legality
//! - `search.rs` - Best-move search behavior
//! - `search_tables.rs` - Killer, history and repetition tables
//! - `proptest.rs` - Property-based tests

mod rules;
mod search_tables;

use crate::board::{AttackTables, CastleSide, Color, Piece, Position, PositionBuilder, Square};

pub(super) fn tables() -> &'static AttackTables {
    AttackTables::shared().expect("attack tables build")
}

pub(super) fn sq(s: &str) -> Square {
    s.parse().expect("valid square")
}

/// Build a position from the first four fields of a FEN record.
pub(super) fn position(fen: &str) -> Position {
    let mut fields = fen.split_whitespace();
    let placement = fields.next().expect("placement field");
    let mut builder = PositionBuilder::new();

    for (row, rank_text) in placement.split('/').enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;
        for c in rank_text.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
                continue;
            }
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let piece = Piece::from_char(c).expect("piece letter");
            let square = Square::from_coords(rank, file).expect("square on board");
            builder = builder.piece(square, color, piece);
            file += 1;
        }
    }

    builder = match fields.next() {
        Some("b") => builder.side_to_move(Color::Black),
        _ => builder.side_to_move(Color::White),
    };

    for c in fields.next().unwrap_or("-").chars() {
        builder = match c {
            'K' => builder.castle(Color::White, CastleSide::King),
            'Q' => builder.castle(Color::White, CastleSide::Queen),
            'k' => builder.castle(Color::Black, CastleSide::King),
            'q' => builder.castle(Color::Black, CastleSide::Queen),
            _ => builder,
        };
    }

    if let Some(ep) = fields.next().filter(|f| *f != "-") {
        builder = builder.en_passant(sq(ep));
    }

    builder.build().expect("valid test position")
}
