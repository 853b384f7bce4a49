//! Fluent builder for constructing chess positions.
//!
//! Allows creating positions piece by piece; `build` validates the result.
//!
//! # Example
//! ```
//! use magic_chess::board::{Color, Piece, PositionBuilder, Square};
//!
//! let position = PositionBuilder::new()
//!     .piece(Square::E1, Color::White, Piece::King)
//!     .piece(Square::E8, Color::Black, Piece::King)
//!     .piece("a2".parse().unwrap(), Color::White, Piece::Pawn)
//!     .side_to_move(Color::White)
//!     .build()
//!     .unwrap();
//! assert_eq!(position.side_to_move(), Color::White);
//! ```

use super::attack_tables::AttackTables;
use super::error::PositionError;
use super::state::Position;
use super::types::{CastleSide, CastlingRights, Color, Piece, Square};

/// A fluent builder for constructing `Position` values.
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    pieces: Vec<(Square, Color, Piece)>,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    /// Create a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        PositionBuilder {
            pieces: Vec::new(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
        }
    }

    /// Create a builder starting from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let start = Position::startpos();
        let pieces = Square::all()
            .filter_map(|sq| start.piece_at(sq).map(|(color, piece)| (sq, color, piece)))
            .collect();
        PositionBuilder {
            pieces,
            side_to_move: Color::White,
            castling_rights: CastlingRights::all(),
            en_passant_target: None,
        }
    }

    /// Place a piece. Placing two pieces on one square is reported by `build`.
    #[must_use]
    pub fn piece(mut self, square: Square, color: Color, piece: Piece) -> Self {
        self.pieces.push((square, color, piece));
        self
    }

    /// Remove whatever was placed on a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|(sq, _, _)| *sq != square);
        self
    }

    /// Set the side to move.
    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Set castling rights from a `CastlingRights` value.
    #[must_use]
    pub const fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    /// Enable one castling right.
    #[must_use]
    pub fn castle(mut self, color: Color, side: CastleSide) -> Self {
        self.castling_rights.set(color, side);
        self
    }

    /// Disable all castling rights.
    #[must_use]
    pub const fn no_castling_rights(mut self) -> Self {
        self.castling_rights = CastlingRights::none();
        self
    }

    /// Set the en passant target square.
    #[must_use]
    pub const fn en_passant(mut self, target: Square) -> Self {
        self.en_passant_target = Some(target);
        self
    }

    /// Build and validate the position.
    pub fn build(self) -> Result<Position, PositionError> {
        let mut position = Position::empty();

        for &(square, color, piece) in &self.pieces {
            if position.occupied().contains(square) {
                return Err(PositionError::SquareOccupied { square });
            }
            if piece == Piece::Pawn && (square.rank() == 0 || square.rank() == 7) {
                return Err(PositionError::PawnOnBackRank { color, square });
            }
            position.put_piece(square, color, piece);
        }

        for color in Color::BOTH {
            match position.count(color, Piece::King) {
                0 => return Err(PositionError::MissingKing { color }),
                1 => {}
                count => return Err(PositionError::MultipleKings { color, count }),
            }
        }

        for color in Color::BOTH {
            Self::validate_material(&position, color)?;
        }

        for color in Color::BOTH {
            for side in CastleSide::BOTH {
                if !self.castling_rights.has(color, side) {
                    continue;
                }
                let squares = side.squares(color);
                if !position.pieces(color, Piece::King).contains(squares.king_from)
                    || !position.pieces(color, Piece::Rook).contains(squares.rook_from)
                {
                    return Err(PositionError::InvalidCastlingRights { color, side });
                }
            }
        }

        if let Some(square) = self.en_passant_target {
            self.validate_en_passant(&position, square)?;
        }

        position.set_side_to_move(self.side_to_move);
        position.set_castling_rights(self.castling_rights);
        position.set_en_passant(self.en_passant_target);
        position.hash = position.compute_hash();

        let waiting = self.side_to_move.opponent();
        if position.is_in_check(AttackTables::shared()?, waiting) {
            return Err(PositionError::OpponentInCheck { color: waiting });
        }
        Ok(position)
    }

    /// Material must be reachable from the starting set: every piece beyond
    /// the initial count of its kind needs a pawn that promoted.
    fn validate_material(position: &Position, color: Color) -> Result<(), PositionError> {
        let count = position.occupancy(color).popcount();
        if count > 16 {
            return Err(PositionError::TooManyPieces { color, count });
        }
        let pawns = position.count(color, Piece::Pawn);
        if pawns > 8 {
            return Err(PositionError::TooManyPawns { color, count: pawns });
        }
        let promoted: u32 = [
            (Piece::Knight, 2),
            (Piece::Bishop, 2),
            (Piece::Rook, 2),
            (Piece::Queen, 1),
        ]
        .into_iter()
        .map(|(piece, initial)| position.count(color, piece).saturating_sub(initial))
        .sum();
        let missing_pawns = 8 - pawns;
        if promoted > missing_pawns {
            return Err(PositionError::ImpossiblePromotions {
                color,
                promoted,
                missing_pawns,
            });
        }
        Ok(())
    }

    /// The target must sit behind an enemy pawn that could just have made a
    /// double push, with both it and the pawn's origin square empty.
    fn validate_en_passant(&self, position: &Position, square: Square) -> Result<(), PositionError> {
        let pusher = self.side_to_move.opponent();
        let (rank, pawn_index, origin_index) = match pusher {
            Color::White => (2, square.index() + 8, square.index().wrapping_sub(8)),
            Color::Black => (5, square.index().wrapping_sub(8), square.index() + 8),
        };
        let invalid = PositionError::InvalidEnPassant { square };
        if square.rank() != rank {
            return Err(invalid);
        }
        let (Some(pawn_sq), Some(origin)) = (Square::new(pawn_index), Square::new(origin_index)) else {
            return Err(invalid);
        };
        if !position.pieces(pusher, Piece::Pawn).contains(pawn_sq)
            || position.occupied().contains(square)
            || position.occupied().contains(origin)
        {
            return Err(invalid);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().expect("valid square")
    }

    fn kings() -> PositionBuilder {
        PositionBuilder::new()
            .piece(Square::E1, Color::White, Piece::King)
            .piece(Square::E8, Color::Black, Piece::King)
    }

    #[test]
    fn test_starting_position_matches_startpos() {
        let built = PositionBuilder::starting_position().build().expect("valid");
        assert_eq!(built, Position::startpos());
    }

    #[test]
    fn test_missing_and_duplicate_kings() {
        let err = PositionBuilder::new()
            .piece(Square::E1, Color::White, Piece::King)
            .build();
        assert_eq!(err, Err(PositionError::MissingKing { color: Color::Black }));

        let err = kings().piece(Square::A1, Color::White, Piece::King).build();
        assert_eq!(
            err,
            Err(PositionError::MultipleKings {
                color: Color::White,
                count: 2
            })
        );
    }

    #[test]
    fn test_overlapping_pieces_rejected() {
        let err = kings()
            .piece(sq("d4"), Color::White, Piece::Knight)
            .piece(sq("d4"), Color::Black, Piece::Bishop)
            .build();
        assert_eq!(err, Err(PositionError::SquareOccupied { square: sq("d4") }));
    }

    #[test]
    fn test_pawn_on_back_rank_rejected() {
        let err = kings().piece(sq("c8"), Color::White, Piece::Pawn).build();
        assert_eq!(
            err,
            Err(PositionError::PawnOnBackRank {
                color: Color::White,
                square: sq("c8")
            })
        );
    }

    #[test]
    fn test_castling_right_requires_rook() {
        let err = kings().castle(Color::White, CastleSide::King).build();
        assert_eq!(
            err,
            Err(PositionError::InvalidCastlingRights {
                color: Color::White,
                side: CastleSide::King
            })
        );
        let ok = kings()
            .piece(Square::H1, Color::White, Piece::Rook)
            .castle(Color::White, CastleSide::King)
            .build()
            .expect("valid");
        assert!(ok.castling_rights().has(Color::White, CastleSide::King));
    }

    #[test]
    fn test_en_passant_validation() {
        let base = kings().piece(sq("d5"), Color::Black, Piece::Pawn);
        let ok = base.clone().en_passant(sq("d6")).build().expect("valid");
        assert_eq!(ok.en_passant(), Some(sq("d6")));
        assert_eq!(ok.hash(), ok.compute_hash());

        let wrong_rank = base.clone().en_passant(sq("d3")).build();
        assert_eq!(wrong_rank, Err(PositionError::InvalidEnPassant { square: sq("d3") }));

        let no_pawn = base.en_passant(sq("c6")).build();
        assert!(no_pawn.is_err());
    }

    #[test]
    fn test_side_not_to_move_in_check_rejected() {
        let rook_on_file = kings().piece(sq("e4"), Color::White, Piece::Rook);
        let err = rook_on_file.clone().side_to_move(Color::White).build();
        assert_eq!(err, Err(PositionError::OpponentInCheck { color: Color::Black }));

        let checked = rook_on_file
            .side_to_move(Color::Black)
            .build()
            .expect("side to move may be in check");
        assert_eq!(checked.count(Color::Black, Piece::King), 1);
    }

    #[test]
    fn test_piece_counts_limited() {
        let mut nine_pawns = kings();
        for file in 0..8 {
            let square = Square::from_coords(1, file).expect("on board");
            nine_pawns = nine_pawns.piece(square, Color::White, Piece::Pawn);
        }
        let err = nine_pawns.piece(sq("a3"), Color::White, Piece::Pawn).build();
        assert_eq!(
            err,
            Err(PositionError::TooManyPawns {
                color: Color::White,
                count: 9
            })
        );

        let err = PositionBuilder::starting_position()
            .piece(sq("d4"), Color::White, Piece::Knight)
            .build();
        assert_eq!(
            err,
            Err(PositionError::TooManyPieces {
                color: Color::White,
                count: 17
            })
        );
    }

    #[test]
    fn test_promoted_material_needs_missing_pawns() {
        let err = PositionBuilder::starting_position()
            .clear(sq("a2"))
            .piece(sq("d4"), Color::White, Piece::Queen)
            .piece(sq("d5"), Color::White, Piece::Queen)
            .build();
        assert_eq!(
            err,
            Err(PositionError::ImpossiblePromotions {
                color: Color::White,
                promoted: 2,
                missing_pawns: 1
            })
        );
    }

    #[test]
    fn test_nine_queens_generate_without_overflow() {
        let mut builder = PositionBuilder::new()
            .piece(sq("a4"), Color::White, Piece::King)
            .piece(sq("h8"), Color::Black, Piece::King);
        for name in ["b1", "c1", "d1", "e1", "f1", "a2", "c2", "d2", "f2"] {
            builder = builder.piece(sq(name), Color::White, Piece::Queen);
        }
        let position = builder.build().expect("nine queens are reachable");
        let tables = AttackTables::shared().expect("tables");
        assert!(!position.generate_moves(tables).is_empty());

        let err = PositionBuilder::new()
            .piece(sq("a4"), Color::White, Piece::King)
            .piece(sq("h8"), Color::Black, Piece::King)
            .piece(sq("b1"), Color::White, Piece::Queen)
            .piece(sq("c1"), Color::White, Piece::Queen)
            .piece(sq("d1"), Color::White, Piece::Queen)
            .piece(sq("e1"), Color::White, Piece::Queen)
            .piece(sq("f1"), Color::White, Piece::Queen)
            .piece(sq("a2"), Color::White, Piece::Queen)
            .piece(sq("c2"), Color::White, Piece::Queen)
            .piece(sq("d2"), Color::White, Piece::Queen)
            .piece(sq("f2"), Color::White, Piece::Queen)
            .piece(sq("b3"), Color::White, Piece::Queen)
            .build();
        assert!(matches!(err, Err(PositionError::ImpossiblePromotions { .. })));
    }

    #[test]
    fn test_clear_square() {
        let position = PositionBuilder::starting_position()
            .clear(Square::A1)
            .no_castling_rights()
            .build()
            .expect("valid");
        assert!(position.piece_at(Square::A1).is_none());
        assert!(position.piece_at(Square::B1).is_some());
    }
}
