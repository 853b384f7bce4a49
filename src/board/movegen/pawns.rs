use super::super::attack_tables::AttackTables;
use super::super::state::Position;
use super::super::types::{Bitboard, Color, Move, MoveList, Piece, Square, PROMOTION_PIECES};
use super::GenMode;

impl Position {
    /// Pawn pushes, captures, promotions and en passant, set-wise.
    pub(crate) fn generate_pawn_moves(&self, tables: &AttackTables, mode: GenMode, moves: &mut MoveList) {
        let us = self.side_to_move();
        let them = us.opponent();
        let pawns = self.pieces(us, Piece::Pawn);
        let empty = !self.occupied();
        let enemies = self.occupancy(them);

        // Offsets are measured from origin to target.
        let (advance, forward, east, west, double_rank, last_rank): (fn(Bitboard) -> Bitboard, i8, i8, i8, Bitboard, Bitboard) =
            match us {
                Color::White => (Bitboard::shift_north, 8, 9, 7, Bitboard::RANK_3, Bitboard::RANK_8),
                Color::Black => (Bitboard::shift_south, -8, -7, -9, Bitboard::RANK_6, Bitboard::RANK_1),
            };
        let origin = |to: Square, offset: i8| Square::from_index_unchecked((to.index() as i8 - offset) as u8);

        let ahead = advance(pawns);
        for (targets, offset) in [
            (ahead.shift_east() & enemies, east),
            (ahead.shift_west() & enemies, west),
        ] {
            for to in targets {
                self.push_pawn_move(origin(to, offset), to, last_rank.contains(to), moves);
            }
        }

        if let Some(ep) = self.en_passant() {
            for from in tables.pawn_attacks(them, ep) & pawns {
                moves.push(
                    Move::new(from, ep, Piece::Pawn, us)
                        .with_en_passant()
                        .with_context(0, Some(ep)),
                );
            }
        }

        if mode == GenMode::Captures {
            return;
        }

        let single = ahead & empty;
        let double = advance(single & double_rank) & empty;
        for to in single {
            self.push_pawn_move(origin(to, forward), to, last_rank.contains(to), moves);
        }
        for to in double {
            moves.push(self.encode_move(origin(to, 2 * forward), to, Piece::Pawn));
        }
    }

    fn push_pawn_move(&self, from: Square, to: Square, promotes: bool, moves: &mut MoveList) {
        let base = self.encode_move(from, to, Piece::Pawn);
        if promotes {
            for promo in PROMOTION_PIECES {
                moves.push(base.with_promotion(promo));
            }
        } else {
            moves.push(base);
        }
    }
}
