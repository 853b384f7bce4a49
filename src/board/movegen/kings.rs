use super::super::attack_tables::AttackTables;
use super::super::state::Position;
use super::super::types::{rights_touched_by, CastleSide, Move, MoveList, Piece};
use super::GenMode;

impl Position {
    /// King steps, plus castling when generating all moves.
    pub(crate) fn generate_king_moves(&self, tables: &AttackTables, mode: GenMode, moves: &mut MoveList) {
        let us = self.side_to_move();
        let Some(from) = self.king_square(us) else {
            return;
        };
        self.push_targets(from, Piece::King, tables.king(from) & self.target_mask(mode), moves);

        if mode == GenMode::Captures {
            return;
        }
        for side in CastleSide::BOTH {
            if self.can_castle(tables, us, side) {
                let squares = side.squares(us);
                // leaving the home square revokes both of our rights
                let revoked = self.castling_rights().as_u8() & rights_touched_by(squares.king_from);
                moves.push(
                    Move::new(squares.king_from, squares.king_to, Piece::King, us)
                        .with_castle()
                        .with_context(revoked, self.en_passant()),
                );
            }
        }
    }
}
