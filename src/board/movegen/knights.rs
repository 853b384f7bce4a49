use super::super::attack_tables::AttackTables;
use super::super::state::Position;
use super::super::types::{MoveList, Piece};
use super::GenMode;

impl Position {
    pub(crate) fn generate_knight_moves(&self, tables: &AttackTables, mode: GenMode, moves: &mut MoveList) {
        let targets = self.target_mask(mode);
        for from in self.pieces(self.side_to_move(), Piece::Knight) {
            self.push_targets(from, Piece::Knight, tables.knight(from) & targets, moves);
        }
    }
}
