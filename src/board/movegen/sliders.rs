use super::super::attack_tables::AttackTables;
use super::super::state::Position;
use super::super::types::{MoveList, Piece};
use super::GenMode;

impl Position {
    /// Bishops, rooks and queens via magic lookups on the full occupancy.
    pub(crate) fn generate_slider_moves(&self, tables: &AttackTables, mode: GenMode, moves: &mut MoveList) {
        let us = self.side_to_move();
        let occ = self.occupied();
        let targets = self.target_mask(mode);

        for from in self.pieces(us, Piece::Bishop) {
            self.push_targets(from, Piece::Bishop, tables.bishop(from, occ) & targets, moves);
        }
        for from in self.pieces(us, Piece::Rook) {
            self.push_targets(from, Piece::Rook, tables.rook(from, occ) & targets, moves);
        }
        for from in self.pieces(us, Piece::Queen) {
            self.push_targets(from, Piece::Queen, tables.queen(from, occ) & targets, moves);
        }
    }
}
