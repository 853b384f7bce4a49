//! Move generation, attack detection and game-end queries.
//!
//! Generation is pseudo-legal first; a move is kept only if the mover's king
//! is not attacked after it is applied. Legal lists put captures (en passant
//! and capturing promotions included) ahead of quiet moves.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::attack_tables::AttackTables;
use super::state::Position;
use super::types::{rights_touched_by, Bitboard, CastleSide, Color, Move, MoveList, Piece, Square};

/// Which moves the pseudo-legal generator emits.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum GenMode {
    All,
    Captures,
}

impl Position {
    /// Build a fully encoded move of the side to move, recording what it
    /// captures and the metadata it changes.
    pub(crate) fn encode_move(&self, from: Square, to: Square, piece: Piece) -> Move {
        let us = self.side_to_move();
        let revoked = self.castling_rights().as_u8() & (rights_touched_by(from) | rights_touched_by(to));
        let mut mv = Move::new(from, to, piece, us).with_context(revoked, self.en_passant());
        if let Some((color, captured)) = self.piece_at(to) {
            if color != us {
                mv = mv.with_capture(captured);
            }
        }
        mv
    }

    /// Emit every target in `targets` as a move of `piece` from `from`.
    pub(crate) fn push_targets(&self, from: Square, piece: Piece, targets: Bitboard, moves: &mut MoveList) {
        for to in targets {
            moves.push(self.encode_move(from, to, piece));
        }
    }

    /// Squares a non-pawn piece may land on in this mode.
    #[inline]
    pub(crate) fn target_mask(&self, mode: GenMode) -> Bitboard {
        let us = self.side_to_move();
        match mode {
            GenMode::All => !self.occupancy(us),
            GenMode::Captures => self.occupancy(us.opponent()),
        }
    }

    pub(crate) fn generate_pseudo_moves(&self, tables: &AttackTables, mode: GenMode) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_pawn_moves(tables, mode, &mut moves);
        self.generate_knight_moves(tables, mode, &mut moves);
        self.generate_slider_moves(tables, mode, &mut moves);
        self.generate_king_moves(tables, mode, &mut moves);
        moves
    }

    /// Drop moves that leave the mover in check; captures first.
    fn legal_subset(&self, tables: &AttackTables, pseudo: &MoveList) -> MoveList {
        let us = self.side_to_move();
        let mut scratch = *self;
        let mut legal = MoveList::new();
        let mut quiet = MoveList::new();
        for &mv in pseudo {
            scratch.apply(mv);
            let ok = !scratch.is_in_check(tables, us);
            scratch.undo(mv);
            if !ok {
                continue;
            }
            if mv.is_capture() {
                legal.push(mv);
            } else {
                quiet.push(mv);
            }
        }
        for &mv in &quiet {
            legal.push(mv);
        }
        legal
    }

    /// All legal moves for the side to move, captures first.
    #[must_use]
    pub fn generate_moves(&self, tables: &AttackTables) -> MoveList {
        let pseudo = self.generate_pseudo_moves(tables, GenMode::All);
        self.legal_subset(tables, &pseudo)
    }

    /// Legal captures only, including en passant and capturing promotions.
    #[must_use]
    pub fn generate_captures(&self, tables: &AttackTables) -> MoveList {
        let pseudo = self.generate_pseudo_moves(tables, GenMode::Captures);
        self.legal_subset(tables, &pseudo)
    }

    /// True if any piece of `by` attacks `sq`.
    #[must_use]
    pub fn is_square_attacked(&self, tables: &AttackTables, sq: Square, by: Color) -> bool {
        let occ = self.occupied();
        let queens = self.pieces(by, Piece::Queen);

        (tables.pawn_attacks(by.opponent(), sq) & self.pieces(by, Piece::Pawn)).any()
            || (tables.knight(sq) & self.pieces(by, Piece::Knight)).any()
            || (tables.king(sq) & self.pieces(by, Piece::King)).any()
            || (tables.bishop(sq, occ) & (self.pieces(by, Piece::Bishop) | queens)).any()
            || (tables.rook(sq, occ) & (self.pieces(by, Piece::Rook) | queens)).any()
    }

    /// True if the king of `color` is attacked.
    #[must_use]
    pub fn is_in_check(&self, tables: &AttackTables, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.is_square_attacked(tables, king, color.opponent()),
            None => false,
        }
    }

    /// Whether `color` may castle to `side` right now: the right is intact,
    /// king and rook are home, the path is clear and the king neither starts,
    /// passes through nor lands on an attacked square.
    #[must_use]
    pub fn can_castle(&self, tables: &AttackTables, color: Color, side: CastleSide) -> bool {
        if !self.castling_rights().has(color, side) {
            return false;
        }
        let squares = side.squares(color);
        if !self.pieces(color, Piece::King).contains(squares.king_from)
            || !self.pieces(color, Piece::Rook).contains(squares.rook_from)
        {
            return false;
        }
        if (self.occupied() & Bitboard(squares.empty)).any() {
            return false;
        }
        let them = color.opponent();
        // the rook's destination is the square the king passes over
        [squares.king_from, squares.rook_to, squares.king_to]
            .into_iter()
            .all(|sq| !self.is_square_attacked(tables, sq, them))
    }

    /// True if `mv` leaves the opponent in check.
    #[must_use]
    pub fn gives_check(&self, tables: &AttackTables, mv: Move) -> bool {
        self.applied(mv).is_in_check(tables, mv.color().opponent())
    }

    /// Side to move is in check and has no legal move.
    #[must_use]
    pub fn is_checkmate(&self, tables: &AttackTables) -> bool {
        self.is_in_check(tables, self.side_to_move()) && self.generate_moves(tables).is_empty()
    }

    /// Side to move is not in check and has no legal move.
    #[must_use]
    pub fn is_stalemate(&self, tables: &AttackTables) -> bool {
        !self.is_in_check(tables, self.side_to_move()) && self.generate_moves(tables).is_empty()
    }

    /// True if a move with the same origin, destination and promotion is
    /// legal here.
    #[must_use]
    pub fn is_legal_move(&self, tables: &AttackTables, mv: Move) -> bool {
        self.generate_moves(tables).contains(mv)
    }

    /// Count leaf nodes of the legal move tree to `depth`.
    pub fn perft(&mut self, tables: &AttackTables, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_moves(tables);
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for &mv in &moves {
            self.apply(mv);
            nodes += self.perft(tables, depth - 1);
            self.undo(mv);
        }

        nodes
    }
}
