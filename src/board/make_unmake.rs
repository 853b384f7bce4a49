//! Reversible move application.
//!
//! Every change a move makes is expressed as an XOR: piece bits on and off,
//! castling rights revoked by a recorded delta, the en passant field swapped
//! between its old and new code, the side to move flipped. Applying the same
//! move a second time therefore restores the original position exactly,
//! including its hash. `apply` and `undo` share that one toggle.

use crate::zobrist::ZOBRIST;

use super::attack_tables::AttackTables;
use super::error::MoveError;
use super::state::{en_passant_code, Position};
use super::types::{CastleSide, Color, Move, Piece, Square};

/// En passant square the opponent's last double push left behind, given the
/// file stored in a move and the color making that move.
#[inline]
fn prior_en_passant(mv: Move) -> Option<Square> {
    mv.prior_en_passant_file().map(|file| {
        let rank = match mv.color() {
            Color::White => 5,
            Color::Black => 2,
        };
        Square::from_index_unchecked(rank * 8 + file)
    })
}

/// En passant square created by `mv`, if it is a double pawn push.
#[inline]
fn created_en_passant(mv: Move) -> Option<Square> {
    if mv.is_double_pawn_push() {
        Some(Square::from_index_unchecked(
            (mv.from().index() + mv.to().index()) / 2,
        ))
    } else {
        None
    }
}

/// Square of the pawn removed by an en passant capture.
#[inline]
fn en_passant_victim(mv: Move) -> Square {
    match mv.color() {
        Color::White => Square::from_index_unchecked(mv.to().index() - 8),
        Color::Black => Square::from_index_unchecked(mv.to().index() + 8),
    }
}

impl Position {
    fn toggle(&mut self, mv: Move) {
        let us = mv.color();
        let them = us.opponent();
        let from = mv.from();
        let to = mv.to();

        if mv.is_castling() {
            let side = if to.file() == 6 {
                CastleSide::King
            } else {
                CastleSide::Queen
            };
            let squares = side.squares(us);
            self.toggle_piece(squares.king_from, us, Piece::King);
            self.toggle_piece(squares.king_to, us, Piece::King);
            self.toggle_piece(squares.rook_from, us, Piece::Rook);
            self.toggle_piece(squares.rook_to, us, Piece::Rook);
        } else {
            let piece = mv.piece();
            self.toggle_piece(from, us, piece);
            self.toggle_piece(to, us, mv.promotion().unwrap_or(piece));
            if let Some(captured) = mv.captured() {
                let victim = if mv.is_en_passant() {
                    en_passant_victim(mv)
                } else {
                    to
                };
                self.toggle_piece(victim, them, captured);
            }
        }

        let prior_ep = prior_en_passant(mv);
        let new_ep = created_en_passant(mv);
        let rights_delta = mv.castling_delta();
        self.toggle_metadata(rights_delta, en_passant_code(prior_ep) ^ en_passant_code(new_ep));

        self.hash ^= ZOBRIST.black_to_move ^ ZOBRIST.castling(rights_delta);
        if let Some(ep) = prior_ep {
            self.hash ^= ZOBRIST.en_passant(ep.file());
        }
        if let Some(ep) = new_ep {
            self.hash ^= ZOBRIST.en_passant(ep.file());
        }
    }

    /// Play `mv` in place.
    ///
    /// The move must have been generated for this position; no legality check
    /// is made. See [`Position::try_apply`] for caller-supplied moves.
    #[inline]
    pub fn apply(&mut self, mv: Move) {
        self.toggle(mv);
    }

    /// Take back `mv`, which must be the last move applied.
    #[inline]
    pub fn undo(&mut self, mv: Move) {
        self.toggle(mv);
    }

    /// The position after `mv`, leaving `self` untouched.
    #[must_use]
    pub fn applied(&self, mv: Move) -> Position {
        let mut next = *self;
        next.apply(mv);
        next
    }

    /// The position before `mv`, which must be the move that led here.
    #[must_use]
    pub fn undone(&self, mv: Move) -> Position {
        let mut prev = *self;
        prev.undo(mv);
        prev
    }

    /// Validate and play a move from outside the engine.
    ///
    /// The move is matched by origin, destination and promotion against the
    /// legal moves of this position; the fully encoded generated move is the
    /// one applied and returned.
    pub fn try_apply(&mut self, tables: &AttackTables, mv: Move) -> Result<Move, MoveError> {
        match self.piece_at(mv.from()) {
            Some((color, _)) if color == self.side_to_move() => {}
            _ => {
                return Err(MoveError::NoPiece {
                    piece: mv.piece(),
                    square: mv.from(),
                })
            }
        }
        let legal = self
            .generate_moves(tables)
            .find_key(mv.key())
            .ok_or(MoveError::IllegalMove { mv })?;
        self.apply(legal);
        Ok(legal)
    }
}
