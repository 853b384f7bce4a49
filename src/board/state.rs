//! Position state: sixteen bitboard slices plus the incremental Zobrist hash.
//!
//! Slice layout:
//! - `[0]` all occupied squares
//! - `[1]`, `[2]` white / black occupancy
//! - `[3..=8]` white pawn, knight, bishop, rook, queen, king
//! - `[9..=14]` black pieces in the same order
//! - `[15]` packed metadata (see below)
//!
//! Metadata: bit 0 is set when White is to move, bits 1-4 hold the castling
//! rights (WK, WQ, BK, BQ), bits 5-11 hold the en passant square plus one
//! (zero when there is none).

use std::fmt;

use super::types::{Bitboard, CastlingRights, Color, Piece, Square};
use crate::zobrist::ZOBRIST;

pub(crate) const OCCUPIED: usize = 0;
pub(crate) const METADATA: usize = 15;
const PIECE_BASE: usize = 3;

const WHITE_TO_MOVE_BIT: u64 = 1;
const CASTLING_SHIFT: u32 = 1;
const CASTLING_MASK: u64 = 0xF << CASTLING_SHIFT;
const EN_PASSANT_SHIFT: u32 = 5;
const EN_PASSANT_MASK: u64 = 0x7F << EN_PASSANT_SHIFT;

#[inline]
pub(crate) const fn color_slice(color: Color) -> usize {
    1 + color.index()
}

#[inline]
pub(crate) const fn piece_slice(color: Color, piece: Piece) -> usize {
    PIECE_BASE + color.index() * 6 + piece.index()
}

/// En passant square encoded for the metadata field: index + 1, zero for none.
#[inline]
pub(crate) const fn en_passant_code(sq: Option<Square>) -> u64 {
    match sq {
        Some(s) => s.index() as u64 + 1,
        None => 0,
    }
}

/// A chess position. Cheap to copy; the hash is part of the value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) slices: [Bitboard; 16],
    pub(crate) hash: u64,
}

impl Position {
    /// The standard initial position.
    #[must_use]
    pub fn startpos() -> Self {
        let mut pos = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, &piece) in (0u8..).zip(back_rank.iter()) {
            pos.put_piece(Square::from_index_unchecked(file), Color::White, piece);
            pos.put_piece(Square::from_index_unchecked(56 + file), Color::Black, piece);
            pos.put_piece(Square::from_index_unchecked(8 + file), Color::White, Piece::Pawn);
            pos.put_piece(Square::from_index_unchecked(48 + file), Color::Black, Piece::Pawn);
        }
        pos.set_castling_rights(CastlingRights::all());
        pos.set_side_to_move(Color::White);
        pos.hash = pos.compute_hash();
        pos
    }

    /// No pieces, Black to move, no rights. Hash is left at zero; callers
    /// finishing a position must call [`Position::compute_hash`].
    pub(crate) fn empty() -> Self {
        Position {
            slices: [Bitboard::EMPTY; 16],
            hash: 0,
        }
    }

    /// All sixteen raw slices.
    #[must_use]
    pub fn slices(&self) -> &[Bitboard; 16] {
        &self.slices
    }

    #[inline]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.slices[OCCUPIED]
    }

    #[inline]
    #[must_use]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.slices[color_slice(color)]
    }

    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.slices[piece_slice(color, piece)]
    }

    /// What stands on `sq`, if anything
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        if !self.occupied().contains(sq) {
            return None;
        }
        let color = if self.occupancy(Color::White).contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        Piece::ALL
            .into_iter()
            .find(|&p| self.pieces(color, p).contains(sq))
            .map(|p| (color, p))
    }

    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, Piece::King).lsb()
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        if self.slices[METADATA].0 & WHITE_TO_MOVE_BIT != 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        CastlingRights::from_u8(((self.slices[METADATA].0 & CASTLING_MASK) >> CASTLING_SHIFT) as u8)
    }

    /// Square a pawn may capture onto en passant
    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> Option<Square> {
        let code = (self.slices[METADATA].0 & EN_PASSANT_MASK) >> EN_PASSANT_SHIFT;
        match code {
            0 => None,
            n => Square::new((n - 1) as u8),
        }
    }

    /// Zobrist key of this position, maintained incrementally.
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Recompute the Zobrist key from scratch.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in self.pieces(color, piece) {
                    hash ^= ZOBRIST.piece(color, piece, sq);
                }
            }
        }
        if self.side_to_move() == Color::Black {
            hash ^= ZOBRIST.black_to_move;
        }
        hash ^= ZOBRIST.castling(self.castling_rights().as_u8());
        if let Some(ep) = self.en_passant() {
            hash ^= ZOBRIST.en_passant(ep.file());
        }
        hash
    }

    /// Count of `piece` for `color`
    #[inline]
    #[must_use]
    pub fn count(&self, color: Color, piece: Piece) -> u32 {
        self.pieces(color, piece).popcount()
    }

    /// XOR a piece onto/off `sq`, keeping occupancy and hash in step.
    #[inline]
    pub(crate) fn toggle_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = Bitboard::from_square(sq);
        self.slices[OCCUPIED] ^= bit;
        self.slices[color_slice(color)] ^= bit;
        self.slices[piece_slice(color, piece)] ^= bit;
        self.hash ^= ZOBRIST.piece(color, piece, sq);
    }

    /// Setup helper; does not touch the hash.
    pub(crate) fn put_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = Bitboard::from_square(sq);
        self.slices[OCCUPIED] |= bit;
        self.slices[color_slice(color)] |= bit;
        self.slices[piece_slice(color, piece)] |= bit;
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        let meta = &mut self.slices[METADATA].0;
        match color {
            Color::White => *meta |= WHITE_TO_MOVE_BIT,
            Color::Black => *meta &= !WHITE_TO_MOVE_BIT,
        }
    }

    pub(crate) fn set_castling_rights(&mut self, rights: CastlingRights) {
        let meta = &mut self.slices[METADATA].0;
        *meta = (*meta & !CASTLING_MASK) | (u64::from(rights.as_u8()) << CASTLING_SHIFT);
    }

    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        let meta = &mut self.slices[METADATA].0;
        *meta = (*meta & !EN_PASSANT_MASK) | (en_passant_code(sq) << EN_PASSANT_SHIFT);
    }

    /// Flip side to move, XOR castling rights by `rights_delta` and the en
    /// passant field by `ep_delta` (already XOR of old and new codes).
    #[inline]
    pub(crate) fn toggle_metadata(&mut self, rights_delta: u8, ep_delta: u64) {
        self.slices[METADATA].0 ^= WHITE_TO_MOVE_BIT
            | (u64::from(rights_delta) << CASTLING_SHIFT)
            | (ep_delta << EN_PASSANT_SHIFT);
    }

    /// Material balance from White's point of view, kings excluded
    #[must_use]
    pub fn material_balance(&self) -> i32 {
        Piece::ALL[..5]
            .iter()
            .map(|&p| {
                (self.count(Color::White, p) as i32 - self.count(Color::Black, p) as i32) * p.value()
            })
            .sum()
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("side_to_move", &self.side_to_move())
            .field("castling", &self.castling_rights())
            .field("en_passant", &self.en_passant())
            .field("hash", &format_args!("{:#018x}", self.hash))
            .finish_non_exhaustive()?;
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}

/// Board diagram, rank 8 first; white pieces upper case.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let sq = Square::from_index_unchecked(rank * 8 + file);
                let c = match self.piece_at(sq) {
                    Some((Color::White, p)) => p.to_char().to_ascii_uppercase(),
                    Some((Color::Black, p)) => p.to_char(),
                    None => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_slices() {
        let pos = Position::startpos();
        assert_eq!(pos.occupied().popcount(), 32);
        assert_eq!(pos.occupied(), pos.occupancy(Color::White) | pos.occupancy(Color::Black));
        assert_eq!(pos.pieces(Color::White, Piece::Pawn), Bitboard::RANK_2);
        assert_eq!(pos.slices()[piece_slice(Color::Black, Piece::Pawn)], Bitboard::RANK_7);
        assert_eq!(pos.king_square(Color::Black), Some(Square::E8));
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.castling_rights(), CastlingRights::all());
        assert_eq!(pos.en_passant(), None);
        assert_eq!(pos.hash(), pos.compute_hash());
    }

    #[test]
    fn test_metadata_layout() {
        let mut pos = Position::startpos();
        assert_eq!(pos.slices[METADATA].0, 0b1_1111);
        let e3: Square = "e3".parse().expect("valid square");
        pos.set_en_passant(Some(e3));
        assert_eq!(pos.slices[METADATA].0 >> 5, u64::from(e3.index()) + 1);
        assert_eq!(pos.en_passant(), Some(e3));
        pos.set_side_to_move(Color::Black);
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.castling_rights(), CastlingRights::all());
    }

    #[test]
    fn test_piece_at() {
        let pos = Position::startpos();
        assert_eq!(pos.piece_at(Square::D1), Some((Color::White, Piece::Queen)));
        assert_eq!(pos.piece_at(Square::G8), Some((Color::Black, Piece::Knight)));
        assert_eq!(pos.piece_at("e4".parse().expect("valid square")), None);
    }

    #[test]
    fn test_display_diagram() {
        let text = Position::startpos().to_string();
        assert!(text.starts_with("8 rnbqkbnr"));
        assert!(text.contains("1 RNBQKBNR"));
    }
}
