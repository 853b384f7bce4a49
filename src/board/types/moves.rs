//! Move types and move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece};
use super::square::Square;

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const CAPTURED_SHIFT: u32 = 15;
const PROMOTION_SHIFT: u32 = 18;
const EN_PASSANT_BIT: u32 = 1 << 21;
const CASTLE_BIT: u32 = 1 << 22;
const RIGHTS_SHIFT: u32 = 23;
const PRIOR_EP_BIT: u32 = 1 << 27;
const PRIOR_EP_FILE_SHIFT: u32 = 28;
const BLACK_MOVER_BIT: u32 = 1 << 31;

const SQUARE_MASK: u32 = 0x3F;
const PIECE_MASK: u32 = 0x7;
const RIGHTS_MASK: u32 = 0xF;

/// Compact, self-describing 32-bit move.
///
/// Encoding:
/// - bits 0-5:   from square
/// - bits 6-11:  to square
/// - bits 12-14: moving piece (1 = pawn .. 6 = king)
/// - bits 15-17: captured piece (0 = none)
/// - bits 18-20: promotion piece (0 = none)
/// - bit 21:     en passant capture
/// - bit 22:     castling
/// - bits 23-26: castling rights revoked by this move (XOR mask)
/// - bit 27:     an en passant square was set before the move
/// - bits 28-30: file of that en passant square
/// - bit 31:     mover is black
///
/// The auxiliary bits make application reversible without an undo record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u32);

impl Move {
    /// Create a null/empty move (used for initialization)
    #[inline]
    #[must_use]
    pub const fn null() -> Self {
        Move(0)
    }

    /// A plain move of `piece` belonging to `color`
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square, piece: Piece, color: Color) -> Self {
        let mut bits = (from.index() as u32) << FROM_SHIFT
            | (to.index() as u32) << TO_SHIFT
            | piece.code() << PIECE_SHIFT;
        if let Color::Black = color {
            bits |= BLACK_MOVER_BIT;
        }
        Move(bits)
    }

    #[inline]
    #[must_use]
    pub(crate) const fn with_capture(self, captured: Piece) -> Self {
        Move(self.0 | captured.code() << CAPTURED_SHIFT)
    }

    #[inline]
    #[must_use]
    pub(crate) const fn with_promotion(self, promotion: Piece) -> Self {
        Move(self.0 | promotion.code() << PROMOTION_SHIFT)
    }

    #[inline]
    #[must_use]
    pub(crate) const fn with_en_passant(self) -> Self {
        Move(self.0 | EN_PASSANT_BIT | Piece::Pawn.code() << CAPTURED_SHIFT)
    }

    #[inline]
    #[must_use]
    pub(crate) const fn with_castle(self) -> Self {
        Move(self.0 | CASTLE_BIT)
    }

    /// Attach the metadata the move changes: revoked castling rights and the
    /// en passant square that was active before it.
    #[inline]
    #[must_use]
    pub(crate) const fn with_context(self, rights_delta: u8, prior_ep: Option<Square>) -> Self {
        let mut bits = self.0 | ((rights_delta as u32) & RIGHTS_MASK) << RIGHTS_SHIFT;
        if let Some(ep) = prior_ep {
            bits |= PRIOR_EP_BIT | (ep.file() as u32) << PRIOR_EP_FILE_SHIFT;
        }
        Move(bits)
    }

    /// Get the source square
    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index_unchecked(((self.0 >> FROM_SHIFT) & SQUARE_MASK) as u8)
    }

    /// Get the destination square
    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index_unchecked(((self.0 >> TO_SHIFT) & SQUARE_MASK) as u8)
    }

    /// The moving piece. The null move reports a pawn.
    #[inline]
    #[must_use]
    pub const fn piece(self) -> Piece {
        match Piece::from_code((self.0 >> PIECE_SHIFT) & PIECE_MASK) {
            Some(p) => p,
            None => Piece::Pawn,
        }
    }

    /// Color of the side making the move
    #[inline]
    #[must_use]
    pub const fn color(self) -> Color {
        if self.0 & BLACK_MOVER_BIT != 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// The captured piece, if any (a pawn for en passant)
    #[inline]
    #[must_use]
    pub const fn captured(self) -> Option<Piece> {
        Piece::from_code((self.0 >> CAPTURED_SHIFT) & PIECE_MASK)
    }

    /// Get the promotion piece, if this is a promotion move
    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<Piece> {
        Piece::from_code((self.0 >> PROMOTION_SHIFT) & PIECE_MASK)
    }

    /// Returns true if this move captures a piece (including en passant)
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        (self.0 >> CAPTURED_SHIFT) & PIECE_MASK != 0
    }

    /// Returns true if this move is en passant
    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        self.0 & EN_PASSANT_BIT != 0
    }

    /// Returns true if this move is castling
    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        self.0 & CASTLE_BIT != 0
    }

    /// Returns true if this move is a pawn promotion
    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        (self.0 >> PROMOTION_SHIFT) & PIECE_MASK != 0
    }

    /// Returns true if this move is a double pawn push
    #[inline]
    #[must_use]
    pub const fn is_double_pawn_push(self) -> bool {
        let from = self.from().index() as i32;
        let to = self.to().index() as i32;
        matches!(self.piece(), Piece::Pawn) && (to - from == 16 || from - to == 16)
    }

    /// Returns true if this move is "quiet" (not a capture or promotion)
    #[inline]
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }

    /// Castling rights (raw 4-bit mask) this move revokes
    #[inline]
    #[must_use]
    pub const fn castling_delta(self) -> u8 {
        ((self.0 >> RIGHTS_SHIFT) & RIGHTS_MASK) as u8
    }

    /// File of the en passant square active before this move
    #[inline]
    #[must_use]
    pub const fn prior_en_passant_file(self) -> Option<u8> {
        if self.0 & PRIOR_EP_BIT != 0 {
            Some(((self.0 >> PRIOR_EP_FILE_SHIFT) & 0x7) as u8)
        } else {
            None
        }
    }

    /// Origin, destination and promotion packed into 15 bits. Two moves with
    /// the same key perform the same action, whatever position they came from.
    #[inline]
    #[must_use]
    pub const fn key(self) -> u16 {
        (self.0 & 0xFFF) as u16 | (((self.0 >> PROMOTION_SHIFT) & PIECE_MASK) as u16) << 12
    }

    /// Returns true for the null move
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Get the raw 32-bit value
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Create from raw 32-bit value
    #[inline]
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Move(value)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "={}", promo.to_char().to_ascii_uppercase())?;
        }
        if let Some(captured) = self.captured() {
            write!(f, " x{}", captured.to_char())?;
        }
        if self.is_castling() {
            write!(f, " castle")?;
        }
        if self.is_en_passant() {
            write!(f, " ep")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;
pub(crate) const MAX_PLY: usize = 128;
pub(crate) const EMPTY_MOVE: Move = Move::null();

/// List of moves with fixed-size backing array.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub(crate) fn new() -> Self {
        MoveList {
            moves: [EMPTY_MOVE; MAX_MOVES],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES);
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Move> {
        self.as_slice().get(idx).copied()
    }

    #[must_use]
    pub fn first(&self) -> Option<Move> {
        self.get(0)
    }

    /// Find the generated move performing the same action as `key`
    #[must_use]
    pub fn find_key(&self, key: u16) -> Option<Move> {
        self.iter().copied().find(|m| m.key() == key)
    }

    /// Returns true if a move performing the same action is present
    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.find_key(mv.key()).is_some()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.as_slice()[idx]
    }
}

/// A scored move for move ordering.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Fixed-size list of scored moves to avoid heap allocation.
#[derive(Clone, Debug)]
pub(crate) struct ScoredMoveList {
    moves: [ScoredMove; MAX_MOVES],
    len: usize,
}

impl ScoredMoveList {
    pub fn new() -> Self {
        ScoredMoveList {
            moves: [ScoredMove {
                mv: EMPTY_MOVE,
                score: 0,
            }; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move, score: i32) {
        self.moves[self.len] = ScoredMove { mv, score };
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Partial sort: find the best move from index `start` onwards and swap it to position `start`.
    /// Incremental selection sort avoids ordering moves that an early cutoff never reaches.
    #[inline]
    pub fn pick_best(&mut self, start: usize) -> Option<ScoredMove> {
        if start >= self.len {
            return None;
        }

        let mut best_idx = start;
        let mut best_score = self.moves[start].score;
        for i in (start + 1)..self.len {
            if self.moves[i].score > best_score {
                best_score = self.moves[i].score;
                best_idx = i;
            }
        }

        if best_idx != start {
            self.moves.swap(start, best_idx);
        }

        Some(self.moves[start])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().expect("valid square")
    }

    #[test]
    fn test_fields_unpack() {
        let mv = Move::new(sq("e7"), sq("d8"), Piece::Pawn, Color::White)
            .with_capture(Piece::Rook)
            .with_promotion(Piece::Knight)
            .with_context(0b1000, Some(sq("c6")));
        assert_eq!(mv.from(), sq("e7"));
        assert_eq!(mv.to(), sq("d8"));
        assert_eq!(mv.piece(), Piece::Pawn);
        assert_eq!(mv.color(), Color::White);
        assert_eq!(mv.captured(), Some(Piece::Rook));
        assert_eq!(mv.promotion(), Some(Piece::Knight));
        assert_eq!(mv.castling_delta(), 0b1000);
        assert_eq!(mv.prior_en_passant_file(), Some(2));
        assert!(!mv.is_en_passant());
        assert!(!mv.is_castling());
        assert_eq!(mv.to_string(), "e7d8n");
    }

    #[test]
    fn test_black_mover_uses_top_bit() {
        let mv = Move::new(sq("g8"), sq("f6"), Piece::Knight, Color::Black);
        assert_eq!(mv.color(), Color::Black);
        assert_eq!(mv.as_u32() >> 31, 1);
        assert!(mv.is_quiet());
        assert_eq!(mv.prior_en_passant_file(), None);
    }

    #[test]
    fn test_en_passant_records_pawn_capture() {
        let mv = Move::new(sq("e5"), sq("d6"), Piece::Pawn, Color::White).with_en_passant();
        assert!(mv.is_en_passant());
        assert!(mv.is_capture());
        assert_eq!(mv.captured(), Some(Piece::Pawn));
    }

    #[test]
    fn test_key_ignores_context() {
        let a = Move::new(sq("e2"), sq("e4"), Piece::Pawn, Color::White);
        let b = a.with_context(0b0011, Some(sq("d6")));
        assert_ne!(a, b);
        assert_eq!(a.key(), b.key());
        assert!(a.is_double_pawn_push());
    }

    #[test]
    fn test_pick_best_orders_descending() {
        let mut list = ScoredMoveList::new();
        let m = |to: &str| Move::new(sq("a1"), sq(to), Piece::Rook, Color::White);
        list.push(m("a2"), 5);
        list.push(m("a3"), 50);
        list.push(m("a4"), 20);
        let order: Vec<i32> = (0..list.len())
            .filter_map(|i| list.pick_best(i).map(|s| s.score))
            .collect();
        assert_eq!(order, vec![50, 20, 5]);
    }
}
