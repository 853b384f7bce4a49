//! Castling rights type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;
use super::square::Square;

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

/// All castling rights combined
pub(crate) const ALL_CASTLING_RIGHTS: u8 =
    CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Which wing a castling move goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::King, CastleSide::Queen];

    /// King origin and destination, rook origin and destination.
    #[must_use]
    pub(crate) const fn squares(self, color: Color) -> CastleSquares {
        let base = color.back_rank() * 8;
        match self {
            CastleSide::King => CastleSquares {
                king_from: Square::from_index_unchecked(base + 4),
                king_to: Square::from_index_unchecked(base + 6),
                rook_from: Square::from_index_unchecked(base + 7),
                rook_to: Square::from_index_unchecked(base + 5),
                empty: 0b0110_0000u64 << base,
            },
            CastleSide::Queen => CastleSquares {
                king_from: Square::from_index_unchecked(base + 4),
                king_to: Square::from_index_unchecked(base + 2),
                rook_from: Square::from_index_unchecked(base),
                rook_to: Square::from_index_unchecked(base + 3),
                empty: 0b0000_1110u64 << base,
            },
        }
    }
}

/// The fixed squares involved in one castling move.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CastleSquares {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty
    pub empty: u64,
}

/// Castling rights represented as a bitmask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All castling rights (both sides can castle kingside and queenside)
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    /// Check if a specific castling right is set
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit_for(color, side) != 0
    }

    /// Set a specific castling right
    #[inline]
    pub fn set(&mut self, color: Color, side: CastleSide) {
        self.0 |= Self::bit_for(color, side);
    }

    /// Remove a specific castling right
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::bit_for(color, side);
    }

    /// True once the king of `color` has lost both castling rights.
    #[inline]
    #[must_use]
    pub const fn king_has_moved(self, color: Color) -> bool {
        !self.has(color, CastleSide::King) && !self.has(color, CastleSide::Queen)
    }

    /// Get the raw bitmask value
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Create from raw bitmask value
    #[inline]
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        CastlingRights(value & ALL_CASTLING_RIGHTS)
    }

    /// Get the bit for a specific castling right
    #[inline]
    pub(crate) const fn bit_for(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::King) => CASTLE_WHITE_K,
            (Color::White, CastleSide::Queen) => CASTLE_WHITE_Q,
            (Color::Black, CastleSide::King) => CASTLE_BLACK_K,
            (Color::Black, CastleSide::Queen) => CASTLE_BLACK_Q,
        }
    }
}

/// Rights lost when a piece leaves or lands on `sq`.
#[inline]
pub(crate) const fn rights_touched_by(sq: Square) -> u8 {
    match sq.index() {
        0 => CASTLE_WHITE_Q,
        4 => CASTLE_WHITE_K | CASTLE_WHITE_Q,
        7 => CASTLE_WHITE_K,
        56 => CASTLE_BLACK_Q,
        60 => CASTLE_BLACK_K | CASTLE_BLACK_Q,
        63 => CASTLE_BLACK_K,
        _ => 0,
    }
}
