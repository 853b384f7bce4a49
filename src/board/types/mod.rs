//! Core chess types.
//!
//! This module contains the fundamental types used throughout the engine:
//! - `Piece` and `Color` - chess piece types and colors
//! - `Square` - board square as a 0..64 bitboard index
//! - `Bitboard` - 64-bit set of squares
//! - `Move` and `MoveList` - packed reversible moves
//! - `CastlingRights` and `CastleSide` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::{CastleSide, CastlingRights};
pub use moves::{Move, MoveList};
pub use piece::{Color, Piece};
pub use square::Square;

pub(crate) use castling::rights_touched_by;
pub(crate) use moves::{ScoredMoveList, MAX_PLY};
pub(crate) use piece::PROMOTION_PIECES;
