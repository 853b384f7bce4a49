//! Error types for board and engine operations.

use thiserror::Error;

use super::attack_tables::Slider;
use super::types::{CastleSide, Color, Move, Piece, Square};

/// Errors raised while setting up or driving the engine.
///
/// Magic search exhaustion is configuration-fatal: an engine without attack
/// tables cannot run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No collision-free magic number was found within the attempt budget
    #[error("no magic number found for {slider} on {square} after {attempts} attempts")]
    MagicSearchExhausted {
        square: Square,
        slider: Slider,
        attempts: u32,
    },

    /// The search worker thread could not be started
    #[error("failed to spawn search worker: {reason}")]
    WorkerSpawn { reason: String },

    /// The search worker thread panicked before reporting a result
    #[error("search worker panicked")]
    WorkerPanicked,
}

/// Error type for square parsing failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Index outside 0..64
    #[error("square index {index} out of range (must be 0-63)")]
    IndexOutOfRange { index: u8 },
    /// Invalid algebraic notation
    #[error("invalid square notation '{notation}'")]
    InvalidNotation { notation: String },
}

/// Validation failures from [`PositionBuilder`](super::builder::PositionBuilder).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("{color} has no king")]
    MissingKing { color: Color },

    #[error("{color} has {count} kings")]
    MultipleKings { color: Color, count: u32 },

    #[error("square {square} is already occupied")]
    SquareOccupied { square: Square },

    #[error("{color} pawn on back rank square {square}")]
    PawnOnBackRank { color: Color, square: Square },

    #[error("{color} cannot castle {side:?}: king or rook not on its home square")]
    InvalidCastlingRights { color: Color, side: CastleSide },

    #[error("invalid en passant square {square}")]
    InvalidEnPassant { square: Square },

    #[error("{color} has {count} pieces (at most 16)")]
    TooManyPieces { color: Color, count: u32 },

    #[error("{color} has {count} pawns (at most 8)")]
    TooManyPawns { color: Color, count: u32 },

    /// More pieces above the starting set than pawns that could have promoted
    #[error("{color} has {promoted} promoted pieces but only {missing_pawns} missing pawns")]
    ImpossiblePromotions {
        color: Color,
        promoted: u32,
        missing_pawns: u32,
    },

    /// The side that just moved left its king in check
    #[error("{color} is in check but not to move")]
    OpponentInCheck { color: Color },

    #[error(transparent)]
    Tables(#[from] EngineError),
}

/// Errors from applying a caller-supplied move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Move is not legal in the current position
    #[error("illegal move {mv}")]
    IllegalMove { mv: Move },

    /// No piece of the side to move stands on the origin square
    #[error("no {piece:?} of the side to move on {square}")]
    NoPiece { piece: Piece, square: Square },
}
