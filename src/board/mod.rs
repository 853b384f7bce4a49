//! Chess board representation and game logic.
//!
//! Positions are sixteen bitboards plus an incrementally maintained Zobrist
//! hash. Sliding attacks come from magic-indexed tables built once into an
//! immutable [`AttackTables`] value that is passed to move generation and
//! search.
//!
//! # Example
//! ```
//! use magic_chess::board::{AttackTables, Position};
//!
//! let tables = AttackTables::shared().unwrap();
//! let position = Position::startpos();
//! let moves = position.generate_moves(tables);
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod attack_tables;
mod builder;
mod error;
mod make_unmake;
mod movegen;
mod search;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use attack_tables::{enumerate_blocker_subsets, AttackTables, Slider};
pub use builder::PositionBuilder;
pub use error::{EngineError, MoveError, PositionError, SquareError};
pub use state::Position;
pub use types::{
    Bitboard, BitboardIter, CastleSide, CastlingRights, Color, Move, MoveList, Piece, Square,
};

// Public API - search functions and configuration
pub use search::{
    find_best_move, HistoryTable, KillerTable, RepetitionTable, SearchConfig, SearchResult,
    SearchState, DEFAULT_TT_MB, DRAW_SCORE, INFINITY, MATE_SCORE, MATE_THRESHOLD,
};
