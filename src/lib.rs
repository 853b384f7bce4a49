pub mod board;
pub mod engine;
pub mod eval;
pub mod tt;
pub mod zobrist;

pub use board::{AttackTables, Color, Move, Piece, Position, Square};
pub use engine::EngineController;
pub use eval::{Evaluator, MaterialEvaluator};
pub use tt::TranspositionTable;
