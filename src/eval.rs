//! Static evaluation interface.
//!
//! The search treats evaluation as a pure function of the position. Scores are
//! centipawns from White's point of view; the search applies the side-to-move
//! sign itself.

use crate::board::Position;

/// A deterministic static evaluator.
pub trait Evaluator: Send + Sync {
    /// Score `position` in centipawns, positive when White is better.
    fn evaluate(&self, position: &Position) -> i32;
}

/// Plain material count, kings excluded.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, position: &Position) -> i32 {
        position.material_balance()
    }
}

impl<F> Evaluator for F
where
    F: Fn(&Position) -> i32 + Send + Sync,
{
    fn evaluate(&self, position: &Position) -> i32 {
        self(position)
    }
}
