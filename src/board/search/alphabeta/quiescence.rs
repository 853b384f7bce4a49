use super::SearchContext;
use crate::board::search::move_order::{mvv_lva, promotion_bonus};
use crate::board::types::{ScoredMoveList, MAX_PLY};
use crate::eval::Evaluator;

impl<E: Evaluator + ?Sized> SearchContext<'_, E> {
    /// Quiescence search: resolve captures until the position is quiet.
    ///
    /// The static evaluation serves as a stand-pat lower bound. No TT.
    pub(super) fn quiesce(&mut self, mut alpha: i32, beta: i32, ply: usize) -> Option<i32> {
        if self.should_stop() {
            return None;
        }
        self.nodes += 1;

        let stand_pat = self.evaluate();
        if ply >= MAX_PLY - 1 || stand_pat >= beta {
            return Some(stand_pat);
        }
        alpha = alpha.max(stand_pat);

        let mut ordered = ScoredMoveList::new();
        for &mv in &self.position.generate_captures(self.tables) {
            ordered.push(mv, mvv_lva(mv) + promotion_bonus(mv));
        }

        let mut best_score = stand_pat;
        for i in 0..ordered.len() {
            let Some(scored) = ordered.pick_best(i) else {
                break;
            };
            let mv = scored.mv;

            self.position.apply(mv);
            let child = self.quiesce(-beta, -alpha, ply + 1);
            self.position.undo(mv);
            let score = -child?;

            if score >= beta {
                return Some(score);
            }
            if score > best_score {
                best_score = score;
            }
            if score > alpha {
                alpha = score;
            }
        }

        Some(best_score)
    }
}
