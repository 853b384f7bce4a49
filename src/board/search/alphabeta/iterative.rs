use log::{debug, trace, warn};

use super::SearchContext;
use crate::board::search::constants::{DRAW_SCORE, INFINITY, MATE_SCORE, MATE_THRESHOLD};
use crate::board::search::SearchResult;
use crate::board::types::{Move, MAX_PLY};
use crate::eval::Evaluator;

impl<E: Evaluator + ?Sized> SearchContext<'_, E> {
    /// Iterative deepening with aspiration windows
    pub(crate) fn iterative_deepening(&mut self) -> SearchResult {
        let root_moves = self.position.generate_moves(self.tables);
        self.root_eval = self.evaluate();

        if root_moves.is_empty() {
            let us = self.position.side_to_move();
            let score = if self.position.is_in_check(self.tables, us) {
                -MATE_SCORE
            } else {
                DRAW_SCORE
            };
            return self.result(None, score, 0);
        }

        let max_depth = self.config.max_depth.min(MAX_PLY as u32 - 1);
        let window = self.config.aspiration_window;
        let mut best_move: Option<Move> = None;
        let mut best_score = self.root_eval;
        let mut completed_depth = 0;

        for depth in 1..=max_depth {
            if self.should_stop() {
                break;
            }

            let (alpha, beta) = if depth == 1 {
                (-INFINITY, INFINITY)
            } else {
                (
                    best_score.saturating_sub(window).max(-INFINITY),
                    best_score.saturating_add(window).min(INFINITY),
                )
            };

            let mut outcome = self.search_root(depth, alpha, beta);
            if let Some((score, _)) = outcome {
                let full_window = alpha == -INFINITY && beta == INFINITY;
                if !full_window && (score <= alpha || score >= beta) {
                    trace!("depth {depth}: score {score} outside ({alpha}, {beta}), re-searching");
                    outcome = self.search_root(depth, -INFINITY, INFINITY);
                }
            }

            let Some((score, mv)) = outcome else {
                debug!("depth {depth} abandoned after {} nodes", self.nodes);
                break;
            };

            completed_depth = depth;
            best_score = score;
            if let Some(mv) = mv {
                best_move = Some(mv);
                self.pv_move = Some(mv);
            }

            debug!(
                "depth {depth} score {score} nodes {} time {}ms hashfull {} best {}",
                self.nodes,
                self.start_time.elapsed().as_millis(),
                self.state.tt.hashfull_per_mille(),
                best_move.map_or_else(|| "-".to_string(), |m| m.to_string())
            );

            // A proven mate cannot get shorter at a greater depth
            if score.abs() >= MATE_THRESHOLD {
                break;
            }
        }

        if best_move.is_none() {
            warn!("no search iteration completed, playing first legal move");
            best_move = root_moves.first();
            best_score = self.root_eval;
        }

        self.result(best_move, best_score, completed_depth)
    }

    fn result(&self, best_move: Option<Move>, score: i32, depth: u32) -> SearchResult {
        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
            elapsed: self.start_time.elapsed(),
        }
    }
}
