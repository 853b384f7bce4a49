//! Core search implementation.
//!
//! This module implements:
//! - Iterative deepening with aspiration windows
//! - Negamax alpha-beta with transposition table cutoffs
//! - Quiescence search over captures
//! - Move ordering (PV move, MVV-LVA, checks, killers, history)
//!
//! Every node returns `Option<i32>`; `None` means the search was cancelled
//! and the caller must discard the partial result.

mod iterative;
mod quiescence;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::eval::Evaluator;
use crate::tt::BoundType;

use super::constants::{
    CHECK_BONUS, DRAW_SCORE, HISTORY_MAX, INFINITY, KILLER1_SCORE, KILLER2_SCORE, MATE_SCORE,
    MATE_THRESHOLD, PV_SCORE, REPETITION_EVAL_THRESHOLD,
};
use super::move_order::{center_bonus, mvv_lva, promotion_bonus};
use super::{SearchConfig, SearchState};
use crate::board::attack_tables::AttackTables;
use crate::board::state::Position;
use crate::board::types::{Move, MoveList, ScoredMoveList, MAX_PLY};

/// Search context for a single search
pub(crate) struct SearchContext<'a, E: Evaluator + ?Sized> {
    position: Position,
    tables: &'a AttackTables,
    evaluator: &'a E,
    state: &'a mut SearchState,
    config: &'a SearchConfig,
    stop: &'a AtomicBool,
    start_time: Instant,
    deadline: Option<Instant>,
    nodes: u64,
    stopped: bool,
    /// Best root move of the last completed iteration
    pv_move: Option<Move>,
    /// Static eval of the root for the side to move
    root_eval: i32,
}

/// Mate scores are stored relative to the node so they stay valid when the
/// same position is reached at another ply.
fn score_to_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score >= MATE_THRESHOLD {
        score + ply
    } else if score <= -MATE_THRESHOLD {
        score - ply
    } else {
        score
    }
}

fn score_from_tt(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score >= MATE_THRESHOLD {
        score - ply
    } else if score <= -MATE_THRESHOLD {
        score + ply
    } else {
        score
    }
}

fn bound_for(score: i32, alpha: i32, beta: i32) -> BoundType {
    if score <= alpha {
        BoundType::UpperBound
    } else if score >= beta {
        BoundType::LowerBound
    } else {
        BoundType::Exact
    }
}

impl<'a, E: Evaluator + ?Sized> SearchContext<'a, E> {
    pub(crate) fn new(
        position: Position,
        tables: &'a AttackTables,
        evaluator: &'a E,
        state: &'a mut SearchState,
        config: &'a SearchConfig,
        stop: &'a AtomicBool,
    ) -> Self {
        let start_time = Instant::now();
        let deadline = config
            .time_budget
            .and_then(|budget| start_time.checked_add(budget));
        SearchContext {
            position,
            tables,
            evaluator,
            state,
            config,
            stop,
            start_time,
            deadline,
            nodes: 0,
            stopped: false,
            pv_move: None,
            root_eval: 0,
        }
    }

    /// Check whether the search has to be abandoned
    #[inline]
    fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if self.stop.load(Ordering::Relaxed) {
            self.stopped = true;
        } else if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.stopped = true;
            }
        }
        self.stopped
    }

    /// Static evaluation from the side to move, kept clear of mate scores
    #[inline]
    fn evaluate(&self) -> i32 {
        let white = self
            .evaluator
            .evaluate(&self.position)
            .clamp(-(MATE_THRESHOLD - 1), MATE_THRESHOLD - 1);
        white * self.position.side_to_move().sign()
    }

    fn move_score(&self, mv: Move, ply: usize) -> i32 {
        let mut score = mvv_lva(mv) + promotion_bonus(mv);
        if self.position.gives_check(self.tables, mv) {
            score += CHECK_BONUS;
        }
        if mv.is_quiet() {
            score += match self.state.killers.slot_of(ply, mv) {
                Some(0) => KILLER1_SCORE,
                Some(_) => KILLER2_SCORE,
                None => self.state.history.score(mv).min(HISTORY_MAX),
            };
        }
        score + center_bonus(mv.to())
    }

    fn order_moves(&self, moves: &MoveList, pv_move: Option<Move>, ply: usize) -> ScoredMoveList {
        let pv_key = pv_move.map(Move::key);
        let mut scored = ScoredMoveList::new();
        for &mv in moves {
            let score = if pv_key == Some(mv.key()) {
                PV_SCORE
            } else {
                self.move_score(mv, ply)
            };
            scored.push(mv, score);
        }
        scored
    }

    /// Search every root move to `depth` inside `(alpha, beta)`.
    ///
    /// Returns the best score and move, or `None` if the search was stopped
    /// before the iteration finished.
    fn search_root(&mut self, depth: u32, mut alpha: i32, beta: i32) -> Option<(i32, Option<Move>)> {
        let original_alpha = alpha;
        let moves = self.position.generate_moves(self.tables);
        let mut ordered = self.order_moves(&moves, self.pv_move, 0);

        let mut best_score = -INFINITY;
        let mut best_move = None;
        let mut penalized = false;

        for i in 0..ordered.len() {
            let Some(scored) = ordered.pick_best(i) else {
                break;
            };
            let mv = scored.mv;

            self.position.apply(mv);
            let child_hash = self.position.hash();
            let child = self.alphabeta(depth - 1, -beta, -alpha, 1);
            self.position.undo(mv);
            let mut score = -child?;

            if self.state.repetitions.count(child_hash) >= 2
                && self.root_eval > REPETITION_EVAL_THRESHOLD
            {
                score -= self.config.repetition_penalty;
                penalized = true;
            }

            // A penalized score may sink below -INFINITY
            if score > best_score || best_move.is_none() {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        // Penalties depend on the game history, not on the position, so a
        // penalized root score must not be reused through the TT.
        if !penalized {
            let bound = bound_for(best_score, original_alpha, beta);
            self.state
                .tt
                .store(self.position.hash(), depth, score_to_tt(best_score, 0), bound, best_move);
        }
        Some((best_score, best_move))
    }

    /// Negamax alpha-beta below the root
    fn alphabeta(&mut self, depth: u32, mut alpha: i32, mut beta: i32, ply: usize) -> Option<i32> {
        if self.should_stop() {
            return None;
        }

        let us = self.position.side_to_move();
        let in_check = self.position.is_in_check(self.tables, us);

        if depth == 0 {
            let eval = self.evaluate();
            if eval >= self.config.stand_pat_margin && !in_check {
                self.nodes += 1;
                return Some(eval);
            }
            return self.quiesce(alpha, beta, ply);
        }
        self.nodes += 1;
        if ply >= MAX_PLY - 1 {
            return Some(self.evaluate());
        }

        let hash = self.position.hash();
        let mut tt_move = None;
        if let Some(entry) = self.state.tt.probe(hash) {
            tt_move = entry.best_move();
            if entry.depth() >= depth {
                let tt_score = score_from_tt(entry.score(), ply);
                match entry.bound_type() {
                    BoundType::Exact => return Some(tt_score),
                    BoundType::LowerBound => alpha = alpha.max(tt_score),
                    BoundType::UpperBound => beta = beta.min(tt_score),
                }
                if alpha >= beta {
                    return Some(tt_score);
                }
            }
        }
        let original_alpha = alpha;

        let moves = self.position.generate_moves(self.tables);
        if moves.is_empty() {
            return Some(if in_check {
                -(MATE_SCORE - ply as i32)
            } else {
                DRAW_SCORE
            });
        }

        let mut ordered = self.order_moves(&moves, tt_move, ply);
        let mut best_score = -INFINITY;
        let mut best_move = None;

        for i in 0..ordered.len() {
            let Some(scored) = ordered.pick_best(i) else {
                break;
            };
            let mv = scored.mv;

            self.position.apply(mv);
            let child = self.alphabeta(depth - 1, -beta, -alpha, ply + 1);
            self.position.undo(mv);
            let score = -child?;

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                if mv.is_quiet() {
                    self.state.killers.update(ply, mv);
                    self.state.history.update(mv, depth);
                }
                break;
            }
        }

        let bound = bound_for(best_score, original_alpha, beta);
        self.state
            .tt
            .store(hash, depth, score_to_tt(best_score, ply), bound, best_move);
        Some(best_score)
    }
}
