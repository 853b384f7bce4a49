//! Search algorithms and supporting tables.
//!
//! Implements iterative-deepening alpha-beta (negamax form) with aspiration
//! windows, a transposition table, killer and history move ordering and a
//! capture-only quiescence search. A search is cancelled cooperatively through
//! a wall-clock deadline or a shared stop flag.

mod alphabeta;
mod constants;
mod move_order;
mod params;

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use crate::eval::Evaluator;
use crate::tt::TranspositionTable;

use super::attack_tables::AttackTables;
use super::state::Position;
use super::types::{Move, MAX_PLY};

use alphabeta::SearchContext;

pub use constants::{DEFAULT_TT_MB, DRAW_SCORE, INFINITY, MATE_SCORE, MATE_THRESHOLD};
pub use params::SearchConfig;

/// Outcome of a completed (or cancelled) search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, `None` only when the side to move has no legal moves
    pub best_move: Option<Move>,
    /// Score of `best_move` in centipawns from the side to move
    pub score: i32,
    /// Deepest iteration that finished
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
}

impl SearchResult {
    /// Returns true if the score reports a forced mate for either side
    #[must_use]
    pub fn is_mate(&self) -> bool {
        self.score.abs() >= MATE_THRESHOLD
    }
}

/// Killer moves: quiet moves that caused a beta cutoff, two per ply.
#[derive(Clone, Debug)]
pub struct KillerTable {
    slots: [[Option<Move>; 2]; MAX_PLY],
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    #[must_use]
    pub fn new() -> Self {
        KillerTable {
            slots: [[None; 2]; MAX_PLY],
        }
    }

    #[must_use]
    pub fn primary(&self, ply: usize) -> Option<Move> {
        self.slots.get(ply).and_then(|row| row[0])
    }

    #[must_use]
    pub fn secondary(&self, ply: usize) -> Option<Move> {
        self.slots.get(ply).and_then(|row| row[1])
    }

    /// Returns the killer slot (0 or 1) matching `mv` at `ply`.
    #[must_use]
    pub fn slot_of(&self, ply: usize, mv: Move) -> Option<usize> {
        let row = self.slots.get(ply)?;
        row.iter()
            .position(|killer| killer.is_some_and(|k| k.key() == mv.key()))
    }

    pub fn update(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        if self.slots[ply][0].is_some_and(|k| k.key() == mv.key()) {
            return;
        }
        self.slots[ply][1] = self.slots[ply][0];
        self.slots[ply][0] = Some(mv);
    }

    pub fn clear(&mut self) {
        self.slots = [[None; 2]; MAX_PLY];
    }
}

/// Butterfly history indexed by from/to square.
#[derive(Clone, Debug)]
pub struct HistoryTable {
    entries: [i32; 4096],
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    #[must_use]
    pub fn new() -> Self {
        HistoryTable { entries: [0; 4096] }
    }

    fn index(mv: Move) -> usize {
        mv.from().as_usize() * 64 + mv.to().as_usize()
    }

    #[must_use]
    pub fn score(&self, mv: Move) -> i32 {
        self.entries[Self::index(mv)]
    }

    /// Reward a quiet move that caused a beta cutoff
    pub fn update(&mut self, mv: Move, depth: u32) {
        let bonus = i32::try_from(depth.saturating_mul(depth)).unwrap_or(i32::MAX);
        let entry = &mut self.entries[Self::index(mv)];
        *entry = entry.saturating_add(bonus);
    }

    pub fn clear(&mut self) {
        self.entries.fill(0);
    }
}

/// Occurrence counts of positions already played in the game, by hash.
#[derive(Clone, Debug, Default)]
pub struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, hash: u64) {
        *self.counts.entry(hash).or_insert(0) += 1;
    }

    #[must_use]
    pub fn count(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

/// State carried between searches.
///
/// The transposition table and the game's repetition counts survive from one
/// search to the next; killers and history are reset at the start of each.
#[derive(Clone, Debug)]
pub struct SearchState {
    pub tt: TranspositionTable,
    pub killers: KillerTable,
    pub history: HistoryTable,
    pub repetitions: RepetitionTable,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(DEFAULT_TT_MB)
    }
}

impl SearchState {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        SearchState {
            tt: TranspositionTable::new(tt_mb),
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            repetitions: RepetitionTable::new(),
        }
    }

    /// Prepare the per-search tables for a fresh search
    pub fn new_search(&mut self) {
        self.killers.clear();
        self.history.clear();
    }

    /// Note that a position occurred in the game being played
    pub fn record_position(&mut self, hash: u64) {
        self.repetitions.record(hash);
    }

    /// Forget everything, including the transposition table
    pub fn clear(&mut self) {
        self.tt.clear();
        self.killers.clear();
        self.history.clear();
        self.repetitions.clear();
    }
}

/// Search `position` for the best move.
///
/// Runs iterative deepening until `config.max_depth` completes, the time
/// budget expires or `stop` is raised. The move from the deepest completed
/// iteration is returned; if not even the first iteration finished, the first
/// legal move is played instead.
pub fn find_best_move<E: Evaluator + ?Sized>(
    position: &Position,
    tables: &AttackTables,
    evaluator: &E,
    state: &mut SearchState,
    config: &SearchConfig,
    stop: &AtomicBool,
) -> SearchResult {
    state.new_search();
    let mut ctx = SearchContext::new(*position, tables, evaluator, state, config, stop);
    ctx.iterative_deepening()
}
