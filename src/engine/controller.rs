//! Engine controller implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::debug;
use parking_lot::Mutex;

use crate::board::{
    find_best_move, AttackTables, EngineError, Move, MoveError, Position, SearchConfig,
    SearchResult, SearchState,
};
use crate::eval::{Evaluator, MaterialEvaluator};
use crate::tt::TranspositionTable;

/// Search thread stack size (32 MB)
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

/// A search running on its worker thread
pub struct SearchJob {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<SearchResult>,
}

impl SearchJob {
    /// Ask the search to finish early; the deepest completed result is kept
    pub fn signal_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the worker reports its result
    pub fn wait(self) -> Result<SearchResult, EngineError> {
        self.handle.join().map_err(|_| EngineError::WorkerPanicked)
    }

    /// Stop the search and wait for the thread to finish
    pub fn stop_and_wait(self) -> Result<SearchResult, EngineError> {
        self.signal_stop();
        self.wait()
    }
}

/// Engine controller managing the game position and search state.
///
/// Each search works on a snapshot of the position; only the chosen move is
/// written back, by [`EngineController::play_best_move`].
pub struct EngineController {
    position: Position,
    tables: &'static AttackTables,
    evaluator: Arc<dyn Evaluator>,
    search_state: Arc<Mutex<SearchState>>,
    config: SearchConfig,
}

impl EngineController {
    /// Create a controller at the starting position using material evaluation
    pub fn new(config: SearchConfig) -> Result<Self, EngineError> {
        Self::with_evaluator(MaterialEvaluator, config)
    }

    /// Create a controller with a custom evaluator
    pub fn with_evaluator<E>(evaluator: E, config: SearchConfig) -> Result<Self, EngineError>
    where
        E: Evaluator + 'static,
    {
        let tables = AttackTables::shared()?;
        let mut controller = EngineController {
            position: Position::startpos(),
            tables,
            evaluator: Arc::new(evaluator),
            search_state: Arc::new(Mutex::new(SearchState::new(config.tt_mb))),
            config,
        };
        controller.set_position(Position::startpos());
        Ok(controller)
    }

    /// Get a reference to the current position
    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Replace the game position and restart the repetition history from it
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        let mut state = self.search_state.lock();
        state.repetitions.clear();
        state.record_position(position.hash());
    }

    /// Reset to the starting position, clearing all search tables
    pub fn new_game(&mut self) {
        self.search_state.lock().clear();
        self.set_position(Position::startpos());
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Change the search configuration, resizing the TT if needed
    pub fn set_config(&mut self, config: SearchConfig) {
        if config.tt_mb != self.config.tt_mb {
            let mut state = self.search_state.lock();
            state.tt = TranspositionTable::new(config.tt_mb);
        }
        self.config = config;
    }

    #[must_use]
    pub fn tables(&self) -> &'static AttackTables {
        self.tables
    }

    /// Get a reference to the search state
    #[must_use]
    pub fn search_state(&self) -> &Arc<Mutex<SearchState>> {
        &self.search_state
    }

    /// Execute a closure with mutable access to the search state.
    pub fn with_search_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SearchState) -> R,
    {
        f(&mut self.search_state.lock())
    }

    /// Start searching the current position on a worker thread.
    ///
    /// The worker holds the search state lock for the duration of the search,
    /// so overlapping jobs run one after another.
    pub fn start_search(&self) -> Result<SearchJob, EngineError> {
        let stop = Arc::new(AtomicBool::new(false));

        let position = self.position;
        let tables = self.tables;
        let evaluator = Arc::clone(&self.evaluator);
        let search_state = Arc::clone(&self.search_state);
        let config = self.config.clone();
        let stop_clone = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("search".to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let mut guard = search_state.lock();
                find_best_move(&position, tables, &*evaluator, &mut guard, &config, &stop_clone)
            })
            .map_err(|err| EngineError::WorkerSpawn {
                reason: err.to_string(),
            })?;

        Ok(SearchJob { stop, handle })
    }

    /// Search the current position and play the chosen move.
    ///
    /// Returns `None` without touching the position when there is no legal
    /// move to play.
    pub fn play_best_move(&mut self) -> Result<Option<Move>, EngineError> {
        let result = self.start_search()?.wait()?;
        let Some(mv) = result.best_move else {
            debug!("no legal move in current position");
            return Ok(None);
        };
        debug!(
            "playing {mv} (depth {}, score {}, {} nodes)",
            result.depth, result.score, result.nodes
        );
        self.commit(mv);
        Ok(Some(mv))
    }

    /// Play a move supplied by the caller after checking it is legal
    pub fn play_move(&mut self, mv: Move) -> Result<Move, MoveError> {
        let played = self.position.try_apply(self.tables, mv)?;
        self.search_state.lock().record_position(self.position.hash());
        Ok(played)
    }

    fn commit(&mut self, mv: Move) {
        self.position.apply(mv);
        self.search_state.lock().record_position(self.position.hash());
    }
}
