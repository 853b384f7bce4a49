use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_ASPIRATION_WINDOW, DEFAULT_MAX_DEPTH, DEFAULT_REPETITION_PENALTY,
    DEFAULT_STAND_PAT_MARGIN, DEFAULT_TIME_BUDGET_MS, DEFAULT_TT_MB,
};

/// Configuration for a search operation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConfig {
    /// Deepest iteration to attempt
    pub max_depth: u32,
    /// Wall-clock budget; `None` searches until `max_depth` or a stop request
    pub time_budget: Option<Duration>,
    /// Transposition table size for states built from this config
    pub tt_mb: usize,
    /// Half-width of the aspiration window around the previous score
    pub aspiration_window: i32,
    /// At the horizon, a side this far ahead (and not in check) skips quiescence
    pub stand_pat_margin: i32,
    /// Subtracted from a root move that repeats a position for a side ahead
    pub repetition_penalty: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            time_budget: Some(Duration::from_millis(DEFAULT_TIME_BUDGET_MS)),
            tt_mb: DEFAULT_TT_MB,
            aspiration_window: DEFAULT_ASPIRATION_WINDOW,
            stand_pat_margin: DEFAULT_STAND_PAT_MARGIN,
            repetition_penalty: DEFAULT_REPETITION_PENALTY,
        }
    }
}

impl SearchConfig {
    /// Create a depth-limited search config with no time budget
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchConfig {
            max_depth,
            time_budget: None,
            ..Default::default()
        }
    }

    /// Create a time-limited search config
    #[must_use]
    pub fn time(budget: Duration) -> Self {
        SearchConfig {
            time_budget: Some(budget),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }

    #[must_use]
    pub fn with_tt_mb(mut self, tt_mb: usize) -> Self {
        self.tt_mb = tt_mb;
        self
    }

    #[must_use]
    pub fn with_aspiration_window(mut self, window: i32) -> Self {
        self.aspiration_window = window;
        self
    }

    #[must_use]
    pub fn with_stand_pat_margin(mut self, margin: i32) -> Self {
        self.stand_pat_margin = margin;
        self
    }

    #[must_use]
    pub fn with_repetition_penalty(mut self, penalty: i32) -> Self {
        self.repetition_penalty = penalty;
        self
    }
}
