//! Search constants.
//!
//! Contains the fixed scores and ordering priorities used by the alpha-beta
//! search. Tunable margins live in [`SearchConfig`](super::SearchConfig).

use crate::board::types::MAX_PLY;

// ============================================================================
// SCORES
// ============================================================================

/// Bound used for open alpha-beta windows
pub const INFINITY: i32 = 30_000;

/// Scores with absolute value >= this are considered checkmate scores
pub const MATE_THRESHOLD: i32 = 28_000;

/// Score of being mated at the root; mates further away score closer to zero
pub const MATE_SCORE: i32 = MATE_THRESHOLD + MAX_PLY as i32;

/// Stalemate
pub const DRAW_SCORE: i32 = 0;

/// Static eval (side to move) above which a repeated position is penalized
pub const REPETITION_EVAL_THRESHOLD: i32 = 200;

// ============================================================================
// DEFAULT CONFIGURATION
// ============================================================================

pub const DEFAULT_MAX_DEPTH: u32 = 15;
pub const DEFAULT_TIME_BUDGET_MS: u64 = 14_950;
pub const DEFAULT_TT_MB: usize = 64;
pub const DEFAULT_ASPIRATION_WINDOW: i32 = 150;
pub const DEFAULT_STAND_PAT_MARGIN: i32 = 1_800;
pub const DEFAULT_REPETITION_PENALTY: i32 = MATE_SCORE / 2;

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================
// Higher scores = tried earlier. PV > captures > checks > killers > history.
// Each tier's base exceeds everything the tiers below it can add up to.

/// Principal variation move from the previous iteration or the TT
pub const PV_SCORE: i32 = 1_000_000;

/// Base for captures; MVV-LVA is added on top
pub const CAPTURE_SCORE: i32 = 100_000;

/// Moves that give check
pub const CHECK_BONUS: i32 = 20_000;

/// First killer move (quiet that caused beta cutoff at same ply)
pub const KILLER1_SCORE: i32 = 8_000;

/// Second killer move (replaced killer)
pub const KILLER2_SCORE: i32 = 7_000;

/// History scores are capped so they never outrank a killer
pub const HISTORY_MAX: i32 = 6_000;

/// Destination-square tiebreak, indexed `[rank][file]`
pub const CENTER_CONTROL_BONUS: [[i32; 8]; 8] = [
    [0, 0, 2, 2, 2, 2, 0, 0],
    [0, 2, 5, 5, 5, 5, 2, 0],
    [2, 5, 7, 10, 10, 7, 5, 2],
    [2, 5, 10, 12, 12, 10, 5, 2],
    [2, 5, 10, 12, 12, 10, 5, 2],
    [2, 5, 7, 10, 10, 7, 5, 2],
    [0, 2, 5, 5, 5, 5, 2, 0],
    [0, 0, 2, 2, 2, 2, 0, 0],
];
