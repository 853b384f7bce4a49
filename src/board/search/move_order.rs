//! Move ordering utilities for search.

use super::constants::{CAPTURE_SCORE, CENTER_CONTROL_BONUS};
use crate::board::{Move, Piece, Square};

/// Attacker weight for MVV-LVA. The king is capped so that king captures
/// still sort among captures.
const fn attacker_value(piece: Piece) -> i32 {
    match piece {
        Piece::King => 1_000,
        other => other.value(),
    }
}

/// Most-valuable-victim / least-valuable-attacker bonus for a capture,
/// zero for anything else.
#[must_use]
pub(crate) fn mvv_lva(mv: Move) -> i32 {
    match mv.captured() {
        Some(victim) => CAPTURE_SCORE + victim.value() * 10 - attacker_value(mv.piece()),
        None => 0,
    }
}

/// Small bonus for moves landing near the centre
#[must_use]
pub(crate) fn center_bonus(sq: Square) -> i32 {
    CENTER_CONTROL_BONUS[usize::from(sq.rank())][usize::from(sq.file())]
}

/// Extra weight for promotions so queening is tried before underpromotion
#[must_use]
pub(crate) fn promotion_bonus(mv: Move) -> i32 {
    mv.promotion().map_or(0, Piece::value)
}
