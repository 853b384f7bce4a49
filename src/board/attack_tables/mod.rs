//! Attack tables for move generation.
//!
//! Leapers (knight, king, pawn captures) use plain per-square lookups. Sliders
//! (bishop, rook, queen) use magic bitboards whose multipliers are searched at
//! construction time.
//!
//! Tables are an explicit immutable value passed to the move generator and the
//! search. [`AttackTables::shared`] lazily builds one process-wide instance.

mod leapers;
mod magic;

use std::time::Instant;

use log::debug;
use once_cell::sync::OnceCell;

use super::error::EngineError;
use super::types::{Bitboard, Color, Square};

use magic::MagicEntry;
pub use magic::{enumerate_blocker_subsets, Slider};
#[cfg(test)]
pub(crate) use magic::{relevant_mask, sliding_attacks};

static SHARED: OnceCell<AttackTables> = OnceCell::new();

/// Precomputed attack sets for every piece type and square.
#[derive(Clone, Debug)]
pub struct AttackTables {
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    pawn: [[Bitboard; 64]; 2],
    bishop: Vec<MagicEntry>,
    rook: Vec<MagicEntry>,
}

impl AttackTables {
    /// Build every table, searching a magic number for each slider square.
    ///
    /// Fails only if some square exhausts its magic search budget.
    pub fn new() -> Result<Self, EngineError> {
        let start = Instant::now();

        let bishop = Self::build_slider(Slider::Bishop)?;
        let rook = Self::build_slider(Slider::Rook)?;

        let bishop_slots: usize = bishop.iter().map(|e| e.attacks.len()).sum();
        let rook_slots: usize = rook.iter().map(|e| e.attacks.len()).sum();
        debug!(
            "attack tables built in {:?} (bishop slots: {}, rook slots: {})",
            start.elapsed(),
            bishop_slots,
            rook_slots
        );

        Ok(AttackTables {
            knight: leapers::knight_table(),
            king: leapers::king_table(),
            pawn: leapers::pawn_tables(),
            bishop,
            rook,
        })
    }

    /// Process-wide tables, built on first use.
    ///
    /// Concurrent first callers block until construction finishes. A failed
    /// build is reported to the caller and retried on the next call.
    pub fn shared() -> Result<&'static AttackTables, EngineError> {
        SHARED.get_or_try_init(AttackTables::new)
    }

    fn build_slider(slider: Slider) -> Result<Vec<MagicEntry>, EngineError> {
        Square::all()
            .map(|sq| magic::find_magic(slider, sq))
            .collect()
    }

    /// Knight targets from `sq`
    #[inline]
    #[must_use]
    pub fn knight(&self, sq: Square) -> Bitboard {
        self.knight[sq.as_usize()]
    }

    /// King targets from `sq`
    #[inline]
    #[must_use]
    pub fn king(&self, sq: Square) -> Bitboard {
        self.king[sq.as_usize()]
    }

    /// Squares a pawn of `color` on `sq` attacks
    #[inline]
    #[must_use]
    pub fn pawn_attacks(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn[color.index()][sq.as_usize()]
    }

    /// Bishop attacks from `sq`, including the first blocker on each ray
    #[inline]
    #[must_use]
    pub fn bishop(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop[sq.as_usize()].attacks(occupancy)
    }

    /// Rook attacks from `sq`, including the first blocker on each ray
    #[inline]
    #[must_use]
    pub fn rook(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.rook[sq.as_usize()].attacks(occupancy)
    }

    #[inline]
    #[must_use]
    pub fn queen(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop(sq, occupancy) | self.rook(sq, occupancy)
    }
}
