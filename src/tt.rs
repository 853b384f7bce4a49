//! Transposition table for caching search results.
//!
//! Uses Zobrist hashes to store and retrieve position evaluations. One slot
//! per index; a store always overwrites whatever the slot held. The table is
//! owned by a single search at a time.

use std::mem;

use crate::board::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

/// A stored search result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    key: u64,
    depth: u8,
    score: i32,
    bound_type: BoundType,
    best_move: Option<Move>,
}

impl TTEntry {
    pub fn depth(&self) -> u32 {
        u32::from(self.depth)
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    pub fn best_move(&self) -> Option<Move> {
        self.best_move
    }
}

/// Fixed-size, always-replace transposition table.
#[derive(Clone, Debug)]
pub struct TranspositionTable {
    slots: Vec<Option<TTEntry>>,
    mask: usize,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    ///
    /// The slot count is rounded down to a power of two, with a floor of 1024.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let slot_size = mem::size_of::<Option<TTEntry>>();
        let requested = size_mb.saturating_mul(1024 * 1024) / slot_size;
        let num_slots = if requested < 1024 {
            1024
        } else if requested.is_power_of_two() {
            requested
        } else {
            requested.next_power_of_two() / 2
        };

        TranspositionTable {
            slots: vec![None; num_slots],
            mask: num_slots - 1,
        }
    }

    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Probe the table for an entry matching the given hash.
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TTEntry> {
        self.slots[self.index(hash)].filter(|entry| entry.key == hash)
    }

    /// Store an entry, overwriting whatever occupied its slot.
    pub fn store(
        &mut self,
        hash: u64,
        depth: u32,
        score: i32,
        bound_type: BoundType,
        best_move: Option<Move>,
    ) {
        let idx = self.index(hash);
        self.slots[idx] = Some(TTEntry {
            key: hash,
            depth: depth.min(u32::from(u8::MAX)) as u8,
            score,
            bound_type,
            best_move,
        });
    }

    /// Returns hash table fullness in per mille (0-1000).
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        // Sample first 1000 slots for efficiency
        let sample_size = self.slots.len().min(1000);
        let occupied = self.slots[..sample_size].iter().filter(|s| s.is_some()).count();
        ((occupied as u64 * 1000) / sample_size as u64) as u32
    }

    /// Clear all entries from the table.
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }
}
