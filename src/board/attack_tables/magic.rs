//! Magic bitboard construction for sliding pieces.
//!
//! For every square a magic multiplier maps each relevant blocker configuration
//! to a slot in a dense attack table:
//! `index = ((occupancy & mask) * magic) >> (64 - popcount(mask))`.
//! Magics are searched for at startup from a per-square seed, so the tables are
//! reproducible run to run.

use std::fmt;

use rand::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::EngineError;
use crate::board::types::{Bitboard, Square};

/// Candidate magics tried per square before giving up
pub(crate) const MAX_MAGIC_ATTEMPTS: u32 = 1_500_000;

/// Minimum number of bits a candidate must push into the top byte
const MIN_TOP_BYTE_BITS: u32 = 6;

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The two sliding movement patterns (the queen is their union).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Slider {
    Bishop,
    Rook,
}

impl Slider {
    const fn directions(self) -> &'static [(i8, i8); 4] {
        match self {
            Slider::Bishop => &BISHOP_DIRECTIONS,
            Slider::Rook => &ROOK_DIRECTIONS,
        }
    }
}

impl fmt::Display for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slider::Bishop => write!(f, "bishop"),
            Slider::Rook => write!(f, "rook"),
        }
    }
}

/// Magic lookup data for one square.
#[derive(Clone, Debug)]
pub(crate) struct MagicEntry {
    pub mask: Bitboard,
    pub magic: u64,
    pub shift: u32,
    pub attacks: Vec<Bitboard>,
}

impl MagicEntry {
    #[inline]
    pub fn index(&self, occupancy: Bitboard) -> usize {
        ((occupancy.0 & self.mask.0).wrapping_mul(self.magic) >> self.shift) as usize
    }

    #[inline]
    pub fn attacks(&self, occupancy: Bitboard) -> Bitboard {
        self.attacks[self.index(occupancy)]
    }
}

#[inline]
fn step(rank: i8, file: i8, (dr, df): (i8, i8)) -> Option<(i8, i8)> {
    let (r, f) = (rank + dr, file + df);
    if (0..8).contains(&r) && (0..8).contains(&f) {
        Some((r, f))
    } else {
        None
    }
}

#[inline]
fn bit(rank: i8, file: i8) -> u64 {
    1u64 << (rank * 8 + file)
}

/// Squares whose occupancy can change the slider's attacks from `sq`.
///
/// Each ray stops one square short of the board edge, since a piece on the
/// edge square never blocks anything beyond it.
pub(crate) fn relevant_mask(slider: Slider, sq: Square) -> Bitboard {
    let mut mask = 0u64;
    for &dir in slider.directions() {
        let (mut rank, mut file) = (sq.rank() as i8, sq.file() as i8);
        while let Some((r, f)) = step(rank, file, dir) {
            if step(r, f, dir).is_none() {
                break;
            }
            mask |= bit(r, f);
            rank = r;
            file = f;
        }
    }
    Bitboard(mask)
}

/// Ray-cast attacks from `sq`, each ray including the first occupied square.
pub(crate) fn sliding_attacks(slider: Slider, sq: Square, occupancy: Bitboard) -> Bitboard {
    let mut attacks = 0u64;
    for &dir in slider.directions() {
        let (mut rank, mut file) = (sq.rank() as i8, sq.file() as i8);
        while let Some((r, f)) = step(rank, file, dir) {
            attacks |= bit(r, f);
            if occupancy.0 & bit(r, f) != 0 {
                break;
            }
            rank = r;
            file = f;
        }
    }
    Bitboard(attacks)
}

/// Every subset of the squares in `mask`, `2^popcount(mask)` in total.
///
/// Subset `i` contains the `j`-th set square of the mask exactly when bit `j`
/// of `i` is set.
pub fn enumerate_blocker_subsets(mask: Bitboard) -> Vec<Bitboard> {
    let squares: Vec<Square> = mask.iter().collect();
    let count = 1usize << squares.len();
    let mut subsets = Vec::with_capacity(count);
    for i in 0..count {
        let mut subset = Bitboard::EMPTY;
        for (j, sq) in squares.iter().enumerate() {
            if i & (1 << j) != 0 {
                subset |= Bitboard::from_square(*sq);
            }
        }
        subsets.push(subset);
    }
    subsets
}

/// Search a collision-free magic for one square.
///
/// A collision is two blocker sets landing on the same slot with different
/// attack sets; landing with equal attack sets is a harmless sharing.
pub(crate) fn find_magic(slider: Slider, sq: Square) -> Result<MagicEntry, EngineError> {
    let mask = relevant_mask(slider, sq);
    let bits = mask.popcount();
    let shift = 64 - bits;
    let blockers = enumerate_blocker_subsets(mask);
    let reference: Vec<Bitboard> = blockers
        .iter()
        .map(|&occ| sliding_attacks(slider, sq, occ))
        .collect();

    let mut rng = StdRng::seed_from_u64(u64::from(sq.index()));
    let mut table: Vec<Option<Bitboard>> = vec![None; 1 << bits];

    for _ in 0..MAX_MAGIC_ATTEMPTS {
        let magic = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        if (mask.0.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < MIN_TOP_BYTE_BITS {
            continue;
        }

        table.fill(None);
        let mut collided = false;
        for (occ, attack) in blockers.iter().zip(&reference) {
            let idx = (occ.0.wrapping_mul(magic) >> shift) as usize;
            match table[idx] {
                None => table[idx] = Some(*attack),
                Some(existing) if existing == *attack => {}
                Some(_) => {
                    collided = true;
                    break;
                }
            }
        }

        if !collided {
            let attacks = table
                .iter()
                .map(|slot| slot.unwrap_or(Bitboard::EMPTY))
                .collect();
            return Ok(MagicEntry {
                mask,
                magic,
                shift,
                attacks,
            });
        }
    }

    Err(EngineError::MagicSearchExhausted {
        square: sq,
        slider,
        attempts: MAX_MAGIC_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().expect("valid square")
    }

    #[test]
    fn test_rook_mask_excludes_edges() {
        let mask = relevant_mask(Slider::Rook, Square::A1);
        assert_eq!(mask.popcount(), 12);
        assert!(!mask.contains(Square::A8));
        assert!(!mask.contains(Square::H1));
        assert!(mask.contains(sq("a7")));
        assert!(mask.contains(sq("g1")));
        assert_eq!(relevant_mask(Slider::Rook, sq("e4")).popcount(), 10);
    }

    #[test]
    fn test_bishop_mask_sizes() {
        assert_eq!(relevant_mask(Slider::Bishop, Square::A1).popcount(), 6);
        assert_eq!(relevant_mask(Slider::Bishop, sq("d4")).popcount(), 9);
        assert_eq!(relevant_mask(Slider::Bishop, sq("b1")).popcount(), 5);
    }

    #[test]
    fn test_subset_enumeration_count_and_order() {
        let mask = Bitboard::from_square(sq("b2")) | Bitboard::from_square(sq("c3"));
        let subsets = enumerate_blocker_subsets(mask);
        assert_eq!(
            subsets,
            vec![
                Bitboard::EMPTY,
                Bitboard::from_square(sq("b2")),
                Bitboard::from_square(sq("c3")),
                mask,
            ]
        );
        let rook_mask = relevant_mask(Slider::Rook, sq("d5"));
        assert_eq!(
            enumerate_blocker_subsets(rook_mask).len(),
            1 << rook_mask.popcount()
        );
    }

    #[test]
    fn test_sliding_attacks_include_first_blocker() {
        let occ = Bitboard::from_square(sq("e6")) | Bitboard::from_square(sq("c4"));
        let attacks = sliding_attacks(Slider::Rook, sq("e4"), occ);
        assert!(attacks.contains(sq("e6")));
        assert!(!attacks.contains(sq("e7")));
        assert!(attacks.contains(sq("c4")));
        assert!(!attacks.contains(sq("b4")));
        assert!(attacks.contains(sq("h4")));
        assert!(attacks.contains(sq("e1")));
    }

    #[test]
    fn test_found_magic_reproduces_ray_casting() {
        for (slider, square) in [(Slider::Rook, Square::A1), (Slider::Bishop, sq("d4"))] {
            let entry = find_magic(slider, square).expect("magic found");
            for occ in enumerate_blocker_subsets(entry.mask) {
                assert_eq!(entry.attacks(occ), sliding_attacks(slider, square, occ));
            }
        }
    }
}
