//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position hashes for transposition
//! tables and repetition detection. Keys come from one fixed seed so hashes
//! are stable across runs.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Color, Piece, Square};

const ZOBRIST_SEED: u64 = 1_234_567_890;

pub(crate) struct ZobristKeys {
    // piece_keys[piece][color][square]
    piece_keys: [[[u64; 64]; 2]; 6],
    pub(crate) black_to_move: u64,
    // one key per castling-rights bit (WK, WQ, BK, BQ)
    castling_keys: [u64; 4],
    // only the file of the en passant square matters
    en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut piece_keys = [[[0; 64]; 2]; 6];
        let mut castling_keys = [0; 4];
        let mut en_passant_keys = [0; 8];

        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move = rng.gen();

        for key in &mut castling_keys {
            *key = rng.gen();
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move,
            castling_keys,
            en_passant_keys,
        }
    }

    #[inline]
    pub(crate) fn piece(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[piece.index()][color.index()][sq.as_usize()]
    }

    /// XOR of the keys for every bit set in a raw castling mask
    #[inline]
    pub(crate) fn castling(&self, rights: u8) -> u64 {
        self.castling_keys
            .iter()
            .enumerate()
            .filter(|(bit, _)| rights & (1 << bit) != 0)
            .fold(0, |acc, (_, key)| acc ^ key)
    }

    #[inline]
    pub(crate) fn en_passant(&self, file: u8) -> u64 {
        self.en_passant_keys[usize::from(file & 7)]
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
