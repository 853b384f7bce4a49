//! Precomputed attack tables for leaper pieces (knights, kings, pawns).
//!
//! Each table is built from index offsets. An offset is only accepted when the
//! file of the target differs from the origin's by the intended amount, which
//! rejects targets that wrapped around the a/h edge.

use crate::board::types::{Bitboard, Color, Square};

/// (index offset, expected file delta)
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (6, -2),
    (-6, 2),
    (10, 2),
    (-10, -2),
    (15, -1),
    (-15, 1),
    (17, 1),
    (-17, -1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (-1, -1),
    (7, -1),
    (-7, 1),
    (8, 0),
    (-8, 0),
    (9, 1),
    (-9, -1),
];

const WHITE_PAWN_CAPTURES: [(i8, i8); 2] = [(7, -1), (9, 1)];
const BLACK_PAWN_CAPTURES: [(i8, i8); 2] = [(-7, 1), (-9, -1)];

pub(crate) fn leaper_attacks(sq: Square, offsets: &[(i8, i8)]) -> Bitboard {
    let from = sq.index() as i8;
    let file = sq.file() as i8;
    let mut attacks = Bitboard::EMPTY;
    for &(offset, file_delta) in offsets {
        let target = from + offset;
        if !(0..64).contains(&target) {
            continue;
        }
        if (target % 8) - file != file_delta {
            continue;
        }
        attacks |= Bitboard(1u64 << target);
    }
    attacks
}

fn build_table(offsets: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for (slot, sq) in table.iter_mut().zip(Square::all()) {
        *slot = leaper_attacks(sq, offsets);
    }
    table
}

pub(crate) fn knight_table() -> [Bitboard; 64] {
    build_table(&KNIGHT_OFFSETS)
}

pub(crate) fn king_table() -> [Bitboard; 64] {
    build_table(&KING_OFFSETS)
}

/// Squares attacked by a pawn of each color, indexed `[color][square]`.
pub(crate) fn pawn_tables() -> [[Bitboard; 64]; 2] {
    let mut tables = [[Bitboard::EMPTY; 64]; 2];
    tables[Color::White.index()] = build_table(&WHITE_PAWN_CAPTURES);
    tables[Color::Black.index()] = build_table(&BLACK_PAWN_CAPTURES);
    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().expect("valid square")
    }

    #[test]
    fn test_knight_on_h_file_does_not_wrap() {
        let attacks = leaper_attacks(sq("h3"), &KNIGHT_OFFSETS);
        let got: Vec<String> = attacks.iter().map(|s| s.to_string()).collect();
        assert_eq!(got, vec!["g1", "f2", "f4", "g5"]);
    }

    #[test]
    fn test_no_target_wraps_around_the_board() {
        let knights = knight_table();
        let kings = king_table();
        let pawns = pawn_tables();
        for from in Square::all() {
            let i = from.as_usize();
            for (table, max_delta) in [
                (knights[i], 2),
                (kings[i], 1),
                (pawns[0][i], 1),
                (pawns[1][i], 1),
            ] {
                for target in table.iter() {
                    let delta = (i16::from(target.file()) - i16::from(from.file())).abs();
                    assert!(delta <= max_delta, "{from} -> {target}");
                }
            }
        }
        // Known totals over all 64 squares
        let total = |table: &[Bitboard; 64]| table.iter().map(|b| b.popcount()).sum::<u32>();
        assert_eq!(total(&knights), 336);
        assert_eq!(total(&kings), 420);
    }

    #[test]
    fn test_king_in_corner_has_three_targets() {
        assert_eq!(leaper_attacks(Square::A1, &KING_OFFSETS).popcount(), 3);
        assert_eq!(leaper_attacks(Square::H8, &KING_OFFSETS).popcount(), 3);
        assert!(!leaper_attacks(Square::H1, &KING_OFFSETS).contains(sq("a2")));
    }

    #[test]
    fn test_pawn_capture_tables() {
        let pawns = pawn_tables();
        assert_eq!(
            pawns[Color::White.index()][sq("a2").as_usize()],
            Bitboard::from_square(sq("b3"))
        );
        assert_eq!(
            pawns[Color::Black.index()][sq("h7").as_usize()],
            Bitboard::from_square(sq("g6"))
        );
        assert_eq!(pawns[Color::White.index()][sq("e8").as_usize()], Bitboard::EMPTY);
    }
}
