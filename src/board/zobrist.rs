//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position hashes used by the
//! transposition table and threefold-repetition detection. Keys are
//! generated once at process start from a fixed seed, so hashes are
//! reproducible across runs (useful for perft/debug comparisons).

use rand::prelude::*;
use std::sync::LazyLock;

use super::types::{Color, Piece, Square};

pub(crate) struct ZobristKeys {
    /// `piece_keys[piece_index][color_index][square_index]`
    pub(crate) piece_keys: [[[u64; 64]; 2]; 6],
    pub(crate) black_to_move_key: u64,
    /// `castling_keys[color_index][side]`, side 0 = kingside, 1 = queenside.
    pub(crate) castling_keys: [[u64; 2]; 2],
    /// `en_passant_keys[file]` — only the file of the en passant target matters.
    pub(crate) en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64);
        let mut piece_keys = [[[0u64; 64]; 2]; 6];
        let mut castling_keys = [[0u64; 2]; 2];
        let mut en_passant_keys = [0u64; 8];

        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        for color in &mut castling_keys {
            for key in color.iter_mut() {
                *key = rng.gen();
            }
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }
}

pub(crate) static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::new);

#[inline]
pub(crate) fn piece_to_zobrist_index(piece: Piece) -> usize {
    piece.index()
}

#[inline]
pub(crate) fn color_to_zobrist_index(color: Color) -> usize {
    color.index()
}

#[inline]
pub(crate) fn square_to_zobrist_index(sq: Square) -> usize {
    sq.index()
}

/// Zobrist key for `piece` of `color` standing on `sq`.
#[inline]
pub(crate) fn piece_key(color: Color, piece: Piece, sq: Square) -> u64 {
    ZOBRIST.piece_keys[piece_to_zobrist_index(piece)][color_to_zobrist_index(color)]
        [square_to_zobrist_index(sq)]
}

/// Zobrist key toggled when a castling right is present.
#[inline]
pub(crate) fn castling_key(color: Color, kingside: bool) -> u64 {
    ZOBRIST.castling_keys[color_to_zobrist_index(color)][usize::from(!kingside)]
}

/// Zobrist key for an en passant target on `file` (0..8).
#[inline]
pub(crate) fn en_passant_key(file: usize) -> u64 {
    ZOBRIST.en_passant_keys[file]
}

/// Zobrist key toggled whenever the side to move changes.
#[inline]
pub(crate) fn side_to_move_key() -> u64 {
    ZOBRIST.black_to_move_key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic_across_instances() {
        let a = ZobristKeys::new();
        let b = ZobristKeys::new();
        assert_eq!(a.black_to_move_key, b.black_to_move_key);
        assert_eq!(a.piece_keys, b.piece_keys);
        assert_eq!(a.castling_keys, b.castling_keys);
        assert_eq!(a.en_passant_keys, b.en_passant_keys);
    }

    #[test]
    fn piece_keys_are_pairwise_distinct() {
        let keys = ZobristKeys::new();
        let mut seen = std::collections::HashSet::new();
        for piece in &keys.piece_keys {
            for color in piece {
                for &key in color {
                    assert!(seen.insert(key), "duplicate zobrist key {key}");
                }
            }
        }
    }
}
