//! Step tables and ray geometry: edge distances, leaper jump targets,
//! pawn push/capture targets, and the `between`/`aligned_ray` bitboards
//! used by check-evasion and pin detection.
//!
//! Direction order throughout this module is fixed: N, E, S, W (orthogonal,
//! indices 0..3), NE, NW, SE, SW (diagonal, indices 4..7).

use std::sync::LazyLock;

pub(crate) const DIRECTION_OFFSETS: [isize; 8] = [8, 1, -8, -1, 9, 7, -7, -9];

/// `(delta_rank, delta_file)` per direction, matching `DIRECTION_OFFSETS`.
const DIRECTION_DELTAS: [(isize, isize); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Number of steps from each square to the board edge, per direction.
pub(crate) static SQUARES_TO_EDGE: LazyLock<[[u8; 8]; 64]> = LazyLock::new(|| {
    let mut table = [[0u8; 8]; 64];
    for sq in 0..64 {
        let rank = (sq / 8) as isize;
        let file = (sq % 8) as isize;
        for (dir, (dr, df)) in DIRECTION_DELTAS.iter().enumerate() {
            let steps = if *dr > 0 {
                7 - rank
            } else if *dr < 0 {
                rank
            } else if *df > 0 {
                7 - file
            } else {
                file
            };
            let steps = if *dr != 0 && *df != 0 {
                // diagonal: bounded by the tighter of rank/file distance to edge
                let rank_steps = if *dr > 0 { 7 - rank } else { rank };
                let file_steps = if *df > 0 { 7 - file } else { file };
                rank_steps.min(file_steps)
            } else {
                steps
            };
            table[sq][dir] = steps as u8;
        }
    }
    table
});

/// Knight jump targets per square, up to 8, `None` padded.
pub(crate) static KNIGHT_TARGETS: LazyLock<[[Option<u8>; 8]; 64]> = LazyLock::new(|| {
    let mut table = [[None; 8]; 64];
    let deltas = [
        (2, 1),
        (1, 2),
        (-1, 2),
        (-2, 1),
        (-2, -1),
        (-1, -2),
        (1, -2),
        (2, -1),
    ];
    for sq in 0..64 {
        let rank = (sq / 8) as isize;
        let file = (sq % 8) as isize;
        let mut slot = 0;
        for (dr, df) in deltas {
            let nr = rank + dr;
            let nf = file + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                table[sq][slot] = Some((nr * 8 + nf) as u8);
                slot += 1;
            }
        }
    }
    table
});

/// King step targets per square, up to 8, `None` padded.
pub(crate) static KING_TARGETS: LazyLock<[[Option<u8>; 8]; 64]> = LazyLock::new(|| {
    let mut table = [[None; 8]; 64];
    for sq in 0..64 {
        let rank = (sq / 8) as isize;
        let file = (sq % 8) as isize;
        let mut slot = 0;
        for (dr, df) in DIRECTION_DELTAS {
            let nr = rank + dr;
            let nf = file + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                table[sq][slot] = Some((nr * 8 + nf) as u8);
                slot += 1;
            }
        }
    }
    table
});

/// Pawn push/capture targets for one color: single push, double push
/// (only populated from the starting rank), west capture, east capture.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct PawnTargets {
    pub single_push: Option<u8>,
    pub double_push: Option<u8>,
    pub capture_west: Option<u8>,
    pub capture_east: Option<u8>,
}

pub(crate) static PAWN_PUSHES_WHITE: LazyLock<[PawnTargets; 64]> = LazyLock::new(|| {
    build_pawn_pushes(true)
});

pub(crate) static PAWN_PUSHES_BLACK: LazyLock<[PawnTargets; 64]> = LazyLock::new(|| {
    build_pawn_pushes(false)
});

fn build_pawn_pushes(white: bool) -> [PawnTargets; 64] {
    let mut table = [PawnTargets::default(); 64];
    let start_rank: isize = if white { 1 } else { 6 };
    let dr: isize = if white { 1 } else { -1 };
    for sq in 0..64 {
        let rank = (sq / 8) as isize;
        let file = (sq % 8) as isize;
        let nr = rank + dr;
        if !(0..8).contains(&nr) {
            continue;
        }
        let mut t = PawnTargets::default();
        t.single_push = Some((nr * 8 + file) as u8);
        if rank == start_rank {
            let nr2 = rank + 2 * dr;
            if (0..8).contains(&nr2) {
                t.double_push = Some((nr2 * 8 + file) as u8);
            }
        }
        if file - 1 >= 0 {
            t.capture_west = Some((nr * 8 + (file - 1)) as u8);
        }
        if file + 1 < 8 {
            t.capture_east = Some((nr * 8 + (file + 1)) as u8);
        }
        table[sq] = t;
    }
    table
}

/// Which of the 8 directions, if any, connects `from` to `to`, plus whether
/// it is a "queen line" (shared rank/file/diagonal) at all.
fn ray_direction(from: usize, to: usize) -> Option<usize> {
    if from == to {
        return None;
    }
    let fr = (from / 8) as isize;
    let ff = (from % 8) as isize;
    let tr = (to / 8) as isize;
    let tf = (to % 8) as isize;
    let dr = tr - fr;
    let df = tf - ff;
    if dr == 0 && df != 0 {
        return Some(if df > 0 { 1 } else { 3 });
    }
    if df == 0 && dr != 0 {
        return Some(if dr > 0 { 0 } else { 2 });
    }
    if dr.abs() == df.abs() {
        return Some(match (dr > 0, df > 0) {
            (true, true) => 4,
            (true, false) => 5,
            (false, true) => 6,
            (false, false) => 7,
        });
    }
    None
}

/// For `a`, `b` sharing a rank/file/diagonal: the exclusive interior squares
/// between them. Zero bitboard if unaligned or adjacent.
pub(crate) static BETWEEN: LazyLock<[[u64; 64]; 64]> = LazyLock::new(|| {
    let mut table = [[0u64; 64]; 64];
    for a in 0..64usize {
        for b in 0..64usize {
            let Some(dir) = ray_direction(a, b) else {
                continue;
            };
            let (dr, df) = DIRECTION_DELTAS[dir];
            let mut mask = 0u64;
            let mut rank = (a / 8) as isize + dr;
            let mut file = (a % 8) as isize + df;
            while (rank * 8 + file) as usize != b {
                mask |= 1u64 << (rank * 8 + file);
                rank += dr;
                file += df;
            }
            table[a][b] = mask;
        }
    }
    table
});

/// For `a`, `b` sharing a rank/file/diagonal: the full line through both,
/// across the whole board. Zero bitboard if unaligned.
pub(crate) static ALIGNED_RAY: LazyLock<[[u64; 64]; 64]> = LazyLock::new(|| {
    let mut table = [[0u64; 64]; 64];
    for a in 0..64usize {
        for b in 0..64usize {
            let Some(dir) = ray_direction(a, b) else {
                continue;
            };
            let (fdr, fdf) = DIRECTION_DELTAS[dir];
            let mut mask = 1u64 << a | 1u64 << b;
            let rank = (a / 8) as isize;
            let file = (a % 8) as isize;
            let mut r = rank + fdr;
            let mut f = file + fdf;
            while (0..8).contains(&r) && (0..8).contains(&f) {
                mask |= 1u64 << (r * 8 + f);
                r += fdr;
                f += fdf;
            }
            r = rank - fdr;
            f = file - fdf;
            while (0..8).contains(&r) && (0..8).contains(&f) {
                mask |= 1u64 << (r * 8 + f);
                r -= fdr;
                f -= fdf;
            }
            table[a][b] = mask;
        }
    }
    table
});
