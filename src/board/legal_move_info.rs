//! Per-ply precomputation that makes legality checking O(1) per candidate
//! move: the set of squares the enemy attacks, the current checkers (if
//! any), the check-evasion mask, and absolutely pinned pieces with their
//! legal ray.
//!
//! Computed once per `generate_legal` call; never mutated, never stored
//! across plies.

use super::{
    slider_attacks, Bitboard, Board, Color, Piece, Square, ALIGNED_RAY, BETWEEN, DIRECTION_OFFSETS,
    KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS, SQUARES_TO_EDGE,
};

#[derive(Clone, Debug)]
pub(crate) struct LegalMoveInfo {
    /// Every square the enemy attacks, computed with the friendly king
    /// removed from occupancy so sliding attacks "see through" it.
    pub attacked_by_enemy: Bitboard,
    /// Enemy pieces currently attacking the friendly king.
    pub checkers: Bitboard,
    pub checker_count: u32,
    /// Squares that either capture the (single) checker or block its ray.
    /// Universal with zero checkers, empty with two.
    pub check_evasion_mask: Bitboard,
    /// Friendly pieces absolutely pinned to the friendly king.
    pub pinned: Bitboard,
    pin_rays: [Bitboard; 64],
}

impl LegalMoveInfo {
    #[must_use]
    pub(crate) fn pin_ray(&self, sq: Square) -> Bitboard {
        self.pin_rays[sq.as_index()]
    }

    pub(crate) fn compute(board: &Board, us: Color) -> Self {
        let them = us.opponent();
        let king_sq = board.king_square(us);
        let king_bit = 1u64 << king_sq.as_index();
        let all_occupied = board.all_occupied().0;
        let xray_occupied = all_occupied & !king_bit;

        let mut attacked = 0u64;
        let mut checkers = 0u64;
        let mut checker_count = 0u32;
        let mut evasion_mask = 0u64;

        for sq in board.pieces_of(them, Piece::Pawn).iter() {
            let atk = PAWN_ATTACKS[them.index()][sq.as_index()];
            attacked |= atk;
            if atk & king_bit != 0 {
                checkers |= 1u64 << sq.as_index();
                evasion_mask |= 1u64 << sq.as_index();
                checker_count += 1;
            }
        }

        for sq in board.pieces_of(them, Piece::Knight).iter() {
            let atk = KNIGHT_ATTACKS[sq.as_index()];
            attacked |= atk;
            if atk & king_bit != 0 {
                checkers |= 1u64 << sq.as_index();
                evasion_mask |= 1u64 << sq.as_index();
                checker_count += 1;
            }
        }

        for (piece, is_bishop) in [(Piece::Bishop, true), (Piece::Rook, false)] {
            for sq in board.pieces_of(them, piece).iter() {
                attacked |= slider_attacks(sq.as_index(), xray_occupied, is_bishop);
                let normal_atk = slider_attacks(sq.as_index(), all_occupied, is_bishop);
                if normal_atk & king_bit != 0 {
                    checkers |= 1u64 << sq.as_index();
                    evasion_mask |= BETWEEN[sq.as_index()][king_sq.as_index()] | (1u64 << sq.as_index());
                    checker_count += 1;
                }
            }
        }
        for sq in board.pieces_of(them, Piece::Queen).iter() {
            attacked |= slider_attacks(sq.as_index(), xray_occupied, true)
                | slider_attacks(sq.as_index(), xray_occupied, false);
            let normal_atk = slider_attacks(sq.as_index(), all_occupied, true)
                | slider_attacks(sq.as_index(), all_occupied, false);
            if normal_atk & king_bit != 0 {
                checkers |= 1u64 << sq.as_index();
                evasion_mask |= BETWEEN[sq.as_index()][king_sq.as_index()] | (1u64 << sq.as_index());
                checker_count += 1;
            }
        }

        let enemy_king_sq = board.king_square(them);
        attacked |= KING_ATTACKS[enemy_king_sq.as_index()];

        let check_evasion_mask = match checker_count {
            0 => Bitboard::ALL,
            1 => Bitboard(evasion_mask),
            _ => Bitboard::EMPTY,
        };

        let (pinned, pin_rays) = Self::compute_pins(board, us, them, king_sq);

        LegalMoveInfo {
            attacked_by_enemy: Bitboard(attacked),
            checkers: Bitboard(checkers),
            checker_count,
            check_evasion_mask,
            pinned,
            pin_rays,
        }
    }

    fn compute_pins(
        board: &Board,
        us: Color,
        them: Color,
        king_sq: Square,
    ) -> (Bitboard, [Bitboard; 64]) {
        let mut pinned = Bitboard::EMPTY;
        let mut pin_rays = [Bitboard::EMPTY; 64];
        let friendly = board.occupied_by(us).0;
        let enemy = board.occupied_by(them).0;

        for (dir, &offset) in DIRECTION_OFFSETS.iter().enumerate() {
            let steps = SQUARES_TO_EDGE[king_sq.as_index()][dir] as i32;
            let orthogonal = dir < 4;
            let mut candidate: Option<Square> = None;
            let mut cur = king_sq.as_index() as i32;
            for _ in 0..steps {
                cur += offset as i32;
                let sq = Square::from_index(cur as usize);
                let bit = 1u64 << sq.as_index();
                if friendly & bit != 0 {
                    if candidate.is_some() {
                        // second friendly piece on the ray blocks any pin.
                        candidate = None;
                        break;
                    }
                    candidate = Some(sq);
                    continue;
                }
                if enemy & bit != 0 {
                    if let Some(pinned_sq) = candidate {
                        let is_pinning_piece = board.piece_at(sq).is_some_and(|(_, p)| {
                            matches!(p, Piece::Queen)
                                || (orthogonal && p == Piece::Rook)
                                || (!orthogonal && p == Piece::Bishop)
                        });
                        if is_pinning_piece {
                            pinned |= Bitboard::from_square(pinned_sq);
                            pin_rays[pinned_sq.as_index()] = Bitboard(
                                ALIGNED_RAY[king_sq.as_index()][sq.as_index()],
                            );
                        }
                    }
                    break;
                }
            }
        }

        (pinned, pin_rays)
    }
}
