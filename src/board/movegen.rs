//! Legal move generation.
//!
//! `generate_pseudo` produces every move ignoring king safety;
//! `generate_legal` filters down to moves that do not leave the mover's own
//! king in check, using the [`LegalMoveInfo`] precomputation as an O(1)
//! filter per candidate instead of a speculative make/unmake per move.

use super::{
    slider_attacks, Bitboard, Board, Color, LegalMoveInfo, Move, MoveList, Piece, Square,
    KING_ATTACKS, KNIGHT_ATTACKS, PAWN_PUSHES_BLACK, PAWN_PUSHES_WHITE,
};

impl Board {
    /// Refreshes `current_player_in_check` without materializing a move
    /// list; used after FEN setup and after `unmake`.
    pub(crate) fn refresh_check_status(&mut self) {
        let us = self.side_to_move();
        let info = LegalMoveInfo::compute(self, us);
        self.current_player_in_check = info.checker_count >= 1;
    }

    /// Every pseudo-legal move: ignores whether it leaves the mover's own
    /// king in check.
    #[must_use]
    pub fn generate_pseudo(&self) -> MoveList {
        let us = self.side_to_move();
        let mut moves = MoveList::new();
        self.gen_pawn_moves(us, None, &mut moves, false);
        self.gen_knight_moves(us, None, &mut moves, false);
        self.gen_sliding_moves(us, Piece::Bishop, None, &mut moves, false);
        self.gen_sliding_moves(us, Piece::Rook, None, &mut moves, false);
        self.gen_sliding_moves(us, Piece::Queen, None, &mut moves, false);
        self.gen_king_moves(us, None, &mut moves, false);
        moves
    }

    /// Every legal move (or, with `captures_only`, every legal capture) for
    /// the side to move. Refreshes `current_player_in_check` as a side
    /// effect, per spec.
    #[must_use]
    pub fn generate_legal(&mut self, captures_only: bool) -> MoveList {
        let us = self.side_to_move();
        let info = LegalMoveInfo::compute(self, us);
        self.current_player_in_check = info.checker_count >= 1;

        let mut moves = MoveList::new();
        self.gen_king_moves(us, Some(&info), &mut moves, captures_only);
        if info.checker_count < 2 {
            self.gen_pawn_moves(us, Some(&info), &mut moves, captures_only);
            self.gen_knight_moves(us, Some(&info), &mut moves, captures_only);
            self.gen_sliding_moves(us, Piece::Bishop, Some(&info), &mut moves, captures_only);
            self.gen_sliding_moves(us, Piece::Rook, Some(&info), &mut moves, captures_only);
            self.gen_sliding_moves(us, Piece::Queen, Some(&info), &mut moves, captures_only);
        }
        moves
    }

    /// Legal captures only; the capture-only extension used by quiescence
    /// search.
    #[must_use]
    pub fn generate_legal_captures(&mut self) -> MoveList {
        self.generate_legal(true)
    }

    /// Whether `mv`, once made, leaves the opponent in check. Used only by
    /// move ordering (the "+50 for checks" heuristic); not baked into the
    /// packed `Move` itself.
    pub(crate) fn gives_check(&mut self, mv: Move) -> bool {
        self.make(mv);
        let gives_check = self.current_player_in_check;
        self.unmake().expect("just made a move");
        gives_check
    }

    fn passes_pin_filter(info: Option<&LegalMoveInfo>, from: Square, to: Square) -> bool {
        match info {
            Some(info) => !info.pinned.contains(from) || info.pin_ray(from).contains(to),
            None => true,
        }
    }

    fn passes_evasion_filter(info: Option<&LegalMoveInfo>, mask_sq: Square) -> bool {
        match info {
            Some(info) => info.check_evasion_mask.contains(mask_sq),
            None => true,
        }
    }

    fn gen_knight_moves(
        &self,
        us: Color,
        info: Option<&LegalMoveInfo>,
        moves: &mut MoveList,
        captures_only: bool,
    ) {
        let enemy = self.occupied_by(us.opponent());
        let friendly = self.occupied_by(us);
        for from in self.pieces_of(us, Piece::Knight).iter() {
            let targets = Bitboard(KNIGHT_ATTACKS[from.as_index()]) & !friendly;
            for to in targets.iter() {
                if !Self::passes_pin_filter(info, from, to) || !Self::passes_evasion_filter(info, to)
                {
                    continue;
                }
                if enemy.contains(to) {
                    moves.push(Move::capture(from, to));
                } else if !captures_only {
                    moves.push(Move::quiet(from, to));
                }
            }
        }
    }

    fn gen_king_moves(
        &self,
        us: Color,
        info: Option<&LegalMoveInfo>,
        moves: &mut MoveList,
        captures_only: bool,
    ) {
        let from = self.king_square(us);
        let enemy = self.occupied_by(us.opponent());
        let friendly = self.occupied_by(us);
        let attacked = info.map(|i| i.attacked_by_enemy).unwrap_or(Bitboard::EMPTY);

        let targets = Bitboard(KING_ATTACKS[from.as_index()]) & !friendly;
        for to in targets.iter() {
            if attacked.contains(to) {
                continue;
            }
            if enemy.contains(to) {
                moves.push(Move::capture(from, to));
            } else if !captures_only {
                moves.push(Move::quiet(from, to));
            }
        }

        if captures_only {
            return;
        }
        let in_check = info.map(|i| i.checker_count > 0).unwrap_or(false);
        if in_check {
            return;
        }

        let (home_rank, kingside_sq, queenside_sq) = match us {
            Color::White => (0usize, (5usize, 6usize), (3usize, 2usize)),
            Color::Black => (7usize, (61usize, 62usize), (59usize, 58usize)),
        };
        let rank_base = home_rank * 8;
        debug_assert_eq!(from.as_index(), rank_base + 4);

        if self.castling_rights().has(us, true) {
            let (pass_sq, dest_sq) = kingside_sq;
            let empty = !self.all_occupied().contains(Square::from_index(pass_sq))
                && !self.all_occupied().contains(Square::from_index(dest_sq));
            let safe = !attacked.contains(Square::from_index(pass_sq))
                && !attacked.contains(Square::from_index(dest_sq));
            if empty && safe {
                moves.push(Move::castle_kingside(from, Square::from_index(dest_sq)));
            }
        }
        if self.castling_rights().has(us, false) {
            let (pass_sq, dest_sq) = queenside_sq;
            let b_sq = rank_base + 1;
            let empty = !self.all_occupied().contains(Square::from_index(pass_sq))
                && !self.all_occupied().contains(Square::from_index(dest_sq))
                && !self.all_occupied().contains(Square::from_index(b_sq));
            let safe = !attacked.contains(Square::from_index(pass_sq))
                && !attacked.contains(Square::from_index(dest_sq));
            if empty && safe {
                moves.push(Move::castle_queenside(from, Square::from_index(dest_sq)));
            }
        }
    }

    fn gen_sliding_moves(
        &self,
        us: Color,
        piece: Piece,
        info: Option<&LegalMoveInfo>,
        moves: &mut MoveList,
        captures_only: bool,
    ) {
        let enemy = self.occupied_by(us.opponent());
        let friendly = self.occupied_by(us);
        let occupancy = self.all_occupied().0;
        for from in self.pieces_of(us, piece).iter() {
            let attacks = match piece {
                Piece::Bishop => slider_attacks(from.as_index(), occupancy, true),
                Piece::Rook => slider_attacks(from.as_index(), occupancy, false),
                Piece::Queen => {
                    slider_attacks(from.as_index(), occupancy, true)
                        | slider_attacks(from.as_index(), occupancy, false)
                }
                _ => unreachable!("gen_sliding_moves only called for bishop/rook/queen"),
            };
            let targets = Bitboard(attacks) & !friendly;
            for to in targets.iter() {
                if !Self::passes_pin_filter(info, from, to) || !Self::passes_evasion_filter(info, to)
                {
                    continue;
                }
                if enemy.contains(to) {
                    moves.push(Move::capture(from, to));
                } else if !captures_only {
                    moves.push(Move::quiet(from, to));
                }
            }
        }
    }

    fn gen_pawn_moves(
        &self,
        us: Color,
        info: Option<&LegalMoveInfo>,
        moves: &mut MoveList,
        captures_only: bool,
    ) {
        let enemy = self.occupied_by(us.opponent());
        let occupied = self.all_occupied();
        let table = match us {
            Color::White => &*PAWN_PUSHES_WHITE,
            Color::Black => &*PAWN_PUSHES_BLACK,
        };
        let promo_rank = match us {
            Color::White => 7,
            Color::Black => 0,
        };

        for from in self.pieces_of(us, Piece::Pawn).iter() {
            let targets = table[from.as_index()];

            if !captures_only {
                if let Some(single) = targets.single_push {
                    let to = Square::from_index(single as usize);
                    if !occupied.contains(to)
                        && Self::passes_pin_filter(info, from, to)
                        && Self::passes_evasion_filter(info, to)
                    {
                        Self::push_pawn_move(moves, from, to, promo_rank, false);
                    }
                    if let Some(double) = targets.double_push {
                        let dbl_to = Square::from_index(double as usize);
                        if !occupied.contains(to)
                            && !occupied.contains(dbl_to)
                            && Self::passes_pin_filter(info, from, dbl_to)
                            && Self::passes_evasion_filter(info, dbl_to)
                        {
                            moves.push(Move::double_pawn_push(from, dbl_to));
                        }
                    }
                }
            }

            for capture_target in [targets.capture_west, targets.capture_east] {
                let Some(raw_to) = capture_target else { continue };
                let to = Square::from_index(raw_to as usize);
                if enemy.contains(to) {
                    if Self::passes_pin_filter(info, from, to) && Self::passes_evasion_filter(info, to)
                    {
                        Self::push_pawn_move(moves, from, to, promo_rank, true);
                    }
                } else if Some(to) == self.en_passant_square() {
                    self.try_push_en_passant(us, from, to, info, moves);
                }
            }
        }
    }

    fn push_pawn_move(moves: &mut MoveList, from: Square, to: Square, promo_rank: usize, capture: bool) {
        if to.rank() == promo_rank {
            for piece in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
                moves.push(if capture {
                    Move::new_promotion_capture(from, to, piece)
                } else {
                    Move::new_promotion(from, to, piece)
                });
            }
        } else if capture {
            moves.push(Move::capture(from, to));
        } else {
            moves.push(Move::quiet(from, to));
        }
    }

    fn try_push_en_passant(
        &self,
        us: Color,
        from: Square,
        to: Square,
        info: Option<&LegalMoveInfo>,
        moves: &mut MoveList,
    ) {
        let captured_sq = match us {
            Color::White => Square::from_index(to.as_index() - 8),
            Color::Black => Square::from_index(to.as_index() + 8),
        };
        if !Self::passes_pin_filter(info, from, to) {
            return;
        }
        if let Some(info) = info {
            if info.checker_count == 1 && !info.check_evasion_mask.contains(captured_sq) {
                return;
            }
        }
        if self.en_passant_reveals_check(from, captured_sq, us) {
            return;
        }
        moves.push(Move::en_passant(from, to));
    }

    /// Step 5 of the spec's legality algorithm: simulate removing both the
    /// capturing pawn and the captured pawn, and verify no enemy slider now
    /// attacks the king through the vacated rank. Catches the discovered
    /// check case where the king sits on the same rank as both pawns.
    fn en_passant_reveals_check(&self, from: Square, captured_sq: Square, us: Color) -> bool {
        let them = us.opponent();
        let king_sq = self.king_square(us);
        let occupancy = self.all_occupied().0
            & !(1u64 << from.as_index())
            & !(1u64 << captured_sq.as_index());

        let enemy_rook_queen =
            self.pieces_of(them, Piece::Rook) | self.pieces_of(them, Piece::Queen);
        let enemy_bishop_queen =
            self.pieces_of(them, Piece::Bishop) | self.pieces_of(them, Piece::Queen);

        let rook_view = slider_attacks(king_sq.as_index(), occupancy, false);
        if rook_view & enemy_rook_queen.0 != 0 {
            return true;
        }
        let bishop_view = slider_attacks(king_sq.as_index(), occupancy, true);
        bishop_view & enemy_bishop_queen.0 != 0
    }

    /// Counts leaf nodes of the legal game tree to `depth` plies.
    #[must_use]
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.generate_legal(false);
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0u64;
        for mv in &moves {
            self.make(*mv);
            nodes += self.perft(depth - 1);
            self.unmake().expect("just made a move");
        }
        nodes
    }

    /// Divide-style perft: returns `(move, subtree node count)` per root
    /// move, in generation order.
    #[must_use]
    pub fn perft_divide(&mut self, depth: u32) -> Vec<(Move, u64)> {
        let moves = self.generate_legal(false);
        let mut results = Vec::with_capacity(moves.len());
        for mv in &moves {
            self.make(*mv);
            let nodes = if depth <= 1 { 1 } else { self.perft(depth - 1) };
            self.unmake().expect("just made a move");
            results.push((*mv, nodes));
        }
        results
    }
}
