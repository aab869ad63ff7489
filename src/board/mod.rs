//! Board state: bitboards, mailbox, castling/en-passant/clock bookkeeping,
//! incremental Zobrist hash, and the undo stack that makes every move
//! reversible.
//!
//! The board is the sole owner of its bitboards, mailbox, and hash; it is
//! mutated exclusively through `make`, `unmake`, and `try_from_fen`.

mod attack_tables;
mod eval;
mod fen;
mod legal_move_info;
mod make_unmake;
mod movegen;
mod types;
mod zobrist;

#[cfg(test)]
mod proptests;

pub use fen::STARTING_FEN;
pub use types::{Bitboard, CastlingRights, Color, Move, MoveList, MoveListIntoIter, Piece, Square};

pub(crate) use attack_tables::{
    slider_attacks, ALIGNED_RAY, BETWEEN, DIRECTION_OFFSETS, KING_ATTACKS, KNIGHT_ATTACKS,
    PAWN_ATTACKS, PAWN_PUSHES_BLACK, PAWN_PUSHES_WHITE, SQUARES_TO_EDGE,
};
pub(crate) use eval::evaluate;
pub(crate) use legal_move_info::LegalMoveInfo;
pub(crate) use types::{ScoredMove, ScoredMoveList};

use crate::error::EmptyUndoStack;
use types::{bit_for_square, ALL_PIECES};

/// Everything needed to reverse exactly one `make`. Pushed by `make`, popped
/// by `unmake`. The captured square differs from the move's `to` square only
/// for en passant.
#[derive(Clone, Copy, Debug)]
pub(crate) struct UndoRecord {
    mv: Move,
    prev_en_passant: Option<Square>,
    prev_castling_rights: CastlingRights,
    prev_halfmove_clock: u32,
    prev_fullmove_number: u32,
    prev_zobrist_hash: u64,
    prev_in_check: bool,
    moved_piece: Piece,
    captured: Option<(Piece, Square)>,
    /// Snapshot of `repetition_history` taken just before it was cleared by
    /// an irreversible move (pawn push or capture). `None` when `make` only
    /// appended to the existing history.
    prev_repetition_history: Option<Vec<u64>>,
}

/// A chess position plus enough history to undo back to the start of a
/// search, reported in centipawns from the side-to-move's perspective by
/// [`crate::board::eval`].
#[derive(Clone, Debug)]
pub struct Board {
    mailbox: [Option<(Color, Piece)>; 64],
    pieces: [[Bitboard; 6]; 2],
    occupied: [Bitboard; 2],
    all_occupied: Bitboard,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    current_player_in_check: bool,
    zobrist_hash: u64,
    undo_stack: Vec<UndoRecord>,
    repetition_history: Vec<u64>,
}

impl Board {
    /// An empty board, white to move, full castling rights, no en passant.
    /// Only useful as a scratch value for FEN parsing; prefer [`Board::new`].
    pub(crate) fn empty() -> Self {
        Board {
            mailbox: [None; 64],
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            current_player_in_check: false,
            zobrist_hash: 0,
            undo_stack: Vec::new(),
            repetition_history: Vec::new(),
        }
    }

    /// The standard chess starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::from_fen(STARTING_FEN)
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[must_use]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[must_use]
    pub fn zobrist_hash(&self) -> u64 {
        self.zobrist_hash
    }

    #[must_use]
    pub fn in_check(&self) -> bool {
        self.current_player_in_check
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.mailbox[sq.as_index()]
    }

    #[must_use]
    pub(crate) fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[must_use]
    pub(crate) fn all_occupied(&self) -> Bitboard {
        self.all_occupied
    }

    #[must_use]
    pub(crate) fn pieces_of(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[must_use]
    pub(crate) fn king_square(&self, color: Color) -> Square {
        self.pieces_of(color, Piece::King)
            .iter()
            .next()
            .expect("every legal position has exactly one king per side")
    }

    /// Number of times the current hash has appeared in history since the
    /// last irreversible move, including the current position itself.
    #[must_use]
    pub(crate) fn repetition_count(&self, hash: u64) -> usize {
        self.repetition_history.iter().filter(|&&h| h == hash).count()
    }

    #[must_use]
    pub fn is_draw_by_repetition(&self) -> bool {
        self.repetition_count(self.zobrist_hash) >= 3
    }

    #[must_use]
    pub fn is_draw_by_fifty_moves(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Undoes back to the most recently pushed [`UndoRecord`].
    ///
    /// # Errors
    /// Returns [`EmptyUndoStack`] if no move is pending; a correctly driven
    /// search never triggers this.
    pub fn unmake(&mut self) -> Result<(), EmptyUndoStack> {
        let record = self.undo_stack.pop().ok_or(EmptyUndoStack)?;
        self.unmake_record(record);
        Ok(())
    }

    /// Places a piece during FEN setup without touching the Zobrist hash;
    /// callers rebuild the hash from scratch once the board is fully loaded.
    pub(crate) fn place_piece_no_hash(&mut self, sq: Square, color: Color, piece: Piece) {
        debug_assert!(self.mailbox[sq.as_index()].is_none());
        self.mailbox[sq.as_index()] = Some((color, piece));
        let bit = bit_for_square(sq);
        self.pieces[color.index()][piece.index()] |= bit;
        self.occupied[color.index()] |= bit;
        self.all_occupied |= bit;
    }

    /// Recomputes the Zobrist hash from the current board contents, ignoring
    /// `self.zobrist_hash`. Used after FEN setup and to cross-check the
    /// incrementally maintained hash in tests.
    #[must_use]
    pub(crate) fn recompute_zobrist(&self) -> u64 {
        let mut hash = 0u64;
        for piece in ALL_PIECES {
            for color in [Color::White, Color::Black] {
                for sq in self.pieces[color.index()][piece.index()].iter() {
                    hash ^= zobrist::piece_key(color, piece, sq);
                }
            }
        }
        if self.castling_rights.has(Color::White, true) {
            hash ^= zobrist::castling_key(Color::White, true);
        }
        if self.castling_rights.has(Color::White, false) {
            hash ^= zobrist::castling_key(Color::White, false);
        }
        if self.castling_rights.has(Color::Black, true) {
            hash ^= zobrist::castling_key(Color::Black, true);
        }
        if self.castling_rights.has(Color::Black, false) {
            hash ^= zobrist::castling_key(Color::Black, false);
        }
        if let Some(ep) = self.en_passant_square {
            hash ^= zobrist::en_passant_key(ep.file());
        }
        if self.side_to_move == Color::Black {
            hash ^= zobrist::side_to_move_key();
        }
        hash
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
