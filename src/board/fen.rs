//! FEN (Forsyth-Edwards Notation) parsing and formatting.

use std::fmt;

use crate::error::{FenError, MoveParseError};

use super::types::{castle_bit, file_to_index, rank_to_index};
use super::{Board, CastlingRights, Color, Move, Piece, Square};

/// The standard chess starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parses the six-field FEN form: `piece-placement side-to-move
    /// castling-rights ep-target halfmove fullmove`. Rejects malformed input
    /// with a typed error rather than attempting partial recovery.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        }

        let mut board = Board::empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        // FEN ranks run 8 down to 1 (top to bottom); our rank index is 0 = rank 1.
        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    if file > 8 {
                        return Err(FenError::TooManyFiles { rank, files: file });
                    }
                    continue;
                }
                if file >= 8 {
                    return Err(FenError::TooManyFiles { rank, files: file + 1 });
                }
                let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPieceChar { c })?;
                let sq = Square::new(rank, file);
                board.place_piece_no_hash(sq, color, piece);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::TooManyFiles { rank, files: file });
            }
        }

        board.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSideToMove { found: other.to_string() }),
        };

        let mut rights = CastlingRights::none();
        if fields[2] != "-" {
            for c in fields[2].chars() {
                let (color, ch) = match c {
                    'K' | 'Q' => (Color::White, c),
                    'k' | 'q' => (Color::Black, c.to_ascii_uppercase()),
                    _ => return Err(FenError::InvalidCastlingChar { c }),
                };
                let bit = castle_bit(color, ch);
                if bit == 0 {
                    return Err(FenError::InvalidCastlingChar { c });
                }
                rights.set(color, ch == 'K');
            }
        }
        board.castling_rights = rights;

        board.en_passant_square = if fields[3] == "-" {
            None
        } else {
            let bytes = fields[3].as_bytes();
            if bytes.len() != 2
                || !(b'a'..=b'h').contains(&bytes[0])
                || !(b'1'..=b'8').contains(&bytes[1])
            {
                return Err(FenError::InvalidEnPassant { found: fields[3].to_string() });
            }
            let rank = rank_to_index(fields[3].chars().nth(1).unwrap());
            let file = file_to_index(fields[3].chars().next().unwrap());
            Some(Square::new(rank, file))
        };

        board.halfmove_clock = fields[4]
            .parse()
            .map_err(|_| FenError::InvalidHalfmoveClock { found: fields[4].to_string() })?;
        board.fullmove_number = fields[5]
            .parse()
            .map_err(|_| FenError::InvalidFullmoveNumber { found: fields[5].to_string() })?;

        board.zobrist_hash = board.recompute_zobrist();
        board.repetition_history.push(board.zobrist_hash);
        board.refresh_check_status();
        Ok(board)
    }

    /// Parses a FEN string, panicking on malformed input. Convenient for
    /// tests and benchmarks where the FEN is a trusted literal.
    ///
    /// # Panics
    /// Panics if `fen` is not a valid six-field FEN string.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("invalid FEN literal")
    }

    /// Formats the current position as a six-field FEN string.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut ranks = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0u32;
            for file in 0..8 {
                match self.piece_at(Square::new(rank, file)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            ranks.push(row);
        }

        let mut castling = String::new();
        if self.castling_rights.has(Color::White, true) {
            castling.push('K');
        }
        if self.castling_rights.has(Color::White, false) {
            castling.push('Q');
        }
        if self.castling_rights.has(Color::Black, true) {
            castling.push('k');
        }
        if self.castling_rights.has(Color::Black, false) {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = self.en_passant_square.map_or_else(|| "-".to_string(), |sq| sq.to_string());
        let side = if self.side_to_move == Color::White { "w" } else { "b" };

        format!(
            "{} {} {} {} {} {}",
            ranks.join("/"),
            side,
            castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parses a UCI move string (`<from><to>[promotion]`) by matching it
    /// against the legal moves of the current position.
    pub fn parse_uci_move(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        if uci.len() != 4 && uci.len() != 5 {
            return Err(MoveParseError::InvalidLength(uci.to_string()));
        }
        let from: Square = uci[0..2]
            .parse()
            .map_err(|_| MoveParseError::InvalidSquare(uci.to_string()))?;
        let to: Square = uci[2..4]
            .parse()
            .map_err(|_| MoveParseError::InvalidSquare(uci.to_string()))?;
        let promotion = if uci.len() == 5 {
            let c = uci.as_bytes()[4] as char;
            Some(Piece::from_char(c).filter(|p| !matches!(p, Piece::Pawn | Piece::King))
                .ok_or(MoveParseError::InvalidPromotion(c))?)
        } else {
            None
        };

        let legal = self.generate_legal(false);
        legal
            .iter()
            .copied()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
            .ok_or_else(|| MoveParseError::NotLegal(uci.to_string()))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl std::str::FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}
