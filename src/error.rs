//! Typed error kinds for the engine's parse boundaries and assertions.
//!
//! These are never string-matched by callers; each boundary (FEN parsing,
//! coordinate parsing, UCI command parsing) returns one of these instead of
//! an `anyhow`-style opaque error.

use thiserror::Error;

/// FEN parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN must have 6 whitespace-separated fields, found {found}")]
    WrongFieldCount { found: usize },
    #[error("invalid piece character '{c}' in piece-placement field")]
    InvalidPieceChar { c: char },
    #[error("rank {rank} has too many files ({files})")]
    TooManyFiles { rank: usize, files: usize },
    #[error("piece-placement field has {found} ranks, expected 8")]
    WrongRankCount { found: usize },
    #[error("invalid side to move '{found}', expected 'w' or 'b'")]
    InvalidSideToMove { found: String },
    #[error("invalid castling rights character '{c}'")]
    InvalidCastlingChar { c: char },
    #[error("invalid en passant target '{found}'")]
    InvalidEnPassant { found: String },
    #[error("invalid halfmove clock '{found}'")]
    InvalidHalfmoveClock { found: String },
    #[error("invalid fullmove number '{found}'")]
    InvalidFullmoveNumber { found: String },
}

/// Algebraic square string parsing failures (e.g. "e4", "a1").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidCoord {
    #[error("coordinate string '{0:?}' must be exactly 2 characters")]
    WrongLength([u8; 2]),
    #[error("file character out of range a..h")]
    FileOutOfRange,
    #[error("rank character out of range 1..8")]
    RankOutOfRange,
}

/// Failures parsing a UCI move string (`<from><to>[promotion]`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move string '{0}' has invalid length (expected 4 or 5 characters)")]
    InvalidLength(String),
    #[error("invalid square in move string '{0}'")]
    InvalidSquare(String),
    #[error("invalid promotion character '{0}'")]
    InvalidPromotion(char),
    #[error("'{0}' does not match any legal move in the current position")]
    NotLegal(String),
}

/// Unparseable UCI command lines. Logged and ignored by the controller,
/// never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed UCI command: {line}")]
pub struct MalformedCommand {
    pub line: String,
}

/// Raised by `Board::unmake` when called with no prior `make_move` to undo.
/// A correctly-driven search never triggers this; it exists so a bug in
/// ply bookkeeping fails loudly instead of corrupting board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unmake called with an empty undo stack")]
pub struct EmptyUndoStack;
