//! Static position evaluation: material, centralization, and an endgame
//! king-drive bonus for the side with a material lead. Returns centipawns
//! from the side-to-move's perspective.

use super::{Board, Color, Piece, Square};

const TOTAL_STARTING_MATERIAL: f64 = 7800.0;
const CENTER: f64 = 3.5;

/// Static evaluation in centipawns, positive favoring the side to move.
#[must_use]
pub(crate) fn evaluate(board: &Board) -> i32 {
    let fullmove = board.fullmove_number();
    let mut white_score = side_score(board, Color::White, fullmove);
    let mut black_score = side_score(board, Color::Black, fullmove);
    apply_king_drive_bonus(board, &mut white_score, &mut black_score);

    let diff = white_score - black_score;
    let signed = if board.side_to_move() == Color::White { diff } else { -diff };
    signed.round() as i32
}

fn material_of(board: &Board, color: Color) -> i32 {
    [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
        .into_iter()
        .map(|piece| board.pieces_of(color, piece).popcount() as i32 * piece.value())
        .sum()
}

fn side_score(board: &Board, color: Color, fullmove: u32) -> f64 {
    let material = material_of(board, color) as f64;
    material + centralization_bonus(board, color, fullmove)
}

fn centralization_bonus(board: &Board, color: Color, fullmove: u32) -> f64 {
    let opening = (1.0 - fullmove as f64 / 50.0).max(0.0);
    let late = 1.0 - opening;

    let knight_weight = 0.3 * opening + 1.0 * late;
    let bishop_weight = 0.2 * opening + 0.8 * late;
    let pawn_weight = 0.2 * opening;

    let knight = piece_centralization(board, color, Piece::Knight, 12.0) * knight_weight;
    let bishop = piece_centralization(board, color, Piece::Bishop, 10.0) * bishop_weight;
    let pawn = piece_centralization(board, color, Piece::Pawn, 4.0) * pawn_weight;

    knight + bishop + pawn
}

fn piece_centralization(board: &Board, color: Color, piece: Piece, max_bonus: f64) -> f64 {
    board
        .pieces_of(color, piece)
        .iter()
        .map(|sq| ((7.0 - center_distance(sq)) / 7.0) * max_bonus)
        .sum()
}

fn center_distance(sq: Square) -> f64 {
    (sq.rank() as f64 - CENTER).abs() + (sq.file() as f64 - CENTER).abs()
}

fn king_manhattan_distance(a: Square, b: Square) -> f64 {
    (a.rank() as i32 - b.rank() as i32).unsigned_abs() as f64
        + (a.file() as i32 - b.file() as i32).unsigned_abs() as f64
}

fn apply_king_drive_bonus(board: &Board, white_score: &mut f64, black_score: &mut f64) {
    let white_material = material_of(board, Color::White) as f64;
    let black_material = material_of(board, Color::Black) as f64;
    let ratio = (white_material + black_material) / TOTAL_STARTING_MATERIAL;
    let no_queens =
        board.pieces_of(Color::White, Piece::Queen).is_empty() && board.pieces_of(Color::Black, Piece::Queen).is_empty();

    let endgame_applies = ratio < 0.5 || (no_queens && ratio < 0.7);
    if !endgame_applies {
        return;
    }

    let (leader, trailer, leader_score) = if white_material > black_material {
        (Color::White, Color::Black, &mut *white_score)
    } else if black_material > white_material {
        (Color::Black, Color::White, &mut *black_score)
    } else {
        return;
    };

    let leader_king = board.king_square(leader);
    let trailer_king = board.king_square(trailer);
    let opp_center_distance = center_distance(trailer_king);
    let king_to_king = king_manhattan_distance(leader_king, trailer_king);
    let bonus = 10.0 * (opp_center_distance + (14.0 - king_to_king)) * (1.0 - ratio);
    *leader_score += bonus;
}
