//! Search tests to verify the engine finds correct or at least plausible
//! moves in various tactical and endgame positions.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use chess_engine::board::Board;
use chess_engine::search::{iterative_deepening, SearchContext};
use chess_engine::tt::TranspositionTable;

fn search(board: &mut Board, max_depth: u32) -> Option<chess_engine::search::SearchResult> {
    let mut tt = TranspositionTable::new(1);
    let ctx = SearchContext::new(Arc::new(AtomicBool::new(false)), None);
    Some(iterative_deepening(board, &mut tt, Some(max_depth), &ctx))
}

fn is_checkmate(board: &mut Board) -> bool {
    board.generate_legal(false).is_empty() && board.in_check()
}

fn is_stalemate(board: &mut Board) -> bool {
    board.generate_legal(false).is_empty() && !board.in_check()
}

#[test]
fn avoids_hanging_the_queen() {
    let mut board = Board::from_fen("r1bqkbnr/pppppppp/2n5/8/4P3/5Q2/PPPP1PPP/RNB1KBNR w KQkq - 0 3");
    let result = search(&mut board, 4).unwrap();
    let mv = result.best_move.expect("should find a move");
    assert_ne!(mv.to_string(), "f3c6", "should not hang the queen on c6");
}

#[test]
fn captures_a_free_piece() {
    let mut board = Board::from_fen("rnbqk1nr/pppp1ppp/2b5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 4");
    let result = search(&mut board, 4).unwrap();
    let mv = result.best_move.expect("should find a move");
    assert!(mv.is_capture() || mv.to_string() == "c4f7", "should capture material or threaten the king");
}

#[test]
fn deeper_iterative_deepening_still_returns_a_legal_move() {
    let mut board = Board::new();
    let result2 = search(&mut board.clone(), 2).unwrap();
    let result4 = search(&mut board, 4).unwrap();

    let mv2 = result2.best_move.expect("should find a move at depth 2");
    let mv4 = result4.best_move.expect("should find a move at depth 4");

    let legal = board.generate_legal(false);
    assert!(legal.iter().any(|m| *m == mv2), "depth 2 move should be legal");
    assert!(legal.iter().any(|m| *m == mv4), "depth 4 move should be legal");
}

#[test]
fn single_legal_move_is_forced() {
    // White king on a1 is checked along the rank by the rook on h1; b1 stays
    // in check and b2 is covered by the black king on c3, leaving only a2.
    let mut board = Board::from_fen("8/8/8/8/8/2k5/8/K6r w - - 0 1");
    let result = search(&mut board, 4).unwrap();
    let mv = result.best_move.expect("should find a move");
    assert_eq!(mv.to_string(), "a1a2", "the only legal move is Ka2");
}

#[test]
fn no_move_in_checkmate() {
    let mut board = Board::from_fen("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1");
    assert!(is_checkmate(&mut board), "position should be checkmate");

    let result = search(&mut board, 4).unwrap();
    assert!(result.best_move.is_none(), "should return no move from checkmate");
}

#[test]
fn handles_draw_by_repetition() {
    let mut board = Board::new();
    for uci in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
        let mv = board.parse_uci_move(uci).expect("legal shuffling move");
        board.make(mv);
    }
    assert!(board.is_draw_by_repetition(), "should be a draw by threefold repetition");
}

#[test]
fn completes_at_depth_six_within_a_reasonable_time() {
    let mut board = Board::new();
    let start = Instant::now();
    let result = search(&mut board, 6).unwrap();
    assert!(result.best_move.is_some(), "should find a move at depth 6");
    assert!(start.elapsed().as_secs() < 60, "search at depth 6 took too long: {:?}", start.elapsed());
}

#[test]
fn identifies_stalemate() {
    // Black to move, no legal moves, not in check.
    let mut board = Board::from_fen("k7/8/1QK5/8/8/8/8/8 b - - 0 1");
    assert!(is_stalemate(&mut board), "position should be stalemate");
    assert!(!is_checkmate(&mut board), "position should not be checkmate");
}

#[test]
fn fifty_move_rule_is_a_draw() {
    let board = Board::from_fen("8/8/8/8/8/8/8/K1k5 w - - 100 1");
    assert!(board.is_draw_by_fifty_moves(), "100 halfmove clock should be a draw");
}

#[test]
fn finds_a_move_in_a_forcing_endgame() {
    let mut board = Board::from_fen("6k1/pp4pp/8/8/8/8/PP4PP/1q4K1 b - - 0 1");
    let result = search(&mut board, 4).unwrap();
    assert!(result.best_move.is_some(), "should find a move in this position");
}
