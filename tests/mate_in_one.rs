//! A small suite of hand-picked mate-in-one positions: the engine must find
//! the mating move at a shallow depth, and playing it must actually leave
//! the opponent with no legal reply while in check.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chess_engine::board::Board;
use chess_engine::search::{iterative_deepening, SearchContext};
use chess_engine::tt::TranspositionTable;

struct MateInOne {
    name: &'static str,
    fen: &'static str,
    mating_move: &'static str,
}

const PROBLEMS: &[MateInOne] = &[
    MateInOne {
        name: "back_rank",
        fen: "6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1",
        mating_move: "e1e8",
    },
    MateInOne {
        name: "smothered_queen",
        fen: "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4",
        mating_move: "h5f7",
    },
    MateInOne {
        name: "corner_rook",
        fen: "7k/8/6K1/8/8/8/8/R7 w - - 0 1",
        mating_move: "a1a8",
    },
];

fn is_checkmate(board: &mut Board) -> bool {
    board.generate_legal(false).is_empty() && board.in_check()
}

#[test]
fn search_finds_the_mating_move() {
    for problem in PROBLEMS {
        let mut board = Board::from_fen(problem.fen);
        let mut tt = TranspositionTable::new(1);
        let ctx = SearchContext::new(Arc::new(AtomicBool::new(false)), None);

        let result = iterative_deepening(&mut board, &mut tt, Some(3), &ctx);
        let mv = result.best_move.unwrap_or_else(|| panic!("{}: no move found", problem.name));
        assert_eq!(mv.to_string(), problem.mating_move, "{}: wrong move", problem.name);
    }
}

#[test]
fn the_mating_move_actually_mates() {
    for problem in PROBLEMS {
        let mut board = Board::from_fen(problem.fen);
        let mv = board
            .parse_uci_move(problem.mating_move)
            .unwrap_or_else(|_| panic!("{}: {} is not a legal move here", problem.name, problem.mating_move));
        board.make(mv);
        assert!(is_checkmate(&mut board), "{}: {} is not mate", problem.name, problem.mating_move);
    }
}
