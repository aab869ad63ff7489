//! Property-based tests using proptest: random legal-move walks checked
//! against the invariants `make`/`unmake`, the Zobrist hash, and FEN
//! round-tripping are supposed to hold for any reachable position.

use proptest::prelude::*;
use rand::prelude::*;

use crate::board::{evaluate, Board, LegalMoveInfo};

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn move_count_strategy() -> impl Strategy<Value = usize> {
    0..30usize
}

/// Plays up to `num_moves` random legal moves from the startpos, stopping
/// early at a position with no legal moves (checkmate/stalemate).
fn random_walk(board: &mut Board, rng: &mut StdRng, num_moves: usize) -> usize {
    let mut played = 0;
    for _ in 0..num_moves {
        let moves = board.generate_legal(false);
        if moves.is_empty() {
            break;
        }
        let idx = rng.gen_range(0..moves.len());
        let mv = *moves.iter().nth(idx).expect("idx in range");
        board.make(mv);
        played += 1;
    }
    played
}

proptest! {
    /// `make` followed by the matching number of `unmake`s restores the
    /// exact hash and FEN, regardless of which random legal moves were
    /// played along the way.
    #[test]
    fn prop_make_unmake_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        let initial_hash = board.zobrist_hash();
        let initial_fen = board.to_fen();

        let played = random_walk(&mut board, &mut rng, num_moves);
        for _ in 0..played {
            board.unmake().expect("one unmake per move played");
        }

        prop_assert_eq!(board.zobrist_hash(), initial_hash);
        prop_assert_eq!(board.to_fen(), initial_fen);
    }

    /// The incrementally maintained Zobrist hash never drifts from a
    /// from-scratch recomputation over the same position.
    #[test]
    fn prop_hash_matches_recomputation(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = board.generate_legal(false);
            if moves.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..moves.len());
            let mv = *moves.iter().nth(idx).expect("idx in range");
            board.make(mv);
            prop_assert_eq!(board.zobrist_hash(), board.recompute_zobrist());
        }
    }

    /// Formatting a reachable position to FEN and re-parsing it yields the
    /// same hash and FEN string.
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_walk(&mut board, &mut rng, num_moves);

        let fen = board.to_fen();
        let restored = Board::from_fen(&fen);
        prop_assert_eq!(restored.zobrist_hash(), board.zobrist_hash());
        prop_assert_eq!(restored.to_fen(), fen);
    }

    /// Every move `generate_legal` hands out, once made, leaves the mover's
    /// own king safe from attack.
    #[test]
    fn prop_legal_moves_never_self_check(seed in seed_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..10 {
            let moves = board.generate_legal(false);
            if moves.is_empty() {
                break;
            }
            for mv in moves.iter() {
                board.make(*mv);
                let info = crate::board::LegalMoveInfo::compute(&board, board.side_to_move().opponent());
                prop_assert_eq!(info.checker_count, 0, "{mv} left the mover in check");
                board.unmake().expect("just made a move");
            }
            let idx = rng.gen_range(0..moves.len());
            let mv = *moves.iter().nth(idx).expect("idx in range");
            board.make(mv);
        }
    }

    /// Static evaluation never produces an implausibly large score; a
    /// runaway value would indicate a material- or weighting bug.
    #[test]
    fn prop_eval_bounded(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);
        random_walk(&mut board, &mut rng, num_moves);

        let eval = evaluate(&board);
        prop_assert!(eval.abs() < 10_000, "evaluation {eval} is unreasonably large");
    }
}
