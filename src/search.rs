//! Iterative-deepening negamax with alpha-beta pruning, quiescence search,
//! transposition-table probing, and cooperative cancellation.
//!
//! Deliberately does not implement null-move pruning, late-move reductions,
//! killer/history tables, aspiration windows, or any multi-threaded search:
//! move ordering is exactly a TT-move bonus plus MVV/LVA captures,
//! promotions, and a flat bonus for checking moves.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::board::{evaluate, Board, Move, MoveList, Piece, ScoredMoveList};
use crate::tt::{BoundType, TranspositionTable};

/// Effectively infinite for alpha-beta bounds; comfortably clear of the mate
/// score range so mate scores stay distinguishable from ordinary ones.
const INFINITY: i32 = 1_000_000;
/// Score for "mate in 0 plies". A mate found at ply `p` scores
/// `MATE_SCORE - p`, so the search prefers shallower mates over deeper ones.
const MATE_SCORE: i32 = 900_000;
/// Iterative deepening stops here even with no depth limit and no
/// cancellation, as a backstop against a caller forgetting to set `stop`.
const MAX_ITERATIVE_DEPTH: u32 = 128;

/// Shared cancellation/time budget for one `go`, threaded through every
/// recursive call rather than held as global state.
pub struct SearchContext {
    stop: Arc<AtomicBool>,
    start_time: Instant,
    max_seconds: Option<f64>,
    interrupted: Cell<bool>,
}

impl SearchContext {
    #[must_use]
    pub fn new(stop: Arc<AtomicBool>, max_seconds: Option<f64>) -> Self {
        SearchContext {
            stop,
            start_time: Instant::now(),
            max_seconds,
            interrupted: Cell::new(false),
        }
    }

    fn cancelled(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }
        match self.max_seconds {
            Some(max) => self.start_time.elapsed().as_secs_f64() >= max,
            None => false,
        }
    }

    fn mark_interrupted(&self) {
        self.interrupted.set(true);
    }

    fn was_interrupted(&self) -> bool {
        self.interrupted.get()
    }

    fn reset_interrupted(&self) {
        self.interrupted.set(false);
    }
}

/// The outcome of one `go`: best move, its score, the deepest completed (or
/// partially searched) depth, and whether that depth was cut short.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: u32,
    pub interrupted: bool,
}

/// Runs iterative deepening from depth 1 up to `max_depth` (unbounded, save
/// for [`MAX_ITERATIVE_DEPTH`], when `None`). A depth cut short by
/// cancellation never overwrites the previous depth's completed result.
pub fn iterative_deepening(
    board: &mut Board,
    tt: &mut TranspositionTable,
    max_depth: Option<u32>,
    ctx: &SearchContext,
) -> SearchResult {
    let root_moves = board.generate_legal(false);
    if root_moves.is_empty() {
        return SearchResult {
            best_move: None,
            score: if board.in_check() { -MATE_SCORE } else { 0 },
            depth: 0,
            interrupted: false,
        };
    }

    let mut result =
        SearchResult { best_move: root_moves.first(), score: evaluate(board), depth: 0, interrupted: false };

    let hard_limit = max_depth.unwrap_or(MAX_ITERATIVE_DEPTH).min(MAX_ITERATIVE_DEPTH);
    for depth in 1..=hard_limit {
        ctx.reset_interrupted();
        let (score, best_move) = search_root(board, tt, &root_moves, depth, ctx);

        if ctx.was_interrupted() {
            break;
        }
        if let Some(mv) = best_move {
            result = SearchResult { best_move: Some(mv), score, depth, interrupted: false };
        }
        if score.abs() >= MATE_SCORE - MAX_ITERATIVE_DEPTH as i32 {
            break;
        }
        if ctx.cancelled() {
            break;
        }
    }

    result.interrupted = ctx.was_interrupted();
    result
}

fn search_root(
    board: &mut Board,
    tt: &mut TranspositionTable,
    root_moves: &MoveList,
    depth: u32,
    ctx: &SearchContext,
) -> (i32, Option<Move>) {
    let hash = board.zobrist_hash();
    let tt_move = tt.retrieve(hash).filter(|e| e.hash() == hash).and_then(|e| e.best_move());
    let ordered = order_moves(board, root_moves, tt_move);

    let mut alpha = -INFINITY;
    let beta = INFINITY;
    let mut best_move = None;

    for scored in ordered.iter() {
        if ctx.cancelled() {
            ctx.mark_interrupted();
            break;
        }
        let mv = scored.mv;
        board.make(mv);
        let score = -negamax(board, tt, depth - 1, 1, -beta, -alpha, ctx);
        board.unmake().expect("just made a move");

        if score > alpha {
            alpha = score;
            best_move = Some(mv);
        }
    }

    if let Some(mv) = best_move {
        tt.store(hash, alpha, depth, BoundType::Exact, Some(mv));
    }
    (alpha, best_move)
}

fn negamax(
    board: &mut Board,
    tt: &mut TranspositionTable,
    depth: u32,
    ply: u32,
    mut alpha: i32,
    mut beta: i32,
    ctx: &SearchContext,
) -> i32 {
    if ctx.cancelled() {
        ctx.mark_interrupted();
        return evaluate(board);
    }
    if board.is_draw_by_repetition() || board.is_draw_by_fifty_moves() {
        return 0;
    }

    let alpha_orig = alpha;
    let hash = board.zobrist_hash();
    if let Some(entry) = tt.retrieve(hash) {
        if entry.hash() == hash && entry.depth() >= depth {
            match entry.bound_type() {
                BoundType::Exact => return entry.score(),
                BoundType::LowerBound => alpha = alpha.max(entry.score()),
                BoundType::UpperBound => beta = beta.min(entry.score()),
            }
            if alpha >= beta {
                return entry.score();
            }
        }
    }

    if depth == 0 {
        return quiescence(board, ply, alpha, beta, ctx);
    }

    let tt_move = tt.retrieve(hash).filter(|e| e.hash() == hash).and_then(|e| e.best_move());
    let moves = board.generate_legal(false);
    if moves.is_empty() {
        return if board.in_check() { -(MATE_SCORE - ply as i32) } else { 0 };
    }

    let ordered = order_moves(board, &moves, tt_move);
    let mut best_move = None;

    for scored in ordered.iter() {
        let mv = scored.mv;
        board.make(mv);
        let score = -negamax(board, tt, depth - 1, ply + 1, -beta, -alpha, ctx);
        board.unmake().expect("just made a move");

        if score > alpha {
            alpha = score;
            best_move = Some(mv);
        }
        if alpha >= beta {
            tt.store(hash, beta, depth, BoundType::LowerBound, Some(mv));
            return beta;
        }
    }

    let bound = if alpha > alpha_orig { BoundType::Exact } else { BoundType::UpperBound };
    tt.store(hash, alpha, depth, bound, best_move);
    alpha
}

fn quiescence(board: &mut Board, ply: u32, mut alpha: i32, beta: i32, ctx: &SearchContext) -> i32 {
    if ctx.cancelled() {
        ctx.mark_interrupted();
        return evaluate(board);
    }

    let stand_pat = evaluate(board);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let captures = board.generate_legal_captures();
    let ordered = order_moves(board, &captures, None);

    for scored in ordered.iter() {
        let mv = scored.mv;
        board.make(mv);
        let score = -quiescence(board, ply + 1, -beta, -alpha, ctx);
        board.unmake().expect("just made a move");

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }
    alpha
}

/// Scores candidates for move ordering: TT move first, then MVV/LVA
/// captures, promotions by the value of the promoted piece, and a flat
/// bonus for moves that give check.
fn order_moves(board: &mut Board, moves: &MoveList, tt_move: Option<Move>) -> ScoredMoveList {
    let mut scored = ScoredMoveList::new();
    for &mv in moves {
        let mut score = 0i32;
        if Some(mv) == tt_move {
            score += 1_000_000;
        }
        if mv.is_capture() {
            let victim_value = if mv.is_en_passant() {
                Piece::Pawn.value()
            } else {
                board.piece_at(mv.to()).map_or(0, |(_, p)| p.value())
            };
            let attacker_value = board.piece_at(mv.from()).map_or(0, |(_, p)| p.value());
            score += 10 * victim_value - attacker_value;
        }
        if let Some(promotion) = mv.promotion() {
            score += promotion.value();
        }
        if board.gives_check(mv) {
            score += 50;
        }
        scored.push(mv, score);
    }
    scored.sort_by_score_desc();
    scored
}
