//! Engine controller: owns the board and transposition table between
//! searches, and runs each `go` on a dedicated worker thread.
//!
//! While a search is running, the worker owns the board and table outright
//! (moved in by value), so no locking is needed inside `search.rs`. `stop`
//! flips the shared cancellation flag and joins the worker to get them back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::board::Board;
use crate::search::{iterative_deepening, SearchContext, SearchResult};
use crate::tt::TranspositionTable;

/// The controller's coarse state: idle between searches, searching while a
/// worker thread owns the position, quitting once `quit` has been issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Searching,
    Quitting,
}

type WorkerResult = (Board, TranspositionTable, SearchResult);

pub struct Engine {
    board: Option<Board>,
    tt: Option<TranspositionTable>,
    stop: Option<Arc<AtomicBool>>,
    worker: Option<JoinHandle<WorkerResult>>,
    quitting: bool,
}

impl Engine {
    #[must_use]
    pub fn new(tt_size_mb: usize) -> Self {
        Engine {
            board: Some(Board::new()),
            tt: Some(TranspositionTable::new(tt_size_mb)),
            stop: None,
            worker: None,
            quitting: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        if self.quitting {
            EngineState::Quitting
        } else if self.worker.is_some() {
            EngineState::Searching
        } else {
            EngineState::Idle
        }
    }

    /// The current position. Panics if called while a search owns it; callers
    /// must `stop` or `wait` first.
    #[must_use]
    pub fn board(&self) -> &Board {
        self.board.as_ref().expect("board is owned by the search worker")
    }

    /// Replaces the current position, stopping and joining any running
    /// search first.
    pub fn set_position(&mut self, board: Board) {
        self.join_worker();
        self.board = Some(board);
    }

    /// Resets to the starting position and clears the transposition table,
    /// per `ucinewgame`.
    pub fn new_game(&mut self) {
        self.join_worker();
        self.board = Some(Board::new());
        if let Some(tt) = &mut self.tt {
            tt.clear();
        }
    }

    /// Starts a `go`. Hands board and table ownership to the worker thread
    /// and returns the shared stop flag so the caller can cancel it early.
    /// `on_complete` runs on the worker thread itself the moment the search
    /// ends, naturally or via `stop` — the UCI layer uses it to emit
    /// `bestmove` without the main command loop blocking on the search.
    ///
    /// # Panics
    /// Panics if a search is already running; callers must `stop` first.
    pub fn go<F>(&mut self, max_depth: Option<u32>, max_seconds: Option<f64>, on_complete: F) -> Arc<AtomicBool>
    where
        F: FnOnce(&SearchResult) + Send + 'static,
    {
        assert!(self.worker.is_none(), "go called while a search is already running");

        let board = self.board.take().expect("board is owned by the engine while idle");
        let mut tt = self.tt.take().expect("table is owned by the engine while idle");
        tt.clear();
        let stop = Arc::new(AtomicBool::new(false));
        self.stop = Some(Arc::clone(&stop));

        let worker_stop = Arc::clone(&stop);
        self.worker = Some(thread::spawn(move || {
            let mut board = board;
            let mut tt = tt;
            let ctx = SearchContext::new(worker_stop, max_seconds);
            let result = iterative_deepening(&mut board, &mut tt, max_depth, &ctx);
            on_complete(&result);
            (board, tt, result)
        }));

        stop
    }

    /// Blocks until the running search finishes naturally, reclaiming board
    /// and table ownership. Returns `None` if no search was running.
    pub fn wait(&mut self) -> Option<SearchResult> {
        self.join_worker()
    }

    /// Requests cancellation of the running search and blocks until it
    /// finishes. Returns `None` if no search was running.
    pub fn stop(&mut self) -> Option<SearchResult> {
        if let Some(stop) = &self.stop {
            stop.store(true, Ordering::Relaxed);
        }
        self.join_worker()
    }

    /// Stops any running search and marks the controller as quitting; the
    /// UCI loop observes this and exits.
    pub fn quit(&mut self) {
        self.stop();
        self.quitting = true;
    }

    fn join_worker(&mut self) -> Option<SearchResult> {
        self.stop = None;
        let worker = self.worker.take()?;
        let (board, tt, result) = worker.join().expect("search worker panicked");
        self.board = Some(board);
        self.tt = Some(tt);
        Some(result)
    }
}
