//! UCI command loop: reads commands from stdin, drives an [`Engine`], and
//! writes the required responses to stdout.
//!
//! Malformed lines are logged and otherwise ignored rather than treated as
//! fatal; a single bad line from a GUI should never kill the process.

use std::io::{self, BufRead, Write};

use crate::board::Board;
use crate::engine::Engine;
use crate::error::MalformedCommand;

pub const ENGINE_NAME: &str = "chess_engine";
pub const ENGINE_AUTHOR: &str = "chess_engine contributors";

const DEFAULT_TT_SIZE_MB: usize = 64;

/// Runs the UCI loop to completion, reading from `stdin` and writing to
/// `stdout` until `quit` or end-of-input.
pub fn run() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut engine = Engine::new(DEFAULT_TT_SIZE_MB);

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = tokens.first() else { continue };

        match command {
            "uci" => {
                println!("id name {ENGINE_NAME}");
                println!("id author {ENGINE_AUTHOR}");
                println!("uciok");
            }
            "isready" => println!("readyok"),
            "ucinewgame" => engine.new_game(),
            "position" => {
                if let Err(err) = handle_position(&mut engine, &tokens) {
                    log_malformed(&err);
                }
            }
            "go" => handle_go(&mut engine, &tokens),
            "stop" => {
                engine.stop();
            }
            "quit" => {
                engine.quit();
                break;
            }
            _ => log_malformed(&MalformedCommand { line: line.clone() }),
        }

        let _ = stdout.flush();
    }
}

fn handle_position(engine: &mut Engine, tokens: &[&str]) -> Result<(), MalformedCommand> {
    let malformed = || MalformedCommand { line: tokens.join(" ") };

    let mut idx = 1;
    let mut board = match tokens.get(1) {
        Some(&"startpos") => {
            idx = 2;
            Board::new()
        }
        Some(&"fen") => {
            let fields = tokens.get(2..8).ok_or_else(malformed)?;
            idx = 8;
            Board::try_from_fen(&fields.join(" ")).map_err(|_| malformed())?
        }
        _ => return Err(malformed()),
    };

    if idx < tokens.len() {
        if tokens[idx] != "moves" {
            return Err(malformed());
        }
        for uci_move in &tokens[idx + 1..] {
            let mv = board.parse_uci_move(uci_move).map_err(|_| malformed())?;
            board.make(mv);
        }
    }

    engine.set_position(board);
    Ok(())
}

fn handle_go(engine: &mut Engine, tokens: &[&str]) {
    let mut depth = None;
    let mut movetime_ms = None;
    let mut infinite = false;
    let mut perft_depth = None;

    let mut i = 1;
    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                depth = tokens.get(i + 1).and_then(|s| s.parse::<u32>().ok());
                i += 2;
            }
            "movetime" => {
                movetime_ms = tokens.get(i + 1).and_then(|s| s.parse::<u64>().ok());
                i += 2;
            }
            "infinite" => {
                infinite = true;
                i += 1;
            }
            "perft" => {
                perft_depth = tokens.get(i + 1).and_then(|s| s.parse::<u32>().ok());
                i += 2;
            }
            _ => i += 1,
        }
    }

    if engine.state() == crate::engine::EngineState::Searching {
        engine.stop();
    }

    if let Some(perft_depth) = perft_depth {
        run_perft_divide(engine, perft_depth);
        return;
    }

    let max_seconds = movetime_ms.map(|ms| ms as f64 / 1000.0);
    let max_depth = if infinite { None } else { depth };
    engine.go(max_depth, max_seconds, |result| print_bestmove(result.best_move));
}

fn run_perft_divide(engine: &Engine, depth: u32) {
    let mut board = engine.board().clone();
    let results = board.perft_divide(depth);
    let mut total = 0u64;
    for (mv, nodes) in &results {
        println!("{mv}: {nodes}");
        total += nodes;
    }
    println!("Nodes searched: {total}");
}

fn print_bestmove(best_move: Option<crate::board::Move>) {
    match best_move {
        Some(mv) => println!("bestmove {mv}"),
        None => println!("bestmove 0000"),
    }
}

fn log_malformed(command: &MalformedCommand) {
    #[cfg(feature = "logging")]
    log::warn!("{command}");
    #[cfg(not(feature = "logging"))]
    eprintln!("{command}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_requires_moves_keyword_before_move_list() {
        let mut engine = Engine::new(1);
        let tokens: Vec<&str> = "position startpos e2e4".split_whitespace().collect();
        assert!(handle_position(&mut engine, &tokens).is_err());
    }

    #[test]
    fn position_startpos_with_moves_applies_them() {
        let mut engine = Engine::new(1);
        let tokens: Vec<&str> = "position startpos moves e2e4 e7e5".split_whitespace().collect();
        handle_position(&mut engine, &tokens).unwrap();
        assert_ne!(engine.board().to_fen(), Board::new().to_fen());
    }

    #[test]
    fn position_fen_parses_six_fields() {
        let mut engine = Engine::new(1);
        let tokens: Vec<&str> =
            "position fen 4k3/8/8/8/8/8/8/R3K3 w Q - 0 1".split_whitespace().collect();
        handle_position(&mut engine, &tokens).unwrap();
        assert_eq!(engine.board().to_fen(), "4k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
    }

    #[test]
    fn malformed_position_command_is_rejected() {
        let mut engine = Engine::new(1);
        let tokens: Vec<&str> = "position banana".split_whitespace().collect();
        assert!(handle_position(&mut engine, &tokens).is_err());
    }
}
