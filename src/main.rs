//! Thin binary entry point; the UCI loop itself lives in the library crate.

fn main() {
    chess_engine::uci::run();
}
