//! Expert tic-tac-toe move selection.
//!
//! Given a board encoded as nine `x`/`o`/space characters, the engine
//! answers with a single deterministic move chosen by a fixed priority
//! chain of heuristics:
//!
//! `win → block → fork → block-fork → opening-corner → center →
//! opposite-corner → empty-corner → empty-side`
//!
//! # Example
//!
//! ```
//! use expert_tictactoe::{Engine, Player};
//!
//! let board = Engine::default().respond("o  o  xx ", Player::O)?;
//! assert_eq!(board.to_string(), "o  o  xxo");
//! # Ok::<(), expert_tictactoe::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;
mod position;
mod strategy;
mod tactics;
mod types;
mod validate;

pub use engine::{Engine, Rule, Selection, select_move};
pub use error::{BoardDefect, EngineError};
pub use position::{CENTER, CORNERS, LINES, Line, Position, SIDES};
pub use strategy::{
    find_center, find_empty_corner, find_empty_side, find_empty_square, find_opening_corner,
    find_opposite_corner,
};
pub use tactics::{
    ForkScan, find_block, find_block_fork, find_fork_for_player, find_winnable_square, fork_points,
};
pub use types::{Board, Player, Square, Tally};
pub use validate::{TurnRule, validate};
