//! Error types for the board engine.

use crate::types::Player;

/// Why a raw board representation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BoardDefect {
    /// The board does not have exactly nine squares.
    #[display("expected 9 squares, got {}", _0)]
    Length(usize),

    /// A square holds something other than `x`, `o` or a space.
    #[display("unrecognized square value {:?}", _0)]
    Symbol(char),

    /// The players' mark counts differ by more than one.
    #[display("{} x's and {} o's cannot come from alternating moves", x, o)]
    Imbalance {
        /// Marks held by X.
        x: u8,
        /// Marks held by O.
        o: u8,
    },
}

/// Error that can occur when asking the engine for a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// The board failed validation.
    #[display("Board is not valid: {}", _0)]
    InvalidBoard(BoardDefect),

    /// It is not this player's turn.
    #[display("Player \"{}\" cannot make a move now", _0)]
    IllegalTurn(Player),

    /// No square is left to play.
    #[display("There should be a move, but none was found")]
    NoLegalMove,
}

impl std::error::Error for EngineError {}

impl From<BoardDefect> for EngineError {
    fn from(defect: BoardDefect) -> Self {
        EngineError::InvalidBoard(defect)
    }
}
