//! Board validation and turn legality.

use crate::error::{BoardDefect, EngineError};
use crate::types::{Board, Player, Square, Tally};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, instrument, warn};

/// Checks a raw board string without building a [`Board`].
#[instrument]
pub fn validate(raw: &str) -> bool {
    check(raw).is_ok()
}

/// Parses nine `x`/`o`/space characters, rejecting the first defect found.
fn check(raw: &str) -> Result<[Square; 9], BoardDefect> {
    let length = raw.chars().count();
    if length != 9 {
        return Err(BoardDefect::Length(length));
    }

    let mut squares = [Square::Empty; 9];
    for (slot, symbol) in squares.iter_mut().zip(raw.chars()) {
        *slot = Square::from_symbol(symbol).ok_or(BoardDefect::Symbol(symbol))?;
    }

    let tally = Tally::of(&squares);
    if !tally.is_balanced() {
        return Err(BoardDefect::Imbalance {
            x: tally.x,
            o: tally.o,
        });
    }
    Ok(squares)
}

impl FromStr for Board {
    type Err = EngineError;

    #[instrument(name = "parse_board")]
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match check(raw) {
            Ok(squares) => Ok(Board::from_squares(squares)),
            Err(defect) => {
                debug!(%defect, "Rejected board");
                Err(EngineError::InvalidBoard(defect))
            }
        }
    }
}

/// How strictly turn order is enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRule {
    /// Compares the player's count with itself, so any valid board allows a move.
    #[default]
    Permissive,
    /// The player may move only while holding no more marks than the opponent.
    Strict,
}

impl Board {
    /// Whether `player` may move now under `rule`.
    #[instrument(skip(self), fields(board = %self))]
    pub fn is_player_next(&self, player: Player, rule: TurnRule) -> bool {
        if !self.tally().is_balanced() {
            warn!("Board counts are out of balance");
            return false;
        }
        match rule {
            TurnRule::Permissive => true,
            TurnRule::Strict => {
                self.tally().marks(player) <= self.tally().marks(player.opponent())
            }
        }
    }
}
