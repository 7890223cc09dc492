//! Move selection: the expert rule chain and move application.

use crate::error::{BoardDefect, EngineError};
use crate::position::Position;
use crate::strategy::{
    find_center, find_empty_corner, find_empty_side, find_opening_corner, find_opposite_corner,
};
use crate::tactics::{
    ForkScan, find_block, find_block_fork, find_fork_for_player, find_winnable_square,
};
use crate::types::{Board, Player};
use crate::validate::TurnRule;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{error, info, instrument};

/// One heuristic of the decision chain, declared in priority order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// Complete a line.
    #[display("win")]
    Win,
    /// Stop the opponent completing a line.
    #[display("block")]
    Block,
    /// Open two lines at once.
    #[display("fork")]
    Fork,
    /// Deny the opponent a fork.
    #[display("block-fork")]
    BlockFork,
    /// First move of the game.
    #[display("opening-corner")]
    OpeningCorner,
    /// Take the center.
    #[display("center")]
    Center,
    /// Mirror an opponent's corner.
    #[display("opposite-corner")]
    OppositeCorner,
    /// Any free corner.
    #[display("empty-corner")]
    EmptyCorner,
    /// Any free side.
    #[display("empty-side")]
    EmptySide,
}

impl Rule {
    /// The square this rule picks for `player`, if it applies.
    pub fn apply(self, board: &Board, player: Player) -> Option<Position> {
        match self {
            Rule::Win => find_winnable_square(board, player),
            Rule::Block => find_block(board, player),
            Rule::Fork => find_fork_for_player(board, player, ForkScan::First),
            Rule::BlockFork => find_block_fork(board, player),
            Rule::OpeningCorner => find_opening_corner(board),
            Rule::Center => find_center(board),
            Rule::OppositeCorner => find_opposite_corner(board, player),
            Rule::EmptyCorner => find_empty_corner(board),
            Rule::EmptySide => find_empty_side(board),
        }
    }
}

/// The chosen square and the rule that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Square to play.
    pub position: Position,
    /// Rule that produced it.
    pub rule: Rule,
}

impl Selection {
    /// Board index (0-8) of the chosen square.
    pub fn index(&self) -> usize {
        self.position.to_index()
    }
}

/// Picks `player`'s move: the first rule in priority order that yields a square.
#[instrument(skip(board), fields(board = %board))]
pub fn select_move(board: &Board, player: Player) -> Result<Selection, EngineError> {
    if board.is_full() {
        return Err(EngineError::NoLegalMove);
    }

    Rule::iter()
        .find_map(|rule| {
            rule.apply(board, player)
                .map(|position| Selection { position, rule })
        })
        .ok_or_else(|| {
            error!("Every rule came up empty on a board with free squares");
            EngineError::NoLegalMove
        })
}

/// Expert opponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engine {
    turn_rule: TurnRule,
}

impl Engine {
    /// Creates an engine enforcing `turn_rule`.
    pub fn new(turn_rule: TurnRule) -> Self {
        Self { turn_rule }
    }

    /// Turn rule in force.
    pub fn turn_rule(&self) -> TurnRule {
        self.turn_rule
    }

    /// Plays `player`'s move on `board`.
    ///
    /// Validity is re-derived from the board's counts on every call rather
    /// than trusted from parsing, since one `Board` may take several moves.
    /// Fails with [`EngineError::InvalidBoard`] if the counts have drifted
    /// out of balance, [`EngineError::IllegalTurn`] if `player` may not move,
    /// and [`EngineError::NoLegalMove`] on a full board. The board is left
    /// untouched on failure.
    #[instrument(skip(self, board), fields(board = %board, turn_rule = ?self.turn_rule))]
    pub fn make_move(&self, board: &mut Board, player: Player) -> Result<Selection, EngineError> {
        let tally = board.tally();
        if !tally.is_balanced() {
            return Err(EngineError::InvalidBoard(BoardDefect::Imbalance {
                x: tally.x,
                o: tally.o,
            }));
        }
        if !board.is_player_next(player, self.turn_rule) {
            return Err(EngineError::IllegalTurn(player));
        }

        let selection = select_move(board, player)?;
        board.place(selection.position, player);
        info!(
            position = %selection.position,
            rule = %selection.rule,
            result = %board,
            "Move made"
        );
        Ok(selection)
    }

    /// Parses `raw`, plays `player`'s move and returns the new board.
    #[instrument(skip(self))]
    pub fn respond(&self, raw: &str, player: Player) -> Result<Board, EngineError> {
        let mut board: Board = raw.parse()?;
        self.make_move(&mut board, player)?;
        Ok(board)
    }
}
