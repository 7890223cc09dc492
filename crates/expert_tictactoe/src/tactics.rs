//! Tactical line scanning: wins, blocks, forks and fork blocks.
//!
//! Every scan walks [`LINES`] in canonical order and tallies each line, so
//! ties always resolve to the first line (or lowest square) found. Nothing
//! here mutates the board it is given; lookahead works on copies.

use crate::position::{CENTER, CORNERS, LINES, Line, Position};
use crate::strategy::find_empty_side;
use crate::types::{Board, Player};
use tracing::{debug, instrument, trace};

/// How far to enumerate fork points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkScan {
    /// Stop at the lowest fork point.
    First,
    /// Look at every fork point, refining the answer when there are several.
    Blocking,
}

/// Lines holding exactly `marks` of `player`'s marks and nothing of the opponent's.
fn lines_holding(board: &Board, player: Player, marks: u8) -> impl Iterator<Item = &'static Line> {
    LINES.iter().filter(move |line| {
        let tally = board.line_tally(line);
        tally.marks(player) == marks && tally.empty == 3 - marks
    })
}

/// The empty square of every line `player` could complete next turn.
fn winning_squares(board: &Board, player: Player) -> impl Iterator<Item = Position> {
    lines_holding(board, player, 2)
        .filter_map(move |line| line.iter().copied().find(|&pos| board.is_empty(pos)))
}

/// Empty squares where `player` would open two lines at once, ascending.
pub fn fork_points(board: &Board, player: Player) -> Vec<Position> {
    let open: Vec<&Line> = lines_holding(board, player, 1).collect();
    board
        .empties()
        .filter(|pos| open.iter().filter(|line| line.contains(pos)).count() >= 2)
        .collect()
}

/// The square that completes a line for `player`, if any.
#[instrument(skip(board), fields(board = %board))]
pub fn find_winnable_square(board: &Board, player: Player) -> Option<Position> {
    winning_squares(board, player).next()
}

/// The square the opponent would win on next turn.
#[instrument(skip(board), fields(board = %board))]
pub fn find_block(board: &Board, player: Player) -> Option<Position> {
    find_winnable_square(board, player.opponent())
}

/// A square giving `player` two simultaneous winning threats.
///
/// With [`ForkScan::Blocking`] and more than one fork point, the square is
/// chosen to stop *all* of them (see [`find_block_fork`]). The lowest
/// intersection is used only when no such square exists.
#[instrument(level = "debug", skip(board), fields(board = %board))]
pub fn find_fork_for_player(board: &Board, player: Player, scan: ForkScan) -> Option<Position> {
    let points = fork_points(board, player);
    trace!(?points, "Fork points");
    match scan {
        ForkScan::Blocking if points.len() > 1 => {
            debug!(?points, "Several fork points, refining block");
            block_double_fork(board, player.opponent()).or_else(|| points.first().copied())
        }
        _ => points.first().copied(),
    }
}

/// A square that keeps the opponent from forking.
#[instrument(skip(board), fields(board = %board))]
pub fn find_block_fork(board: &Board, player: Player) -> Option<Position> {
    find_fork_for_player(board, player.opponent(), ForkScan::Blocking)
}

/// `mover` faces several fork points at once.
///
/// Opponent on two opposite corners with `mover` in the center: taking a
/// corner intersection hands the opponent a forced win, so play a side.
/// Otherwise force the opponent to answer a threat on a square that leaves
/// them no fork.
fn block_double_fork(board: &Board, mover: Player) -> Option<Position> {
    let forker = mover.opponent();
    let opposite_corners = CORNERS.iter().any(|&corner| {
        board.is_held_by(corner, forker)
            && corner
                .opposite_corner()
                .is_some_and(|opposite| board.is_held_by(opposite, forker))
    });
    if opposite_corners
        && board.is_held_by(CENTER, mover)
        && let Some(side) = find_empty_side(board)
    {
        debug!(%side, "Opposite corners against center, playing a side");
        return Some(side);
    }
    find_forcing_move(board, mover)
}

/// A move creating a threat whose forced answer leaves the opponent no fork.
fn find_forcing_move(board: &Board, mover: Player) -> Option<Position> {
    lines_holding(board, mover, 1).find_map(|line| {
        let mut empties = line.iter().copied().filter(|&pos| board.is_empty(pos));
        let (Some(first), Some(last)) = (empties.next(), empties.next()) else {
            return None;
        };
        [(first, last), (last, first)]
            .into_iter()
            .find(|&(take, reply)| denies_fork(board, mover, take, reply))
            .map(|(take, _)| take)
    })
}

/// Two-ply check: `mover` takes `take`, the opponent is forced onto `reply`.
///
/// Holds when the opponent then has at most one winning square and no fork point.
fn denies_fork(board: &Board, mover: Player, take: Position, reply: Position) -> bool {
    let forker = mover.opponent();
    let after = board.with_mark(take, mover).with_mark(reply, forker);

    let mut threats: Vec<Position> = winning_squares(&after, forker).collect();
    threats.sort();
    threats.dedup();
    let denied = threats.len() < 2 && fork_points(&after, forker).is_empty();
    trace!(%take, %reply, ?threats, denied, "Simulated forcing move");
    denied
}
