//! Positional fallbacks for when no tactical move exists.

use crate::position::{CENTER, CORNERS, Position, SIDES};
use crate::types::{Board, Player};
use tracing::instrument;

/// First empty square of `candidates`, in the order given.
pub fn find_empty_square(candidates: &[Position], board: &Board) -> Option<Position> {
    candidates.iter().copied().find(|&pos| board.is_empty(pos))
}

/// On an untouched board, open in the first corner.
#[instrument(skip(board), fields(board = %board))]
pub fn find_opening_corner(board: &Board) -> Option<Position> {
    board.is_fresh().then_some(CORNERS[0])
}

/// The center, if nobody holds it.
#[instrument(skip(board), fields(board = %board))]
pub fn find_center(board: &Board) -> Option<Position> {
    board.is_empty(CENTER).then_some(CENTER)
}

/// An empty corner facing a corner held by `player`'s opponent.
#[instrument(skip(board), fields(board = %board))]
pub fn find_opposite_corner(board: &Board, player: Player) -> Option<Position> {
    CORNERS.iter().find_map(|&corner| {
        let opposite = corner.opposite_corner()?;
        (board.is_held_by(corner, player.opponent()) && board.is_empty(opposite))
            .then_some(opposite)
    })
}

/// First empty corner.
pub fn find_empty_corner(board: &Board) -> Option<Position> {
    find_empty_square(&CORNERS, board)
}

/// First empty side.
pub fn find_empty_side(board: &Board) -> Option<Position> {
    find_empty_square(&SIDES, board)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(raw: &str) -> Board {
        raw.parse().unwrap()
    }

    #[test]
    fn test_opening_corner_only_on_empty_board() {
        assert_eq!(find_opening_corner(&board("         ")), Some(Position::TopLeft));
        assert_eq!(find_opening_corner(&board("x        ")), None);
    }

    #[test]
    fn test_center_when_free() {
        assert_eq!(find_center(&board("x        ")), Some(Position::Center));
        assert_eq!(find_center(&board("    x    ")), None);
    }

    #[test]
    fn test_opposite_corner_faces_opponent() {
        assert_eq!(
            find_opposite_corner(&board("  x o    "), Player::O),
            Some(Position::BottomLeft)
        );
        // Own corners don't count.
        assert_eq!(find_opposite_corner(&board("  o x    "), Player::O), None);
        // Mirrored corner already taken.
        assert_eq!(find_opposite_corner(&board("x   o   o"), Player::O), None);
    }

    #[test]
    fn test_empty_corner_then_side() {
        assert_eq!(find_empty_corner(&board("x   o    ")), Some(Position::TopRight));
        assert_eq!(find_empty_corner(&board("x o x o x")), None);
        assert_eq!(find_empty_side(&board("x o x o x")), Some(Position::TopCenter));
        assert_eq!(find_empty_side(&board("xxoooxxox")), None);
    }
}
