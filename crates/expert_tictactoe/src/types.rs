//! Core domain types for tic-tac-toe.

use crate::position::{Line, Position};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// Player X (conventionally goes first).
    #[display("x")]
    X,
    /// Player O.
    #[display("o")]
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The character this player writes into a board string.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'x',
            Player::O => 'o',
        }
    }
}

impl FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Player::X),
            "o" | "O" => Ok(Player::O),
            other => Err(format!("Unknown player {:?}, expected x or o", other)),
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// The character used for this square in a board string.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => ' ',
            Square::Occupied(player) => player.symbol(),
        }
    }

    /// Parses a board-string character. Only `x`, `o` and space are recognized.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            ' ' => Some(Square::Empty),
            'x' => Some(Square::Occupied(Player::X)),
            'o' => Some(Square::Occupied(Player::O)),
            _ => None,
        }
    }
}

/// Per-value counts over a whole board or a single line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Squares held by X.
    pub x: u8,
    /// Squares held by O.
    pub o: u8,
    /// Empty squares.
    pub empty: u8,
}

impl Tally {
    /// Counts the given squares.
    pub fn of<'a>(squares: impl IntoIterator<Item = &'a Square>) -> Self {
        let mut tally = Self::default();
        for square in squares {
            tally.record(*square);
        }
        tally
    }

    /// Adds one square to the count.
    pub fn record(&mut self, square: Square) {
        match square {
            Square::Empty => self.empty += 1,
            Square::Occupied(Player::X) => self.x += 1,
            Square::Occupied(Player::O) => self.o += 1,
        }
    }

    /// Number of squares held by `player`.
    pub fn marks(&self, player: Player) -> u8 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Players alternate, so their counts never differ by more than one.
    pub fn is_balanced(&self) -> bool {
        self.x.abs_diff(self.o) <= 1
    }
}

/// 3x3 tic-tac-toe board with its cached per-value counts.
///
/// A `Board` only exists for a valid representation; see the
/// [`FromStr`] impl in the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
    tally: Tally,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::from_squares([Square::Empty; 9])
    }

    pub(crate) fn from_squares(squares: [Square; 9]) -> Self {
        let tally = Tally::of(&squares);
        Self { squares, tally }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Checks if a square is held by `player`.
    pub fn is_held_by(&self, pos: Position, player: Player) -> bool {
        self.get(pos) == Square::Occupied(player)
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Cached counts for the whole board.
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Counts for the three squares of `line`.
    pub fn line_tally(&self, line: &Line) -> Tally {
        Tally::of(line.iter().map(|&pos| &self.squares[pos.to_index()]))
    }

    /// Empty positions in ascending index order.
    pub fn empties(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|&pos| self.is_empty(pos))
    }

    /// No empty squares remain.
    pub fn is_full(&self) -> bool {
        self.tally.empty == 0
    }

    /// Nobody has moved yet.
    pub fn is_fresh(&self) -> bool {
        self.tally.empty == 9
    }

    /// Writes `player`'s mark into an empty square and updates the counts.
    pub(crate) fn place(&mut self, pos: Position, player: Player) {
        debug_assert!(self.is_empty(pos), "{pos} is already occupied");
        self.squares[pos.to_index()] = Square::Occupied(player);
        self.tally.empty -= 1;
        match player {
            Player::X => self.tally.x += 1,
            Player::O => self.tally.o += 1,
        }
    }

    /// A copy of this board with `player`'s mark at `pos`.
    pub(crate) fn with_mark(&self, pos: Position, player: Player) -> Self {
        let mut next = self.clone();
        next.place(pos, player);
        next
    }

    /// Formats the board as a human-readable grid; empty squares show their number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(Player::X) => "X".to_string(),
                    Square::Occupied(Player::O) => "O".to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.squares
            .iter()
            .try_for_each(|square| write!(f, "{}", square.symbol()))
    }
}
