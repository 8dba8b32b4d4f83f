//! Core domain types for checkers.

use serde::{Deserialize, Serialize};

/// Side length of the board.
pub const BOARD_SIZE: u8 = 8;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Black pieces, starting on the bottom three rows.
    Black,
    /// White pieces, starting on the top three rows.
    White,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Row delta of a forward step for this player's men.
    pub fn forward(self) -> i8 {
        match self {
            Player::Black => -1,
            Player::White => 1,
        }
    }

    /// Row on which this player's men are promoted.
    pub fn promotion_row(self) -> u8 {
        match self {
            Player::Black => 0,
            Player::White => BOARD_SIZE - 1,
        }
    }
}

/// Kind of piece occupying a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    /// Moves and captures forward only.
    Man,
    /// Moves and captures in every diagonal direction.
    King,
}

/// A square on the checkers board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player's piece.
    Occupied(Player, Piece),
}

impl Square {
    /// Returns the owner of the piece on this square, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player, _) => Some(player),
        }
    }

    /// Single-character symbol used in text renderings.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(Player::Black, Piece::Man) => 'b',
            Square::Occupied(Player::Black, Piece::King) => 'B',
            Square::Occupied(Player::White, Piece::Man) => 'w',
            Square::Occupied(Player::White, Piece::King) => 'W',
        }
    }
}

/// A square coordinate, row-major from the top-left corner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    derive_more::Display,
)]
#[display("({}, {})", row, col)]
pub struct Position {
    /// Row index, 0 at the top.
    pub row: u8,
    /// Column index, 0 at the left.
    pub col: u8,
}

impl Position {
    /// Creates a position without bounds checking.
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Creates a position if it lies on the board.
    pub fn checked(row: i16, col: i16) -> Option<Self> {
        let size = i16::from(BOARD_SIZE);
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Returns the position offset by the given deltas, if still on the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::checked(
            i16::from(self.row) + i16::from(d_row),
            i16::from(self.col) + i16::from(d_col),
        )
    }

    /// Returns true for the dark squares pieces stand on.
    pub fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }
}

/// 8x8 checkers board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order.
    squares: [[Square; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    /// Creates an empty board.
    pub fn empty() -> Self {
        Self {
            squares: [[Square::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Creates the standard starting position.
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for pos in Self::positions().filter(|p| p.is_playable()) {
            if pos.row < 3 {
                board.set(pos, Square::Occupied(Player::White, Piece::Man));
            } else if pos.row >= BOARD_SIZE - 3 {
                board.set(pos, Square::Occupied(Player::Black, Piece::Man));
            }
        }
        board
    }

    /// Iterates over every coordinate of the board in row-major order.
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.row as usize][pos.col as usize]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.row as usize][pos.col as usize] = square;
    }

    /// Positions occupied by the given player's pieces.
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Self::positions().filter_map(move |pos| match self.get(pos) {
            Square::Occupied(owner, piece) if owner == player => Some((pos, piece)),
            _ => None,
        })
    }

    /// Counts the men and kings of the given player.
    pub fn count(&self, player: Player) -> (usize, usize) {
        self.pieces_of(player)
            .fold((0, 0), |(men, kings), (_, piece)| match piece {
                Piece::Man => (men + 1, kings),
                Piece::King => (men, kings + 1),
            })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_board_has_twelve_men_each() {
        let board = Board::starting();
        assert_eq!(board.count(Player::Black), (12, 0));
        assert_eq!(board.count(Player::White), (12, 0));
    }

    #[test]
    fn test_pieces_only_on_dark_squares() {
        let board = Board::starting();
        for pos in Board::positions() {
            if board.get(pos) != Square::Empty {
                assert!(pos.is_playable(), "{pos} should be a dark square");
            }
        }
    }

    #[test]
    fn test_offset_stays_on_board() {
        assert_eq!(Position::new(0, 0).offset(-1, 1), None);
        assert_eq!(Position::new(3, 4).offset(1, -1), Some(Position::new(4, 3)));
        assert_eq!(Position::new(7, 7).offset(1, 1), None);
    }

    #[test]
    fn test_player_parses_case_insensitively() {
        assert_eq!("black".parse::<Player>().ok(), Some(Player::Black));
        assert_eq!("WHITE".parse::<Player>().ok(), Some(Player::White));
    }
}
