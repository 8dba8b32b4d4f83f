//! Move generation for 8x8 checkers.
//!
//! Men step and capture diagonally forward, kings one square in any
//! diagonal direction. Capturing is compulsory: while any piece of a side
//! can jump, only jumping pieces are legal origins. Promotion ends a
//! capture chain.

use super::super::oracle::{Destinations, MoveOutcome};
use super::super::types::{Board, Piece, Player, Position, Square};
use std::collections::BTreeSet;
use tracing::instrument;

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// A complete turn: one step, or a chain of jumps by one piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ply {
    /// Origin followed by every landing square.
    pub path: Vec<Position>,
    /// Number of pieces captured along the path.
    pub captured: u32,
}

impl Ply {
    /// Final square of the moved piece.
    pub fn landing(&self) -> Option<Position> {
        self.path.last().copied()
    }
}

fn directions(player: Player, piece: Piece) -> impl Iterator<Item = (i8, i8)> {
    DIAGONALS
        .into_iter()
        .filter(move |(d_row, _)| piece == Piece::King || *d_row == player.forward())
}

/// Plain one-square moves of the piece at `origin`.
pub fn steps(board: &Board, origin: Position) -> BTreeSet<Position> {
    let Square::Occupied(player, piece) = board.get(origin) else {
        return BTreeSet::new();
    };
    directions(player, piece)
        .filter_map(|(d_row, d_col)| origin.offset(d_row, d_col))
        .filter(|pos| board.get(*pos) == Square::Empty)
        .collect()
}

/// Landing squares of the jumps available to the piece at `origin`.
pub fn jumps(board: &Board, origin: Position) -> BTreeSet<Position> {
    let Square::Occupied(player, piece) = board.get(origin) else {
        return BTreeSet::new();
    };
    directions(player, piece)
        .filter_map(|(d_row, d_col)| {
            let over = origin.offset(d_row, d_col)?;
            let landing = origin.offset(2 * d_row, 2 * d_col)?;
            let jumps_enemy = board.get(over).owner() == Some(player.opponent());
            (jumps_enemy && board.get(landing) == Square::Empty).then_some(landing)
        })
        .collect()
}

/// Plain and capturing destinations of the piece at `origin`.
pub fn destinations(board: &Board, origin: Position) -> Destinations {
    Destinations {
        normal: steps(board, origin),
        captures: jumps(board, origin),
    }
}

/// Returns true if any piece of `player` can capture.
pub fn has_capture(board: &Board, player: Player) -> bool {
    board
        .pieces_of(player)
        .any(|(pos, _)| !jumps(board, pos).is_empty())
}

/// Pieces `player` may move, honouring compulsory capture.
#[instrument(skip(board))]
pub fn legal_origins(board: &Board, player: Player) -> BTreeSet<Position> {
    let capturing = has_capture(board, player);
    board
        .pieces_of(player)
        .map(|(pos, _)| pos)
        .filter(|pos| {
            if capturing {
                !jumps(board, *pos).is_empty()
            } else {
                !steps(board, *pos).is_empty()
            }
        })
        .collect()
}

/// Moves one piece one step or one jump.
pub fn apply_step(board: &mut Board, origin: Position, destination: Position) -> MoveOutcome {
    let square = board.get(origin);
    let Square::Occupied(player, piece) = square else {
        return MoveOutcome::default();
    };

    board.set(origin, Square::Empty);
    let mut pieces_removed = 0;
    if origin.row.abs_diff(destination.row) == 2 {
        let over = Position::new(
            (origin.row + destination.row) / 2,
            (origin.col + destination.col) / 2,
        );
        board.set(over, Square::Empty);
        pieces_removed = 1;
    }

    let promoted = piece == Piece::Man && destination.row == player.promotion_row();
    let piece = if promoted { Piece::King } else { piece };
    board.set(destination, Square::Occupied(player, piece));

    let further_capture_available =
        pieces_removed > 0 && !promoted && !jumps(board, destination).is_empty();

    MoveOutcome {
        further_capture_available,
        pieces_removed,
        promoted,
    }
}

/// Every complete turn available to `player`, capture chains expanded.
pub fn legal_plies(board: &Board, player: Player) -> Vec<Ply> {
    let capturing = has_capture(board, player);
    let mut plies = Vec::new();

    for (origin, _) in board.pieces_of(player) {
        if capturing {
            extend_chains(board, vec![origin], 0, &mut plies);
        } else {
            plies.extend(steps(board, origin).into_iter().map(|dest| Ply {
                path: vec![origin, dest],
                captured: 0,
            }));
        }
    }
    plies
}

fn extend_chains(board: &Board, path: Vec<Position>, captured: u32, plies: &mut Vec<Ply>) {
    let Some(&from) = path.last() else {
        return;
    };
    for landing in jumps(board, from) {
        let mut next = board.clone();
        let outcome = apply_step(&mut next, from, landing);
        let mut longer = path.clone();
        longer.push(landing);
        if outcome.further_capture_available {
            extend_chains(&next, longer, captured + outcome.pieces_removed, plies);
        } else {
            plies.push(Ply {
                path: longer,
                captured: captured + outcome.pieces_removed,
            });
        }
    }
}

/// Plays every step of a ply.
pub fn apply_ply(board: &mut Board, ply: &Ply) -> u32 {
    ply.path
        .windows(2)
        .map(|pair| apply_step(board, pair[0], pair[1]).pieces_removed)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, row: u8, col: u8, player: Player, piece: Piece) {
        board.set(Position::new(row, col), Square::Occupied(player, piece));
    }

    #[test]
    fn test_opening_origins_for_black() {
        let board = Board::starting();
        let origins = legal_origins(&board, Player::Black);
        assert_eq!(origins.len(), 4);
        assert!(origins.iter().all(|pos| pos.row == 5));
    }

    #[test]
    fn test_men_step_forward_only() {
        let mut board = Board::empty();
        place(&mut board, 4, 3, Player::Black, Piece::Man);
        assert_eq!(
            steps(&board, Position::new(4, 3)),
            BTreeSet::from([Position::new(3, 2), Position::new(3, 4)])
        );
    }

    #[test]
    fn test_kings_step_all_directions() {
        let mut board = Board::empty();
        place(&mut board, 4, 3, Player::White, Piece::King);
        assert_eq!(steps(&board, Position::new(4, 3)).len(), 4);
    }

    #[test]
    fn test_capture_is_compulsory() {
        let mut board = Board::empty();
        place(&mut board, 5, 2, Player::Black, Piece::Man);
        place(&mut board, 5, 6, Player::Black, Piece::Man);
        place(&mut board, 4, 3, Player::White, Piece::Man);

        let origins = legal_origins(&board, Player::Black);
        assert_eq!(origins, BTreeSet::from([Position::new(5, 2)]));
        assert_eq!(
            jumps(&board, Position::new(5, 2)),
            BTreeSet::from([Position::new(3, 4)])
        );
    }

    #[test]
    fn test_jump_removes_piece_and_reports_chain() {
        let mut board = Board::empty();
        place(&mut board, 6, 1, Player::Black, Piece::Man);
        place(&mut board, 5, 2, Player::White, Piece::Man);
        place(&mut board, 3, 4, Player::White, Piece::Man);

        let outcome = apply_step(&mut board, Position::new(6, 1), Position::new(4, 3));
        assert_eq!(outcome.pieces_removed, 1);
        assert!(outcome.further_capture_available);
        assert_eq!(board.get(Position::new(5, 2)), Square::Empty);
    }

    #[test]
    fn test_promotion_ends_chain() {
        let mut board = Board::empty();
        place(&mut board, 2, 1, Player::Black, Piece::Man);
        place(&mut board, 1, 2, Player::White, Piece::Man);
        place(&mut board, 1, 4, Player::White, Piece::Man);

        let outcome = apply_step(&mut board, Position::new(2, 1), Position::new(0, 3));
        assert!(outcome.promoted);
        assert!(!outcome.further_capture_available);
        assert_eq!(
            board.get(Position::new(0, 3)),
            Square::Occupied(Player::Black, Piece::King)
        );
    }

    #[test]
    fn test_plies_expand_double_jump() {
        let mut board = Board::empty();
        place(&mut board, 6, 1, Player::Black, Piece::Man);
        place(&mut board, 5, 2, Player::White, Piece::Man);
        place(&mut board, 3, 4, Player::White, Piece::Man);

        let plies = legal_plies(&board, Player::Black);
        assert_eq!(plies.len(), 1);
        assert_eq!(plies[0].captured, 2);
        assert_eq!(plies[0].landing(), Some(Position::new(2, 5)));

        let removed = apply_ply(&mut board, &plies[0]);
        assert_eq!(removed, 2);
        assert_eq!(board.count(Player::White), (0, 0));
    }
}
