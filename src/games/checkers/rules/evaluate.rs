//! Static evaluation of checkers positions.
//!
//! Scores are from the point of view of the given player: positive means
//! the player is better off.

use super::super::oracle::Evaluation;
use super::super::types::{BOARD_SIZE, Board, Piece, Player, Position};

const MAN_VALUE: i32 = 100;
const KING_VALUE: i32 = 160;
const ADVANCE_BONUS: i32 = 4;
const CENTRE_BONUS: i32 = 6;
const BACK_ROW_BONUS: i32 = 8;
const PROXIMITY_WEIGHT: i32 = 3;

/// Scores `board` for `player` with the chosen evaluation.
pub fn evaluate(board: &Board, player: Player, evaluation: Evaluation) -> i32 {
    match evaluation {
        Evaluation::Material => material(board, player),
        Evaluation::Positional => positional(board, player),
        Evaluation::Endgame => endgame(board, player),
    }
}

fn side_material(board: &Board, player: Player) -> i32 {
    let (men, kings) = board.count(player);
    men as i32 * MAN_VALUE + kings as i32 * KING_VALUE
}

fn material(board: &Board, player: Player) -> i32 {
    side_material(board, player) - side_material(board, player.opponent())
}

fn rows_advanced(player: Player, pos: Position) -> i32 {
    let home = player.opponent().promotion_row();
    i32::from(pos.row.abs_diff(home))
}

fn side_positional(board: &Board, player: Player) -> i32 {
    let home = player.opponent().promotion_row();
    board
        .pieces_of(player)
        .map(|(pos, piece)| {
            let mut score = 0;
            if piece == Piece::Man {
                score += rows_advanced(player, pos) * ADVANCE_BONUS;
                if pos.row == home {
                    score += BACK_ROW_BONUS;
                }
            }
            if (2..BOARD_SIZE - 2).contains(&pos.row) && (2..BOARD_SIZE - 2).contains(&pos.col) {
                score += CENTRE_BONUS;
            }
            score
        })
        .sum()
}

fn positional(board: &Board, player: Player) -> i32 {
    material(board, player) + side_positional(board, player)
        - side_positional(board, player.opponent())
}

fn distance(a: Position, b: Position) -> i32 {
    i32::from(a.row.abs_diff(b.row).max(a.col.abs_diff(b.col)))
}

/// Sum over own pieces of the distance to the nearest enemy piece.
fn total_separation(board: &Board, player: Player) -> i32 {
    let enemies: Vec<Position> = board.pieces_of(player.opponent()).map(|(p, _)| p).collect();
    board
        .pieces_of(player)
        .filter_map(|(pos, _)| enemies.iter().map(|e| distance(pos, *e)).min())
        .sum()
}

fn endgame(board: &Board, player: Player) -> i32 {
    let balance = material(board, player);
    let separation = total_separation(board, player) * PROXIMITY_WEIGHT;
    // The stronger side closes in, the weaker side keeps its distance.
    if balance > 0 {
        balance - separation
    } else if balance < 0 {
        balance + separation
    } else {
        balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::checkers::Square;

    #[test]
    fn test_starting_position_is_balanced() {
        let board = Board::starting();
        for evaluation in [Evaluation::Material, Evaluation::Positional, Evaluation::Endgame] {
            assert_eq!(evaluate(&board, Player::Black, evaluation), 0, "{evaluation}");
        }
    }

    #[test]
    fn test_material_is_antisymmetric() {
        let mut board = Board::starting();
        board.set(Position::new(2, 1), Square::Empty);
        let black = evaluate(&board, Player::Black, Evaluation::Material);
        let white = evaluate(&board, Player::White, Evaluation::Material);
        assert_eq!(black, MAN_VALUE);
        assert_eq!(white, -MAN_VALUE);
    }

    #[test]
    fn test_endgame_rewards_closing_in_when_ahead() {
        let mut far = Board::empty();
        far.set(Position::new(7, 0), Square::Occupied(Player::Black, Piece::King));
        far.set(Position::new(6, 1), Square::Occupied(Player::Black, Piece::King));
        far.set(Position::new(0, 7), Square::Occupied(Player::White, Piece::King));

        let mut near = Board::empty();
        near.set(Position::new(2, 5), Square::Occupied(Player::Black, Piece::King));
        near.set(Position::new(6, 1), Square::Occupied(Player::Black, Piece::King));
        near.set(Position::new(0, 7), Square::Occupied(Player::White, Piece::King));

        assert!(
            evaluate(&near, Player::Black, Evaluation::Endgame)
                > evaluate(&far, Player::Black, Evaluation::Endgame)
        );
    }
}
