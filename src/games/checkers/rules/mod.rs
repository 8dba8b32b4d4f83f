//! Reference checkers rules.
//!
//! [`CheckersOracle`] implements [`MoveOracle`] for standard 8x8 checkers
//! so that sessions can be played end to end. Rules are kept as pure
//! functions over [`Board`] in the submodules.

pub mod evaluate;
pub mod movegen;
pub mod search;

pub use evaluate::evaluate;
pub use movegen::{Ply, legal_origins, legal_plies};
pub use search::best_ply;

use super::oracle::{AutomatedOutcome, Destinations, Evaluation, MoveOracle, MoveOutcome};
use super::types::{Board, Player, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Board plus random source, playing by the reference rules.
#[derive(Debug, Clone)]
pub struct CheckersOracle {
    board: Board,
    rng: StdRng,
}

impl CheckersOracle {
    /// Starting position with an OS-seeded random source.
    pub fn new() -> Self {
        Self {
            board: Board::starting(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Starting position with a fixed seed, for reproducible random play.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_board(Board::starting(), seed)
    }

    /// Arbitrary position with a fixed seed.
    pub fn from_board(board: Board, seed: u64) -> Self {
        Self {
            board,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Plays a ply and reports it as an automated turn.
    fn play(&mut self, ply: &Ply) -> AutomatedOutcome {
        let removed = movegen::apply_ply(&mut self.board, ply);
        AutomatedOutcome {
            side_has_legal_moves: true,
            capture_occurred: removed > 0,
            landing: ply.landing(),
        }
    }
}

impl Default for CheckersOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveOracle for CheckersOracle {
    type Board = Board;

    fn legal_origins(&self, player: Player) -> BTreeSet<Position> {
        legal_origins(&self.board, player)
    }

    fn legal_destinations(&self, origin: Position) -> Destinations {
        movegen::destinations(&self.board, origin)
    }

    fn apply_move(&mut self, origin: Position, destination: Position) -> MoveOutcome {
        movegen::apply_step(&mut self.board, origin, destination)
    }

    #[instrument(skip(self))]
    fn run_search_turn(
        &mut self,
        player: Player,
        depth: u32,
        evaluation: Evaluation,
    ) -> AutomatedOutcome {
        match best_ply(&self.board, player, depth, evaluation) {
            Some(ply) => self.play(&ply),
            None => AutomatedOutcome::default(),
        }
    }

    #[instrument(skip(self))]
    fn run_random_turn(&mut self, player: Player) -> AutomatedOutcome {
        let plies = legal_plies(&self.board, player);
        if plies.is_empty() {
            return AutomatedOutcome::default();
        }
        let ply = &plies[self.rng.random_range(0..plies.len())];
        debug!(path = ?ply.path, "Picked random ply");
        self.play(ply)
    }

    fn current_board(&self) -> Board {
        self.board.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::checkers::{Piece, Square};

    #[test]
    fn test_random_turn_is_reproducible() {
        let mut a = CheckersOracle::with_seed(7);
        let mut b = CheckersOracle::with_seed(7);
        for player in [Player::Black, Player::White, Player::Black] {
            assert_eq!(a.run_random_turn(player), b.run_random_turn(player));
        }
        assert_eq!(a.current_board(), b.current_board());
    }

    #[test]
    fn test_automated_turn_without_moves() {
        let mut board = Board::empty();
        board.set(Position::new(0, 1), Square::Occupied(Player::Black, Piece::Man));
        let mut oracle = CheckersOracle::from_board(board, 1);

        let outcome = oracle.run_search_turn(Player::White, 4, Evaluation::Positional);
        assert!(!outcome.side_has_legal_moves);
        assert!(!oracle.run_random_turn(Player::White).side_has_legal_moves);
    }

    #[test]
    fn test_search_turn_reports_capture() {
        let mut board = Board::empty();
        board.set(Position::new(2, 3), Square::Occupied(Player::White, Piece::Man));
        board.set(Position::new(3, 4), Square::Occupied(Player::Black, Piece::Man));
        board.set(Position::new(7, 0), Square::Occupied(Player::Black, Piece::Man));
        let mut oracle = CheckersOracle::from_board(board, 1);

        let outcome = oracle.run_search_turn(Player::White, 2, Evaluation::Material);
        assert!(outcome.side_has_legal_moves);
        assert!(outcome.capture_occurred);
        assert_eq!(outcome.landing, Some(Position::new(4, 5)));
    }
}
