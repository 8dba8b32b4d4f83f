//! Move oracle contract consumed by the turn state machine.
//!
//! The oracle owns the board. It generates legal moves, applies them, and
//! plays whole automated turns. The session only ever reads snapshots
//! through [`MoveOracle::current_board`].

use super::types::{Player, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Debug;

/// Scoring function used by a search-based automated turn.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Evaluation {
    /// Piece count only.
    Material,
    /// Material plus advancement and centre control.
    Positional,
    /// Material plus pressure towards contact with the opponent.
    Endgame,
}

/// Destinations reachable from one origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Destinations {
    /// Plain one-step moves.
    pub normal: BTreeSet<Position>,
    /// Landing squares of capturing jumps.
    pub captures: BTreeSet<Position>,
}

impl Destinations {
    /// Returns true if at least one capture is available.
    pub fn has_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    /// The destinations a player may pick: captures when any exist, plain moves otherwise.
    pub fn offered(&self) -> &BTreeSet<Position> {
        if self.has_capture() {
            &self.captures
        } else {
            &self.normal
        }
    }
}

/// What happened when a single move was applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The moved piece can capture again from its landing square.
    pub further_capture_available: bool,
    /// Number of opposing pieces removed by the move.
    pub pieces_removed: u32,
    /// The moved piece was crowned.
    pub promoted: bool,
}

/// What happened during an automated turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatedOutcome {
    /// False when the automated side had nothing to play.
    pub side_has_legal_moves: bool,
    /// At least one piece was captured during the turn.
    pub capture_occurred: bool,
    /// Final square of the moved piece, when the oracle reports it.
    pub landing: Option<Position>,
}

/// Legal move generation, move application, and automated play.
pub trait MoveOracle {
    /// Opaque board snapshot handed to history and observers.
    type Board: Clone + Debug;

    /// Squares holding a piece the player may move this turn.
    fn legal_origins(&self, player: Player) -> BTreeSet<Position>;

    /// Plain and capturing destinations of the piece at `origin`.
    fn legal_destinations(&self, origin: Position) -> Destinations;

    /// Moves the piece at `origin` to `destination`.
    ///
    /// The caller has already checked `destination` against
    /// [`MoveOracle::legal_destinations`].
    fn apply_move(&mut self, origin: Position, destination: Position) -> MoveOutcome;

    /// Plays a full turn for `player` chosen by a depth-limited search.
    fn run_search_turn(
        &mut self,
        player: Player,
        depth: u32,
        evaluation: Evaluation,
    ) -> AutomatedOutcome;

    /// Plays a uniformly random legal turn for `player`.
    fn run_random_turn(&mut self, player: Player) -> AutomatedOutcome;

    /// Snapshot of the current board.
    fn current_board(&self) -> Self::Board;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_supersede_normal_moves() {
        let destinations = Destinations {
            normal: BTreeSet::from([Position::new(4, 3)]),
            captures: BTreeSet::from([Position::new(3, 6)]),
        };
        assert!(destinations.has_capture());
        assert_eq!(destinations.offered(), &BTreeSet::from([Position::new(3, 6)]));
    }

    #[test]
    fn test_normal_moves_offered_without_captures() {
        let destinations = Destinations {
            normal: BTreeSet::from([Position::new(4, 3), Position::new(4, 5)]),
            captures: BTreeSet::new(),
        };
        assert_eq!(destinations.offered().len(), 2);
    }

    #[test]
    fn test_evaluation_parses_lowercase() {
        assert_eq!("endgame".parse::<Evaluation>().ok(), Some(Evaluation::Endgame));
        assert_eq!(Evaluation::Positional.to_string(), "positional");
    }
}
