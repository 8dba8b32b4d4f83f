//! Phases of the turn state machine.
//!
//! A session is always in exactly one phase. The selected origin lives
//! inside [`Phase::AwaitingDestination`], so a selection cannot exist in
//! any other phase.

use super::types::{Player, Position};
use serde::{Deserialize, Serialize};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The human beat the automated side.
    HumanWin,
    /// The automated side beat the human.
    HumanLoss,
    /// A player won a multi-player game.
    PlayerWin(Player),
    /// Too many plies without a capture.
    Draw,
}

impl Outcome {
    /// Returns the winning player of a multi-player game, if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::PlayerWin(player) => Some(*player),
            _ => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::HumanWin => write!(f, "You won!"),
            Outcome::HumanLoss => write!(f, "You lost!"),
            Outcome::PlayerWin(player) => write!(f, "{player} player won!"),
            Outcome::Draw => write!(f, "Draw!"),
        }
    }
}

/// Current phase of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the active player to pick a piece.
    AwaitingSelection,
    /// A piece is selected and a destination is expected.
    AwaitingDestination {
        /// Square of the selected piece.
        origin: Position,
        /// Only capturing destinations are offered.
        mandatory_capture: bool,
    },
    /// The automated side is to move.
    AutomatedTurn,
    /// The game is over and the session no longer accepts input.
    GameOver(Outcome),
}

impl Phase {
    /// Returns the selected origin while a destination is awaited.
    pub fn selection(&self) -> Option<Position> {
        match self {
            Phase::AwaitingDestination { origin, .. } => Some(*origin),
            _ => None,
        }
    }

    /// Returns the outcome once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Phase::GameOver(outcome) => Some(*outcome),
            _ => None,
        }
    }

    /// Returns true once the game is over.
    pub fn is_over(&self) -> bool {
        matches!(self, Phase::GameOver(_))
    }

    /// Short name of the phase, used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::AwaitingSelection => "awaiting selection",
            Phase::AwaitingDestination { .. } => "awaiting destination",
            Phase::AutomatedTurn => "automated turn",
            Phase::GameOver(_) => "game over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_only_while_awaiting_destination() {
        let origin = Position::new(5, 0);
        let phase = Phase::AwaitingDestination {
            origin,
            mandatory_capture: false,
        };
        assert_eq!(phase.selection(), Some(origin));
        assert_eq!(Phase::AwaitingSelection.selection(), None);
        assert_eq!(Phase::AutomatedTurn.selection(), None);
        assert_eq!(Phase::GameOver(Outcome::Draw).selection(), None);
    }

    #[test]
    fn test_outcome_accessors() {
        assert_eq!(Outcome::PlayerWin(Player::White).winner(), Some(Player::White));
        assert_eq!(Outcome::HumanWin.winner(), None);
        assert!(Outcome::Draw.is_draw());
        assert_eq!(Outcome::PlayerWin(Player::Black).to_string(), "Black player won!");
    }
}
