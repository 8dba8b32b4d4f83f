//! Errors and notifications produced while processing input.
//!
//! Rejected input is a normal part of play and leaves the session
//! consistent. Only [`TurnError::WrongPhase`] signals a bug in the caller.

use super::phases::Outcome;
use super::types::{Player, Position};
use serde::{Deserialize, Serialize};

/// Error returned when an input cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TurnError {
    /// The square holds no piece the active player may move.
    #[display("{} is not a legal origin for {}", position, player)]
    InvalidSelection {
        /// The clicked square.
        position: Position,
        /// The active player.
        player: Player,
    },

    /// The square is not a legal destination for the selected piece.
    #[display("{} is not a legal destination", position)]
    InvalidDestination {
        /// The clicked square.
        position: Position,
        /// The selection survived because a capture chain is in progress.
        selection_retained: bool,
    },

    /// The operation does not exist in the current phase.
    #[display("cannot {} while {}", operation, phase)]
    WrongPhase {
        /// The attempted operation.
        operation: &'static str,
        /// Name of the phase the session was in.
        phase: &'static str,
    },
}

impl std::error::Error for TurnError {}

impl TurnError {
    /// Returns true for errors a player can recover from by clicking again.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, TurnError::WrongPhase { .. })
    }
}

/// Observable events for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Notification {
    /// A man reached the far row and was crowned.
    #[display("Piece promoted to KING!")]
    PiecePromoted,
    /// The human won a single-player game.
    #[display("You Won!")]
    HumanWon,
    /// The human lost a single-player game.
    #[display("You lost!")]
    HumanLost,
    /// A player won a multi-player game.
    #[display("{} Player won!", _0)]
    PlayerWon(Player),
    /// The game was drawn.
    #[display("Draw!")]
    Draw,
}

impl From<Outcome> for Notification {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::HumanWin => Notification::HumanWon,
            Outcome::HumanLoss => Notification::HumanLost,
            Outcome::PlayerWin(player) => Notification::PlayerWon(player),
            Outcome::Draw => Notification::Draw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_phase_is_not_recoverable() {
        let err = TurnError::WrongPhase {
            operation: "select a destination",
            phase: "awaiting selection",
        };
        assert!(!err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "cannot select a destination while awaiting selection"
        );
    }

    #[test]
    fn test_player_errors_are_recoverable() {
        let err = TurnError::InvalidSelection {
            position: Position::new(0, 0),
            player: Player::Black,
        };
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "(0, 0) is not a legal origin for Black");
    }

    #[test]
    fn test_outcome_maps_to_notification() {
        assert_eq!(
            Notification::from(Outcome::PlayerWin(Player::White)),
            Notification::PlayerWon(Player::White)
        );
        assert_eq!(Notification::from(Outcome::Draw), Notification::Draw);
    }
}
