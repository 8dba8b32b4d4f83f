//! Capture chain invariant.

use super::super::{GameSession, MoveOracle};
use super::Invariant;

/// Invariant: a forced continuation keeps the piece that just captured
/// selected, with only capturing destinations offered.
pub struct ForcedContinuationInvariant;

impl<O: MoveOracle> Invariant<GameSession<O>> for ForcedContinuationInvariant {
    fn holds(session: &GameSession<O>) -> bool {
        if !session.forced_continuation {
            return true;
        }
        let selection = session.phase.selection();
        selection.is_some() && selection == session.last_moved && !session.destinations.is_empty()
    }

    fn description() -> &'static str {
        "Forced continuation selects the last moved piece"
    }
}
