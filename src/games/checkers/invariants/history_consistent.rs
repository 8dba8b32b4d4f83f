//! History consistency invariant.

use super::super::{GameSession, MoveOracle};
use super::Invariant;

/// Invariant: the history pointer sits on the last recorded snapshot.
pub struct HistoryConsistentInvariant;

impl<O: MoveOracle> Invariant<GameSession<O>> for HistoryConsistentInvariant {
    fn holds(session: &GameSession<O>) -> bool {
        session.history.len() == session.history.pointer() + 1
    }

    fn description() -> &'static str {
        "History length is one past the pointer"
    }
}
