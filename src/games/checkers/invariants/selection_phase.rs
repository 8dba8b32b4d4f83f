//! Selection invariant: destinations are offered only while a piece is selected.

use super::super::{GameSession, MoveOracle, Phase};
use super::Invariant;

/// Invariant: the destination set is non-empty only in
/// [`Phase::AwaitingDestination`].
///
/// The selection itself lives inside the phase, so it cannot outlive it.
/// What can drift is the offered destination set left behind by a
/// transition that forgot to clear it.
pub struct SelectionPhaseInvariant;

impl<O: MoveOracle> Invariant<GameSession<O>> for SelectionPhaseInvariant {
    fn holds(session: &GameSession<O>) -> bool {
        match session.phase {
            Phase::AwaitingDestination { .. } => true,
            _ => session.destinations.is_empty(),
        }
    }

    fn description() -> &'static str {
        "Destinations are offered only while a piece is selected"
    }
}
