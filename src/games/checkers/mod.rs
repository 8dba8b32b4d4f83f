mod action;
mod highlight;
mod history;
mod invariants;
mod oracle;
mod phases;
mod policy;
mod rules;
mod session;
mod types;

pub use action::{Notification, TurnError};
pub use highlight::{Highlight, Highlights};
pub use history::History;
pub use invariants::{
    ForcedContinuationInvariant, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, SelectionPhaseInvariant, SessionInvariants,
};
pub use oracle::{AutomatedOutcome, Destinations, Evaluation, MoveOracle, MoveOutcome};
pub use phases::{Outcome, Phase};
pub use policy::{
    DRAW_THRESHOLD, ENDGAME_THRESHOLD, ESCALATED_DEPTH, SearchDepth, SearchPlan,
    plan_automated_turn,
};
pub use rules::{CheckersOracle, Ply, best_ply, evaluate, legal_origins, legal_plies};
pub use session::{ClickEffect, GameSession};
pub use types::{BOARD_SIZE, Board, Piece, Player, Position, Square};
