//! Strictly Checkers library - turn orchestration for two-player checkers
//!
//! The heart of the crate is a turn and capture state machine that
//! enforces selection order, compulsory capture chains, the
//! move-without-capture draw rule, and game termination. Automated turns
//! are planned by a small policy and played by a pluggable move oracle.
//!
//! # Architecture
//!
//! - **Session**: [`GameSession`], the state machine
//! - **Oracle**: [`MoveOracle`] contract plus the reference [`CheckersOracle`]
//! - **Policy**: [`plan_automated_turn`] picks evaluation and search depth
//! - **Orchestrator**: async driver that keeps turns serialized
//!
//! # Example
//!
//! ```
//! use strictly_checkers::{CheckersOracle, GameSession, Phase, Position, SessionConfig};
//!
//! let mut session = GameSession::new(CheckersOracle::with_seed(1), SessionConfig::default());
//! session.select_origin(Position::new(5, 2)).expect("legal origin");
//! session.select_destination(Position::new(4, 3)).expect("legal move");
//! assert_eq!(session.phase(), Phase::AutomatedTurn);
//! assert_eq!(session.moves_since_capture(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod games;
mod orchestrator;
mod render;

// Crate-level exports - Configuration
pub use config::{Algorithm, ConfigError, Difficulty, Mode, SessionConfig};

// Crate-level exports - Orchestration
pub use orchestrator::{GameEvent, Input, Orchestrator, Snapshot};

// Crate-level exports - Rendering
pub use render::{render_board, render_snapshot, render_status};

// Crate-level exports - Game types (checkers)
pub use games::checkers::{
    AutomatedOutcome, BOARD_SIZE, Board, CheckersOracle, ClickEffect, DRAW_THRESHOLD,
    Destinations, ENDGAME_THRESHOLD, ESCALATED_DEPTH, Evaluation, ForcedContinuationInvariant,
    GameSession, Highlight, Highlights, History, HistoryConsistentInvariant, Invariant,
    InvariantSet, InvariantViolation, MoveOracle, MoveOutcome, Notification, Outcome, Phase,
    Piece, Player, Ply, Position, SearchDepth, SearchPlan, SelectionPhaseInvariant,
    SessionInvariants, Square, TurnError, best_ply, evaluate, legal_origins, legal_plies,
    plan_automated_turn,
};
