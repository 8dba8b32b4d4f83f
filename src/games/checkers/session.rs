//! Turn and capture state machine.
//!
//! A [`GameSession`] owns the oracle and every piece of mutable game state:
//! turn ownership, the current selection, capture chains, the
//! move-without-capture counter, the search depth, and the board history.
//! Front ends feed it clicks and observe its phase, highlights and
//! notifications. They never mutate it directly.

use super::action::{Notification, TurnError};
use super::history::History;
use super::invariants::{InvariantSet, SessionInvariants};
use super::oracle::{AutomatedOutcome, MoveOracle, MoveOutcome};
use super::phases::{Outcome, Phase};
use super::policy::{DRAW_THRESHOLD, SearchDepth, SearchPlan, plan_automated_turn};
use super::types::{Player, Position};
use crate::config::SessionConfig;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// Effect of a click routed through [`GameSession::click`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickEffect {
    /// A piece was selected; these destinations are now offered.
    Selected(BTreeSet<Position>),
    /// The selected piece moved.
    Moved(MoveOutcome),
}

/// One running game.
#[derive(Debug, Clone)]
pub struct GameSession<O: MoveOracle> {
    pub(crate) oracle: O,
    pub(crate) config: SessionConfig,
    pub(crate) active_player: Player,
    pub(crate) phase: Phase,
    pub(crate) destinations: BTreeSet<Position>,
    pub(crate) forced_continuation: bool,
    pub(crate) moves_since_capture: u32,
    pub(crate) search_depth: SearchDepth,
    pub(crate) history: History<O::Board>,
    pub(crate) last_moved: Option<Position>,
    pub(crate) notifications: Vec<Notification>,
}

impl<O: MoveOracle> GameSession<O> {
    /// Starts a session on the oracle's current board.
    ///
    /// If the starting side has nothing to play, the session is created
    /// already in [`Phase::GameOver`].
    #[instrument(skip(oracle, config), fields(mode = %config.mode(), starting = %config.starting_player()))]
    pub fn new(oracle: O, config: SessionConfig) -> Self {
        let initial = oracle.current_board();
        let mut session = Self {
            active_player: *config.starting_player(),
            search_depth: SearchDepth::new(config.initial_depth()),
            oracle,
            config,
            phase: Phase::AwaitingSelection,
            destinations: BTreeSet::new(),
            forced_continuation: false,
            moves_since_capture: 0,
            history: History::new(initial),
            last_moved: None,
            notifications: Vec::new(),
        };
        info!(depth = session.search_depth.get(), "Created game session");
        session.begin_turn();
        session.assert_invariants();
        session
    }

    // ─────────────────────────────────────────────────────────────
    //  Input operations
    // ─────────────────────────────────────────────────────────────

    /// Selects the piece at `position` for the active player.
    ///
    /// Returns the destinations now offered. When the piece can capture,
    /// only capturing destinations are offered.
    ///
    /// # Errors
    ///
    /// - `InvalidSelection` if the square is not a legal origin (no state change).
    /// - `WrongPhase` outside [`Phase::AwaitingSelection`].
    #[instrument(skip(self), fields(player = %self.active_player, phase = self.phase.name()))]
    pub fn select_origin(&mut self, position: Position) -> Result<BTreeSet<Position>, TurnError> {
        if self.phase != Phase::AwaitingSelection {
            return Err(self.wrong_phase("select an origin"));
        }

        if !self.oracle.legal_origins(self.active_player).contains(&position) {
            debug!(%position, "Invalid selection");
            return Err(TurnError::InvalidSelection {
                position,
                player: self.active_player,
            });
        }

        let destinations = self.oracle.legal_destinations(position);
        let mandatory_capture = destinations.has_capture();
        self.destinations = destinations.offered().clone();
        self.phase = Phase::AwaitingDestination {
            origin: position,
            mandatory_capture,
        };
        debug!(
            %position,
            mandatory_capture,
            offered = self.destinations.len(),
            "Selected origin"
        );

        self.assert_invariants();
        Ok(self.destinations.clone())
    }

    /// Moves the selected piece to `position`.
    ///
    /// A capture that can be continued keeps the piece selected and the ply
    /// open. Otherwise the ply completes: history is recorded and the turn
    /// passes on.
    ///
    /// # Errors
    ///
    /// - `InvalidDestination` if the square is not offered. The selection is
    ///   cleared unless a capture chain is in progress.
    /// - `WrongPhase` outside [`Phase::AwaitingDestination`].
    #[instrument(skip(self), fields(player = %self.active_player, phase = self.phase.name()))]
    pub fn select_destination(&mut self, position: Position) -> Result<MoveOutcome, TurnError> {
        let Phase::AwaitingDestination { origin, .. } = self.phase else {
            return Err(self.wrong_phase("select a destination"));
        };

        if !self.destinations.contains(&position) {
            let selection_retained = self.forced_continuation;
            if selection_retained {
                debug!(%position, "Ignored click outside capture chain");
            } else {
                debug!(%position, "Invalid destination, clearing selection");
                self.destinations.clear();
                self.phase = Phase::AwaitingSelection;
            }
            self.assert_invariants();
            return Err(TurnError::InvalidDestination {
                position,
                selection_retained,
            });
        }

        let outcome = self.oracle.apply_move(origin, position);
        info!(
            %origin,
            destination = %position,
            removed = outcome.pieces_removed,
            promoted = outcome.promoted,
            further = outcome.further_capture_available,
            "Applied move"
        );
        self.last_moved = Some(position);
        self.count_ply_progress(outcome.pieces_removed > 0);

        if outcome.promoted {
            self.notifications.push(Notification::PiecePromoted);
        }

        if outcome.further_capture_available {
            let next = self.oracle.legal_destinations(position);
            if next.has_capture() {
                self.forced_continuation = true;
                self.destinations = next.captures;
                self.phase = Phase::AwaitingDestination {
                    origin: position,
                    mandatory_capture: true,
                };
                debug!(offered = self.destinations.len(), "Capture chain continues");
                self.assert_invariants();
                return Ok(outcome);
            }
        }

        self.complete_human_ply();
        self.assert_invariants();
        Ok(outcome)
    }

    /// Plays the automated side's turn.
    ///
    /// # Errors
    ///
    /// `WrongPhase` outside [`Phase::AutomatedTurn`].
    #[instrument(skip(self), fields(phase = self.phase.name(), counter = self.moves_since_capture))]
    pub fn run_automated_turn(&mut self) -> Result<AutomatedOutcome, TurnError> {
        if self.phase != Phase::AutomatedTurn {
            return Err(self.wrong_phase("run an automated turn"));
        }

        let Some(player) = self.config.automated_player() else {
            return Err(self.wrong_phase("run an automated turn"));
        };
        let plan = plan_automated_turn(
            &self.config,
            self.moves_since_capture,
            &mut self.search_depth,
        );
        let outcome = match plan {
            SearchPlan::Search { evaluation, depth } => {
                self.oracle.run_search_turn(player, depth, evaluation)
            }
            SearchPlan::Random => self.oracle.run_random_turn(player),
        };
        info!(
            %player,
            ?plan,
            has_moves = outcome.side_has_legal_moves,
            captured = outcome.capture_occurred,
            "Automated turn played"
        );

        if !outcome.side_has_legal_moves {
            self.finish(Outcome::HumanWin);
            self.assert_invariants();
            return Ok(outcome);
        }

        self.count_ply_progress(outcome.capture_occurred);
        if outcome.landing.is_some() {
            self.last_moved = outcome.landing;
        }
        self.history.record(self.oracle.current_board());
        // The draw takes precedence over a stuck human here.
        if self.moves_since_capture >= DRAW_THRESHOLD {
            self.finish(Outcome::Draw);
        } else {
            self.begin_turn();
        }

        self.assert_invariants();
        Ok(outcome)
    }

    /// Routes a click to [`Self::select_origin`] or [`Self::select_destination`].
    ///
    /// # Errors
    ///
    /// Whatever the routed operation returns; `WrongPhase` during an
    /// automated turn or after the game is over.
    pub fn click(&mut self, position: Position) -> Result<ClickEffect, TurnError> {
        match self.phase {
            Phase::AwaitingSelection => self.select_origin(position).map(ClickEffect::Selected),
            Phase::AwaitingDestination { .. } => {
                self.select_destination(position).map(ClickEffect::Moved)
            }
            Phase::AutomatedTurn | Phase::GameOver(_) => Err(self.wrong_phase("click a square")),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────────

    /// Resets the counter on a capture, otherwise counts one more quiet ply.
    fn count_ply_progress(&mut self, captured: bool) {
        if captured {
            self.moves_since_capture = 0;
        } else {
            self.moves_since_capture += 1;
        }
    }

    /// Closes a human ply and hands the turn to the next side.
    fn complete_human_ply(&mut self) {
        self.forced_continuation = false;
        self.destinations.clear();
        self.history.record(self.oracle.current_board());

        if self.config.is_single_player() {
            if self.moves_since_capture >= DRAW_THRESHOLD {
                self.finish(Outcome::Draw);
            } else {
                self.phase = Phase::AutomatedTurn;
            }
        } else {
            self.active_player = self.active_player.opponent();
            self.begin_turn();
        }
    }

    /// Start-of-turn check for the active player.
    fn begin_turn(&mut self) {
        if self.oracle.legal_origins(self.active_player).is_empty() {
            let outcome = if self.config.is_single_player() {
                Outcome::HumanLoss
            } else {
                Outcome::PlayerWin(self.active_player.opponent())
            };
            self.finish(outcome);
        } else if self.moves_since_capture >= DRAW_THRESHOLD {
            self.finish(Outcome::Draw);
        } else {
            self.phase = Phase::AwaitingSelection;
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        info!(%outcome, counter = self.moves_since_capture, "Game over");
        self.phase = Phase::GameOver(outcome);
        self.destinations.clear();
        self.forced_continuation = false;
        self.notifications.push(outcome.into());
    }

    fn wrong_phase(&self, operation: &'static str) -> TurnError {
        warn!(operation, phase = self.phase.name(), "Operation attempted in wrong phase");
        TurnError::WrongPhase {
            operation,
            phase: self.phase.name(),
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            SessionInvariants::check_all(self).is_ok(),
            "Session invariants violated: {:?}",
            SessionInvariants::check_all(self)
        );
    }

    // ─────────────────────────────────────────────────────────────
    //  Observers
    // ─────────────────────────────────────────────────────────────

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Player whose input is expected.
    pub fn active_player(&self) -> Player {
        self.active_player
    }

    /// Selected origin, present only while a destination is awaited.
    pub fn selection(&self) -> Option<Position> {
        self.phase.selection()
    }

    /// Destinations currently offered for the selection.
    pub fn destinations(&self) -> &BTreeSet<Position> {
        &self.destinations
    }

    /// True while a capture chain must be continued.
    pub fn forced_continuation(&self) -> bool {
        self.forced_continuation
    }

    /// Plies since the last capture.
    pub fn moves_since_capture(&self) -> u32 {
        self.moves_since_capture
    }

    /// Depth the next search-based automated turn will use at least.
    pub fn search_depth(&self) -> u32 {
        self.search_depth.get()
    }

    /// Board history, one snapshot per completed ply.
    pub fn history(&self) -> &History<O::Board> {
        &self.history
    }

    /// Landing square of the most recent move.
    pub fn last_moved(&self) -> Option<Position> {
        self.last_moved
    }

    /// Snapshot of the current board.
    pub fn board(&self) -> O::Board {
        self.oracle.current_board()
    }

    /// Configuration the session was started with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The oracle backing this session.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Returns true once the game is over.
    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    /// Drains notifications queued since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
