//! Drives a game session from an input channel.
//!
//! Automated turns run on the blocking thread pool so the front end stays
//! responsive. Input that arrives while the automated side is searching
//! is dropped once the turn has been applied, so turns stay strictly
//! serialized.

use crate::games::checkers::{
    GameSession, Highlights, MoveOracle, Notification, Outcome, Phase, Player, Position,
    TurnError,
};
use anyhow::Result;
use std::fmt::Debug;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

/// Input accepted from the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A click on a board square.
    Click(Position),
    /// Stop the game.
    Quit,
}

/// Everything a renderer needs to redraw.
#[derive(Debug, Clone)]
pub struct Snapshot<B> {
    /// Current board.
    pub board: B,
    /// Highlighted squares.
    pub highlights: Highlights,
    /// Current phase.
    pub phase: Phase,
    /// Player whose input is expected.
    pub active_player: Player,
    /// Plies since the last capture.
    pub moves_since_capture: u32,
}

impl<B> Snapshot<B> {
    /// Captures the observable state of a session.
    pub fn of<O: MoveOracle<Board = B>>(session: &GameSession<O>) -> Self {
        Self {
            board: session.board(),
            highlights: session.highlights(),
            phase: session.phase(),
            active_player: session.active_player(),
            moves_since_capture: session.moves_since_capture(),
        }
    }
}

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone)]
pub enum GameEvent<B> {
    /// Game state updated.
    StateChanged(Snapshot<B>),
    /// The automated side is searching.
    AutomatedThinking,
    /// An input was rejected; the player may try again.
    Rejected(TurnError),
    /// Promotion or end-of-game notification.
    Notified(Notification),
    /// Game ended.
    GameOver(Outcome),
}

/// Feeds input into sessions and reports what happened.
pub struct Orchestrator<B> {
    input_rx: mpsc::UnboundedReceiver<Input>,
    event_tx: mpsc::UnboundedSender<GameEvent<B>>,
}

impl<B> Orchestrator<B>
where
    B: Clone + Debug + Send + Sync + 'static,
{
    /// Creates a new orchestrator.
    pub fn new(
        input_rx: mpsc::UnboundedReceiver<Input>,
        event_tx: mpsc::UnboundedSender<GameEvent<B>>,
    ) -> Self {
        Self { input_rx, event_tx }
    }

    /// Runs the game loop until the game ends, the player quits, or the
    /// input channel closes. Returns the session in its final state.
    #[instrument(skip_all)]
    pub async fn run<O>(&mut self, mut session: GameSession<O>) -> Result<GameSession<O>>
    where
        O: MoveOracle<Board = B> + Send + 'static,
    {
        info!("Starting game orchestration");
        self.publish(&mut session)?;

        loop {
            match session.phase() {
                Phase::GameOver(outcome) => {
                    self.event_tx.send(GameEvent::GameOver(outcome))?;
                    return Ok(session);
                }
                Phase::AutomatedTurn => {
                    self.event_tx.send(GameEvent::AutomatedThinking)?;
                    let (returned, result) = tokio::task::spawn_blocking(move || {
                        let result = session.run_automated_turn();
                        (session, result)
                    })
                    .await?;
                    session = returned;
                    result?;

                    let quit = self.discard_pending_input();
                    self.publish(&mut session)?;
                    if quit {
                        info!("Quit requested during automated turn");
                        return Ok(session);
                    }
                }
                Phase::AwaitingSelection | Phase::AwaitingDestination { .. } => {
                    let Some(input) = self.input_rx.recv().await else {
                        info!("Input channel closed");
                        return Ok(session);
                    };
                    match input {
                        Input::Quit => {
                            info!("Quit requested");
                            return Ok(session);
                        }
                        Input::Click(position) => match session.click(position) {
                            Ok(effect) => debug!(?effect, "Click applied"),
                            Err(e) if e.is_recoverable() => {
                                self.event_tx.send(GameEvent::Rejected(e))?;
                            }
                            Err(e) => {
                                error!(error = %e, "Session rejected click in wrong phase");
                                return Err(e.into());
                            }
                        },
                    }
                    self.publish(&mut session)?;
                }
            }
        }
    }

    /// Drops input queued during an automated turn. Returns true if it held a quit.
    fn discard_pending_input(&mut self) -> bool {
        let mut quit = false;
        while let Ok(input) = self.input_rx.try_recv() {
            match input {
                Input::Quit => quit = true,
                Input::Click(position) => {
                    debug!(%position, "Dropped click received during automated turn");
                }
            }
        }
        quit
    }

    fn publish<O: MoveOracle<Board = B>>(&self, session: &mut GameSession<O>) -> Result<()> {
        for notification in session.take_notifications() {
            self.event_tx.send(GameEvent::Notified(notification))?;
        }
        self.event_tx
            .send(GameEvent::StateChanged(Snapshot::of(session)))?;
        Ok(())
    }
}
