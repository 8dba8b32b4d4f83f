//! Square highlights exposed to renderers.

use super::oracle::MoveOracle;
use super::phases::Phase;
use super::session::GameSession;
use super::types::Position;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Why a square is highlighted. A square may carry several tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Highlight {
    /// Holds a piece the active player may select.
    SelectableOrigin,
    /// Plain destination of the selected piece.
    NormalDestination,
    /// Capturing destination of the selected piece.
    CaptureDestination,
    /// Landing square of the most recent move.
    LastMoved,
}

/// Highlight tags per square. Squares without tags are absent.
pub type Highlights = BTreeMap<Position, BTreeSet<Highlight>>;

impl<O: MoveOracle> GameSession<O> {
    /// Highlights for the current phase.
    pub fn highlights(&self) -> Highlights {
        let mut highlights = Highlights::new();
        let mut tag = |pos: Position, highlight: Highlight| {
            highlights.entry(pos).or_default().insert(highlight);
        };

        match self.phase {
            Phase::AwaitingSelection => {
                for pos in self.oracle.legal_origins(self.active_player) {
                    tag(pos, Highlight::SelectableOrigin);
                }
            }
            Phase::AwaitingDestination {
                mandatory_capture, ..
            } => {
                let kind = if mandatory_capture {
                    Highlight::CaptureDestination
                } else {
                    Highlight::NormalDestination
                };
                for pos in &self.destinations {
                    tag(*pos, kind);
                }
            }
            Phase::AutomatedTurn | Phase::GameOver(_) => {}
        }

        if let Some(pos) = self.last_moved {
            tag(pos, Highlight::LastMoved);
        }
        highlights
    }
}
