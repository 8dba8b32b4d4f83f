//! Choice of search strategy for automated turns.
//!
//! The policy is re-evaluated before every automated turn. Its only
//! effect on the session is raising the search depth once the game has
//! gone quiet for long enough.

use super::oracle::Evaluation;
use crate::config::{Algorithm, SessionConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Plies without a capture after which the endgame evaluation takes over.
pub const ENDGAME_THRESHOLD: u32 = 20;

/// Depth the search is raised to in the endgame when escalation is enabled.
pub const ESCALATED_DEPTH: u32 = 7;

/// Plies without a capture that end the game in a draw.
pub const DRAW_THRESHOLD: u32 = 100;

/// Search depth that can only ever grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchDepth(u32);

impl SearchDepth {
    /// Creates a depth from the configured difficulty.
    pub fn new(depth: u32) -> Self {
        Self(depth)
    }

    /// Current depth in plies.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Raises the depth to at least `floor`. Returns true if it changed.
    pub fn raise_to(&mut self, floor: u32) -> bool {
        if floor > self.0 {
            self.0 = floor;
            true
        } else {
            false
        }
    }
}

/// How the automated side picks its move this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPlan {
    /// Depth-limited search with the given scoring function.
    Search {
        /// Scoring function applied at the leaves.
        evaluation: Evaluation,
        /// Depth in plies.
        depth: u32,
    },
    /// Uniformly random legal move.
    Random,
}

/// Picks evaluation and depth for the next automated turn.
#[instrument(skip(config, depth), fields(algorithm = ?config.algorithm(), depth = depth.get()))]
pub fn plan_automated_turn(
    config: &SessionConfig,
    moves_since_capture: u32,
    depth: &mut SearchDepth,
) -> SearchPlan {
    if *config.algorithm() == Algorithm::Random {
        debug!("Random algorithm selected");
        return SearchPlan::Random;
    }

    let evaluation = if moves_since_capture > ENDGAME_THRESHOLD {
        if *config.escalate_depth() && depth.raise_to(ESCALATED_DEPTH) {
            info!(depth = depth.get(), "Escalated search depth for endgame");
        }
        *config.endgame_evaluation()
    } else {
        *config.primary_evaluation()
    };

    let plan = SearchPlan::Search {
        evaluation,
        depth: depth.get(),
    };
    debug!(?plan, "Planned automated turn");
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;

    fn medium() -> SessionConfig {
        SessionConfig::default().with_difficulty(Difficulty::Medium)
    }

    #[test]
    fn test_primary_evaluation_below_threshold() {
        let config = medium();
        let mut depth = SearchDepth::new(4);
        let plan = plan_automated_turn(&config, ENDGAME_THRESHOLD, &mut depth);
        assert_eq!(
            plan,
            SearchPlan::Search {
                evaluation: Evaluation::Positional,
                depth: 4
            }
        );
        assert_eq!(depth.get(), 4);
    }

    #[test]
    fn test_endgame_escalates_depth() {
        let config = medium();
        let mut depth = SearchDepth::new(4);
        let plan = plan_automated_turn(&config, 21, &mut depth);
        assert_eq!(
            plan,
            SearchPlan::Search {
                evaluation: Evaluation::Endgame,
                depth: ESCALATED_DEPTH
            }
        );
        assert_eq!(depth.get(), 7);
    }

    #[test]
    fn test_escalation_never_lowers_depth() {
        let config = medium();
        let mut depth = SearchDepth::new(9);
        plan_automated_turn(&config, 50, &mut depth);
        assert_eq!(depth.get(), 9);
    }

    #[test]
    fn test_escalation_disabled_keeps_depth() {
        let config = medium().with_escalate_depth(false);
        let mut depth = SearchDepth::new(2);
        let plan = plan_automated_turn(&config, 30, &mut depth);
        assert_eq!(
            plan,
            SearchPlan::Search {
                evaluation: Evaluation::Endgame,
                depth: 2
            }
        );
    }

    #[test]
    fn test_random_ignores_depth() {
        let config = medium().with_algorithm(Algorithm::Random);
        let mut depth = SearchDepth::new(4);
        assert_eq!(plan_automated_turn(&config, 40, &mut depth), SearchPlan::Random);
        assert_eq!(depth.get(), 4);
    }

    #[test]
    fn test_depth_is_monotonic_across_turns() {
        let config = medium();
        let mut depth = SearchDepth::new(4);
        let mut previous = depth.get();
        for counter in [0, 5, 21, 3, 0, 40, 2] {
            plan_automated_turn(&config, counter, &mut depth);
            assert!(depth.get() >= previous);
            previous = depth.get();
        }
        assert_eq!(depth.get(), 7);
    }
}
