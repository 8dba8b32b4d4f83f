//! Negamax alpha-beta search over complete plies.

use super::super::oracle::Evaluation;
use super::super::types::{Board, Player};
use super::evaluate::evaluate;
use super::movegen::{Ply, apply_ply, legal_plies};
use tracing::{debug, instrument};

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 1_000_000;

/// Base score for a side with no moves left (adjusted by distance).
pub const WIN_SCORE: i32 = 900_000;

/// Negamax alpha-beta search.
///
/// Returns the best score for `player`, who is to move on `board`.
#[allow(clippy::too_many_arguments)]
fn negamax(
    board: &Board,
    player: Player,
    depth: u32,
    ply: u32,
    mut alpha: i32,
    beta: i32,
    evaluation: Evaluation,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;

    let plies = legal_plies(board, player);
    if plies.is_empty() {
        return -(WIN_SCORE - ply as i32);
    }
    if depth == 0 {
        return evaluate(board, player, evaluation);
    }

    let mut best = -INF;
    for candidate in &plies {
        let mut child = board.clone();
        apply_ply(&mut child, candidate);
        let score = -negamax(
            &child,
            player.opponent(),
            depth - 1,
            ply + 1,
            -beta,
            -alpha,
            evaluation,
            nodes,
        );
        best = best.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }
    best
}

/// Picks the best ply for `player`, or `None` if it has no moves.
///
/// Ties go to the first ply in generation order, so the choice is
/// deterministic for a given board.
#[instrument(skip(board))]
pub fn best_ply(board: &Board, player: Player, depth: u32, evaluation: Evaluation) -> Option<Ply> {
    let depth = depth.max(1);
    let mut nodes = 0;
    let mut alpha = -INF;
    let mut best: Option<(i32, Ply)> = None;

    for candidate in legal_plies(board, player) {
        let mut child = board.clone();
        apply_ply(&mut child, &candidate);
        let score = -negamax(
            &child,
            player.opponent(),
            depth - 1,
            1,
            -INF,
            -alpha,
            evaluation,
            &mut nodes,
        );
        if best.as_ref().is_none_or(|(best_score, _)| score > *best_score) {
            alpha = alpha.max(score);
            best = Some((score, candidate));
        }
    }

    if let Some((score, ply)) = &best {
        debug!(score, nodes, path = ?ply.path, "Search finished");
    }
    best.map(|(_, ply)| ply)
}
