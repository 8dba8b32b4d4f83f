//! Plain-text rendering of session snapshots.

use crate::games::checkers::{BOARD_SIZE, Board, Highlight, Highlights, Phase, Position};
use crate::orchestrator::Snapshot;

/// Marker drawn in front of a highlighted square.
fn marker(highlights: &Highlights, pos: Position) -> char {
    let Some(tags) = highlights.get(&pos) else {
        return ' ';
    };
    if tags.contains(&Highlight::CaptureDestination) {
        'x'
    } else if tags.contains(&Highlight::NormalDestination) {
        'o'
    } else if tags.contains(&Highlight::SelectableOrigin) {
        '*'
    } else if tags.contains(&Highlight::LastMoved) {
        '+'
    } else {
        ' '
    }
}

/// Draws the board with one marker column per square.
pub fn render_board(board: &Board, highlights: &Highlights) -> String {
    let mut out = String::from("  ");
    for col in 0..BOARD_SIZE {
        out.push_str(&format!(" {col}"));
    }
    for row in 0..BOARD_SIZE {
        out.push_str(&format!("\n{row} "));
        for col in 0..BOARD_SIZE {
            let pos = Position::new(row, col);
            out.push(marker(highlights, pos));
            out.push(board.get(pos).symbol());
        }
    }
    out
}

/// One-line status under the board.
pub fn render_status(snapshot: &Snapshot<Board>) -> String {
    let prompt = match snapshot.phase {
        Phase::AwaitingSelection => format!("{} to select a piece", snapshot.active_player),
        Phase::AwaitingDestination { origin, .. } => {
            format!("{} to move the piece at {origin}", snapshot.active_player)
        }
        Phase::AutomatedTurn => "Computer to move".to_string(),
        Phase::GameOver(outcome) => outcome.to_string(),
    };
    format!(
        "{prompt} | Moves without capture: {}",
        snapshot.moves_since_capture
    )
}

/// Board and status together.
pub fn render_snapshot(snapshot: &Snapshot<Board>) -> String {
    format!(
        "{}\n{}",
        render_board(&snapshot.board, &snapshot.highlights),
        render_status(snapshot)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::games::checkers::{CheckersOracle, GameSession};

    #[test]
    fn test_opening_marks_selectable_pieces() {
        let session = GameSession::new(CheckersOracle::with_seed(0), SessionConfig::default());
        let text = render_snapshot(&Snapshot::of(&session));
        assert_eq!(text.lines().next(), Some("   0 1 2 3 4 5 6 7"));
        assert_eq!(text.lines().nth(1), Some("0  . w . w . w . w"));
        let row5 = text.lines().nth(6).expect("row 5");
        assert_eq!(row5.matches("*b").count(), 4);
        assert!(text.ends_with("Black to select a piece | Moves without capture: 0"));
    }

    #[test]
    fn test_capture_marker_wins_over_last_moved() {
        let mut highlights = Highlights::new();
        let pos = Position::new(3, 4);
        highlights
            .entry(pos)
            .or_default()
            .extend([Highlight::LastMoved, Highlight::CaptureDestination]);
        assert_eq!(marker(&highlights, pos), 'x');
    }
}
