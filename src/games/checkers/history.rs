//! Board history with a movable pointer.
//!
//! Index 0 is the initial board. Recording a snapshot drops everything
//! after the pointer before appending, so a rewound timeline is replaced
//! rather than branched.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Ordered board snapshots, one per completed ply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History<B> {
    snapshots: Vec<B>,
    pointer: usize,
}

impl<B> History<B> {
    /// Starts a history at the initial board.
    pub fn new(initial: B) -> Self {
        Self {
            snapshots: vec![initial],
            pointer: 0,
        }
    }

    /// Records the board reached by a completed ply.
    #[instrument(skip_all, fields(pointer = self.pointer, len = self.snapshots.len()))]
    pub fn record(&mut self, board: B) {
        self.snapshots.truncate(self.pointer + 1);
        self.snapshots.push(board);
        self.pointer += 1;
        debug!(pointer = self.pointer, "Recorded board snapshot");
    }

    /// Moves the pointer to an earlier or later recorded snapshot.
    ///
    /// Returns false and leaves the pointer alone if `index` was never recorded.
    pub fn seek(&mut self, index: usize) -> bool {
        if index < self.snapshots.len() {
            self.pointer = index;
            true
        } else {
            false
        }
    }

    /// Snapshot at the pointer.
    pub fn current(&self) -> &B {
        &self.snapshots[self.pointer]
    }

    /// Index of the current snapshot.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// All recorded snapshots, oldest first.
    pub fn snapshots(&self) -> &[B] {
        &self.snapshots
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: a history holds at least the initial board.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_history_holds_initial_board() {
        let history = History::new("start");
        assert_eq!(history.len(), 1);
        assert_eq!(history.pointer(), 0);
        assert_eq!(history.current(), &"start");
    }

    #[test]
    fn test_record_appends_and_advances() {
        let mut history = History::new(0);
        for board in 1..=5 {
            history.record(board);
            assert_eq!(history.len(), history.pointer() + 1);
        }
        assert_eq!(history.snapshots(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_record_after_seek_truncates_tail() {
        let mut history = History::new(0);
        history.record(1);
        history.record(2);
        history.record(3);

        assert!(history.seek(1));
        history.record(10);

        assert_eq!(history.snapshots(), &[0, 1, 10]);
        assert_eq!(history.pointer(), 2);
        assert_eq!(history.len(), history.pointer() + 1);
    }

    #[test]
    fn test_seek_out_of_range_is_ignored() {
        let mut history = History::new(0);
        history.record(1);
        assert!(!history.seek(2));
        assert_eq!(history.pointer(), 1);
    }
}
