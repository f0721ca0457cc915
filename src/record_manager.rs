//! Tracks each worker's local depth record and attempts to publish it as
//! the global record (spec §4.14).

use crate::board::Board;
use crate::history::History;
use crate::shared_state::{BestSnapshot, SharedSearchState};
use crate::used_set::PieceUsedSet;

/// Outcome of offering a new depth to the record manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Whether this depth exceeds this worker's own best so far.
    pub local_record: bool,
    /// Whether this depth (or its score) became the new global record.
    pub global_record: bool,
    /// Whether the record should be displayed, per
    /// `minDepthToShowRecords`.
    pub should_display: bool,
}

/// Per-worker record tracking, publishing to [`SharedSearchState`] on
/// strict improvement.
pub struct RecordManager {
    thread_id: usize,
    local_max_depth: i64,
    min_depth_to_show: usize,
}

impl RecordManager {
    /// A fresh record manager for one worker.
    #[must_use]
    pub fn new(thread_id: usize, min_depth_to_show: usize) -> RecordManager {
        RecordManager {
            thread_id,
            local_max_depth: -1,
            min_depth_to_show,
        }
    }

    /// This worker's best depth reached so far.
    #[must_use]
    pub const fn local_max_depth(&self) -> i64 {
        self.local_max_depth
    }

    /// Offer a newly reached depth. On a strict local improvement,
    /// recomputes the board's score and attempts to publish both the
    /// depth and score records globally; on success, snapshots the
    /// board/history under the shared mutex.
    pub fn offer(
        &mut self,
        depth: i64,
        shared: &SharedSearchState,
        board: &Board,
        used: &PieceUsedSet,
        history: &History,
    ) -> RecordOutcome {
        if depth <= self.local_max_depth {
            return RecordOutcome {
                local_record: false,
                global_record: false,
                should_display: false,
            };
        }
        self.local_max_depth = depth;

        let (matched, _max) = board.calculate_score();
        let depth_record = shared.try_raise_max_depth(depth);
        let score_record = shared.try_raise_best_score(matched as i64, self.thread_id);

        if depth_record || score_record {
            shared.publish_best(BestSnapshot {
                board: board.clone(),
                used: used.clone(),
                history: history.clone(),
                thread_id: self.thread_id,
            });
        }

        RecordOutcome {
            local_record: true,
            global_record: depth_record || score_record,
            should_display: (depth_record || score_record)
                && depth >= self.min_depth_to_show as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_strict_local_increases_are_considered() {
        let shared = SharedSearchState::new();
        let mut manager = RecordManager::new(0, 0);
        let board = Board::new(2, 2);
        let used = PieceUsedSet::new(4);
        let history = History::new();

        let first = manager.offer(2, &shared, &board, &used, &history);
        assert!(first.local_record);
        let repeat = manager.offer(2, &shared, &board, &used, &history);
        assert!(!repeat.local_record);
        let lower = manager.offer(1, &shared, &board, &used, &history);
        assert!(!lower.local_record);
    }

    #[test]
    fn display_is_gated_by_min_depth() {
        let shared = SharedSearchState::new();
        let mut manager = RecordManager::new(0, 5);
        let board = Board::new(2, 2);
        let used = PieceUsedSet::new(4);
        let history = History::new();

        let shallow = manager.offer(3, &shared, &board, &used, &history);
        assert!(shallow.global_record);
        assert!(!shallow.should_display);

        let deep = manager.offer(6, &shared, &board, &used, &history);
        assert!(deep.global_record);
        assert!(deep.should_display);
    }

    #[test]
    fn global_record_publishes_a_snapshot() {
        let shared = SharedSearchState::new();
        let mut manager = RecordManager::new(3, 0);
        let board = Board::new(2, 2);
        let used = PieceUsedSet::new(4);
        let history = History::new();
        manager.offer(1, &shared, &board, &used, &history);
        let snapshot = shared.best_snapshot().expect("global record should publish");
        assert_eq!(snapshot.thread_id, 3);
    }
}
