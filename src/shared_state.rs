//! Cross-worker coordination state (spec §4.11, §5): a monotonic
//! solution flag and depth/score records on atomics, with a single mutex
//! guarding the best-board snapshot.
//!
//! Grounded on the atomic coordination pattern `other_examples`'
//! `forkme7-daydreamer` search engine uses for its `EngineState` (an
//! `Arc<AtomicUsize>` flag workers poll to stop searching without
//! blocking), generalized here to the depth/score records spec §4.11
//! calls for.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::board::Board;
use crate::history::History;
use crate::used_set::PieceUsedSet;

/// A snapshot of the best board seen by any worker, taken under
/// [`SharedSearchState`]'s mutex.
#[derive(Debug, Clone)]
pub struct BestSnapshot {
    /// The board state at the time of the record.
    pub board: Board,
    /// Which tiles were placed.
    pub used: PieceUsedSet,
    /// The placement history leading to this board.
    pub history: History,
    /// Id of the worker that produced this snapshot.
    pub thread_id: usize,
}

/// Shared, lock-light state every worker engine holds a handle to.
///
/// Atomics carry the monotonic solution flag and the current depth/score
/// records; only the record holder ever writes the guarded snapshot, and
/// only while holding the mutex (spec §5's single short critical
/// section).
#[derive(Clone)]
pub struct SharedSearchState {
    solution_found: Arc<AtomicBool>,
    global_max_depth: Arc<AtomicI64>,
    global_best_score: Arc<AtomicI64>,
    global_best_thread_id: Arc<AtomicUsize>,
    best: Arc<Mutex<Option<BestSnapshot>>>,
}

impl SharedSearchState {
    /// A fresh shared state with no solution or record yet.
    #[must_use]
    pub fn new() -> SharedSearchState {
        SharedSearchState {
            solution_found: Arc::new(AtomicBool::new(false)),
            global_max_depth: Arc::new(AtomicI64::new(-1)),
            global_best_score: Arc::new(AtomicI64::new(-1)),
            global_best_thread_id: Arc::new(AtomicUsize::new(0)),
            best: Arc::new(Mutex::new(None)),
        }
    }

    /// Whether any worker has already found a full solution.
    #[must_use]
    pub fn solution_found(&self) -> bool {
        self.solution_found.load(Ordering::SeqCst)
    }

    /// Signal that a worker found a full solution. Idempotent.
    pub fn signal_solution_found(&self) {
        self.solution_found.store(true, Ordering::SeqCst);
    }

    /// The current global maximum depth record, or -1 if none yet.
    #[must_use]
    pub fn global_max_depth(&self) -> i64 {
        self.global_max_depth.load(Ordering::SeqCst)
    }

    /// The current global best score record, or -1 if none yet.
    #[must_use]
    pub fn global_best_score(&self) -> i64 {
        self.global_best_score.load(Ordering::SeqCst)
    }

    /// The worker id that holds the current best-score record.
    #[must_use]
    pub fn global_best_thread_id(&self) -> usize {
        self.global_best_thread_id.load(Ordering::SeqCst)
    }

    /// Try to raise the global max-depth record via a strict
    /// compare-and-swap loop. Returns `true` if `depth` became the new
    /// record.
    pub fn try_raise_max_depth(&self, depth: i64) -> bool {
        let mut current = self.global_max_depth.load(Ordering::SeqCst);
        while depth > current {
            match self.global_max_depth.compare_exchange_weak(
                current,
                depth,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return true,
                Err(observed) => current = observed,
            }
        }
        false
    }

    /// Try to raise the global best-score record via a strict
    /// compare-and-swap loop, recording the winning worker id on
    /// success. Returns `true` if `score` became the new record.
    pub fn try_raise_best_score(&self, score: i64, thread_id: usize) -> bool {
        let mut current = self.global_best_score.load(Ordering::SeqCst);
        while score > current {
            match self.global_best_score.compare_exchange_weak(
                current,
                score,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => {
                    self.global_best_thread_id.store(thread_id, Ordering::SeqCst);
                    return true;
                }
                Err(observed) => current = observed,
            }
        }
        false
    }

    /// Replace the guarded best-board snapshot. Only the thread that just
    /// won a record should call this.
    pub fn publish_best(&self, snapshot: BestSnapshot) {
        let mut guard = self.best.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(snapshot);
    }

    /// Clone the current best-board snapshot, if any.
    #[must_use]
    pub fn best_snapshot(&self) -> Option<BestSnapshot> {
        self.best
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Default for SharedSearchState {
    fn default() -> SharedSearchState {
        SharedSearchState::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solution_flag_is_monotonic_and_idempotent() {
        let state = SharedSearchState::new();
        assert!(!state.solution_found());
        state.signal_solution_found();
        assert!(state.solution_found());
        state.signal_solution_found();
        assert!(state.solution_found());
    }

    #[test]
    fn max_depth_cas_only_advances_on_strict_increase() {
        let state = SharedSearchState::new();
        assert!(state.try_raise_max_depth(3));
        assert_eq!(state.global_max_depth(), 3);
        assert!(!state.try_raise_max_depth(3));
        assert!(!state.try_raise_max_depth(2));
        assert!(state.try_raise_max_depth(5));
        assert_eq!(state.global_max_depth(), 5);
    }

    #[test]
    fn best_score_cas_records_winning_thread() {
        let state = SharedSearchState::new();
        assert!(state.try_raise_best_score(10, 2));
        assert_eq!(state.global_best_score(), 10);
        assert_eq!(state.global_best_thread_id(), 2);
        assert!(!state.try_raise_best_score(10, 7));
        assert_eq!(state.global_best_thread_id(), 2);
    }

    #[test]
    fn best_snapshot_round_trips_through_the_mutex() {
        let state = SharedSearchState::new();
        assert!(state.best_snapshot().is_none());
        state.publish_best(BestSnapshot {
            board: Board::new(2, 2),
            used: PieceUsedSet::new(4),
            history: History::new(),
            thread_id: 1,
        });
        let snapshot = state.best_snapshot().expect("snapshot was just published");
        assert_eq!(snapshot.thread_id, 1);
    }
}
