//! The recursive backtracking search itself (spec §4.9), plus the
//! deep-resume variant that walks back through saved history instead of
//! giving up when a restored state's own subtree is exhausted (§4.10).
//!
//! Every other component — domains, propagation, cell/value ordering,
//! singleton detection, symmetry breaking, shared cross-worker records,
//! and checkpointing — is owned or reached from here. One
//! [`BacktrackingEngine`] is constructed per worker thread.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::board::{Board, Coord};
use crate::cell_constraints::CellConstraints;
use crate::cell_selector::CellSelector;
use crate::checkpoint::{Checkpoint, CheckpointStore};
use crate::domain::DomainManager;
use crate::edge_index::EdgeCompatibilityIndex;
use crate::error::SolverError;
use crate::history::{History, PlacementInfo};
use crate::placement::Placement;
use crate::propagator::{ConstraintPropagator, PropagationResult};
use crate::puzzle::PuzzleDefinition;
use crate::record_manager::RecordManager;
use crate::shared_state::{BestSnapshot, SharedSearchState};
use crate::side::Rotation;
use crate::singleton::{SingletonDetector, SingletonOutcome};
use crate::stats::StatisticsManager;
use crate::symmetry::SymmetryBreaker;
use crate::tile::TileId;
use crate::tileset::TileSet;
use crate::used_set::PieceUsedSet;
use crate::value_orderer::ValueOrderer;

/// The read-only configuration every worker's engine shares: the puzzle's
/// tiles and topology, the strategy components, and the handle to
/// cross-worker coordination state. Cheap to clone (an `Arc` bump plus a
/// handful of small `Copy` values) so each worker thread gets its own.
#[derive(Clone)]
pub struct SolverContext {
    /// The puzzle's tiles, shared read-only across every worker.
    pub tileset: Arc<TileSet>,
    /// Precomputed cell topology, shared read-only across every worker.
    pub constraints: Arc<CellConstraints>,
    /// Precomputed edge-compatibility index, shared read-only.
    pub edge_index: Arc<EdgeCompatibilityIndex>,
    /// MRV cell selection strategy.
    pub cell_selector: CellSelector,
    /// LCV candidate ordering strategy.
    pub value_orderer: ValueOrderer,
    /// Rotational symmetry breaker, built once for this puzzle.
    pub symmetry: SymmetryBreaker,
    /// Whether to run singleton/forced-move detection before MRV.
    pub use_singletons: bool,
    /// Cross-worker solution flag and depth/score records.
    pub shared: SharedSearchState,
    /// Name the puzzle is referred to by in checkpoints and logs.
    pub puzzle_name: String,
    /// How often (wall-clock) to write the shared checkpoint.
    pub checkpoint_interval: Duration,
    /// How often to write this worker's own checkpoint file.
    pub thread_save_interval: Duration,
    /// How often to log search statistics.
    pub stats_log_interval: Duration,
    /// Minimum depth before a worker's own records are logged.
    pub min_depth_to_show_records: usize,
}

/// What one recursive [`BacktrackingEngine::step`] (or the
/// [`BacktrackingEngine::try_candidates`] loop within it) resolved to.
///
/// The three-way split matters for unwinding: `Exhausted` is an ordinary
/// failure that the *caller* undoes and keeps searching past, but
/// `TimedOut` must propagate all the way to the top untouched — every
/// enclosing frame leaves its own placement exactly as it is and simply
/// returns `TimedOut` in turn, rather than treating the timeout as just
/// another failed candidate (spec §4.9 step d, §5 cancellation: the
/// snapshot at cancellation must stay internally consistent).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepOutcome {
    /// The board was filled; this worker found the solution.
    Solved,
    /// This subtree is exhausted (or a sibling already solved); board,
    /// `used`, and history have been restored to this call's pre-call
    /// state by the caller.
    Exhausted,
    /// The deadline passed right after a placement. Board, `used`, and
    /// history are left exactly as they stood at that instant — a valid,
    /// stable partial configuration — and must not be touched by any
    /// enclosing frame.
    TimedOut,
}

/// Recursive backtracking search over one worker's board.
///
/// Holds the mutable per-worker state (`board`, `used`, `domains`,
/// `history`, `stats`, `records`) alongside the shared, read-only
/// [`SolverContext`]. A fresh engine is built once per worker and consumed
/// by a single call to [`BacktrackingEngine::run`] (or, on resume, wrapped
/// in a [`HistoricalBacktracker`]).
pub struct BacktrackingEngine {
    ctx: SolverContext,
    thread_id: usize,
    board: Board,
    used: PieceUsedSet,
    domains: DomainManager,
    history: History,
    stats: StatisticsManager,
    records: RecordManager,
    num_fixed_pieces: usize,
    initial_fixed_pieces: Vec<PlacementInfo>,
    start_time: Instant,
    deadline: Option<Instant>,
    checkpoint_path: Option<PathBuf>,
    thread_checkpoint_path: Option<PathBuf>,
    last_checkpoint: Instant,
    last_checkpoint_depth: usize,
    last_thread_save: Instant,
    last_stats_log: Instant,
    timed_out: bool,
}

impl BacktrackingEngine {
    /// Build a fresh engine for `puzzle`, applying its fixed pieces before
    /// search begins. `deadline`, if set, is the absolute instant by which
    /// the engine must stop descending into new placements.
    #[must_use]
    pub fn new(
        ctx: SolverContext,
        puzzle: &PuzzleDefinition,
        thread_id: usize,
        deadline: Option<Instant>,
        checkpoint_path: Option<PathBuf>,
        thread_checkpoint_path: Option<PathBuf>,
    ) -> BacktrackingEngine {
        let mut board = Board::new(puzzle.rows(), puzzle.cols());
        let mut used = PieceUsedSet::new(ctx.tileset.len());
        let mut history = History::new();
        let mut initial_fixed_pieces = Vec::with_capacity(puzzle.fixed_pieces().len());

        for fixed in puzzle.fixed_pieces() {
            let tile = ctx.tileset.get(fixed.tile_id);
            board.place(fixed.at, Placement::new(fixed.tile_id, tile, fixed.rotation));
            used.insert(fixed.tile_id);
            let entry = PlacementInfo::new(fixed.at, fixed.tile_id, fixed.rotation);
            history.push(entry);
            initial_fixed_pieces.push(entry);
        }
        let num_fixed_pieces = initial_fixed_pieces.len();

        let domains = DomainManager::new(puzzle.rows(), puzzle.cols());
        let min_depth_to_show = ctx.min_depth_to_show_records;
        let records = RecordManager::new(thread_id, min_depth_to_show);
        let now = Instant::now();

        let mut engine = BacktrackingEngine {
            ctx,
            thread_id,
            board,
            used,
            domains,
            history,
            stats: StatisticsManager::new(),
            records,
            num_fixed_pieces,
            initial_fixed_pieces,
            start_time: now,
            deadline,
            checkpoint_path,
            thread_checkpoint_path,
            last_checkpoint: now,
            last_checkpoint_depth: 0,
            last_thread_save: now,
            last_stats_log: now,
            timed_out: false,
        };
        engine.reinitialize_domains();
        engine
    }

    /// Resume an engine from a previously reconstructed board/used/history
    /// triple (e.g. loaded from a checkpoint), carrying over cumulative
    /// compute time already spent in prior sessions.
    #[must_use]
    pub fn resume(
        ctx: SolverContext,
        puzzle: &PuzzleDefinition,
        thread_id: usize,
        deadline: Option<Instant>,
        checkpoint_path: Option<PathBuf>,
        thread_checkpoint_path: Option<PathBuf>,
        board: Board,
        used: PieceUsedSet,
        history: History,
        num_fixed_pieces: usize,
        cumulative_offset: Duration,
    ) -> BacktrackingEngine {
        let initial_fixed_pieces = history.as_slice().get(..num_fixed_pieces).map(<[_]>::to_vec).unwrap_or_default();
        let domains = DomainManager::new(puzzle.rows(), puzzle.cols());
        let min_depth_to_show = ctx.min_depth_to_show_records;
        let records = RecordManager::new(thread_id, min_depth_to_show);
        let now = Instant::now();
        let mut stats = StatisticsManager::new();
        stats.set_previous_time_offset(cumulative_offset);

        let mut engine = BacktrackingEngine {
            ctx,
            thread_id,
            board,
            used,
            domains,
            history,
            stats,
            records,
            num_fixed_pieces,
            initial_fixed_pieces,
            start_time: now,
            deadline,
            checkpoint_path,
            thread_checkpoint_path,
            last_checkpoint: now,
            last_checkpoint_depth: 0,
            last_thread_save: now,
            last_stats_log: now,
            timed_out: false,
        };
        engine.reinitialize_domains();
        engine
    }

    /// Run the search to completion: returns `true` if this engine placed
    /// the final tile, `false` if its subtree was exhausted, a sibling
    /// found a solution first, or the deadline passed.
    pub fn run(&mut self) -> bool {
        matches!(self.step(), StepOutcome::Solved)
    }

    /// Whether this engine's most recent [`BacktrackingEngine::run`] (or
    /// the [`HistoricalBacktracker`] driving it) stopped because the
    /// deadline passed, rather than exhausting the search or solving it.
    #[must_use]
    pub const fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Number of entries currently recorded in history.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// How many of the leading history entries are fixed pieces that must
    /// never be undone.
    #[must_use]
    pub const fn num_fixed_pieces(&self) -> usize {
        self.num_fixed_pieces
    }

    /// The current board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The current search statistics.
    #[must_use]
    pub const fn stats(&self) -> &StatisticsManager {
        &self.stats
    }

    /// A [`Checkpoint`] describing the engine's current state.
    #[must_use]
    pub fn to_checkpoint(&self) -> Checkpoint {
        let mut placements_by_cell = std::collections::HashMap::new();
        for at in self.board.coords() {
            if let Some(placement) = self.board.get_placement(at) {
                placements_by_cell.insert(
                    at,
                    PlacementInfo::new(at, placement.tile_id(), placement.rotation()),
                );
            }
        }
        let elapsed = self.start_time.elapsed();
        Checkpoint {
            puzzle_name: self.ctx.puzzle_name.clone(),
            rows: self.board.rows(),
            cols: self.board.cols(),
            placements_by_cell,
            placement_order: self.history.as_slice().to_vec(),
            unused_tile_ids: self.used.unused(self.ctx.tileset.len()).collect(),
            num_fixed_pieces: self.num_fixed_pieces,
            initial_fixed_pieces: self.initial_fixed_pieces.clone(),
            progress_percent: self.stats.progress_estimate(),
            elapsed_ms_this_session: elapsed.as_millis() as u64,
            cumulative_compute_ms: self.stats.cumulative_time(elapsed).as_millis() as u64,
        }
    }

    /// Pop and undo the most recent non-fixed placement. Returns `false`
    /// (without changing anything) if history is already down to the
    /// fixed-piece prefix.
    pub fn undo_most_recent(&mut self) -> bool {
        if self.history.len() <= self.num_fixed_pieces {
            return false;
        }
        let entry = self.history.pop().expect("checked non-empty above");
        self.board.remove(entry.coord());
        self.used.remove(entry.tile_id);
        self.stats.record_backtrack();
        self.reinitialize_domains();
        true
    }

    fn reinitialize_domains(&mut self) {
        self.domains.initialize(
            &self.board,
            &self.used,
            &self.ctx.tileset,
            &self.ctx.constraints,
            &self.ctx.edge_index,
            &mut self.stats,
        );
    }

    /// One recursive step: select a cell (after a singleton check), try
    /// its candidates in LCV order, and recurse.
    fn step(&mut self) -> StepOutcome {
        if self.ctx.shared.solution_found() {
            return StepOutcome::Exhausted;
        }
        self.stats.record_recursive_call();

        let depth = (self.used.cardinality() as i64 - self.num_fixed_pieces as i64).max(0) as usize;
        let outcome = self.records.offer(depth as i64, &self.ctx.shared, &self.board, &self.used, &self.history);
        if outcome.should_display {
            log::info!(
                "worker {}: new record depth={depth} (global_record={})",
                self.thread_id,
                outcome.global_record
            );
        }
        self.run_periodic_maintenance();

        let Some(next_cell) = self.ctx.cell_selector.select(&self.board, &self.domains, &self.ctx.constraints) else {
            self.ctx.shared.signal_solution_found();
            self.ctx.shared.publish_best(BestSnapshot {
                board: self.board.clone(),
                used: self.used.clone(),
                history: self.history.clone(),
                thread_id: self.thread_id,
            });
            return StepOutcome::Solved;
        };

        if self.ctx.use_singletons {
            match SingletonDetector::scan(&self.board, &self.domains, &self.used, &self.ctx.tileset, &mut self.stats)
            {
                SingletonOutcome::HardDeadEnd { .. } => return StepOutcome::Exhausted,
                SingletonOutcome::Singleton { tile_id, at, rotations } => {
                    let candidates = rotations.into_iter().map(|r| (tile_id, r)).collect();
                    return self.try_candidates(at, candidates, true, depth);
                }
                SingletonOutcome::None => {}
            }
        }

        let candidates: Vec<(TileId, Rotation)> = self
            .domains
            .get(next_cell)
            .iter()
            .flat_map(|(id, rotations)| rotations.iter().map(move |&r| (id, r)))
            .collect();
        let ordered = self.ctx.value_orderer.order(
            next_cell,
            candidates,
            &self.board,
            &self.domains,
            &self.ctx.constraints,
            &self.ctx.tileset,
        );
        self.try_candidates(next_cell, ordered, false, depth)
    }

    /// Try each candidate `(tile, rotation)` at `at` in order, recursing
    /// after every placement that survives propagation. Leaves the final
    /// successful placement on the board and returns `Solved` immediately;
    /// otherwise restores `at` to empty and falls through to the next
    /// candidate. A deadline hit returns `TimedOut` with `at`'s placement
    /// (and everything above it) left exactly as it stood.
    fn try_candidates(
        &mut self,
        at: Coord,
        candidates: Vec<(TileId, Rotation)>,
        is_singleton: bool,
        depth: usize,
    ) -> StepOutcome {
        let total_options = candidates.len();
        for (option_index, (tile_id, rotation)) in candidates.into_iter().enumerate() {
            if self.ctx.shared.solution_found() {
                return StepOutcome::Exhausted;
            }
            self.stats.record_branch(depth, option_index, total_options);
            if !self.ctx.symmetry.allowed(at, tile_id) {
                continue;
            }

            let tile = self.ctx.tileset.get(tile_id);
            self.board.place(at, Placement::new(tile_id, tile, rotation));
            self.used.insert(tile_id);
            self.history.push(PlacementInfo::new(at, tile_id, rotation));
            self.stats.record_placement();
            if is_singleton {
                self.stats.record_singleton_placed();
            }

            let result = ConstraintPropagator::propagate(
                &self.board,
                &mut self.domains,
                &self.ctx.constraints,
                &self.used,
                &self.ctx.tileset,
                &self.ctx.edge_index,
                &mut self.stats,
                at,
                tile_id,
            );

            if result == PropagationResult::Ok {
                if let Some(deadline) = self.deadline {
                    if Instant::now() >= deadline {
                        self.finish_on_timeout();
                        return StepOutcome::TimedOut;
                    }
                }
                match self.step() {
                    StepOutcome::Solved => return StepOutcome::Solved,
                    StepOutcome::TimedOut => return StepOutcome::TimedOut,
                    StepOutcome::Exhausted => {}
                }
            }

            self.board.remove(at);
            self.used.remove(tile_id);
            self.history.pop();
            self.stats.record_backtrack();
            self.reinitialize_domains();
        }
        StepOutcome::Exhausted
    }

    /// Called the instant the deadline is found to have passed, with the
    /// triggering placement (and every ancestor's) still on the board.
    /// Writes one last checkpoint of this exact state before the worker
    /// unwinds, since it is the deepest configuration this engine reached.
    fn finish_on_timeout(&mut self) {
        self.timed_out = true;
        let elapsed = self.start_time.elapsed();
        log::info!(
            "worker {}: {}",
            self.thread_id,
            SolverError::Timeout(elapsed)
        );
        if let Some(path) = self.checkpoint_path.clone() {
            self.write_checkpoint(&path);
        }
        if let Some(path) = self.thread_checkpoint_path.clone() {
            self.write_checkpoint(&path);
        }
    }

    fn run_periodic_maintenance(&mut self) {
        let now = Instant::now();

        if now.duration_since(self.last_stats_log) >= self.ctx.stats_log_interval {
            self.last_stats_log = now;
            log::debug!(
                "worker {}: calls={} placements={} backtracks={} dead_ends={} progress={:.2}%",
                self.thread_id,
                self.stats.recursive_calls(),
                self.stats.placements(),
                self.stats.backtracks(),
                self.stats.dead_ends_detected(),
                self.stats.progress_estimate(),
            );
        }

        if now.duration_since(self.last_thread_save) >= self.ctx.thread_save_interval {
            self.last_thread_save = now;
            if let Some(path) = self.thread_checkpoint_path.clone() {
                self.write_checkpoint(&path);
            }
        }

        let depth = self.history.len();
        if now.duration_since(self.last_checkpoint) >= self.ctx.checkpoint_interval && depth != self.last_checkpoint_depth
        {
            self.last_checkpoint = now;
            self.last_checkpoint_depth = depth;
            if let Some(path) = self.checkpoint_path.clone() {
                self.write_checkpoint(&path);
            }
        }
    }

    fn write_checkpoint(&self, path: &PathBuf) {
        let checkpoint = self.to_checkpoint();
        match CheckpointStore::save(&checkpoint, path) {
            Ok(()) => log::debug!("worker {}: wrote checkpoint to {}", self.thread_id, path.display()),
            Err(err) => log::warn!("worker {}: failed to write checkpoint to {}: {err}", self.thread_id, path.display()),
        }
    }
}

/// Resume-aware deep backtracking (spec §4.10): when an engine restored
/// from a checkpoint exhausts its current subtree, walk back further than
/// a single undo, one history entry at a time, re-entering ordinary search
/// after each, until a placement's alternatives succeed or history is
/// exhausted down to the fixed-piece prefix.
pub struct HistoricalBacktracker;

impl HistoricalBacktracker {
    /// Drive `engine` to completion, backtracking through its history as
    /// needed. `deadline`, if set, stops backtracking (not just descent)
    /// once passed.
    pub fn resume(engine: &mut BacktrackingEngine, deadline: Option<Instant>) -> bool {
        match engine.step() {
            StepOutcome::Solved => return true,
            StepOutcome::TimedOut => return false,
            StepOutcome::Exhausted => {}
        }
        loop {
            if engine.ctx.shared.solution_found() {
                return false;
            }
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    return false;
                }
            }
            if !engine.undo_most_recent() {
                return false;
            }
            match engine.step() {
                StepOutcome::Solved => return true,
                StepOutcome::TimedOut => return false,
                StepOutcome::Exhausted => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BORDER;
    use crate::puzzle::FixedPiece;
    use crate::tile::Tile;
    use std::collections::HashMap;

    fn context_for(tiles: Vec<Tile>, rows: usize, cols: usize) -> (SolverContext, PuzzleDefinition) {
        let tileset = TileSet::new(tiles.clone());
        let constraints = CellConstraints::new(rows, cols);
        let edge_index = EdgeCompatibilityIndex::build(&tileset);
        let symmetry = SymmetryBreaker::new(&tileset, (0, 0));
        let tile_map: HashMap<TileId, Tile> =
            tiles.iter().enumerate().map(|(i, &t)| (i as TileId + 1, t)).collect();
        let puzzle = PuzzleDefinition::new(rows, cols, tile_map, vec![], BORDER, true, true, false, 0)
            .expect("well-formed test puzzle");
        let ctx = SolverContext {
            tileset: Arc::new(tileset),
            constraints: Arc::new(constraints),
            edge_index: Arc::new(edge_index),
            cell_selector: CellSelector::new(true),
            value_orderer: ValueOrderer::new(true),
            symmetry,
            use_singletons: true,
            shared: SharedSearchState::new(),
            puzzle_name: "test".to_string(),
            checkpoint_interval: Duration::from_secs(3600),
            thread_save_interval: Duration::from_secs(3600),
            stats_log_interval: Duration::from_secs(3600),
            min_depth_to_show_records: 0,
        };
        (ctx, puzzle)
    }

    #[test]
    fn solves_a_trivial_one_by_one_board() {
        let (ctx, puzzle) = context_for(vec![Tile::new(BORDER, BORDER, BORDER, BORDER)], 1, 1);
        let mut engine = BacktrackingEngine::new(ctx, &puzzle, 0, None, None, None);
        assert!(engine.run());
        assert!(!engine.board().is_empty((0, 0)));
        assert_eq!(engine.stats().placements(), 1);
    }

    #[test]
    fn solves_a_two_by_one_strip_with_matching_tiles() {
        let tiles = vec![
            Tile::new(BORDER, 5, BORDER, BORDER),
            Tile::new(BORDER, BORDER, BORDER, 5),
        ];
        let (ctx, puzzle) = context_for(tiles, 1, 2);
        let mut engine = BacktrackingEngine::new(ctx, &puzzle, 0, None, None, None);
        assert!(engine.run());
        let (matched, max) = engine.board().calculate_score();
        assert_eq!((matched, max), (1, 1));
    }

    #[test]
    fn unsolvable_board_returns_false_and_empties_back_out() {
        // Two tiles whose only shared color never lines up under any
        // rotation: no arrangement can satisfy both the frame and the
        // internal edge simultaneously.
        let tiles = vec![Tile::new(BORDER, 1, BORDER, 2), Tile::new(BORDER, 3, BORDER, 4)];
        let (ctx, puzzle) = context_for(tiles, 1, 2);
        let mut engine = BacktrackingEngine::new(ctx, &puzzle, 0, None, None, None);
        assert!(!engine.run());
        assert!(engine.board().is_empty((0, 0)));
        assert!(engine.board().is_empty((0, 1)));
    }

    #[test]
    fn fixed_pieces_are_never_undone_by_the_historical_backtracker() {
        let tiles = vec![
            Tile::new(BORDER, 5, BORDER, BORDER),
            Tile::new(BORDER, BORDER, BORDER, 5),
        ];
        let tileset = TileSet::new(tiles.clone());
        let constraints = CellConstraints::new(1, 2);
        let edge_index = EdgeCompatibilityIndex::build(&tileset);
        let symmetry = SymmetryBreaker::new(&tileset, (0, 0));
        let tile_map: HashMap<TileId, Tile> =
            tiles.iter().enumerate().map(|(i, &t)| (i as TileId + 1, t)).collect();
        let fixed = vec![FixedPiece {
            at: (0, 0),
            tile_id: 1,
            rotation: Rotation::Rot0,
        }];
        let puzzle = PuzzleDefinition::new(1, 2, tile_map, fixed, BORDER, true, true, false, 0)
            .expect("well-formed test puzzle");
        let ctx = SolverContext {
            tileset: Arc::new(tileset),
            constraints: Arc::new(constraints),
            edge_index: Arc::new(edge_index),
            cell_selector: CellSelector::new(true),
            value_orderer: ValueOrderer::new(true),
            symmetry,
            use_singletons: true,
            shared: SharedSearchState::new(),
            puzzle_name: "test".to_string(),
            checkpoint_interval: Duration::from_secs(3600),
            thread_save_interval: Duration::from_secs(3600),
            stats_log_interval: Duration::from_secs(3600),
            min_depth_to_show_records: 0,
        };
        let mut engine = BacktrackingEngine::new(ctx, &puzzle, 0, None, None, None);
        assert_eq!(engine.num_fixed_pieces(), 1);
        assert!(HistoricalBacktracker::resume(&mut engine, None));
        assert!(!engine.board().is_empty((0, 0)));
        assert_eq!(engine.board().get_placement((0, 0)).unwrap().tile_id(), 1);
    }

    #[test]
    fn timed_out_run_leaves_board_and_history_mutually_consistent() {
        let tiles = vec![
            Tile::new(BORDER, 5, BORDER, BORDER),
            Tile::new(BORDER, BORDER, BORDER, 5),
        ];
        let (ctx, puzzle) = context_for(tiles, 1, 2);
        // Already-past deadline: the very first successful placement finds
        // it passed before it can recurse any deeper.
        let mut engine = BacktrackingEngine::new(ctx, &puzzle, 0, Some(Instant::now()), None, None);
        assert!(!engine.run());
        assert!(engine.timed_out());
        let placed = engine.board().coords().filter(|&at| !engine.board().is_empty(at)).count();
        assert_eq!(placed, engine.history_len());
    }
}
