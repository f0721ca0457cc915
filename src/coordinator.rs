//! Fixed-size worker pool orchestration (spec §4.12): spawns one
//! [`BacktrackingEngine`] per thread, each seeded with a different
//! symmetry-breaking corner and value-order direction so sibling workers
//! explore distinct regions of the search space, and stops every worker as
//! soon as any one of them signals a solution via [`SharedSearchState`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::board::{Board, Coord};
use crate::cell_constraints::CellConstraints;
use crate::cell_selector::CellSelector;
use crate::edge_index::EdgeCompatibilityIndex;
use crate::engine::{BacktrackingEngine, HistoricalBacktracker, SolverContext};
use crate::history::History;
use crate::puzzle::PuzzleDefinition;
use crate::shared_state::SharedSearchState;
use crate::stats::StatisticsManager;
use crate::symmetry::SymmetryBreaker;
use crate::used_set::PieceUsedSet;
use crate::value_orderer::ValueOrderer;

/// A previously reconstructed search state to resume every worker from
/// (e.g. loaded from a shared checkpoint at startup).
pub struct ResumeState {
    pub board: Board,
    pub used: PieceUsedSet,
    pub history: History,
    pub num_fixed_pieces: usize,
    pub cumulative_offset: Duration,
}

/// Behavior knobs for a parallel solve that don't belong to the puzzle
/// itself (these come from the command line, spec §6).
pub struct CoordinatorConfig {
    pub puzzle_name: String,
    pub num_workers: usize,
    pub deadline: Option<Instant>,
    pub checkpoint_dir: Option<PathBuf>,
    pub checkpoint_interval: Duration,
    pub thread_save_interval: Duration,
    pub stats_log_interval: Duration,
    pub use_singletons: bool,
}

/// What a parallel solve run produced: whether any worker completed the
/// board, the best board reached by any worker (the full solution if
/// `solved`, otherwise the deepest/highest-scoring partial), and every
/// worker's final counters for reporting.
pub struct SolveOutcome {
    pub solved: bool,
    pub board: Board,
    pub used: PieceUsedSet,
    pub history: History,
    pub worker_stats: Vec<StatisticsManager>,
}

/// The four board corners, in a fixed order used to diversify which
/// corner each worker's [`SymmetryBreaker`] canonicalizes.
fn corners(rows: usize, cols: usize) -> [Coord; 4] {
    [(0, 0), (0, cols - 1), (rows - 1, 0), (rows - 1, cols - 1)]
}

/// Spawns and joins the worker pool for one solve attempt.
pub struct ParallelCoordinator;

impl ParallelCoordinator {
    /// Run `config.num_workers` engines against `puzzle` to completion or
    /// the configured deadline, diversifying each worker's symmetry corner
    /// and value-order direction. When `resume` is given, every worker
    /// starts from that restored state and uses [`HistoricalBacktracker`]
    /// instead of a plain [`BacktrackingEngine::run`].
    #[must_use]
    pub fn run(puzzle: &PuzzleDefinition, config: &CoordinatorConfig, resume: Option<&ResumeState>) -> SolveOutcome {
        let tileset = Arc::new(puzzle.tileset().clone());
        let constraints = Arc::new(CellConstraints::new(puzzle.rows(), puzzle.cols()));
        let edge_index = Arc::new(EdgeCompatibilityIndex::build(&tileset));
        let shared = SharedSearchState::new();
        let corner_options = corners(puzzle.rows(), puzzle.cols());

        if let Some(dir) = &config.checkpoint_dir {
            if let Err(err) = std::fs::create_dir_all(dir) {
                log::warn!("could not create checkpoint directory {}: {err}", dir.display());
            }
        }

        let worker_stats: Vec<StatisticsManager> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..config.num_workers.max(1))
                .map(|worker_id| {
                    let tileset = Arc::clone(&tileset);
                    let constraints = Arc::clone(&constraints);
                    let edge_index = Arc::clone(&edge_index);
                    let shared = shared.clone();
                    let corner_cell = corner_options[worker_id % corner_options.len()];
                    let symmetry = SymmetryBreaker::new(&tileset, corner_cell);
                    let ctx = SolverContext {
                        tileset,
                        constraints,
                        edge_index,
                        cell_selector: CellSelector::new(puzzle.prioritize_borders()),
                        value_orderer: ValueOrderer::new(puzzle.sort_ascending() ^ (worker_id % 2 == 1)),
                        symmetry,
                        use_singletons: config.use_singletons,
                        shared,
                        puzzle_name: config.puzzle_name.clone(),
                        checkpoint_interval: config.checkpoint_interval,
                        thread_save_interval: config.thread_save_interval,
                        stats_log_interval: config.stats_log_interval,
                        min_depth_to_show_records: puzzle.min_depth_to_show_records(),
                    };

                    let checkpoint_path = config
                        .checkpoint_dir
                        .as_ref()
                        .map(|dir| dir.join(format!("{}_current", config.puzzle_name)));
                    let thread_checkpoint_path = config
                        .checkpoint_dir
                        .as_ref()
                        .map(|dir| dir.join(crate::puzzle_io::CheckpointNaming::thread(&config.puzzle_name, worker_id)));
                    let deadline = config.deadline;

                    let board = resume.map(|r| r.board.clone());
                    let used = resume.map(|r| r.used.clone());
                    let history = resume.map(|r| r.history.clone());
                    let num_fixed_pieces = resume.map(|r| r.num_fixed_pieces);
                    let cumulative_offset = resume.map_or(Duration::ZERO, |r| r.cumulative_offset);

                    std::thread::Builder::new()
                        .name(format!("solver-worker-{worker_id}"))
                        .stack_size(64 * 1024 * 1024)
                        .spawn_scoped(scope, move || {
                            let mut engine = match (board, used, history, num_fixed_pieces) {
                                (Some(board), Some(used), Some(history), Some(num_fixed_pieces)) => {
                                    BacktrackingEngine::resume(
                                        ctx,
                                        puzzle,
                                        worker_id,
                                        deadline,
                                        checkpoint_path,
                                        thread_checkpoint_path,
                                        board,
                                        used,
                                        history,
                                        num_fixed_pieces,
                                        cumulative_offset,
                                    )
                                }
                                _ => BacktrackingEngine::new(
                                    ctx,
                                    puzzle,
                                    worker_id,
                                    deadline,
                                    checkpoint_path,
                                    thread_checkpoint_path,
                                ),
                            };
                            // A winning worker publishes its board to
                            // SharedSearchState from inside step(); the
                            // return value only matters for this worker's
                            // own exit, not for the coordinator's result.
                            let _ = HistoricalBacktracker::resume(&mut engine, deadline);
                            if engine.timed_out() {
                                log::info!("worker {worker_id}: stopped on deadline, final state checkpointed");
                            }
                            engine
                        })
                        .expect("failed to spawn solver worker thread")
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().expect("solver worker thread panicked"))
                .map(|engine| engine.stats().clone())
                .collect()
        });

        match shared.best_snapshot() {
            Some(snapshot) => SolveOutcome {
                solved: shared.solution_found(),
                board: snapshot.board,
                used: snapshot.used,
                history: snapshot.history,
                worker_stats,
            },
            None => SolveOutcome {
                solved: false,
                board: Board::new(puzzle.rows(), puzzle.cols()),
                used: PieceUsedSet::new(puzzle.tileset().len()),
                history: History::new(),
                worker_stats,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BORDER;
    use crate::tile::Tile;
    use std::collections::HashMap;

    fn trivial_puzzle() -> PuzzleDefinition {
        let mut tiles = HashMap::new();
        tiles.insert(1, Tile::new(BORDER, 5, BORDER, BORDER));
        tiles.insert(2, Tile::new(BORDER, BORDER, BORDER, 5));
        PuzzleDefinition::new(1, 2, tiles, vec![], BORDER, true, true, false, 0)
            .expect("well-formed test puzzle")
    }

    fn quick_config(num_workers: usize) -> CoordinatorConfig {
        CoordinatorConfig {
            puzzle_name: "test".to_string(),
            num_workers,
            deadline: Some(Instant::now() + Duration::from_secs(5)),
            checkpoint_dir: None,
            checkpoint_interval: Duration::from_secs(3600),
            thread_save_interval: Duration::from_secs(3600),
            stats_log_interval: Duration::from_secs(3600),
            use_singletons: true,
        }
    }

    #[test]
    fn corner_order_covers_all_four_corners_of_a_square_board() {
        let found = corners(3, 3);
        assert_eq!(found.len(), 4);
        assert!(found.contains(&(0, 0)));
        assert!(found.contains(&(2, 2)));
    }

    #[test]
    fn a_solvable_puzzle_is_solved_by_the_worker_pool() {
        let puzzle = trivial_puzzle();
        let outcome = ParallelCoordinator::run(&puzzle, &quick_config(2), None);
        assert!(outcome.solved);
        assert_eq!(outcome.used.cardinality(), 2);
    }

    #[test]
    fn single_worker_pool_still_solves() {
        let puzzle = trivial_puzzle();
        let outcome = ParallelCoordinator::run(&puzzle, &quick_config(1), None);
        assert!(outcome.solved);
    }
}
