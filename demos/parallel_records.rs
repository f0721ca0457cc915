//! Run several workers against the same small puzzle and print each
//! worker's final counters, demonstrating the per-worker statistics the
//! `solve` binary logs periodically during a real run (spec §4.15).

use std::time::{Duration, Instant};

use eternity_solver::{parse_puzzle_file, CoordinatorConfig, ParallelCoordinator};

const PUZZLE_TEXT: &str = "\
# Type: demo
# Dimensions: 2x2
# SortOrder: ascending
# PrioritizeBorders: true
# Verbose: false

1 0 1 2 0
2 0 0 3 1
3 2 4 0 0
4 3 0 0 4
";

fn main() {
    let puzzle = parse_puzzle_file(PUZZLE_TEXT, 0).expect("the embedded demo puzzle is well-formed");

    let config = CoordinatorConfig {
        puzzle_name: "demo".to_string(),
        num_workers: 4,
        deadline: Some(Instant::now() + Duration::from_secs(10)),
        checkpoint_dir: None,
        checkpoint_interval: Duration::from_secs(3600),
        thread_save_interval: Duration::from_secs(3600),
        stats_log_interval: Duration::from_secs(3600),
        use_singletons: true,
    };
    let outcome = ParallelCoordinator::run(&puzzle, &config, None);

    let (matched, max) = outcome.board.calculate_score();
    println!("solved: {}, score {matched}/{max}", outcome.solved);
    for (worker_id, stats) in outcome.worker_stats.iter().enumerate() {
        println!(
            "worker {worker_id}: {} placements, {} backtracks, {} fit checks, {} singletons placed",
            stats.placements(),
            stats.backtracks(),
            stats.fit_checks(),
            stats.singletons_placed(),
        );
    }
}
