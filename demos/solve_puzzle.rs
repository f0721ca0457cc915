//! Solve a small hard-coded puzzle end to end and print the final board,
//! exercising the same `parse_puzzle_file` -> `ParallelCoordinator` path
//! the `solve` binary runs for a puzzle loaded from disk.

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

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

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} solving... ({elapsed_precise})").unwrap());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let config = CoordinatorConfig {
        puzzle_name: "demo".to_string(),
        num_workers: 1,
        deadline: Some(Instant::now() + Duration::from_secs(10)),
        checkpoint_dir: None,
        checkpoint_interval: Duration::from_secs(3600),
        thread_save_interval: Duration::from_secs(3600),
        stats_log_interval: Duration::from_secs(3600),
        use_singletons: true,
    };
    let outcome = ParallelCoordinator::run(&puzzle, &config, None);
    spinner.finish_and_clear();

    let (matched, max) = outcome.board.calculate_score();
    if outcome.solved {
        println!("solved: {matched}/{max} internal edges matched");
        for row in 0..puzzle.rows() {
            let cells: Vec<String> = (0..puzzle.cols())
                .map(|col| {
                    outcome
                        .board
                        .get_placement((row, col))
                        .map_or_else(|| "....".to_string(), |p| format!("#{:03}", p.tile_id()))
                })
                .collect();
            println!("{}", cells.join(" "));
        }
    } else {
        println!("no solution found within the demo deadline: best {matched}/{max}");
    }
}
