//! CLI entry point: load a puzzle file, optionally resume from a saved
//! checkpoint, run the parallel worker pool, and report the outcome.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use flexi_logger::{Logger, WriteMode};

use eternity_solver::{CheckpointStore, CoordinatorConfig, ParallelCoordinator, ResumeState, RunConfig, load_puzzle_file};

fn main() -> Result<()> {
    let config = RunConfig::parse();

    let _logger = Logger::try_with_str(config.log_level())
        .context("failed to configure logger")?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .start()
        .context("failed to start logger")?;

    let puzzle_name = config
        .puzzle_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("puzzle")
        .to_string();

    let puzzle = load_puzzle_file(&config.puzzle_path, config.min_depth)
        .with_context(|| format!("failed to load puzzle file {}", config.puzzle_path.display()))?;

    let checkpoint_path = config.checkpoint_dir.join(format!("{puzzle_name}_current"));
    let resume = if config.fresh {
        None
    } else {
        match CheckpointStore::load(&checkpoint_path) {
            Ok(checkpoint) => match checkpoint.reconstruct(puzzle.tileset()) {
                Ok((board, used, history)) => {
                    log::info!("resuming {puzzle_name} from checkpoint at {}", checkpoint_path.display());
                    Some(ResumeState {
                        board,
                        used,
                        history,
                        num_fixed_pieces: checkpoint.num_fixed_pieces,
                        cumulative_offset: Duration::from_millis(checkpoint.cumulative_compute_ms),
                    })
                }
                Err(err) => {
                    log::warn!("discarding checkpoint at {}: {err}", checkpoint_path.display());
                    None
                }
            },
            Err(err) => {
                log::info!("no usable checkpoint at {}: {err}", checkpoint_path.display());
                None
            }
        }
    };

    let deadline = config.timeout().map(|timeout| Instant::now() + timeout);
    let coordinator_config = CoordinatorConfig {
        puzzle_name: puzzle_name.clone(),
        num_workers: config.effective_workers(),
        deadline,
        checkpoint_dir: Some(config.checkpoint_dir.clone()),
        checkpoint_interval: config.checkpoint_interval(),
        thread_save_interval: Duration::from_secs(300),
        stats_log_interval: Duration::from_secs(10),
        use_singletons: !config.no_singletons,
    };

    let outcome = ParallelCoordinator::run(&puzzle, &coordinator_config, resume.as_ref());

    let (matched, max) = outcome.board.calculate_score();
    if outcome.solved {
        log::info!("solved {puzzle_name}: score {matched}/{max}");
        println!("solved: score {matched}/{max}");
        Ok(())
    } else {
        log::info!("no solution this session for {puzzle_name}: best score {matched}/{max}");
        println!("no solution this session: best score {matched}/{max}");
        std::process::exit(1);
    }
}
