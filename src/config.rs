//! Command-line configuration for a solve run.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Solve an edge-matching tile puzzle with parallel backtracking search.
#[derive(Debug, Clone, Parser)]
#[command(name = "solve", version, about)]
pub struct RunConfig {
    /// Path to the puzzle definition file.
    pub puzzle_path: PathBuf,

    /// Directory to read/write per-worker checkpoint files.
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: PathBuf,

    /// Number of parallel worker threads.
    #[arg(long, default_value_t = 4)]
    pub threads: usize,

    /// Run the worker pool at `threads` width. Without this flag the
    /// solve runs a single sequential worker, regardless of `--threads`.
    #[arg(long)]
    pub parallel: bool,

    /// Wall-clock time budget, in seconds. Omit for no limit.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Seconds between checkpoint writes.
    #[arg(long, default_value_t = 30)]
    pub checkpoint_interval_secs: u64,

    /// Minimum search depth before a worker's record-breaking boards are
    /// broadcast to its peers.
    #[arg(long, default_value_t = 0)]
    pub min_depth: usize,

    /// Skip forced-move (singleton) detection before the MRV phase.
    #[arg(long)]
    pub no_singletons: bool,

    /// Verbose progress logging.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all but warning-level logging.
    #[arg(short, long)]
    pub quiet: bool,

    /// Ignore any existing checkpoints and start fresh.
    #[arg(long)]
    pub fresh: bool,
}

impl RunConfig {
    /// The configured timeout as a [`Duration`], if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// The configured checkpoint interval as a [`Duration`].
    #[must_use]
    pub fn checkpoint_interval(&self) -> Duration {
        Duration::from_secs(self.checkpoint_interval_secs)
    }

    /// The number of workers the coordinator should actually spawn:
    /// `threads` when `--parallel` is set, one otherwise.
    #[must_use]
    pub fn effective_workers(&self) -> usize {
        if self.parallel { self.threads.max(1) } else { 1 }
    }

    /// The `log` level filter implied by `--verbose`/`--quiet`.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_invocation_with_defaults() {
        let config = RunConfig::parse_from(["solve", "puzzle.txt"]);
        assert_eq!(config.threads, 4);
        assert_eq!(config.timeout(), None);
        assert_eq!(config.effective_workers(), 1);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn parses_overridden_flags() {
        let config = RunConfig::parse_from([
            "solve",
            "puzzle.txt",
            "--threads",
            "8",
            "--parallel",
            "--timeout",
            "120",
            "--fresh",
            "--no-singletons",
        ]);
        assert_eq!(config.threads, 8);
        assert_eq!(config.effective_workers(), 8);
        assert_eq!(config.timeout(), Some(Duration::from_secs(120)));
        assert!(config.fresh);
        assert!(config.no_singletons);
    }

    #[test]
    fn quiet_and_verbose_select_opposite_log_levels() {
        let quiet = RunConfig::parse_from(["solve", "puzzle.txt", "--quiet"]);
        assert_eq!(quiet.log_level(), "warn");
        let verbose = RunConfig::parse_from(["solve", "puzzle.txt", "--verbose"]);
        assert_eq!(verbose.log_level(), "debug");
    }
}
