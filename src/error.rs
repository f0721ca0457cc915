//! Error taxonomy for puzzle loading, checkpointing, and solving.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong building or running a solve.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The puzzle definition failed validation (inconsistent dimensions,
    /// out-of-range fixed piece, malformed tile line, ...).
    #[error("invalid puzzle input: {0}")]
    InvalidInput(String),

    /// A checkpoint file existed but failed a round-trip invariant check
    /// and was discarded rather than trusted.
    #[error("corrupt checkpoint at {path}: {reason}")]
    CorruptCheckpoint { path: PathBuf, reason: String },

    /// The configured time budget elapsed before a solution (or
    /// exhaustive failure) was reached.
    #[error("solve timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// An I/O failure reading or writing a puzzle, properties, or
    /// checkpoint file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
