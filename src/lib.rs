//! # `eternity_solver`
//!
//! A constraint-satisfaction backtracking solver for edge-matching
//! square-tile puzzles of the Eternity-II family: given an R×C board and
//! R·C tiles, each with four colored edges, place every tile (with one
//! of four rotations) so adjacent edges match and the outer border
//! shows a designated border color.
//!
//! The search is a recursive backtracker ([`engine::BacktrackingEngine`])
//! augmented with AC-3 arc-consistency propagation ([`propagator`]),
//! most-constrained-first cell selection ([`cell_selector`]),
//! least-constraining-value ordering ([`value_orderer`]), forced-move
//! detection ([`singleton`]), and symmetry breaking ([`symmetry`]).
//! [`coordinator::ParallelCoordinator`] runs a fixed pool of these
//! engines concurrently, diversified by board corner, coordinating
//! through [`shared_state::SharedSearchState`] and persisting progress
//! through [`checkpoint::CheckpointStore`].

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod board;
mod cell_constraints;
mod cell_selector;
mod checkpoint;
mod color;
mod config;
mod coordinator;
mod domain;
mod edge_index;
mod engine;
mod error;
mod history;
mod placement;
mod propagator;
mod puzzle;
mod puzzle_io;
mod record_manager;
mod shared_state;
mod side;
mod singleton;
mod stats;
mod symmetry;
mod tile;
mod tileset;
mod used_set;
mod validator;
mod value_orderer;

pub use board::{Board, Coord};
pub use cell_constraints::{CellConstraints, SideFacing};
pub use cell_selector::CellSelector;
pub use checkpoint::{Checkpoint, CheckpointStore};
pub use color::{BORDER, Color};
pub use config::RunConfig;
pub use coordinator::{CoordinatorConfig, ParallelCoordinator, ResumeState, SolveOutcome};
pub use domain::{CellDomain, DomainManager};
pub use edge_index::EdgeCompatibilityIndex;
pub use engine::{BacktrackingEngine, HistoricalBacktracker, SolverContext};
pub use error::SolverError;
pub use history::{History, PlacementInfo};
pub use placement::Placement;
pub use propagator::{ConstraintPropagator, PropagationResult};
pub use puzzle::{FixedPiece, PuzzleDefinition};
pub use puzzle_io::{CheckpointNaming, PuzzlePropertiesConfig, load_puzzle_file, parse_puzzle_file};
pub use record_manager::{RecordManager, RecordOutcome};
pub use shared_state::{BestSnapshot, SharedSearchState};
pub use side::{ROTATIONS, Rotation, SIDES, Side};
pub use singleton::{SingletonDetector, SingletonOutcome};
pub use stats::StatisticsManager;
pub use symmetry::SymmetryBreaker;
pub use tile::{Tile, TileId};
pub use tileset::TileSet;
pub use used_set::PieceUsedSet;
pub use validator::PlacementValidator;
pub use value_orderer::ValueOrderer;
