//! Forced-move detection: a tile with exactly one remaining legal cell
//! must go there: and a tile with zero legal cells anywhere is a hard
//! dead end, detected before it is reached by ordinary search.

use std::collections::HashMap;

use crate::board::{Board, Coord};
use crate::domain::DomainManager;
use crate::side::Rotation;
use crate::stats::StatisticsManager;
use crate::tile::TileId;
use crate::tileset::TileSet;
use crate::used_set::PieceUsedSet;

/// Result of a singleton scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingletonOutcome {
    /// No unused tile is forced.
    None,
    /// `tile_id` has exactly one legal cell left, with these rotations.
    Singleton {
        tile_id: TileId,
        at: Coord,
        rotations: Vec<Rotation>,
    },
    /// `tile_id` has no legal cell anywhere: the current board state
    /// cannot lead to a solution.
    HardDeadEnd { tile_id: TileId },
}

/// Scans unused tiles against the current per-cell domains for forced
/// placements and unplaceable pieces.
pub struct SingletonDetector;

impl SingletonDetector {
    /// Scan all unused tiles for a hard dead end or a forced placement.
    ///
    /// Hard dead ends take priority: if any unused tile has no legal
    /// cell at all, that is reported before any singleton, since placing
    /// a singleton first would only waste work before backtracking.
    pub fn scan(
        board: &Board,
        domains: &DomainManager,
        used: &PieceUsedSet,
        tileset: &TileSet,
        stats: &mut StatisticsManager,
    ) -> SingletonOutcome {
        let mut locations: HashMap<TileId, Vec<(Coord, Vec<Rotation>)>> = HashMap::new();
        for at in board.coords() {
            if !board.is_empty(at) {
                continue;
            }
            for (tile_id, rotations) in domains.get(at).iter() {
                locations
                    .entry(tile_id)
                    .or_default()
                    .push((at, rotations.to_vec()));
            }
        }

        let unused: Vec<TileId> = used.unused(tileset.len()).collect();

        for &tile_id in &unused {
            if !locations.contains_key(&tile_id) {
                return SingletonOutcome::HardDeadEnd { tile_id };
            }
        }

        for &tile_id in &unused {
            if let Some(cells) = locations.get(&tile_id) {
                if cells.len() == 1 {
                    stats.record_singleton_found();
                    let (at, rotations) = cells[0].clone();
                    return SingletonOutcome::Singleton {
                        tile_id,
                        at,
                        rotations,
                    };
                }
            }
        }

        SingletonOutcome::None
    }
}
