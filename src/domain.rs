//! Per-cell domains of legal `(tile, rotation)` placements, with AC-3-ready
//! maintenance (initialize, inspect, restore after backtrack).

use std::collections::HashMap;

use ndarray::Array2;

use crate::board::{Board, Coord};
use crate::cell_constraints::{CellConstraints, SideFacing};
use crate::color::{BORDER, Color};
use crate::edge_index::EdgeCompatibilityIndex;
use crate::side::{Rotation, SIDES, Side};
use crate::stats::StatisticsManager;
use crate::tile::TileId;
use crate::tileset::TileSet;
use crate::used_set::PieceUsedSet;
use crate::validator::PlacementValidator;

/// The set of legal placements for a single empty cell: for each
/// candidate tile id, the ordered list of rotations that fit there.
///
/// An empty mapping is a dead end. A domain with exactly one tile id
/// (however many rotations) is a singleton candidate (spec §3).
#[derive(Debug, Clone, Default)]
pub struct CellDomain {
    entries: HashMap<TileId, Vec<Rotation>>,
}

impl CellDomain {
    /// An empty domain.
    #[must_use]
    pub fn new() -> CellDomain {
        CellDomain::default()
    }

    /// Add a legal rotation for a tile at this cell.
    pub fn add(&mut self, tile_id: TileId, rotation: Rotation) {
        self.entries.entry(tile_id).or_default().push(rotation);
    }

    /// Remove a tile entirely from the domain (e.g. because it was just
    /// placed elsewhere). Returns `true` if it was present.
    pub fn remove_tile(&mut self, tile_id: TileId) -> bool {
        self.entries.remove(&tile_id).is_some()
    }

    /// Retain only rotations for which `keep` returns true; drops tile ids
    /// left with zero rotations. Returns `true` if anything was removed.
    pub fn retain_rotations(&mut self, mut keep: impl FnMut(TileId, Rotation) -> bool) -> bool {
        let mut changed = false;
        self.entries.retain(|&tile_id, rotations| {
            let before = rotations.len();
            rotations.retain(|&r| keep(tile_id, r));
            if rotations.len() != before {
                changed = true;
            }
            !rotations.is_empty()
        });
        changed
    }

    /// Total number of `(tile, rotation)` pairs in the domain.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Number of distinct tile ids in the domain.
    #[must_use]
    pub fn unique_piece_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the domain has no legal placements left (a dead end).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether exactly one tile id remains in the domain.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.entries.len() == 1
    }

    /// If this domain is a singleton, the tile id and its legal rotations.
    #[must_use]
    pub fn singleton(&self) -> Option<(TileId, &[Rotation])> {
        if self.entries.len() == 1 {
            self.entries
                .iter()
                .next()
                .map(|(&id, rotations)| (id, rotations.as_slice()))
        } else {
            None
        }
    }

    /// Iterate `(tile id, rotations)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &[Rotation])> {
        self.entries.iter().map(|(&id, r)| (id, r.as_slice()))
    }

    /// Rotations available for a specific tile, if any.
    #[must_use]
    pub fn rotations_for(&self, tile_id: TileId) -> Option<&[Rotation]> {
        self.entries.get(&tile_id).map(Vec::as_slice)
    }
}

/// Owns the per-cell domains for a board and keeps them consistent as
/// placements are made and undone.
#[derive(Debug, Clone)]
pub struct DomainManager {
    domains: Array2<CellDomain>,
}

impl DomainManager {
    /// Build an (empty-shaped) domain manager for a board of this size.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> DomainManager {
        DomainManager {
            domains: Array2::from_shape_simple_fn((rows, cols), CellDomain::new),
        }
    }

    /// Find a side of `at` whose required color is already pinned down
    /// (the frame, or an occupied neighbour), if any.
    fn determined_side(at: Coord, board: &Board, constraints: &CellConstraints) -> Option<(Side, Color)> {
        for side in SIDES {
            match constraints.facing(at, side) {
                SideFacing::Frame => return Some((side, BORDER)),
                SideFacing::Neighbour(neighbour) => {
                    if let Some(placement) = board.get_placement(neighbour) {
                        return Some((side, placement.edge(side.opposite())));
                    }
                }
            }
        }
        None
    }

    /// Compute a fresh domain for a single empty cell. When a side's
    /// required color is already pinned (the frame, or an occupied
    /// neighbour), the edge-compatibility index narrows the candidate
    /// pool before the full fit check; otherwise every unused tile's
    /// distinct rotations are scanned.
    ///
    /// Occupied cells receive an empty domain (never consulted).
    pub fn recompute_cell(
        &mut self,
        at: Coord,
        board: &Board,
        used: &PieceUsedSet,
        tileset: &TileSet,
        constraints: &CellConstraints,
        edge_index: &EdgeCompatibilityIndex,
        stats: &mut StatisticsManager,
    ) {
        let mut domain = CellDomain::new();
        if board.is_empty(at) {
            match Self::determined_side(at, board, constraints) {
                Some((side, color)) => {
                    for &(tile_id, rotation) in edge_index.candidates(side, color) {
                        if used.contains(tile_id) {
                            continue;
                        }
                        let tile = tileset.get(tile_id);
                        let edges = tile.edges_rotated(rotation);
                        if PlacementValidator::fits(board, constraints, at, edges, stats) {
                            domain.add(tile_id, rotation);
                        }
                    }
                }
                None => {
                    for (tile_id, tile) in tileset.iter() {
                        if used.contains(tile_id) {
                            continue;
                        }
                        for rotation in tile.distinct_rotations() {
                            let edges = tile.edges_rotated(rotation);
                            if PlacementValidator::fits(board, constraints, at, edges, stats) {
                                domain.add(tile_id, rotation);
                            }
                        }
                    }
                }
            }
        }
        self.domains[at] = domain;
    }

    /// Initialize every empty cell's domain from scratch.
    pub fn initialize(
        &mut self,
        board: &Board,
        used: &PieceUsedSet,
        tileset: &TileSet,
        constraints: &CellConstraints,
        edge_index: &EdgeCompatibilityIndex,
        stats: &mut StatisticsManager,
    ) {
        for at in board.coords() {
            self.recompute_cell(at, board, used, tileset, constraints, edge_index, stats);
        }
    }

    /// Borrow a cell's current domain.
    #[must_use]
    pub fn get(&self, at: Coord) -> &CellDomain {
        &self.domains[at]
    }

    /// Mutably borrow a cell's current domain.
    pub fn get_mut(&mut self, at: Coord) -> &mut CellDomain {
        &mut self.domains[at]
    }

    /// Replace a cell's domain wholesale (used to restore a snapshot).
    pub fn set(&mut self, at: Coord, domain: CellDomain) {
        self.domains[at] = domain;
    }

    /// Snapshot a cell's domain for later restoration.
    #[must_use]
    pub fn snapshot(&self, at: Coord) -> CellDomain {
        self.domains[at].clone()
    }

    /// After undoing a placement at `at`, recompute `at` and its occupied
    /// topology's neighbours so their domains reflect the now-empty cell
    /// (spec §4.3's restore step).
    pub fn restore_after_undo(
        &mut self,
        at: Coord,
        board: &Board,
        used: &PieceUsedSet,
        tileset: &TileSet,
        constraints: &CellConstraints,
        edge_index: &EdgeCompatibilityIndex,
        stats: &mut StatisticsManager,
    ) {
        self.recompute_cell(at, board, used, tileset, constraints, edge_index, stats);
        for neighbour in constraints.neighbours(at).collect::<Vec<_>>() {
            if board.is_empty(neighbour) {
                self.recompute_cell(neighbour, board, used, tileset, constraints, edge_index, stats);
            }
        }
    }
}
