//! Arc-consistency propagation (AC-3 style): after a placement, shrink
//! affected domains and cascade until the board is arc-consistent again
//! or a domain empties out (a dead end).

use std::collections::{HashSet, VecDeque};

use crate::board::{Board, Coord};
use crate::cell_constraints::CellConstraints;
use crate::domain::DomainManager;
use crate::edge_index::EdgeCompatibilityIndex;
use crate::stats::StatisticsManager;
use crate::tile::TileId;
use crate::tileset::TileSet;
use crate::used_set::PieceUsedSet;

/// Outcome of a propagation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationResult {
    /// All affected domains remain non-empty.
    Ok,
    /// Propagation emptied the domain of this cell; the placement that
    /// triggered it cannot lead to a solution and must be undone.
    DeadEnd(Coord),
}

/// Maintains arc consistency of [`DomainManager`] as placements are made.
pub struct ConstraintPropagator;

impl ConstraintPropagator {
    /// Propagate the consequences of placing `placed_tile_id` (rotation
    /// already reflected on the board) at `at`: the tile is no longer
    /// available anywhere else, and every empty neighbour's domain must be
    /// rechecked against the newly fixed edge. Changes cascade outward
    /// until no domain changes, or a domain empties (a dead end).
    pub fn propagate(
        board: &Board,
        domains: &mut DomainManager,
        constraints: &CellConstraints,
        used: &PieceUsedSet,
        tileset: &TileSet,
        edge_index: &EdgeCompatibilityIndex,
        stats: &mut StatisticsManager,
        at: Coord,
        placed_tile_id: TileId,
    ) -> PropagationResult {
        let mut queue: VecDeque<Coord> = VecDeque::new();
        let mut queued: HashSet<Coord> = HashSet::new();

        for cell in board.coords() {
            if cell != at && board.is_empty(cell) && domains.get_mut(cell).remove_tile(placed_tile_id) {
                if domains.get(cell).is_empty() {
                    stats.record_dead_end();
                    return PropagationResult::DeadEnd(cell);
                }
                if queued.insert(cell) {
                    queue.push_back(cell);
                }
            }
        }

        for neighbour in constraints.neighbours(at) {
            if board.is_empty(neighbour) && queued.insert(neighbour) {
                queue.push_back(neighbour);
            }
        }

        while let Some(cell) = queue.pop_front() {
            queued.remove(&cell);
            if !board.is_empty(cell) {
                continue;
            }
            let before = domains.get(cell).size();
            domains.recompute_cell(cell, board, used, tileset, constraints, edge_index, stats);
            if domains.get(cell).is_empty() {
                stats.record_dead_end();
                return PropagationResult::DeadEnd(cell);
            }
            if domains.get(cell).size() != before {
                for neighbour in constraints.neighbours(cell) {
                    if board.is_empty(neighbour) && queued.insert(neighbour) {
                        queue.push_back(neighbour);
                    }
                }
            }
        }

        PropagationResult::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BORDER;
    use crate::placement::Placement;
    use crate::side::Rotation;
    use crate::tile::Tile;

    fn setup(
        tiles: Vec<Tile>,
        rows: usize,
        cols: usize,
    ) -> (
        Board,
        PieceUsedSet,
        TileSet,
        CellConstraints,
        DomainManager,
        EdgeCompatibilityIndex,
        StatisticsManager,
    ) {
        let board = Board::new(rows, cols);
        let used = PieceUsedSet::new(tiles.len());
        let tileset = TileSet::new(tiles);
        let constraints = CellConstraints::new(rows, cols);
        let edge_index = EdgeCompatibilityIndex::build(&tileset);
        let mut domains = DomainManager::new(rows, cols);
        let mut stats = StatisticsManager::new();
        domains.initialize(&board, &used, &tileset, &constraints, &edge_index, &mut stats);
        (board, used, tileset, constraints, domains, edge_index, stats)
    }

    #[test]
    fn placing_a_tile_removes_it_from_other_domains() {
        let (mut board, mut used, tileset, constraints, mut domains, edge_index, mut stats) = setup(
            vec![
                Tile::new(BORDER, 1, BORDER, BORDER),
                Tile::new(BORDER, 1, BORDER, BORDER),
            ],
            1,
            2,
        );
        board.place((0, 0), Placement::new(1, tileset.get(1), Rotation::Rot0));
        used.insert(1);

        let result = ConstraintPropagator::propagate(
            &board,
            &mut domains,
            &constraints,
            &used,
            &tileset,
            &edge_index,
            &mut stats,
            (0, 0),
            1,
        );
        assert_eq!(result, PropagationResult::Ok);
        assert!(domains.get((0, 1)).rotations_for(1).is_none());
    }

    #[test]
    fn incompatible_neighbour_edge_empties_domain_and_is_reported() {
        let (mut board, mut used, tileset, constraints, mut domains, edge_index, mut stats) = setup(
            vec![
                Tile::new(BORDER, 5, BORDER, BORDER),
                Tile::new(BORDER, BORDER, BORDER, 6),
            ],
            1,
            2,
        );
        board.place((0, 0), Placement::new(1, tileset.get(1), Rotation::Rot0));
        used.insert(1);

        let result = ConstraintPropagator::propagate(
            &board,
            &mut domains,
            &constraints,
            &used,
            &tileset,
            &edge_index,
            &mut stats,
            (0, 0),
            1,
        );
        assert_eq!(result, PropagationResult::DeadEnd((0, 1)));
        assert_eq!(stats.dead_ends_detected(), 1);
    }
}
