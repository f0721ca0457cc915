//! Least-constraining-value ordering of candidate placements.

use std::cmp::Ordering;

use crate::board::{Board, Coord};
use crate::cell_constraints::CellConstraints;
use crate::domain::DomainManager;
use crate::side::Rotation;
use crate::tile::TileId;
use crate::tileset::TileSet;

/// Orders a cell's candidate `(tile, rotation)` placements from least to
/// most constraining of its neighbours' remaining domains.
#[derive(Debug, Clone, Copy)]
pub struct ValueOrderer {
    /// Tie-break direction on tile id when two candidates constrain
    /// their neighbours equally.
    ascending: bool,
}

impl ValueOrderer {
    /// A least-constraining-value orderer, breaking ties by ascending
    /// tile id.
    #[must_use]
    pub fn new(ascending: bool) -> ValueOrderer {
        ValueOrderer { ascending }
    }

    /// Order `candidates` (as found in the cell's current domain) from
    /// least to most constraining.
    pub fn order(
        &self,
        at: Coord,
        mut candidates: Vec<(TileId, Rotation)>,
        board: &Board,
        domains: &DomainManager,
        constraints: &CellConstraints,
        tileset: &TileSet,
    ) -> Vec<(TileId, Rotation)> {
        let scored: Vec<(usize, TileId, Rotation)> = candidates
            .drain(..)
            .map(|(tile_id, rotation)| {
                let tile = tileset.get(tile_id);
                let score = constraints
                    .neighbours(at)
                    .filter(|&n| board.is_empty(n))
                    .map(|neighbour| {
                        let side = crate::side::SIDES
                            .iter()
                            .find(|&&s| constraints.facing(at, s) == crate::cell_constraints::SideFacing::Neighbour(neighbour))
                            .copied()
                            .expect("neighbour must face some side of `at`");
                        let exposed = tile.edge_rotated(side, rotation);
                        let opposite = side.opposite();
                        domains
                            .get(neighbour)
                            .iter()
                            .flat_map(|(other_id, rotations)| {
                                let other_tile = tileset.get(other_id);
                                rotations
                                    .iter()
                                    .filter(|&&r| other_tile.edge_rotated(opposite, r) != exposed)
                                    .map(move |_| ())
                            })
                            .count()
                    })
                    .sum();
                (score, tile_id, rotation)
            })
            .collect();

        let mut scored = scored;
        scored.sort_by(|a, b| {
            match a.0.cmp(&b.0) {
                Ordering::Equal => {
                    if self.ascending {
                        a.1.cmp(&b.1)
                    } else {
                        b.1.cmp(&a.1)
                    }
                }
                other => other,
            }
        });
        scored.into_iter().map(|(_, id, r)| (id, r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BORDER;
    use crate::edge_index::EdgeCompatibilityIndex;
    use crate::stats::StatisticsManager;
    use crate::tile::Tile;
    use crate::tileset::TileSet;
    use crate::used_set::PieceUsedSet;

    #[test]
    fn prefers_the_candidate_that_eliminates_fewer_neighbour_options() {
        // Two tiles can go at (0,0): one exposes a rare color east that
        // only one neighbour-domain entry uses, the other exposes a
        // common color that most neighbour entries share. The rare
        // color is less constraining (fewer eliminations) and should
        // sort first... here we construct the opposite: a color shared
        // by the single neighbour candidate eliminates nothing, so it
        // must win.
        let board = Board::new(1, 2);
        let constraints = CellConstraints::new(1, 2);
        let tiles = vec![
            Tile::new(BORDER, 1, BORDER, BORDER),
            Tile::new(BORDER, 2, BORDER, BORDER),
            Tile::new(BORDER, BORDER, BORDER, 1),
        ];
        let tileset = TileSet::new(tiles);
        let used = PieceUsedSet::new(3);
        let edge_index = EdgeCompatibilityIndex::build(&tileset);
        let mut domains = DomainManager::new(1, 2);
        let mut stats = StatisticsManager::new();
        domains.initialize(&board, &used, &tileset, &constraints, &edge_index, &mut stats);

        let candidates = vec![(1, Rotation::Rot0), (2, Rotation::Rot0)];
        let orderer = ValueOrderer::new(true);
        let ordered = orderer.order((0, 0), candidates, &board, &domains, &constraints, &tileset);

        // Tile 1 exposes color 1 east, matching neighbour tile 3's
        // domain entry exactly (zero eliminations). Tile 2 exposes
        // color 2, which matches nothing in the neighbour domain (one
        // elimination). Tile 1 must sort first.
        assert_eq!(ordered[0], (1, Rotation::Rot0));
    }
}
