//! An index from `(side, edge color)` to the tiles that can expose that
//! color on that side under some rotation.

use std::collections::HashMap;

use crate::color::Color;
use crate::side::{SIDES, Side};
use crate::tile::TileId;
use crate::tileset::TileSet;

/// `(tile id, rotation)` candidates that expose a given color on a given
/// side, precomputed once per puzzle.
#[derive(Debug, Clone)]
pub struct EdgeCompatibilityIndex {
    /// `by_side[side][color] -> candidates`.
    by_side: [HashMap<Color, Vec<(TileId, crate::side::Rotation)>>; 4],
}

impl EdgeCompatibilityIndex {
    /// Build the index for a tileset, considering only each tile's
    /// distinct rotations (spec §4.2).
    #[must_use]
    pub fn build(tileset: &TileSet) -> EdgeCompatibilityIndex {
        let mut by_side: [HashMap<Color, Vec<(TileId, crate::side::Rotation)>>; 4] =
            Default::default();

        for (tile_id, tile) in tileset.iter() {
            for rotation in tile.distinct_rotations() {
                let edges = tile.edges_rotated(rotation);
                for side in SIDES {
                    by_side[side.index()]
                        .entry(edges[side.index()])
                        .or_default()
                        .push((tile_id, rotation));
                }
            }
        }

        EdgeCompatibilityIndex { by_side }
    }

    /// The `(tile id, rotation)` pairs that expose `color` on `side`.
    #[must_use]
    pub fn candidates(&self, side: Side, color: Color) -> &[(TileId, crate::side::Rotation)] {
        static EMPTY: Vec<(TileId, crate::side::Rotation)> = Vec::new();
        self.by_side[side.index()].get(&color).unwrap_or(&EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Tile;

    #[test]
    fn finds_tiles_exposing_a_color_on_a_side() {
        let set = TileSet::new(vec![Tile::new(0, 1, 2, 3), Tile::new(9, 9, 9, 9)]);
        let index = EdgeCompatibilityIndex::build(&set);
        let north_ones = index.candidates(Side::North, 0);
        assert!(north_ones.iter().any(|&(id, _)| id == 1));
        assert!(!north_ones.iter().any(|&(id, _)| id == 2));
    }

    #[test]
    fn unknown_color_yields_no_candidates() {
        let set = TileSet::new(vec![Tile::new(0, 1, 2, 3)]);
        let index = EdgeCompatibilityIndex::build(&set);
        assert!(index.candidates(Side::North, 999).is_empty());
    }
}
