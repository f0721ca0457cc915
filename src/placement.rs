//! A tile placed in a cell: the tile id, its rotation, and the cached
//! rotated edges that placement exposes.

use crate::color::Color;
use crate::side::{Rotation, Side};
use crate::tile::{Tile, TileId};

/// A `(tileId, rotation)` pair together with the rotated edges it exposes.
///
/// The edges are cached at construction time so that board operations
/// (`fits`, score calculation) never need to re-derive them from the
/// tileset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    tile_id: TileId,
    rotation: Rotation,
    edges: [Color; 4],
}

impl Placement {
    /// Construct a placement of `tile` at `rotation`.
    #[must_use]
    pub fn new(tile_id: TileId, tile: &Tile, rotation: Rotation) -> Placement {
        Placement {
            tile_id,
            rotation,
            edges: tile.edges_rotated(rotation),
        }
    }

    /// The id of the placed tile.
    #[must_use]
    pub const fn tile_id(&self) -> TileId {
        self.tile_id
    }

    /// The rotation applied to the tile.
    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// The cached rotated edges, `[N, E, S, W]`.
    #[must_use]
    pub const fn edges(&self) -> [Color; 4] {
        self.edges
    }

    /// The edge this placement exposes on a given side.
    #[must_use]
    pub fn edge(&self, side: Side) -> Color {
        self.edges[side.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_caches_rotated_edges() {
        let tile = Tile::new(1, 2, 3, 4);
        let placement = Placement::new(7, &tile, Rotation::Rot90);
        assert_eq!(placement.tile_id(), 7);
        assert_eq!(placement.edges(), tile.edges_rotated(Rotation::Rot90));
    }
}
