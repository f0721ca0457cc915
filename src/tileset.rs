//! A puzzle's full, immutable set of tiles.

use crate::tile::{Tile, TileId};

/// The complete tileset for a puzzle, indexed by 1-based [`TileId`].
///
/// Tiles are read-only after construction (spec §3's "created once at load
/// and shared" lifecycle) and are cheap to clone per worker since `Tile` is
/// `Copy`.
#[derive(Debug, Clone)]
pub struct TileSet {
    tiles: Vec<Tile>,
}

impl TileSet {
    /// Construct a tileset from tiles in id order (the first entry becomes
    /// tile id 1).
    #[must_use]
    pub fn new(tiles: Vec<Tile>) -> TileSet {
        assert!(!tiles.is_empty(), "tileset must contain at least one tile");
        TileSet { tiles }
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the tileset is empty (never true for a constructed set, kept
    /// for API symmetry with `Vec::is_empty`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Look up a tile by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is zero or exceeds the tileset size.
    #[must_use]
    pub fn get(&self, id: TileId) -> &Tile {
        assert!(id >= 1, "tile ids are 1-based, got {id}");
        self.tiles
            .get(id as usize - 1)
            .unwrap_or_else(|| panic!("tile id {id} out of range for {}-tile set", self.tiles.len()))
    }

    /// Iterate `(id, tile)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| (i as TileId + 1, tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_one_based() {
        let set = TileSet::new(vec![Tile::new(0, 1, 1, 0), Tile::new(1, 0, 0, 1)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).edges(), [0, 1, 1, 0]);
        assert_eq!(set.get(2).edges(), [1, 0, 0, 1]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_id_panics() {
        let set = TileSet::new(vec![Tile::new(0, 0, 0, 0)]);
        set.get(2);
    }
}
