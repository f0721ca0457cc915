//! A bit-set of tile ids currently placed on the board.

use fixedbitset::FixedBitSet;

use crate::tile::TileId;

/// Tracks which tiles (by 1-based [`TileId`]) are currently placed.
///
/// Backed by a [`FixedBitSet`] so membership and cardinality are both O(1)
/// (cardinality via a running counter, to avoid a popcount scan on every
/// query).
#[derive(Debug, Clone)]
pub struct PieceUsedSet {
    bits: FixedBitSet,
    count: usize,
}

impl PieceUsedSet {
    /// Construct an empty set able to hold ids in `1..=num_tiles`.
    #[must_use]
    pub fn new(num_tiles: usize) -> PieceUsedSet {
        PieceUsedSet {
            bits: FixedBitSet::with_capacity(num_tiles + 1),
            count: 0,
        }
    }

    /// Mark `tile_id` used. Returns `true` if it was not already used.
    pub fn insert(&mut self, tile_id: TileId) -> bool {
        let idx = tile_id as usize;
        if self.bits.contains(idx) {
            false
        } else {
            self.bits.insert(idx);
            self.count += 1;
            true
        }
    }

    /// Mark `tile_id` unused. Returns `true` if it had been used.
    pub fn remove(&mut self, tile_id: TileId) -> bool {
        let idx = tile_id as usize;
        if self.bits.contains(idx) {
            self.bits.set(idx, false);
            self.count -= 1;
            true
        } else {
            false
        }
    }

    /// Whether `tile_id` is currently placed.
    #[must_use]
    pub fn contains(&self, tile_id: TileId) -> bool {
        self.bits.contains(tile_id as usize)
    }

    /// The number of tiles currently marked used.
    #[must_use]
    pub const fn cardinality(&self) -> usize {
        self.count
    }

    /// Iterate the ids of all unused tiles in `1..=num_tiles`.
    pub fn unused(&self, num_tiles: usize) -> impl Iterator<Item = TileId> + '_ {
        (1..=num_tiles as TileId).filter(move |&id| !self.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_round_trip_preserves_cardinality() {
        let mut used = PieceUsedSet::new(9);
        assert_eq!(used.cardinality(), 0);
        assert!(used.insert(3));
        assert!(!used.insert(3));
        assert_eq!(used.cardinality(), 1);
        assert!(used.contains(3));
        assert!(used.remove(3));
        assert_eq!(used.cardinality(), 0);
        assert!(!used.contains(3));
    }

    #[test]
    fn unused_excludes_placed_tiles() {
        let mut used = PieceUsedSet::new(5);
        used.insert(2);
        used.insert(4);
        let remaining: Vec<_> = used.unused(5).collect();
        assert_eq!(remaining, vec![1, 3, 5]);
    }
}
