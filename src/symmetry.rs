//! Breaks the board's four-fold rotational symmetry so equivalent
//! solutions are not all explored: the designated corner cell may only
//! ever receive the lowest-id corner tile.

use crate::board::Coord;
use crate::tile::TileId;
use crate::tileset::TileSet;

/// Restricts one fixed corner cell to a single canonical tile, removing
/// the redundancy of rotating an entire solved board by 90/180/270
/// degrees.
#[derive(Debug, Clone)]
pub struct SymmetryBreaker {
    corner_cell: Coord,
    canonical_tile_id: Option<TileId>,
}

impl SymmetryBreaker {
    /// Build a breaker for `corner_cell` (conventionally `(0, 0)`),
    /// canonicalizing to the lowest-id tile classified as a corner.
    #[must_use]
    pub fn new(tileset: &TileSet, corner_cell: Coord) -> SymmetryBreaker {
        let canonical_tile_id = tileset
            .iter()
            .filter(|(_, tile)| tile.is_corner())
            .map(|(id, _)| id)
            .min();
        SymmetryBreaker {
            corner_cell,
            canonical_tile_id,
        }
    }

    /// Whether placing `tile_id` at `at` is allowed under symmetry
    /// breaking. Only the designated corner cell is restricted; every
    /// other cell is unaffected.
    #[must_use]
    pub fn allowed(&self, at: Coord, tile_id: TileId) -> bool {
        if at != self.corner_cell {
            return true;
        }
        match self.canonical_tile_id {
            Some(canonical) => tile_id == canonical,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BORDER;
    use crate::tile::Tile;

    #[test]
    fn only_the_lowest_id_corner_tile_is_allowed_at_the_designated_corner() {
        let tileset = TileSet::new(vec![
            Tile::new(1, 2, 3, 4),           // interior, id 1
            Tile::new(BORDER, 1, 2, BORDER), // corner, id 2
            Tile::new(BORDER, 3, 4, BORDER), // corner, id 3
        ]);
        let breaker = SymmetryBreaker::new(&tileset, (0, 0));
        assert!(!breaker.allowed((0, 0), 3));
        assert!(breaker.allowed((0, 0), 2));
        // Unrestricted elsewhere, including for the canonicalized tile.
        assert!(breaker.allowed((1, 1), 3));
    }

    #[test]
    fn puzzles_with_no_corner_tiles_restrict_nothing() {
        let tileset = TileSet::new(vec![Tile::new(1, 2, 3, 4)]);
        let breaker = SymmetryBreaker::new(&tileset, (0, 0));
        assert!(breaker.allowed((0, 0), 1));
    }
}
