//! Immutable tiles: four colored edges plus rotation helpers.

use std::collections::HashSet;

use crate::color::{BORDER, Color};
use crate::side::{Rotation, Side};

/// Identifies a tile within a puzzle's tileset.
///
/// Tile ids are 1-based, matching the puzzle file format and the
/// `PieceUsedSet` bit-set convention (spec §3).
pub type TileId = u32;

/// An immutable tile: four edges in canonical orientation, indexed
/// `[North, East, South, West]`.
///
/// The edge array never changes after construction; all rotated views are
/// computed on demand by [`Tile::edges_rotated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    edges: [Color; 4],
}

impl Tile {
    /// Construct a tile from its canonical edges, given in `[N, E, S, W]`
    /// order.
    #[must_use]
    pub const fn new(north: Color, east: Color, south: Color, west: Color) -> Tile {
        Tile {
            edges: [north, east, south, west],
        }
    }

    /// The canonical (unrotated) edges, `[N, E, S, W]`.
    #[must_use]
    pub const fn edges(&self) -> [Color; 4] {
        self.edges
    }

    /// The edge on a given side in canonical orientation.
    #[must_use]
    pub const fn edge(&self, side: Side) -> Color {
        self.edges[side.index()]
    }

    /// The edges as they would appear if the tile were rotated `rotation`
    /// steps of 90 degrees clockwise: `result[i] = edges[(i - rotation) mod 4]`.
    #[must_use]
    pub fn edges_rotated(&self, rotation: Rotation) -> [Color; 4] {
        let r = rotation.steps();
        std::array::from_fn(|i| self.edges[(i + 4 - r) % 4])
    }

    /// The edge on a given side after applying `rotation`.
    #[must_use]
    pub fn edge_rotated(&self, side: Side, rotation: Rotation) -> Color {
        self.edges_rotated(rotation)[side.index()]
    }

    /// The number of edges equal to [`BORDER`].
    #[must_use]
    pub fn border_edge_count(&self) -> usize {
        self.edges.iter().filter(|&&e| e == BORDER).count()
    }

    /// A corner piece has exactly two (adjacent) border edges.
    #[must_use]
    pub fn is_corner(&self) -> bool {
        self.border_edge_count() == 2
    }

    /// An edge piece has exactly one border edge.
    #[must_use]
    pub fn is_edge(&self) -> bool {
        self.border_edge_count() == 1
    }

    /// Border pieces are corners or edges; they must be placed on the
    /// outer frame.
    #[must_use]
    pub fn is_border(&self) -> bool {
        self.border_edge_count() > 0
    }

    /// The number of distinct rotation-result tuples, one of `{1, 2, 4}`.
    ///
    /// A tile with full 4-fold rotational symmetry yields the same edges
    /// under every rotation; only its distinct rotations need to be tried
    /// during search.
    #[must_use]
    pub fn unique_rotation_count(&self) -> usize {
        self.distinct_rotations().len()
    }

    /// The distinct rotations to try for this tile: duplicates caused by
    /// rotational symmetry are removed, keeping the smallest rotation of
    /// each equivalence class.
    #[must_use]
    pub fn distinct_rotations(&self) -> Vec<Rotation> {
        let mut seen = HashSet::with_capacity(4);
        let mut distinct = Vec::with_capacity(4);
        for rotation in crate::side::ROTATIONS {
            if seen.insert(self.edges_rotated(rotation)) {
                distinct.push(rotation);
            }
        }
        distinct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::side::Rotation;

    #[test]
    fn edges_rotated_is_periodic_modulo_four() {
        let tile = Tile::new(1, 2, 3, 4);
        for steps in -8..8 {
            let r = Rotation::from_steps(steps);
            let r_mod = Rotation::from_steps(steps.rem_euclid(4));
            assert_eq!(tile.edges_rotated(r), tile.edges_rotated(r_mod));
        }
    }

    #[test]
    fn rot0_is_identity() {
        let tile = Tile::new(1, 2, 3, 4);
        assert_eq!(tile.edges_rotated(Rotation::Rot0), tile.edges());
    }

    #[test]
    fn rot90_shifts_north_from_west() {
        // A 90-degree clockwise rotation moves what was on the west edge
        // to the north: result[N] = edges[(N - 1) mod 4] = edges[West].
        let tile = Tile::new(1, 2, 3, 4);
        let rotated = tile.edges_rotated(Rotation::Rot90);
        assert_eq!(rotated[Side::North.index()], tile.edge(Side::West));
        assert_eq!(rotated[Side::East.index()], tile.edge(Side::North));
        assert_eq!(rotated[Side::South.index()], tile.edge(Side::East));
        assert_eq!(rotated[Side::West.index()], tile.edge(Side::South));
    }

    #[test]
    fn four_identical_edges_has_one_unique_rotation() {
        let tile = Tile::new(5, 5, 5, 5);
        assert_eq!(tile.unique_rotation_count(), 1);
    }

    #[test]
    fn diametric_symmetry_has_two_unique_rotations() {
        // N==S and E==W: rotating 180 degrees reproduces the same edges.
        let tile = Tile::new(1, 2, 1, 2);
        assert_eq!(tile.unique_rotation_count(), 2);
    }

    #[test]
    fn asymmetric_tile_has_four_unique_rotations() {
        let tile = Tile::new(1, 2, 3, 4);
        assert_eq!(tile.unique_rotation_count(), 4);
    }

    #[test]
    fn corner_and_edge_classification() {
        let corner = Tile::new(BORDER, 1, 2, BORDER);
        assert!(corner.is_corner());
        assert!(!corner.is_edge());
        assert!(corner.is_border());

        let edge = Tile::new(BORDER, 1, 2, 3);
        assert!(edge.is_edge());
        assert!(!edge.is_corner());
        assert!(edge.is_border());

        let interior = Tile::new(1, 2, 3, 4);
        assert!(!interior.is_border());
    }
}
