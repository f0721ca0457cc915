//! Precomputed per-cell topology: which side of a cell faces the outer
//! frame versus a neighbouring cell.

use ndarray::Array2;

use crate::board::Coord;
use crate::side::{SIDES, Side};

/// What a single side of a cell faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideFacing {
    /// The outer frame of the board.
    Frame,
    /// An interior neighbour cell.
    Neighbour(Coord),
}

/// The precomputed neighbour/frame topology for every cell of a board
/// shape, built once per puzzle and shared read-only across workers.
#[derive(Debug, Clone)]
pub struct CellConstraints {
    facings: Array2<[SideFacing; 4]>,
}

impl CellConstraints {
    /// Precompute the topology for an `rows` x `cols` board.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> CellConstraints {
        let facings = Array2::from_shape_fn((rows, cols), |(r, c)| {
            std::array::from_fn(|i| {
                let side = SIDES[i];
                let (dr, dc) = side.delta();
                match (
                    r.checked_add_signed(dr),
                    c.checked_add_signed(dc),
                ) {
                    (Some(nr), Some(nc)) if nr < rows && nc < cols => {
                        SideFacing::Neighbour((nr, nc))
                    }
                    _ => SideFacing::Frame,
                }
            })
        });
        CellConstraints { facings }
    }

    /// What `at`'s given side faces.
    #[must_use]
    pub fn facing(&self, at: Coord, side: Side) -> SideFacing {
        self.facings[at][side.index()]
    }

    /// Whether `at` lies on the outer border (has at least one side facing
    /// the frame).
    #[must_use]
    pub fn is_border_cell(&self, at: Coord) -> bool {
        self.facings[at]
            .iter()
            .any(|f| matches!(f, SideFacing::Frame))
    }

    /// The coordinates of all occupied-or-not neighbours of `at` (cells
    /// sharing an edge, excluding the frame).
    pub fn neighbours(&self, at: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.facings[at].iter().filter_map(|f| match f {
            SideFacing::Neighbour(coord) => Some(*coord),
            SideFacing::Frame => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_cell_faces_frame_on_two_sides() {
        let constraints = CellConstraints::new(3, 3);
        let frame_sides = SIDES
            .iter()
            .filter(|&&side| constraints.facing((0, 0), side) == SideFacing::Frame)
            .count();
        assert_eq!(frame_sides, 2);
    }

    #[test]
    fn interior_cell_faces_no_frame() {
        let constraints = CellConstraints::new(3, 3);
        assert!(!constraints.is_border_cell((1, 1)));
        assert_eq!(constraints.neighbours((1, 1)).count(), 4);
    }

    #[test]
    fn one_by_one_board_is_all_frame() {
        let constraints = CellConstraints::new(1, 1);
        assert!(constraints.is_border_cell((0, 0)));
        assert_eq!(constraints.neighbours((0, 0)).count(), 0);
    }
}
