//! The board: an R×C grid of tile placements.

use ndarray::Array2;

use crate::placement::Placement;

/// A cell coordinate, `(row, col)`, both zero-based.
pub type Coord = (usize, usize);

/// A fixed-size grid of optional tile placements.
///
/// Coordinates are asserted to lie within `[0, rows) x [0, cols)` on every
/// access; out-of-range coordinates are a programming error and panic
/// rather than returning a `Result`, per spec §3.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Array2<Option<Placement>>,
}

impl Board {
    /// Construct an empty board of the given shape.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Board {
        assert!(rows > 0, "board must have at least one row");
        assert!(cols > 0, "board must have at least one column");
        Board {
            rows,
            cols,
            cells: Array2::from_elem((rows, cols), None),
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    fn check_bounds(&self, (r, c): Coord) {
        assert!(
            r < self.rows && c < self.cols,
            "coordinate ({r}, {c}) out of bounds for a {}x{} board",
            self.rows,
            self.cols
        );
    }

    /// Whether `(r, c)` has no placement.
    #[must_use]
    pub fn is_empty(&self, at: Coord) -> bool {
        self.check_bounds(at);
        self.cells[at].is_none()
    }

    /// The placement at `(r, c)`, if any.
    #[must_use]
    pub fn get_placement(&self, at: Coord) -> Option<&Placement> {
        self.check_bounds(at);
        self.cells[at].as_ref()
    }

    /// Place a tile at `(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell is already occupied.
    pub fn place(&mut self, at: Coord, placement: Placement) {
        self.check_bounds(at);
        assert!(
            self.cells[at].is_none(),
            "cell {at:?} is already occupied by tile {}",
            self.cells[at].as_ref().map_or(0, Placement::tile_id)
        );
        self.cells[at] = Some(placement);
    }

    /// Clear the placement at `(r, c)`, returning it.
    ///
    /// # Panics
    ///
    /// Panics if the cell is already empty.
    pub fn remove(&mut self, at: Coord) -> Placement {
        self.check_bounds(at);
        self.cells[at]
            .take()
            .unwrap_or_else(|| panic!("cell {at:?} is already empty"))
    }

    /// The neighbour coordinate in a direction, if it lies on the board.
    #[must_use]
    pub fn neighbour(&self, (r, c): Coord, delta: (isize, isize)) -> Option<Coord> {
        let nr = r.checked_add_signed(delta.0)?;
        let nc = c.checked_add_signed(delta.1)?;
        (nr < self.rows && nc < self.cols).then_some((nr, nc))
    }

    /// Count matched and total internal (non-border) edges.
    ///
    /// Returns `(matched, max)` where `max = rows*(cols-1) + (rows-1)*cols`
    /// is the number of internal edges in a fully-placed board of this
    /// shape, independent of how many cells are actually filled.
    #[must_use]
    pub fn calculate_score(&self) -> (usize, usize) {
        let max = self.rows * self.cols.saturating_sub(1) + self.rows.saturating_sub(1) * self.cols;

        let mut matched = 0;
        for r in 0..self.rows {
            for c in 0..self.cols {
                let Some(placement) = self.get_placement((r, c)) else {
                    continue;
                };
                // Count each internal edge once: look east and south only.
                if c + 1 < self.cols {
                    if let Some(east) = self.get_placement((r, c + 1)) {
                        if placement.edge(crate::side::Side::East)
                            == east.edge(crate::side::Side::West)
                        {
                            matched += 1;
                        }
                    }
                }
                if r + 1 < self.rows {
                    if let Some(south) = self.get_placement((r + 1, c)) {
                        if placement.edge(crate::side::Side::South)
                            == south.edge(crate::side::Side::North)
                        {
                            matched += 1;
                        }
                    }
                }
            }
        }
        (matched, max)
    }

    /// Iterate all `(row, col)` coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| (r, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Tile;

    #[test]
    #[should_panic(expected = "at least one row")]
    fn zero_rows_rejected() {
        Board::new(0, 3);
    }

    #[test]
    #[should_panic(expected = "at least one column")]
    fn zero_cols_rejected() {
        Board::new(3, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_access_panics() {
        let board = Board::new(2, 2);
        board.is_empty((5, 5));
    }

    #[test]
    fn place_remove_round_trip_restores_state() {
        let mut board = Board::new(2, 2);
        let tile = Tile::new(0, 1, 1, 0);
        let placement = Placement::new(1, &tile, crate::side::Rotation::Rot0);
        let before = format!("{board:?}");
        board.place((0, 0), placement);
        assert!(!board.is_empty((0, 0)));
        board.remove((0, 0));
        let after = format!("{board:?}");
        assert_eq!(before, after);
    }

    #[test]
    fn score_bounds_hold_for_one_by_one_board() {
        let board = Board::new(1, 1);
        let (matched, max) = board.calculate_score();
        assert_eq!(matched, 0);
        assert_eq!(max, 0);
    }

    #[test]
    fn score_counts_matching_internal_edges() {
        let mut board = Board::new(1, 2);
        let left = Tile::new(0, 5, 0, 0);
        let right = Tile::new(0, 0, 0, 5);
        board.place((0, 0), Placement::new(1, &left, crate::side::Rotation::Rot0));
        board.place((0, 1), Placement::new(2, &right, crate::side::Rotation::Rot0));
        let (matched, max) = board.calculate_score();
        assert_eq!(max, 1);
        assert_eq!(matched, 1);
    }
}
