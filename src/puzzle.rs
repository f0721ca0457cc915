//! The static description of a puzzle instance: board shape, tile set,
//! any pre-fixed placements, and the search-behavior knobs that come
//! from the puzzle's properties file rather than the command line.

use std::collections::HashMap;

use crate::board::Coord;
use crate::color::Color;
use crate::error::SolverError;
use crate::side::Rotation;
use crate::tile::{Tile, TileId};
use crate::tileset::TileSet;

/// A placement fixed in advance, before search begins (e.g. a known
/// starting position supplied alongside the puzzle).
#[derive(Debug, Clone, Copy)]
pub struct FixedPiece {
    pub at: Coord,
    pub tile_id: TileId,
    pub rotation: Rotation,
}

/// Everything needed to start a solve: board shape and tiles, any
/// pieces fixed ahead of time, and the behavior knobs a puzzle's
/// properties file may override.
#[derive(Debug, Clone)]
pub struct PuzzleDefinition {
    rows: usize,
    cols: usize,
    tileset: TileSet,
    fixed_pieces: Vec<FixedPiece>,
    border_color: Color,
    sort_ascending: bool,
    prioritize_borders: bool,
    verbose: bool,
    min_depth_to_show_records: usize,
}

impl PuzzleDefinition {
    /// Build a puzzle definition, validating that it describes a
    /// coherent board: fixed pieces reference real tiles and in-bounds
    /// cells, and the tile count matches the board area.
    pub fn new(
        rows: usize,
        cols: usize,
        tiles: HashMap<TileId, Tile>,
        fixed_pieces: Vec<FixedPiece>,
        border_color: Color,
        sort_ascending: bool,
        prioritize_borders: bool,
        verbose: bool,
        min_depth_to_show_records: usize,
    ) -> Result<PuzzleDefinition, SolverError> {
        if rows == 0 || cols == 0 {
            return Err(SolverError::InvalidInput(
                "board must have at least one row and column".to_string(),
            ));
        }
        if tiles.len() != rows * cols {
            return Err(SolverError::InvalidInput(format!(
                "expected {} tiles for a {rows}x{cols} board, found {}",
                rows * cols,
                tiles.len()
            )));
        }

        let max_id = tiles.keys().copied().max().unwrap_or(0);
        let mut ordered = Vec::with_capacity(tiles.len());
        for id in 1..=max_id {
            match tiles.get(&id) {
                Some(tile) => ordered.push(*tile),
                None => {
                    return Err(SolverError::InvalidInput(format!(
                        "tile ids must be contiguous starting at 1; missing id {id}"
                    )));
                }
            }
        }

        for fixed in &fixed_pieces {
            if fixed.at.0 >= rows || fixed.at.1 >= cols {
                return Err(SolverError::InvalidInput(format!(
                    "fixed piece at {:?} is out of bounds for a {rows}x{cols} board",
                    fixed.at
                )));
            }
            if !(1..=ordered.len() as TileId).contains(&fixed.tile_id) {
                return Err(SolverError::InvalidInput(format!(
                    "fixed piece references unknown tile id {}",
                    fixed.tile_id
                )));
            }
        }

        Ok(PuzzleDefinition {
            rows,
            cols,
            tileset: TileSet::new(ordered),
            fixed_pieces,
            border_color,
            sort_ascending,
            prioritize_borders,
            verbose,
            min_depth_to_show_records,
        })
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn tileset(&self) -> &TileSet {
        &self.tileset
    }

    #[must_use]
    pub fn fixed_pieces(&self) -> &[FixedPiece] {
        &self.fixed_pieces
    }

    #[must_use]
    pub const fn border_color(&self) -> Color {
        self.border_color
    }

    #[must_use]
    pub const fn sort_ascending(&self) -> bool {
        self.sort_ascending
    }

    #[must_use]
    pub const fn prioritize_borders(&self) -> bool {
        self.prioritize_borders
    }

    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    #[must_use]
    pub const fn min_depth_to_show_records(&self) -> usize {
        self.min_depth_to_show_records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BORDER;

    fn tiles_for(rows: usize, cols: usize) -> HashMap<TileId, Tile> {
        (1..=(rows * cols) as TileId)
            .map(|id| (id, Tile::new(BORDER, BORDER, BORDER, BORDER)))
            .collect()
    }

    #[test]
    fn rejects_tile_count_mismatched_with_board_area() {
        let result = PuzzleDefinition::new(2, 2, tiles_for(1, 1), vec![], BORDER, true, true, false, 0);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_fixed_piece_out_of_bounds() {
        let fixed = vec![FixedPiece {
            at: (5, 5),
            tile_id: 1,
            rotation: Rotation::Rot0,
        }];
        let result = PuzzleDefinition::new(2, 2, tiles_for(2, 2), fixed, BORDER, true, true, false, 0);
        assert!(result.is_err());
    }

    #[test]
    fn accepts_a_well_formed_definition() {
        let result = PuzzleDefinition::new(2, 2, tiles_for(2, 2), vec![], BORDER, true, true, false, 0);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().tileset().len(), 4);
    }
}
