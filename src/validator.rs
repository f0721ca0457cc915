//! O(1) placement legality check against neighbours and the frame.

use crate::board::{Board, Coord};
use crate::cell_constraints::{CellConstraints, SideFacing};
use crate::color::{BORDER, Color};
use crate::side::SIDES;
use crate::stats::StatisticsManager;

/// Checks whether a candidate set of edges may legally occupy a cell,
/// given the current board state.
pub struct PlacementValidator;

impl PlacementValidator {
    /// Whether `candidate_edges` (already rotated, `[N, E, S, W]`) may be
    /// placed at `at`.
    ///
    /// For each side: a side facing the frame requires [`BORDER`]; a side
    /// facing an occupied neighbour requires the matching color on the
    /// neighbour's facing edge; a side facing an empty interior neighbour
    /// forbids [`BORDER`] (an interior edge can never be border-colored).
    pub fn fits(
        board: &Board,
        constraints: &CellConstraints,
        at: Coord,
        candidate_edges: [Color; 4],
        stats: &mut StatisticsManager,
    ) -> bool {
        stats.record_fit_check();

        for side in SIDES {
            let candidate = candidate_edges[side.index()];
            match constraints.facing(at, side) {
                SideFacing::Frame => {
                    if candidate != BORDER {
                        return false;
                    }
                }
                SideFacing::Neighbour(neighbour_at) => match board.get_placement(neighbour_at) {
                    Some(neighbour) => {
                        if candidate != neighbour.edge(side.opposite()) {
                            return false;
                        }
                    }
                    None => {
                        if candidate == BORDER {
                            return false;
                        }
                    }
                },
            }
        }
        true
    }
}
