//! Minimum-remaining-values cell selection, with tie-breaks favouring
//! border continuity and trapped-gap avoidance (spec §4.6).

use std::cmp::Reverse;

use crate::board::{Board, Coord};
use crate::cell_constraints::CellConstraints;
use crate::domain::DomainManager;
use crate::side::SIDES;

/// Picks the next empty cell to branch on.
///
/// Ranking, in priority order:
/// 1. Cells whose selection would trap a gap along a border are vetoed
///    outright, unless every remaining empty cell is equally trapped.
/// 2. When `prioritize_borders` is set and an empty border cell remains,
///    border cells are preferred over interior ones.
/// 3. Cells with at least one placed border-neighbour are preferred
///    (keeps the frame growing contiguously).
/// 4. Once at least half the board is filled, cells with zero placed
///    neighbours are penalized (isolated cells are more likely to become
///    unreachable gaps).
/// 5. Among the rest, prefer more placed neighbours (constraint density).
/// 6. Final tie-break: fewest candidate placements (MRV).
#[derive(Debug, Clone, Copy)]
pub struct CellSelector {
    /// When set, border cells are preferred over interior ones while any
    /// border cell remains empty, matching a puzzle's `prioritizeBorders`
    /// configuration.
    prioritize_borders: bool,
}

type Rank = (bool, bool, bool, Reverse<usize>, usize);

impl CellSelector {
    /// A selector using plain MRV with the standard tie-break chain.
    #[must_use]
    pub fn new(prioritize_borders: bool) -> CellSelector {
        CellSelector { prioritize_borders }
    }

    /// Choose the next empty cell, or `None` if the board is full.
    pub fn select(
        &self,
        board: &Board,
        domains: &DomainManager,
        constraints: &CellConstraints,
    ) -> Option<Coord> {
        let empty: Vec<Coord> = board.coords().filter(|&at| board.is_empty(at)).collect();
        if empty.is_empty() {
            return None;
        }

        let non_trapped: Vec<Coord> = empty
            .iter()
            .copied()
            .filter(|&at| !Self::would_trap_gap(at, board, constraints))
            .collect();
        let candidates = if non_trapped.is_empty() { &empty } else { &non_trapped };

        let filled = board.rows() * board.cols() - empty.len();
        let half_filled = filled * 2 >= board.rows() * board.cols();
        let any_border_empty =
            self.prioritize_borders && empty.iter().any(|&at| constraints.is_border_cell(at));

        candidates
            .iter()
            .copied()
            .min_by_key(|&at| self.rank(at, board, domains, constraints, any_border_empty, half_filled))
    }

    fn rank(
        &self,
        at: Coord,
        board: &Board,
        domains: &DomainManager,
        constraints: &CellConstraints,
        any_border_empty: bool,
        half_filled: bool,
    ) -> Rank {
        let border_priority = any_border_empty && !constraints.is_border_cell(at);
        let placed_neighbours = constraints.neighbours(at).filter(|&n| !board.is_empty(n)).count();
        let lacks_border_continuity = !constraints
            .neighbours(at)
            .any(|n| !board.is_empty(n) && constraints.is_border_cell(n));
        let isolated_penalty = half_filled && placed_neighbours == 0;
        let domain_size = domains.get(at).size();
        (
            border_priority,
            lacks_border_continuity,
            isolated_penalty,
            Reverse(placed_neighbours),
            domain_size,
        )
    }

    /// Whether placing a tile at `at` would strand an empty cell between
    /// two filled cells along the same border line (spec §4.6 rule 1,
    /// glossary "trapped gap"): a neighbour one step away along a border
    /// direction is empty, while the cell two steps away is already
    /// filled.
    fn would_trap_gap(at: Coord, board: &Board, constraints: &CellConstraints) -> bool {
        let mut directions = Vec::with_capacity(4);
        let on_horizontal_border = SIDES
            .into_iter()
            .filter(|&s| matches!(s, crate::side::Side::North | crate::side::Side::South))
            .any(|s| constraints.facing(at, s) == crate::cell_constraints::SideFacing::Frame);
        let on_vertical_border = SIDES
            .into_iter()
            .filter(|&s| matches!(s, crate::side::Side::East | crate::side::Side::West))
            .any(|s| constraints.facing(at, s) == crate::cell_constraints::SideFacing::Frame);
        if on_horizontal_border {
            directions.push((0_isize, 1_isize));
            directions.push((0, -1));
        }
        if on_vertical_border {
            directions.push((1, 0));
            directions.push((-1, 0));
        }

        directions.into_iter().any(|(dr, dc)| {
            let Some(step1) = board.neighbour(at, (dr, dc)) else {
                return false;
            };
            let Some(step2) = board.neighbour(at, (dr * 2, dc * 2)) else {
                return false;
            };
            board.is_empty(step1) && !board.is_empty(step2)
        })
    }
}
