//! Sides, rotations, and the rotation arithmetic shared by tiles and cells.

use std::ops::Add;

/// The four sides of a tile or cell, in clockwise order starting at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Side {
    /// The top side.
    North = 0,
    /// The right side.
    East = 1,
    /// The bottom side.
    South = 2,
    /// The left side.
    West = 3,
}

/// All [`Side`] values, in `[North, East, South, West]` order.
pub const SIDES: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

impl Side {
    /// The side directly opposite this one.
    #[must_use]
    pub const fn opposite(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::East => Side::West,
            Side::South => Side::North,
            Side::West => Side::East,
        }
    }

    /// The (row, col) delta to step from a cell towards its neighbour on
    /// this side, with row increasing downward.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Side::North => (-1, 0),
            Side::East => (0, 1),
            Side::South => (1, 0),
            Side::West => (0, -1),
        }
    }

    /// Index of this side into a `[N, E, S, W]`-ordered array.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A rotation of a tile, in units of 90 degrees clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Rotation {
    /// No rotation.
    Rot0 = 0,
    /// Rotated 90 degrees clockwise.
    Rot90 = 1,
    /// Rotated 180 degrees.
    Rot180 = 2,
    /// Rotated 270 degrees clockwise.
    Rot270 = 3,
}

/// All [`Rotation`] values, in order.
pub const ROTATIONS: [Rotation; 4] = [
    Rotation::Rot0,
    Rotation::Rot90,
    Rotation::Rot180,
    Rotation::Rot270,
];

impl Rotation {
    /// Normalize a signed rotation count (possibly negative, possibly
    /// `>= 4`) into a [`Rotation`].
    #[must_use]
    pub fn from_steps(steps: i32) -> Rotation {
        let normalized = steps.rem_euclid(4);
        ROTATIONS[normalized as usize]
    }

    /// This rotation's step count, in `0..4`.
    #[must_use]
    pub const fn steps(self) -> usize {
        self as usize
    }
}

impl Add for Rotation {
    type Output = Rotation;

    fn add(self, rhs: Rotation) -> Rotation {
        Rotation::from_steps(self.steps() as i32 + rhs.steps() as i32)
    }
}

impl From<usize> for Rotation {
    fn from(value: usize) -> Rotation {
        Rotation::from_steps(value as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        for side in SIDES {
            assert_eq!(side.opposite().opposite(), side);
        }
    }

    #[test]
    fn rotation_normalizes_negative_and_overflow() {
        assert_eq!(Rotation::from_steps(-1), Rotation::Rot270);
        assert_eq!(Rotation::from_steps(4), Rotation::Rot0);
        assert_eq!(Rotation::from_steps(-4), Rotation::Rot0);
        assert_eq!(Rotation::from_steps(5), Rotation::Rot90);
    }

    #[test]
    fn addition_matches_normalized_sum() {
        for a in ROTATIONS {
            for b in ROTATIONS {
                assert_eq!(a + b, Rotation::from_steps(a.steps() as i32 + b.steps() as i32));
            }
        }
    }
}
