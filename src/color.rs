//! Edge colors.
//!
//! A `Color` is a small non-negative integer label on a tile side. The
//! value [`BORDER`] is reserved for the outer frame and can never appear on
//! an interior edge of the solved board.

/// An edge color, or the reserved border marker.
pub type Color = u16;

/// The reserved color marking the outer frame of the board.
///
/// A tile edge equal to `BORDER` must face either the frame or another
/// `BORDER` edge; it can never be matched against a non-border interior
/// edge.
pub const BORDER: Color = 0;

/// Check whether a color is the reserved border marker.
#[must_use]
pub const fn is_border(color: Color) -> bool {
    color == BORDER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_is_zero() {
        assert_eq!(BORDER, 0);
        assert!(is_border(0));
        assert!(!is_border(1));
    }
}
