use crate::shapes::{Orientation, Point};

/// Which child of a node a point belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    /// Left of a vertical split, below a horizontal one.
    Lower,
    /// Right of a vertical split, above a horizontal one. Ties land here.
    Upper,
}

impl Side {
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Lower => 0,
            Self::Upper => 1,
        }
    }

    pub(crate) fn other(self) -> Self {
        match self {
            Self::Lower => Self::Upper,
            Self::Upper => Self::Lower,
        }
    }
}

/// Decide which side of a node splitting at `split` with `orientation` the point falls on.
///
/// Only the active axis is compared, so a point matching the node on that axis goes upper.
pub(crate) fn determine_side(orientation: Orientation, split: &Point, point: &Point) -> Side {
    if point.coord(orientation) < split.coord(orientation) {
        Side::Lower
    } else {
        Side::Upper
    }
}
