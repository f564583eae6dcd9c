use std::fmt;

use nalgebra as na;

use crate::{error::Error, P2};

/// An immutable 2d coordinate with finite components.
///
/// Equality is exact coordinate equality, there is no epsilon tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "P2", into = "P2")
)]
pub struct Point(P2);

impl Point {
    /// Create a new point, rejecting NaN and infinite coordinates
    pub fn new(x: f64, y: f64) -> Result<Self, Error> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(Error::NonFiniteCoordinate { x, y });
        }
        Ok(Self(P2::new(x, y)))
    }

    /// Get the x coordinate
    pub fn x(&self) -> f64 {
        self.0.x
    }

    /// Get the y coordinate
    pub fn y(&self) -> f64 {
        self.0.y
    }

    /// Get the coordinate a node with the given orientation splits on
    pub fn coord(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Vertical => self.0.x,
            Orientation::Horizontal => self.0.y,
        }
    }

    /// Squared euclidean distance to another point
    pub fn distance_squared(&self, other: &Point) -> f64 {
        na::distance_squared(&self.0, &other.0)
    }

    /// Get the underlying nalgebra point
    pub fn as_point2(&self) -> &P2 {
        &self.0
    }
}

impl TryFrom<P2> for Point {
    type Error = Error;

    fn try_from(point: P2) -> Result<Self, Self::Error> {
        Self::new(point.x, point.y)
    }
}

impl From<Point> for P2 {
    fn from(point: Point) -> Self {
        point.0
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0.x, self.0.y)
    }
}

/// The axis a tree node divides its region along.
///
/// A `Vertical` node splits by an x value (its dividing line is vertical), a
/// `Horizontal` node by a y value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    /// The orientation used one level deeper in the tree
    pub fn flip(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

/// An axis-aligned rectangle defined by two corners: the start (minimum x and y)
/// and the end (maximum x and y).
///
/// Used both as the implicit region of a tree node and as the query shape for
/// [`KdTree::range`](crate::KdTree::range). All tests are boundary-inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[f64; 4]", into = "[f64; 4]")
)]
pub struct Rect {
    start: P2,
    end: P2,
}

impl Rect {
    /// Create a new rect from its bounds
    ///
    /// Fails if any bound is not finite or if a minimum exceeds its maximum.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self, Error> {
        if ![xmin, ymin, xmax, ymax].iter().all(|v| v.is_finite()) {
            return Err(Error::NonFiniteBounds {
                xmin,
                ymin,
                xmax,
                ymax,
            });
        }
        if xmin > xmax || ymin > ymax {
            return Err(Error::InvertedBounds {
                xmin,
                ymin,
                xmax,
                ymax,
            });
        }
        Ok(Self::from_corners(P2::new(xmin, ymin), P2::new(xmax, ymax)))
    }

    /// The unit square [0, 1] x [0, 1]
    pub fn unit() -> Self {
        Self::from_corners(P2::new(0.0, 0.0), P2::new(1.0, 1.0))
    }

    /// Corners must already be finite and ordered.
    pub(crate) fn from_corners(start: P2, end: P2) -> Self {
        Self { start, end }
    }

    pub fn xmin(&self) -> f64 {
        self.start.x
    }

    pub fn ymin(&self) -> f64 {
        self.start.y
    }

    pub fn xmax(&self) -> f64 {
        self.end.x
    }

    pub fn ymax(&self) -> f64 {
        self.end.y
    }

    /// Check if a point exists within the rect
    pub fn contains(&self, point: &Point) -> bool {
        point.0 >= self.start && point.0 <= self.end
    }

    /// Check if the rect shares any space with another rect, touching edges included
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.end.x < other.start.x
            || self.start.x > other.end.x
            || self.end.y < other.start.y
            || self.start.y > other.end.y)
    }

    /// Squared distance from a point to the closest point of the rect, zero if inside
    pub fn distance_squared(&self, point: &Point) -> f64 {
        let p = point.0;
        let dx = (self.start.x - p.x).max(0.0).max(p.x - self.end.x);
        let dy = (self.start.y - p.y).max(0.0).max(p.y - self.end.y);
        dx * dx + dy * dy
    }

    /// Cut the rect at `at` along the axis given by `orientation`.
    ///
    /// Returns the lower and the upper part. Both parts keep the cut line, so a
    /// value equal to `at` lies in both of them.
    pub fn split(&self, orientation: Orientation, at: f64) -> (Rect, Rect) {
        let (mut lower_end, mut upper_start) = (self.end, self.start);
        match orientation {
            Orientation::Vertical => {
                lower_end.x = at;
                upper_start.x = at;
            }
            Orientation::Horizontal => {
                lower_end.y = at;
                upper_start.y = at;
            }
        }
        (
            Rect::from_corners(self.start, lower_end),
            Rect::from_corners(upper_start, self.end),
        )
    }

    /// The dividing line of a split at `at`, spanning the rect along the other axis
    pub fn split_line(&self, orientation: Orientation, at: f64) -> (Point, Point) {
        match orientation {
            Orientation::Vertical => (
                Point(P2::new(at, self.start.y)),
                Point(P2::new(at, self.end.y)),
            ),
            Orientation::Horizontal => (
                Point(P2::new(self.start.x, at)),
                Point(P2::new(self.end.x, at)),
            ),
        }
    }
}

impl TryFrom<[f64; 4]> for Rect {
    type Error = Error;

    fn try_from([xmin, ymin, xmax, ymax]: [f64; 4]) -> Result<Self, Self::Error> {
        Self::new(xmin, ymin, xmax, ymax)
    }
}

impl From<Rect> for [f64; 4] {
    fn from(rect: Rect) -> Self {
        [rect.xmin(), rect.ymin(), rect.xmax(), rect.ymax()]
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use crate::util::tests::{make_point, make_rect};

    use super::*;

    #[test]
    fn point_serializes_as_coordinate_pair() {
        let point = make_point(0.5, 0.25);
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, "[0.5,0.25]", "Point should serialize like a Point2");
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point, "Point should deserialize to the same value");
    }

    #[test]
    fn rect_deserialization_validates_bounds() {
        let rect: Rect = serde_json::from_str("[0.0,0.0,0.5,1.0]").unwrap();
        assert_eq!(rect, make_rect(0.0, 0.0, 0.5, 1.0));
        assert!(
            serde_json::from_str::<Rect>("[0.6,0.0,0.5,1.0]").is_err(),
            "Inverted bounds should fail to deserialize"
        );
    }
}
