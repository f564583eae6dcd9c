use thiserror::Error;

use crate::shapes::Point;

/// Errors raised when a point or rect is built from, or inserted with, invalid arguments.
///
/// Every variant is a caller mistake. Nothing is retried and nothing is partially
/// applied: a failed [`KdTree::insert`](crate::KdTree::insert) leaves the tree untouched.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// A point coordinate was NaN or infinite.
    #[error("point coordinates must be finite, got ({x}, {y})")]
    NonFiniteCoordinate {
        /// Provided x value.
        x: f64,
        /// Provided y value.
        y: f64,
    },

    /// A rect bound was NaN or infinite.
    #[error("rect bounds must be finite, got [{xmin}, {xmax}] x [{ymin}, {ymax}]")]
    NonFiniteBounds {
        /// Provided minimum x.
        xmin: f64,
        /// Provided minimum y.
        ymin: f64,
        /// Provided maximum x.
        xmax: f64,
        /// Provided maximum y.
        ymax: f64,
    },

    /// A rect minimum was greater than its maximum.
    #[error("rect bounds are inverted, got [{xmin}, {xmax}] x [{ymin}, {ymax}]")]
    InvertedBounds {
        /// Provided minimum x.
        xmin: f64,
        /// Provided minimum y.
        ymin: f64,
        /// Provided maximum x.
        xmax: f64,
        /// Provided maximum y.
        ymax: f64,
    },

    /// The point lies outside the boundary of the tree it was inserted into.
    #[error("point {point} lies outside the tree boundary")]
    OutOfBounds {
        /// The rejected point.
        point: Point,
    },
}

impl Error {
    /// Whether this error stems from an invalid argument. Always true.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::NonFiniteCoordinate { .. }
                | Self::NonFiniteBounds { .. }
                | Self::InvertedBounds { .. }
                | Self::OutOfBounds { .. }
        )
    }
}
