//! A 2d-tree point set over an axis-aligned region (the unit square by default).
//!
//! Supports insertion, exact membership tests, boundary-inclusive rectangular range
//! queries and nearest neighbor search.
//!
//! ```
//! use kdtree2d::{KdTree, Point, Rect};
//!
//! let mut tree = KdTree::new();
//! tree.insert(Point::new(0.5, 0.5)?)?;
//! tree.insert(Point::new(0.25, 0.75)?)?;
//! tree.insert(Point::new(0.75, 0.25)?)?;
//!
//! assert!(tree.contains(&Point::new(0.25, 0.75)?));
//! assert_eq!(tree.range(&Rect::new(0.0, 0.0, 0.5, 1.0)?).len(), 2);
//! assert_eq!(tree.nearest(&Point::new(0.6, 0.6)?), Some(Point::new(0.5, 0.5)?));
//! # Ok::<(), kdtree2d::Error>(())
//! ```

use nalgebra::Point2;

mod error;
mod kdtree;
mod render;
mod shapes;
mod util;

pub use error::Error;
pub use kdtree::KdTree;
pub use render::Renderer;
pub use shapes::{Orientation, Point, Rect};

pub type P2 = Point2<f64>;
