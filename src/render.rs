use crate::shapes::{Orientation, Point, Rect};

/// A drawing surface a [`KdTree`](crate::KdTree) can be rendered onto.
///
/// The tree drives the traversal through [`KdTree::draw`](crate::KdTree::draw); the
/// renderer only turns coordinates into pixels. Coordinates are in tree space, any
/// scaling to the surface is up to the implementation.
pub trait Renderer {
    /// Called once before any node with the boundary of the whole tree
    fn boundary(&mut self, _rect: &Rect) {}

    /// Draw a stored point
    fn point(&mut self, point: &Point);

    /// Draw the dividing line of a node. `orientation` tells vertical splits (on x)
    /// from horizontal ones (on y), e.g. to draw them in different colors.
    fn segment(&mut self, from: &Point, to: &Point, orientation: Orientation);
}
