use tracing::{debug, trace};

use crate::{
    error::Error,
    render::Renderer,
    shapes::{Orientation, Point, Rect},
    util::{determine_side, Side},
};

/// Child slot value meaning "no child". The root lives at index 0 and is never a child.
const EMPTY: usize = 0;

/// A 2d-tree: a set of points organized as a binary space partition whose splitting
/// axis alternates with depth, starting with a vertical split at the root.
///
/// Tree shape is purely a function of insertion order; there is no rebalancing and no
/// deletion. Node regions are never stored, they are recomputed from the boundary
/// while descending.
#[derive(Debug, Clone)]
pub struct KdTree {
    nodes: Vec<Partition>,
    boundary: Rect,
}

impl KdTree {
    /// Create a new empty tree covering the unit square
    pub fn new() -> Self {
        Self::with_boundary(Rect::unit())
    }

    /// Create a new empty tree covering `boundary` instead of the unit square
    ///
    /// Only points inside the boundary can be inserted.
    pub fn with_boundary(boundary: Rect) -> Self {
        Self {
            nodes: Vec::new(),
            boundary,
        }
    }

    /// Get the boundary rect of the tree, the region of the root node
    pub fn boundary(&self) -> &Rect {
        &self.boundary
    }

    /// Number of distinct points in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a point into the tree
    ///
    /// **Returns** `Ok(true)` if the point was added, `Ok(false)` if an equal point was
    /// already present. Points outside the boundary are rejected and leave the tree
    /// unchanged.
    pub fn insert(&mut self, point: Point) -> Result<bool, Error> {
        if !self.boundary.contains(&point) {
            debug!(%point, "rejected point outside tree boundary");
            return Err(Error::OutOfBounds { point });
        }

        if self.nodes.is_empty() {
            self.nodes.push(Partition::new(point, Orientation::Vertical));
            trace!(%point, "inserted root point");
            return Ok(true);
        }

        let mut current = 0;
        let mut depth = 0;
        loop {
            let node = &self.nodes[current];
            if node.point == point {
                trace!(%point, "ignored duplicate point");
                return Ok(false);
            }

            let side = node.side_of(&point);
            match node.child(side) {
                Some(child) => {
                    current = child;
                    depth += 1;
                }
                None => {
                    let orientation = node.orientation.flip();
                    let id = self.nodes.len();
                    self.nodes.push(Partition::new(point, orientation));
                    self.nodes[current].children[side.index()] = id;
                    trace!(%point, depth = depth + 1, "inserted point");
                    return Ok(true);
                }
            }
        }
    }

    /// Insert every point of `points`, stopping at the first rejected one
    ///
    /// **Returns** how many points were actually added. Points before a rejected one
    /// stay inserted.
    pub fn insert_all<I>(&mut self, points: I) -> Result<usize, Error>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut added = 0;
        for point in points {
            if self.insert(point)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Check if the tree holds a point with exactly these coordinates
    pub fn contains(&self, point: &Point) -> bool {
        let mut current = self.root();
        while let Some(id) = current {
            let node = &self.nodes[id];
            if node.point == *point {
                return true;
            }
            current = node.child(node.side_of(point));
        }
        false
    }

    /// Collect every point lying within `rect`, boundary included
    ///
    /// Points come out in pre-order, lower child before upper child.
    pub fn range(&self, rect: &Rect) -> Vec<Point> {
        let mut results = Vec::new();
        self.query(rect, &mut results);
        results
    }

    /// Queries the tree for points within `rect`.
    /// This method appends every found point to a passed mutable vector.
    pub fn query(&self, rect: &Rect, results: &mut Vec<Point>) {
        let Some(root) = self.root() else {
            return;
        };

        let found_before = results.len();
        let mut visited = 0usize;
        let mut stack = vec![(root, self.boundary)];
        while let Some((id, region)) = stack.pop() {
            if !region.intersects(rect) {
                continue;
            }
            visited += 1;

            let node = &self.nodes[id];
            if rect.contains(&node.point) {
                results.push(node.point);
            }

            let (lower, upper) = node.split(&region);
            if let Some(child) = node.child(Side::Upper) {
                stack.push((child, upper));
            }
            if let Some(child) = node.child(Side::Lower) {
                stack.push((child, lower));
            }
        }

        trace!(
            visited,
            found = results.len() - found_before,
            "range query finished"
        );
    }

    /// Find the stored point closest to `query`
    ///
    /// **Returns** `None` only when the tree is empty. When several points are equally
    /// close, the first one reached by the search wins: the search always explores the
    /// side of a split the query lies on before the other side.
    pub fn nearest(&self, query: &Point) -> Option<Point> {
        let root = self.root()?;

        let mut best: Option<(Point, f64)> = None;
        let (mut visited, mut pruned) = (0usize, 0usize);
        let mut stack = vec![(root, self.boundary)];
        while let Some((id, region)) = stack.pop() {
            if let Some((_, best_distance)) = best {
                if best_distance <= region.distance_squared(query) {
                    pruned += 1;
                    continue;
                }
            }
            visited += 1;

            let node = &self.nodes[id];
            let distance = node.point.distance_squared(query);
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((node.point, distance));
            }

            let (lower, upper) = node.split(&region);
            let near = node.side_of(query);
            // Far side goes on the stack first so the near side is searched first.
            for side in [near.other(), near] {
                if let Some(child) = node.child(side) {
                    let region = match side {
                        Side::Lower => lower,
                        Side::Upper => upper,
                    };
                    stack.push((child, region));
                }
            }
        }

        trace!(visited, pruned, "nearest search finished");
        best.map(|(point, _)| point)
    }

    /// Number of levels in the tree, 0 when empty
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<_> = self.root().map(|root| (root, 1)).into_iter().collect();
        while let Some((id, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(self.nodes[id].children().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Hand every node to `renderer` in pre-order, lower child before upper child.
    ///
    /// The boundary goes first, then for each node its point followed by its
    /// dividing line clipped to the node's region.
    pub fn draw<R: Renderer>(&self, renderer: &mut R) {
        renderer.boundary(&self.boundary);

        let Some(root) = self.root() else {
            return;
        };

        let mut stack = vec![(root, self.boundary)];
        while let Some((id, region)) = stack.pop() {
            let node = &self.nodes[id];
            renderer.point(&node.point);

            let (from, to) = region.split_line(node.orientation, node.split_value());
            renderer.segment(&from, &to, node.orientation);

            let (lower, upper) = node.split(&region);
            if let Some(child) = node.child(Side::Upper) {
                stack.push((child, upper));
            }
            if let Some(child) = node.child(Side::Lower) {
                stack.push((child, lower));
            }
        }
    }

    fn root(&self) -> Option<usize> {
        (!self.nodes.is_empty()).then_some(0)
    }
}

impl Default for KdTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A tree node: one stored point, the axis it splits on and its two child slots.
#[derive(Debug, Clone)]
struct Partition {
    point: Point,
    orientation: Orientation,
    children: [usize; 2],
}

impl Partition {
    fn new(point: Point, orientation: Orientation) -> Self {
        Self {
            point,
            orientation,
            children: [EMPTY; 2],
        }
    }

    fn child(&self, side: Side) -> Option<usize> {
        match self.children[side.index()] {
            EMPTY => None,
            id => Some(id),
        }
    }

    fn children(&self) -> impl Iterator<Item = usize> + '_ {
        [Side::Lower, Side::Upper]
            .into_iter()
            .filter_map(|side| self.child(side))
    }

    fn split_value(&self) -> f64 {
        self.point.coord(self.orientation)
    }

    fn side_of(&self, point: &Point) -> Side {
        determine_side(self.orientation, &self.point, point)
    }

    /// Regions of the lower and upper child inside this node's `region`
    fn split(&self, region: &Rect) -> (Rect, Rect) {
        region.split(self.orientation, self.split_value())
    }
}
