use crate::error::{PointIndexError, Result};
use crate::knn::{BoundedPriorityQueue, NearestResult};
use crate::point::Point;
use crate::r#type::Coordinate;

/// The smallest quadrant side exponent a gray node may subdivide at.
///
/// Two points closer together than the coordinate type can meaningfully
/// separate would otherwise drive splitting without bound; reaching the
/// floor raises [`PointIndexError::PrecisionExhausted`] instead.
pub const MIN_QUADRANT_EXPONENT: i32 = -64;

/// A node of the PR quadtree, spanning the square of side `2^exponent`
/// centered on its centroid.
///
/// Black nodes are leaves with a bounded point bucket; gray nodes are
/// internal, owning four child quadrants in Z order (NW, NE, SW, SE). The
/// bucketing parameter lives on the tree and is threaded through every
/// mutating call.
#[derive(Debug, Clone)]
pub(crate) enum PRQuadNode<N: Coordinate> {
    Black(BlackNode<N>),
    Gray(GrayNode<N>),
}

#[derive(Debug, Clone)]
pub(crate) struct BlackNode<N: Coordinate> {
    centroid: Point<N>,
    exponent: i32,
    bucket: Vec<Point<N>>,
}

#[derive(Debug, Clone)]
pub(crate) struct GrayNode<N: Coordinate> {
    centroid: Point<N>,
    exponent: i32,
    children: [Option<Box<PRQuadNode<N>>>; 4],
}

impl<N: Coordinate> PRQuadNode<N> {
    /// A fresh leaf holding a single point.
    pub(crate) fn leaf(centroid: Point<N>, exponent: i32, point: Point<N>) -> Self {
        Self::Black(BlackNode {
            centroid,
            exponent,
            bucket: vec![point],
        })
    }

    pub(crate) fn centroid(&self) -> &Point<N> {
        match self {
            Self::Black(black) => &black.centroid,
            Self::Gray(gray) => &gray.centroid,
        }
    }

    pub(crate) fn exponent(&self) -> i32 {
        match self {
            Self::Black(black) => black.exponent,
            Self::Gray(gray) => gray.exponent,
        }
    }

    /// Insert `point` into this subtree. A black node whose bucket outgrows
    /// `bucketing` subdivides into a gray node at the same centroid and
    /// exponent.
    pub(crate) fn insert(&mut self, point: Point<N>, bucketing: usize) -> Result<()> {
        match self {
            Self::Black(black) => {
                black.bucket.push(point);
                if black.bucket.len() <= bucketing {
                    return Ok(());
                }
                // Subdivide. The gray node is built to the side and only
                // swapped in once every bucketed point has been re-routed,
                // so a precision failure leaves the oversized bucket intact
                // instead of dropping points.
                let mut gray = GrayNode::new(black.centroid.clone(), black.exponent);
                for p in &black.bucket {
                    gray.insert(p.clone(), bucketing)?;
                }
                *self = Self::Gray(gray);
                Ok(())
            }
            Self::Gray(gray) => gray.insert(point, bucketing),
        }
    }

    /// Delete `point` from this subtree, returning the subtree's
    /// replacement root. An emptied black node prunes to `None`; a gray
    /// node whose stored points drop to `bucketing` or fewer collapses back
    /// into a single black node. Deleting an absent point changes nothing.
    pub(crate) fn delete(mut self: Box<Self>, point: &Point<N>, bucketing: usize) -> Option<Box<Self>> {
        match &mut *self {
            Self::Black(black) => {
                if let Some(at) = black.bucket.iter().position(|p| p == point) {
                    black.bucket.remove(at);
                }
                if black.bucket.is_empty() {
                    return None;
                }
            }
            Self::Gray(gray) => {
                let slot = &mut gray.children[quadrant_of(&gray.centroid, point)];
                if let Some(child) = slot.take() {
                    *slot = child.delete(point, bucketing);
                }
                // collapse on the stored point count, never the node count
                if gray.count() <= bucketing {
                    let mut bucket = Vec::with_capacity(bucketing);
                    for slot in &mut gray.children {
                        if let Some(child) = slot.take() {
                            child.drain_points(&mut bucket);
                        }
                    }
                    return Some(Box::new(Self::Black(BlackNode {
                        centroid: gray.centroid.clone(),
                        exponent: gray.exponent,
                        bucket,
                    })));
                }
            }
        }
        Some(self)
    }

    /// Move every point stored in this subtree into `out`, consuming the
    /// nodes.
    fn drain_points(self: Box<Self>, out: &mut Vec<Point<N>>) {
        match *self {
            Self::Black(black) => out.extend(black.bucket),
            Self::Gray(gray) => {
                for child in gray.children.into_iter().flatten() {
                    child.drain_points(out);
                }
            }
        }
    }

    /// Whether `point` is stored in this subtree, routing by quadrant.
    pub(crate) fn contains(&self, point: &Point<N>) -> bool {
        match self {
            Self::Black(black) => black.bucket.iter().any(|p| p == point),
            Self::Gray(gray) => gray.children[quadrant_of(&gray.centroid, point)]
                .as_ref()
                .map_or(false, |child| child.contains(point)),
        }
    }

    /// The number of points stored in this subtree.
    pub(crate) fn count(&self) -> usize {
        match self {
            Self::Black(black) => black.bucket.len(),
            Self::Gray(gray) => gray.count(),
        }
    }

    pub(crate) fn height(&self) -> i32 {
        match self {
            Self::Black(_) => 0,
            Self::Gray(gray) => {
                1 + gray
                    .children
                    .iter()
                    .flatten()
                    .map(|child| child.height())
                    .max()
                    .unwrap_or(-1)
            }
        }
    }

    /// Whether the square spanned by this node comes within `range` of
    /// `anchor`: per-axis center distance against half-extent plus range.
    fn intersects_circle(&self, anchor: &Point<N>, range: N) -> bool {
        let half = two::<N>().powi(self.exponent() - 1);
        let centroid = self.centroid();
        (0..2).all(|dim| (anchor.coord(dim) - centroid.coord(dim)).abs() <= half + range)
    }

    /// Collect every stored point within `radius` of `anchor` (the anchor
    /// itself excluded) into `results`.
    pub(crate) fn range(&self, anchor: &Point<N>, results: &mut Vec<Point<N>>, radius: N) {
        match self {
            Self::Black(black) => {
                if self.intersects_circle(anchor, radius) {
                    for p in &black.bucket {
                        if p.distance(anchor) <= radius && p != anchor {
                            results.push(p.clone());
                        }
                    }
                }
            }
            Self::Gray(gray) => {
                for child in gray.children.iter().flatten() {
                    if child.intersects_circle(anchor, radius) {
                        child.range(anchor, results, radius);
                    }
                }
            }
        }
    }

    /// Branch-and-bound descent for the single nearest neighbor. The
    /// quadrant containing the anchor is visited first; the rest only while
    /// they can still beat the bound. The anchor itself is never a
    /// candidate.
    pub(crate) fn nearest_neighbor(&self, anchor: &Point<N>, best: &mut NearestResult<N>) {
        match self {
            Self::Black(black) => {
                if best
                    .distance()
                    .map_or(true, |bound| self.intersects_circle(anchor, bound))
                {
                    for p in &black.bucket {
                        if p == anchor {
                            continue;
                        }
                        let distance = p.distance(anchor);
                        if best.distance().map_or(true, |bound| distance < bound) {
                            best.update(p.clone(), distance);
                        }
                    }
                }
            }
            Self::Gray(gray) => {
                let first = quadrant_of(&gray.centroid, anchor);
                if let Some(child) = &gray.children[first] {
                    child.nearest_neighbor(anchor, best);
                }
                for (quadrant, child) in gray.children.iter().enumerate() {
                    if quadrant == first {
                        continue;
                    }
                    if let Some(child) = child {
                        if best
                            .distance()
                            .map_or(true, |bound| child.intersects_circle(anchor, bound))
                        {
                            child.nearest_neighbor(anchor, best);
                        }
                    }
                }
            }
        }
    }

    /// Same traversal as [`nearest_neighbor`][Self::nearest_neighbor], with
    /// the queue's worst distance (once full) as the bound. Every point of
    /// a reachable bucket is offered to the queue; the queue decides
    /// retention.
    pub(crate) fn k_nearest_neighbors(
        &self,
        anchor: &Point<N>,
        queue: &mut BoundedPriorityQueue<Point<N>, N>,
    ) {
        match self {
            Self::Black(black) => {
                if queue
                    .pruning_bound()
                    .map_or(true, |bound| self.intersects_circle(anchor, bound))
                {
                    for p in &black.bucket {
                        queue.enqueue(p.clone(), p.distance(anchor));
                    }
                }
            }
            Self::Gray(gray) => {
                let first = quadrant_of(&gray.centroid, anchor);
                if let Some(child) = &gray.children[first] {
                    child.k_nearest_neighbors(anchor, queue);
                }
                for (quadrant, child) in gray.children.iter().enumerate() {
                    if quadrant == first {
                        continue;
                    }
                    if let Some(child) = child {
                        if queue
                            .pruning_bound()
                            .map_or(true, |bound| child.intersects_circle(anchor, bound))
                        {
                            child.k_nearest_neighbors(anchor, queue);
                        }
                    }
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn as_gray(&self) -> Option<&GrayNode<N>> {
        match self {
            Self::Gray(gray) => Some(gray),
            Self::Black(_) => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn as_black(&self) -> Option<&BlackNode<N>> {
        match self {
            Self::Black(black) => Some(black),
            Self::Gray(_) => None,
        }
    }
}

impl<N: Coordinate> GrayNode<N> {
    fn new(centroid: Point<N>, exponent: i32) -> Self {
        Self {
            centroid,
            exponent,
            children: [None, None, None, None],
        }
    }

    fn insert(&mut self, point: Point<N>, bucketing: usize) -> Result<()> {
        if self.exponent < MIN_QUADRANT_EXPONENT {
            return Err(PointIndexError::PrecisionExhausted(self.exponent));
        }
        let quadrant = quadrant_of(&self.centroid, &point);
        match &mut self.children[quadrant] {
            Some(child) => child.insert(point, bucketing),
            None => {
                let centroid = child_centroid(&self.centroid, self.exponent, quadrant);
                self.children[quadrant] = Some(Box::new(PRQuadNode::leaf(
                    centroid,
                    self.exponent - 1,
                    point,
                )));
                Ok(())
            }
        }
    }

    fn count(&self) -> usize {
        self.children
            .iter()
            .flatten()
            .map(|child| child.count())
            .sum()
    }

    #[cfg(test)]
    pub(crate) fn children(&self) -> impl Iterator<Item = &PRQuadNode<N>> {
        self.children.iter().flatten().map(|child| &**child)
    }
}

#[cfg(test)]
impl<N: Coordinate> BlackNode<N> {
    pub(crate) fn bucket(&self) -> &[Point<N>] {
        &self.bucket
    }
}

/// The Z-order index (0 NW, 1 NE, 2 SW, 3 SE) of the quadrant of `centroid`
/// that contains `point`: strictly smaller coordinates go west/south, ties
/// go east/north.
fn quadrant_of<N: Coordinate>(centroid: &Point<N>, point: &Point<N>) -> usize {
    let west = point.coord(0) < centroid.coord(0);
    let south = point.coord(1) < centroid.coord(1);
    match (west, south) {
        (true, false) => 0,
        (false, false) => 1,
        (true, true) => 2,
        (false, true) => 3,
    }
}

/// The centroid of a child quadrant: offset by a quarter of this node's
/// side, `2^(exponent - 2)`, along each axis.
fn child_centroid<N: Coordinate>(centroid: &Point<N>, exponent: i32, quadrant: usize) -> Point<N> {
    let offset = two::<N>().powi(exponent - 2);
    let (dx, dy) = match quadrant {
        0 => (-offset, offset),
        1 => (offset, offset),
        2 => (-offset, -offset),
        3 => (offset, -offset),
        _ => unreachable!("quadrant index out of range"),
    };
    Point::from_xy(centroid.coord(0) + dx, centroid.coord(1) + dy)
}

#[inline]
fn two<N: Coordinate>() -> N {
    N::one() + N::one()
}
