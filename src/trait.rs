use crate::error::Result;
use crate::knn::{BoundedPriorityQueue, NearestResult};
use crate::point::Point;
use crate::r#type::Coordinate;

/// A trait for mutating and querying a dynamic index over fixed-dimensional
/// points.
///
/// Both [`KDTree`][crate::kdtree::KDTree] and
/// [`PRQuadTree`][crate::quadtree::PRQuadTree] implement this interface; the
/// two differ in how they partition space, not in what they answer.
pub trait PointIndex<N: Coordinate> {
    /// Insert `point` into the index. Duplicate points are stored, not
    /// rejected.
    ///
    /// Errors when the point's dimensionality does not match the index, or —
    /// for the PR quadtree — when separating two near-coincident points
    /// would subdivide past representable centroid precision.
    fn insert(&mut self, point: Point<N>) -> Result<()>;

    /// Remove one instance of `point` from the index. Returns whether the
    /// point was present; removing an absent point is a no-op, never an
    /// error.
    fn remove(&mut self, point: &Point<N>) -> bool;

    /// Whether `point` is currently held by the index.
    fn contains(&self, point: &Point<N>) -> bool;

    /// All points within Euclidean distance `radius` of `anchor`
    /// (inclusive), excluding the anchor itself. An empty index yields an
    /// empty result.
    fn range(&self, anchor: &Point<N>, radius: N) -> Result<Vec<Point<N>>>;

    /// The nearest indexed point to `anchor`.
    ///
    /// Errors with [`EmptyIndex`][crate::PointIndexError::EmptyIndex] when
    /// the index holds no points; check [`is_empty`][Self::is_empty] first.
    fn nearest_neighbor(&self, anchor: &Point<N>) -> Result<NearestResult<N>>;

    /// The `k` nearest indexed points to `anchor`, as a bounded queue
    /// ordered by ascending distance. `k` must be at least 1; an empty
    /// index yields an empty queue.
    fn k_nearest_neighbors(
        &self,
        k: usize,
        anchor: &Point<N>,
    ) -> Result<BoundedPriorityQueue<Point<N>, N>>;

    /// The height of the index: -1 when empty, 0 for a lone node, otherwise
    /// one more than the tallest child.
    fn height(&self) -> i32;

    /// The number of points currently held.
    fn len(&self) -> usize;

    /// Whether the index holds no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
