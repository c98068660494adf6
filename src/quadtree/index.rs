use geo_traits::CoordTrait;

use crate::error::{PointIndexError, Result};
use crate::knn::{BoundedPriorityQueue, NearestResult};
use crate::point::Point;
use crate::quadtree::node::{PRQuadNode, MIN_QUADRANT_EXPONENT};
use crate::r#trait::PointIndex;
use crate::r#type::Coordinate;

/// A bucketed Point-Region quadtree over 2-D points.
///
/// Space is recursively quartered around a centroid: the root spans the
/// square of side `2^exponent`, its children half that, and so on. Leaves
/// hold up to `bucketing` points before they split, and internal nodes
/// collapse back into leaves once deletion brings their stored point count
/// to `bucketing` or fewer.
///
/// Callers size the root quadrant; points outside it are accepted but
/// degrade the partitioning, since they all route through the nearest edge
/// quadrant.
///
/// ```
/// use point_index::quadtree::PRQuadTree;
/// use point_index::{Point, PointIndex};
///
/// let mut tree = PRQuadTree::new(4, 2)?;
/// tree.insert(Point::from_xy(1.0, 1.0))?;
/// tree.insert(Point::from_xy(-3.0, 2.0))?;
/// tree.insert(Point::from_xy(2.0, -5.0))?;
///
/// let nearest = tree.nearest_neighbor(&Point::from_xy(0.0, 0.0))?;
/// assert_eq!(nearest.point(), Some(&Point::from_xy(1.0, 1.0)));
/// # Ok::<(), point_index::PointIndexError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PRQuadTree<N: Coordinate> {
    root: Option<Box<PRQuadNode<N>>>,
    centroid: Point<N>,
    exponent: i32,
    bucketing: usize,
    len: usize,
}

impl<N: Coordinate> PRQuadTree<N> {
    /// Create an empty tree spanning the square of side `2^exponent`
    /// centered on the origin, with leaves holding up to `bucketing` points.
    ///
    /// Errors if `bucketing` is zero or `exponent` is below
    /// [`MIN_QUADRANT_EXPONENT`].
    pub fn new(exponent: i32, bucketing: usize) -> Result<Self> {
        Self::with_centroid(Point::from_xy(N::zero(), N::zero()), exponent, bucketing)
    }

    /// As [`new`][Self::new], with the root quadrant centered on `centroid`.
    pub fn with_centroid(centroid: Point<N>, exponent: i32, bucketing: usize) -> Result<Self> {
        if bucketing == 0 {
            return Err(PointIndexError::InvalidConfig(
                "Bucketing parameter must be a strictly positive integer.".to_string(),
            ));
        }
        if exponent < MIN_QUADRANT_EXPONENT {
            return Err(PointIndexError::InvalidConfig(format!(
                "Side exponent must be at least {}.",
                MIN_QUADRANT_EXPONENT
            )));
        }
        if centroid.dims() != 2 {
            return Err(PointIndexError::DimensionMismatch {
                expected: 2,
                actual: centroid.dims(),
            });
        }
        Ok(Self {
            root: None,
            centroid,
            exponent,
            bucketing,
            len: 0,
        })
    }

    /// The maximum number of points a leaf holds before it splits.
    pub fn bucketing(&self) -> usize {
        self.bucketing
    }

    /// The exponent defining the root quadrant's side length, `2^exponent`.
    pub fn side_exponent(&self) -> i32 {
        self.exponent
    }

    /// The centroid the root quadrant is centered on.
    pub fn centroid(&self) -> &Point<N> {
        &self.centroid
    }

    /// Range query anchored on any [`CoordTrait`] implementation.
    pub fn range_coord(&self, anchor: &impl CoordTrait<T = N>, radius: N) -> Result<Vec<Point<N>>> {
        self.range(&Point::from_coord(anchor), radius)
    }

    /// Nearest-neighbor query anchored on any [`CoordTrait`] implementation.
    pub fn nearest_neighbor_coord(
        &self,
        anchor: &impl CoordTrait<T = N>,
    ) -> Result<NearestResult<N>> {
        self.nearest_neighbor(&Point::from_coord(anchor))
    }

    fn check_dims(&self, point: &Point<N>) -> Result<()> {
        if point.dims() != 2 {
            return Err(PointIndexError::DimensionMismatch {
                expected: 2,
                actual: point.dims(),
            });
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<&PRQuadNode<N>> {
        self.root.as_deref()
    }
}

impl<N: Coordinate> PointIndex<N> for PRQuadTree<N> {
    fn insert(&mut self, point: Point<N>) -> Result<()> {
        self.check_dims(&point)?;
        match &mut self.root {
            Some(root) => root.insert(point, self.bucketing)?,
            None => {
                self.root = Some(Box::new(PRQuadNode::leaf(
                    self.centroid.clone(),
                    self.exponent,
                    point,
                )));
            }
        }
        self.len += 1;
        Ok(())
    }

    fn remove(&mut self, point: &Point<N>) -> bool {
        if !self.contains(point) {
            return false;
        }
        if let Some(root) = self.root.take() {
            self.root = root.delete(point, self.bucketing);
        }
        self.len -= 1;
        true
    }

    fn contains(&self, point: &Point<N>) -> bool {
        if point.dims() != 2 {
            return false;
        }
        self.root
            .as_ref()
            .map_or(false, |root| root.contains(point))
    }

    fn range(&self, anchor: &Point<N>, radius: N) -> Result<Vec<Point<N>>> {
        self.check_dims(anchor)?;
        let mut results = Vec::new();
        if let Some(root) = &self.root {
            root.range(anchor, &mut results, radius);
        }
        Ok(results)
    }

    fn nearest_neighbor(&self, anchor: &Point<N>) -> Result<NearestResult<N>> {
        self.check_dims(anchor)?;
        let root = self.root.as_ref().ok_or(PointIndexError::EmptyIndex)?;
        let mut best = NearestResult::new();
        root.nearest_neighbor(anchor, &mut best);
        Ok(best)
    }

    fn k_nearest_neighbors(
        &self,
        k: usize,
        anchor: &Point<N>,
    ) -> Result<BoundedPriorityQueue<Point<N>, N>> {
        self.check_dims(anchor)?;
        let mut queue = BoundedPriorityQueue::new(k)?;
        if let Some(root) = &self.root {
            root.k_nearest_neighbors(anchor, &mut queue);
        }
        Ok(queue)
    }

    fn height(&self) -> i32 {
        self.root.as_ref().map_or(-1, |root| root.height())
    }

    fn len(&self) -> usize {
        self.len
    }
}
