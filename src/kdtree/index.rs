use crate::error::{PointIndexError, Result};
use crate::kdtree::node::KDTreeNode;
use crate::knn::{BoundedPriorityQueue, NearestResult};
use crate::point::Point;
use crate::r#trait::PointIndex;
use crate::r#type::Coordinate;

/// A dynamic k-d tree over points of a fixed dimensionality.
///
/// The tree is a binary search tree whose splitting dimension cycles with
/// depth, starting at dimension 0 at the root. No rebalancing is performed:
/// the shape of the tree is determined entirely by the insertion order.
///
/// ```
/// use point_index::kdtree::KDTree;
/// use point_index::{Point, PointIndex};
///
/// let mut tree = KDTree::new(2)?;
/// tree.insert(Point::from([0.0, 0.0]))?;
/// tree.insert(Point::from([5.0, 5.0]))?;
/// tree.insert(Point::from([1.0, 1.0]))?;
///
/// let nearest = tree.nearest_neighbor(&Point::from([2.0, 2.0]))?;
/// assert_eq!(nearest.point(), Some(&Point::from([1.0, 1.0])));
/// # Ok::<(), point_index::PointIndexError>(())
/// ```
#[derive(Debug, Clone)]
pub struct KDTree<N: Coordinate> {
    root: Option<Box<KDTreeNode<N>>>,
    dims: usize,
    len: usize,
}

impl<N: Coordinate> KDTree<N> {
    /// Create an empty tree over `dims`-dimensional points.
    ///
    /// Errors if `dims` is zero.
    pub fn new(dims: usize) -> Result<Self> {
        if dims == 0 {
            return Err(PointIndexError::InvalidConfig(
                "Dimensionality must be a strictly positive integer.".to_string(),
            ));
        }
        Ok(Self {
            root: None,
            dims,
            len: 0,
        })
    }

    /// The dimensionality this tree was constructed with.
    pub fn dims(&self) -> usize {
        self.dims
    }

    fn check_dims(&self, point: &Point<N>) -> Result<()> {
        if point.dims() != self.dims {
            return Err(PointIndexError::DimensionMismatch {
                expected: self.dims,
                actual: point.dims(),
            });
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<&KDTreeNode<N>> {
        self.root.as_deref()
    }
}

impl<N: Coordinate> PointIndex<N> for KDTree<N> {
    fn insert(&mut self, point: Point<N>) -> Result<()> {
        self.check_dims(&point)?;
        match &mut self.root {
            Some(root) => root.insert(point, 0, self.dims),
            None => self.root = Some(Box::new(KDTreeNode::new(point))),
        }
        self.len += 1;
        Ok(())
    }

    fn remove(&mut self, point: &Point<N>) -> bool {
        if !self.contains(point) {
            return false;
        }
        if let Some(root) = self.root.take() {
            self.root = root.delete(point, 0, self.dims);
        }
        self.len -= 1;
        true
    }

    fn contains(&self, point: &Point<N>) -> bool {
        if point.dims() != self.dims {
            return false;
        }
        self.root
            .as_ref()
            .map_or(false, |root| root.search(point, 0, self.dims))
    }

    fn range(&self, anchor: &Point<N>, radius: N) -> Result<Vec<Point<N>>> {
        self.check_dims(anchor)?;
        let mut results = Vec::new();
        if let Some(root) = &self.root {
            root.range(anchor, &mut results, radius, 0, self.dims);
        }
        Ok(results)
    }

    fn nearest_neighbor(&self, anchor: &Point<N>) -> Result<NearestResult<N>> {
        self.check_dims(anchor)?;
        let root = self.root.as_ref().ok_or(PointIndexError::EmptyIndex)?;
        let mut best = NearestResult::new();
        root.nearest_neighbor(anchor, 0, &mut best, self.dims);
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
            root.k_nearest_neighbors(anchor, &mut queue, 0, self.dims);
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
