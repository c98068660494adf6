use crate::knn::{BoundedPriorityQueue, NearestResult};
use crate::point::Point;
use crate::r#type::Coordinate;

/// A node of the k-d tree. Children are owned exclusively; the splitting
/// dimension is implied by depth and threaded through every call as
/// `curr_dim`, with `(curr_dim + 1) % dims` per level.
#[derive(Debug, Clone)]
pub(crate) struct KDTreeNode<N: Coordinate> {
    point: Point<N>,
    height: i32,
    left: Option<Box<KDTreeNode<N>>>,
    right: Option<Box<KDTreeNode<N>>>,
}

impl<N: Coordinate> KDTreeNode<N> {
    pub(crate) fn new(point: Point<N>) -> Self {
        Self {
            point,
            height: 0,
            left: None,
            right: None,
        }
    }

    pub(crate) fn point(&self) -> &Point<N> {
        &self.point
    }

    pub(crate) fn height(&self) -> i32 {
        self.height
    }

    #[cfg(test)]
    pub(crate) fn left(&self) -> Option<&KDTreeNode<N>> {
        self.left.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn right(&self) -> Option<&KDTreeNode<N>> {
        self.right.as_deref()
    }

    /// BST insert keyed on `curr_dim`: strictly smaller goes left, ties go
    /// right. A new leaf is created at the first empty slot on the path.
    pub(crate) fn insert(&mut self, point: Point<N>, curr_dim: usize, dims: usize) {
        let next_dim = (curr_dim + 1) % dims;
        let child = if point.coord(curr_dim) < self.point.coord(curr_dim) {
            &mut self.left
        } else {
            &mut self.right
        };
        match child {
            Some(node) => node.insert(point, next_dim, dims),
            None => *child = Some(Box::new(KDTreeNode::new(point))),
        }
        self.update_height();
    }

    /// Delete `target` from the subtree rooted at this node, returning the
    /// subtree's replacement root (`None` prunes the position).
    ///
    /// A matched inner node is overwritten with the minimum point along
    /// `curr_dim` of its right subtree, and that point is then deleted from
    /// where it came from; when only a left subtree exists it is moved into
    /// the right slot first. Deleting an absent point leaves the subtree
    /// unchanged.
    pub(crate) fn delete(
        mut self: Box<Self>,
        target: &Point<N>,
        curr_dim: usize,
        dims: usize,
    ) -> Option<Box<Self>> {
        let next_dim = (curr_dim + 1) % dims;
        if self.point == *target {
            if let Some(right) = self.right.take() {
                let replacement = right.find_min(curr_dim, next_dim, dims).point.clone();
                self.right = right.delete(&replacement, next_dim, dims);
                self.point = replacement;
            } else if let Some(left) = self.left.take() {
                let replacement = left.find_min(curr_dim, next_dim, dims).point.clone();
                self.right = left.delete(&replacement, next_dim, dims);
                self.point = replacement;
            } else {
                return None;
            }
        } else if target.coord(curr_dim) < self.point.coord(curr_dim) {
            if let Some(left) = self.left.take() {
                self.left = left.delete(target, next_dim, dims);
            }
        } else if let Some(right) = self.right.take() {
            self.right = right.delete(target, next_dim, dims);
        }
        self.update_height();
        Some(self)
    }

    /// The node holding the minimum `sought_dim` coordinate in this subtree.
    ///
    /// When the sought dimension is the splitting dimension only the left
    /// subtree can improve on this node; otherwise both subtrees are
    /// searched. Ties favor the left subtree's candidate over this node's
    /// point, while the right subtree's candidate must be strictly smaller
    /// than both.
    fn find_min(&self, sought_dim: usize, curr_dim: usize, dims: usize) -> &Self {
        if self.left.is_none() && self.right.is_none() {
            return self;
        }
        let next_dim = (curr_dim + 1) % dims;
        if sought_dim == curr_dim {
            return match &self.left {
                Some(left) => left.find_min(sought_dim, next_dim, dims),
                None => self,
            };
        }

        let mut min: &Self = self;
        if let Some(left) = &self.left {
            let candidate = left.find_min(sought_dim, next_dim, dims);
            if candidate.point.coord(sought_dim) <= min.point.coord(sought_dim) {
                min = candidate;
            }
        }
        if let Some(right) = &self.right {
            let candidate = right.find_min(sought_dim, next_dim, dims);
            if candidate.point.coord(sought_dim) < min.point.coord(sought_dim) {
                min = candidate;
            }
        }
        min
    }

    /// Whether `target` exists in this subtree, following the unique BST
    /// descent path.
    pub(crate) fn search(&self, target: &Point<N>, curr_dim: usize, dims: usize) -> bool {
        if self.point == *target {
            return true;
        }
        let next_dim = (curr_dim + 1) % dims;
        let child = if target.coord(curr_dim) < self.point.coord(curr_dim) {
            &self.left
        } else {
            &self.right
        };
        child
            .as_ref()
            .map_or(false, |node| node.search(target, next_dim, dims))
    }

    /// Collect every point within `radius` of `anchor` (the anchor itself
    /// excluded) into `results`.
    pub(crate) fn range(
        &self,
        anchor: &Point<N>,
        results: &mut Vec<Point<N>>,
        radius: N,
        curr_dim: usize,
        dims: usize,
    ) {
        if self.point.distance(anchor) <= radius && self.point != *anchor {
            results.push(self.point.clone());
        }

        let next_dim = (curr_dim + 1) % dims;
        let (near, far) = self.near_far(anchor, curr_dim);
        if let Some(child) = near {
            child.range(anchor, results, radius, next_dim, dims);
        }
        // the far half must still be visited when the splitting plane cuts
        // into the query sphere
        if let Some(child) = far {
            if (anchor.coord(curr_dim) - self.point.coord(curr_dim)).abs() <= radius {
                child.range(anchor, results, radius, next_dim, dims);
            }
        }
    }

    /// Branch-and-bound descent for the single nearest neighbor, with `best`
    /// carrying the bound.
    ///
    /// The half containing the anchor is searched unconditionally; the far
    /// half only while the splitting plane still lies within the best
    /// distance found so far.
    pub(crate) fn nearest_neighbor(
        &self,
        anchor: &Point<N>,
        curr_dim: usize,
        best: &mut NearestResult<N>,
        dims: usize,
    ) {
        let distance = self.point.distance(anchor);
        if best.distance().map_or(true, |bound| distance < bound) {
            best.update(self.point.clone(), distance);
        }

        let next_dim = (curr_dim + 1) % dims;
        let (near, far) = self.near_far(anchor, curr_dim);
        if let Some(child) = near {
            child.nearest_neighbor(anchor, next_dim, best, dims);
        }
        if let Some(child) = far {
            let gap = (anchor.coord(curr_dim) - self.point.coord(curr_dim)).abs();
            if best.distance().map_or(true, |bound| gap <= bound) {
                child.nearest_neighbor(anchor, next_dim, best, dims);
            }
        }
    }

    /// Same traversal as [`nearest_neighbor`][Self::nearest_neighbor], with
    /// the queue's worst distance (once full) as the bound. Every visited
    /// point is offered to the queue; the queue decides retention.
    pub(crate) fn k_nearest_neighbors(
        &self,
        anchor: &Point<N>,
        queue: &mut BoundedPriorityQueue<Point<N>, N>,
        curr_dim: usize,
        dims: usize,
    ) {
        queue.enqueue(self.point.clone(), self.point.distance(anchor));

        let next_dim = (curr_dim + 1) % dims;
        let (near, far) = self.near_far(anchor, curr_dim);
        if let Some(child) = near {
            child.k_nearest_neighbors(anchor, queue, next_dim, dims);
        }
        if let Some(child) = far {
            let gap = (anchor.coord(curr_dim) - self.point.coord(curr_dim)).abs();
            if queue.pruning_bound().map_or(true, |bound| gap <= bound) {
                child.k_nearest_neighbors(anchor, queue, next_dim, dims);
            }
        }
    }

    /// The children ordered by the BST rule: the half that contains the
    /// anchor first.
    fn near_far(
        &self,
        anchor: &Point<N>,
        curr_dim: usize,
    ) -> (&Option<Box<Self>>, &Option<Box<Self>>) {
        if anchor.coord(curr_dim) < self.point.coord(curr_dim) {
            (&self.left, &self.right)
        } else {
            (&self.right, &self.left)
        }
    }

    fn update_height(&mut self) {
        self.height = 1 + child_height(&self.left).max(child_height(&self.right));
    }
}

#[inline]
fn child_height<N: Coordinate>(child: &Option<Box<KDTreeNode<N>>>) -> i32 {
    child.as_ref().map_or(-1, |node| node.height)
}
