use std::fmt;

use geo_traits::CoordTrait;
use tinyvec::TinyVec;

use crate::r#type::Coordinate;

/// An immutable point in D-dimensional space.
///
/// Equality is coordinate-wise and the distance metric is Euclidean.
/// Coordinates of up to four dimensions are stored inline; higher
/// dimensionalities spill to the heap.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<N: Coordinate> {
    coords: TinyVec<[N; 4]>,
}

impl<N: Coordinate> Point<N> {
    /// Create a point from a coordinate slice.
    pub fn new(coords: &[N]) -> Self {
        Self {
            coords: coords.iter().copied().collect(),
        }
    }

    /// Create a 2-D point from its x and y coordinates.
    pub fn from_xy(x: N, y: N) -> Self {
        Self::new(&[x, y])
    }

    /// Create a point from any [`CoordTrait`] implementation, such as the
    /// coordinate types of the `geo` ecosystem.
    pub fn from_coord(coord: &impl CoordTrait<T = N>) -> Self {
        let dims = coord.dim().size();
        Self {
            coords: (0..dims).map(|n| coord.nth_or_panic(n)).collect(),
        }
    }

    /// The dimensionality of this point.
    pub fn dims(&self) -> usize {
        self.coords.len()
    }

    /// The coordinate along the given dimension.
    ///
    /// Panics if `dim` is not smaller than [`dims`][Self::dims].
    #[inline]
    pub fn coord(&self, dim: usize) -> N {
        self.coords[dim]
    }

    /// All coordinates, in dimension order.
    pub fn coords(&self) -> &[N] {
        &self.coords
    }

    /// The Euclidean distance from this point to `other`.
    #[inline]
    pub fn distance(&self, other: &Self) -> N {
        debug_assert_eq!(self.dims(), other.dims());
        let mut acc = N::zero();
        for (&a, &b) in self.coords.iter().zip(other.coords.iter()) {
            let d = a - b;
            acc = acc + d * d;
        }
        acc.sqrt()
    }
}

impl<N: Coordinate, const D: usize> From<[N; D]> for Point<N> {
    fn from(coords: [N; D]) -> Self {
        Self::new(&coords)
    }
}

impl<N: Coordinate> From<&[N]> for Point<N> {
    fn from(coords: &[N]) -> Self {
        Self::new(coords)
    }
}

impl<N: Coordinate> fmt::Display for Point<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", c)?;
        }
        write!(f, ")")
    }
}
