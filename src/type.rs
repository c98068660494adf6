use std::fmt::Debug;

use num_traits::Float;

/// A trait for types that can be used as point coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Range
/// and nearest-neighbor pruning compare per-axis coordinate differences
/// against Euclidean distances, so coordinates are restricted to the IEEE
/// float types where the two are directly comparable.
pub trait Coordinate: private::Sealed + Float + Debug + Default + Send + Sync + 'static {}

impl Coordinate for f32 {}
impl Coordinate for f64 {}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
