#![doc = include_str!("../README.md")]

mod error;
pub mod kdtree;
pub mod knn;
mod point;
pub mod quadtree;
mod r#trait;
mod r#type;

pub use error::PointIndexError;
pub use point::Point;
pub use r#trait::PointIndex;
pub use r#type::Coordinate;

#[cfg(test)]
pub(crate) mod test;
