//! Support types threaded through nearest-neighbor and k-NN searches.

#![warn(missing_docs)]

mod queue;
mod result;

pub use queue::BoundedPriorityQueue;
pub use result::NearestResult;
