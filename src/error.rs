use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum PointIndexError {
    /// Construction parameters that can never index anything, such as a
    /// zero-dimensional space or a zero-capacity queue.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A point whose dimensionality does not match the index it was offered
    /// to.
    #[error("Expected a point with {expected} dimensions, got {actual}.")]
    DimensionMismatch {
        /// The dimensionality the index was constructed with.
        expected: usize,
        /// The dimensionality of the offered point.
        actual: usize,
    },

    /// Quadrant subdivision was driven below the smallest representable side
    /// exponent, usually by a pair of near-coincident points.
    #[error("Cannot subdivide quadrants below side exponent {0}.")]
    PrecisionExhausted(i32),

    /// A nearest-neighbor query needs at least one indexed point.
    #[error("Nearest-neighbor query on an empty index.")]
    EmptyIndex,
}

pub type Result<T> = std::result::Result<T, PointIndexError>;
