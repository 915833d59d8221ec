//! Error types for thin-plate spline operations.

use thiserror::Error;

/// Errors that can occur while building or solving a TPS warp.
///
/// An empty landmark set is not an error: it solves to the identity warp.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TpsError {
    /// The raw source and destination views hold different point counts.
    #[error("landmark count mismatch: {sources} source points, {destinations} destination points")]
    LandmarkCountMismatch {
        /// Number of source points.
        sources: usize,
        /// Number of destination points.
        destinations: usize,
    },

    /// A strided view was given a stride smaller than one point.
    #[error("stride {stride} is smaller than the point dimension {dimension}")]
    InvalidStride {
        /// The rejected stride.
        stride: usize,
        /// The number of coordinates per point.
        dimension: usize,
    },

    /// A strided view would read past the end of its buffer.
    #[error("strided view needs {required} elements but the buffer holds {available}")]
    ViewOutOfBounds {
        /// Elements needed to hold the last point.
        required: usize,
        /// Elements actually available.
        available: usize,
    },

    /// The factorization of the TPS system did not complete.
    #[error("TPS system is degenerate: {0}")]
    DegenerateSystem(String),
}

/// Result type for TPS operations.
pub type TpsResult<T> = Result<T, TpsError>;
