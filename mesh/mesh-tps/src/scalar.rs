//! Floating-point scalar abstraction.

use nalgebra::RealField;
use std::fmt;

/// A floating-point type the TPS engine can compute with.
///
/// Implemented for `f32` and `f64`.
pub trait Real: RealField + Copy + Send + Sync + fmt::Debug + fmt::Display {
    /// Smallest positive normal value of the type.
    fn min_positive() -> Self;

    /// Converts an element count into this scalar.
    fn from_count(count: usize) -> Self;
}

impl Real for f32 {
    #[inline]
    fn min_positive() -> Self {
        Self::MIN_POSITIVE
    }

    #[inline]
    #[allow(clippy::cast_precision_loss)]
    fn from_count(count: usize) -> Self {
        count as Self
    }
}

impl Real for f64 {
    #[inline]
    fn min_positive() -> Self {
        Self::MIN_POSITIVE
    }

    #[inline]
    #[allow(clippy::cast_precision_loss)]
    fn from_count(count: usize) -> Self {
        count as Self
    }
}
