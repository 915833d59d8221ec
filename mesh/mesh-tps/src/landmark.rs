//! Landmark correspondences.

use crate::Real;
use nalgebra::Point;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A source-to-destination landmark correspondence.
///
/// The warp computed from a set of pairs maps every `source` exactly onto
/// its `destination`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "T: Real + Serialize",
        deserialize = "T: Real + Deserialize<'de>"
    ))
)]
pub struct LandmarkPair<T: Real, const D: usize> {
    /// Location in the source space.
    pub source: Point<T, D>,
    /// Location the source should be warped to.
    pub destination: Point<T, D>,
}

/// A 2D landmark pair.
pub type LandmarkPair2D<T = f64> = LandmarkPair<T, 2>;

/// A 3D landmark pair.
pub type LandmarkPair3D<T = f64> = LandmarkPair<T, 3>;

impl<T: Real, const D: usize> LandmarkPair<T, D> {
    /// Creates a landmark pair.
    #[inline]
    #[must_use]
    pub const fn new(source: Point<T, D>, destination: Point<T, D>) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// A pair whose destination equals its source.
    #[inline]
    #[must_use]
    pub const fn fixed(point: Point<T, D>) -> Self {
        Self::new(point, point)
    }
}

impl<T: Real, const D: usize> fmt::Display for LandmarkPair<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LandmarkPair{D}D{{source = ")?;
        write_components(f, self.source.coords.as_slice())?;
        f.write_str(", destination = ")?;
        write_components(f, self.destination.coords.as_slice())?;
        f.write_str("}")
    }
}

/// A landmark that may be missing its source or destination.
///
/// Editing front ends let users place one side of a correspondence before
/// the other. Only fully-paired landmarks take part in a warp; use
/// [`fully_paired`] to extract them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "T: Real + Serialize",
        deserialize = "T: Real + Deserialize<'de>"
    ))
)]
pub struct MaybeLandmarkPair<T: Real, const D: usize> {
    /// Source location, if placed.
    pub source: Option<Point<T, D>>,
    /// Destination location, if placed.
    pub destination: Option<Point<T, D>>,
}

impl<T: Real, const D: usize> MaybeLandmarkPair<T, D> {
    /// A landmark with only its source placed.
    #[inline]
    #[must_use]
    pub const fn with_source(source: Point<T, D>) -> Self {
        Self {
            source: Some(source),
            destination: None,
        }
    }

    /// A landmark with only its destination placed.
    #[inline]
    #[must_use]
    pub const fn with_destination(destination: Point<T, D>) -> Self {
        Self {
            source: None,
            destination: Some(destination),
        }
    }

    /// Returns `true` if both sides are placed.
    #[inline]
    #[must_use]
    pub const fn is_fully_paired(&self) -> bool {
        self.source.is_some() && self.destination.is_some()
    }

    /// Returns the complete pair, or `None` if either side is missing.
    #[inline]
    #[must_use]
    pub fn try_extract(&self) -> Option<LandmarkPair<T, D>> {
        self.source
            .zip(self.destination)
            .map(|(source, destination)| LandmarkPair::new(source, destination))
    }
}

impl<T: Real, const D: usize> Default for MaybeLandmarkPair<T, D> {
    fn default() -> Self {
        Self {
            source: None,
            destination: None,
        }
    }
}

impl<T: Real, const D: usize> From<LandmarkPair<T, D>> for MaybeLandmarkPair<T, D> {
    fn from(pair: LandmarkPair<T, D>) -> Self {
        Self {
            source: Some(pair.source),
            destination: Some(pair.destination),
        }
    }
}

/// Collects the fully-paired landmarks, preserving input order.
///
/// # Examples
///
/// ```
/// use mesh_tps::{MaybeLandmarkPair, fully_paired};
/// use nalgebra::Point3;
///
/// let landmarks = [
///     MaybeLandmarkPair::with_source(Point3::new(0.0, 0.0, 0.0)),
///     MaybeLandmarkPair {
///         source: Some(Point3::new(1.0, 0.0, 0.0)),
///         destination: Some(Point3::new(2.0, 0.0, 0.0)),
///     },
/// ];
///
/// let pairs = fully_paired(&landmarks);
/// assert_eq!(pairs.len(), 1);
/// assert_eq!(pairs[0].destination, Point3::new(2.0, 0.0, 0.0));
/// ```
pub fn fully_paired<'a, T, const D: usize, I>(landmarks: I) -> Vec<LandmarkPair<T, D>>
where
    T: Real,
    I: IntoIterator<Item = &'a MaybeLandmarkPair<T, D>>,
{
    landmarks
        .into_iter()
        .filter_map(MaybeLandmarkPair::try_extract)
        .collect()
}

/// Indexed access to an ordered set of landmark pairs.
///
/// This is the input seam of the linear-system builder. It lets the solver
/// read landmarks either from a slice of [`LandmarkPair`] or directly out
/// of a flat coordinate buffer (see [`StridedLandmarks`](crate::StridedLandmarks))
/// without copying.
pub trait Landmarks<T: Real, const D: usize> {
    /// Number of pairs.
    fn len(&self) -> usize;

    /// Returns `true` if there are no pairs.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Source point of pair `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn source(&self, index: usize) -> Point<T, D>;

    /// Destination point of pair `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn destination(&self, index: usize) -> Point<T, D>;
}

impl<T: Real, const D: usize> Landmarks<T, D> for [LandmarkPair<T, D>] {
    #[inline]
    fn len(&self) -> usize {
        <[LandmarkPair<T, D>]>::len(self)
    }

    #[inline]
    fn source(&self, index: usize) -> Point<T, D> {
        self[index].source
    }

    #[inline]
    fn destination(&self, index: usize) -> Point<T, D> {
        self[index].destination
    }
}

/// Writes `(c0, c1, ...)`.
pub(crate) fn write_components<T: fmt::Display>(f: &mut fmt::Formatter<'_>, components: &[T]) -> fmt::Result {
    f.write_str("(")?;
    for (i, c) in components.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str(")")
}
