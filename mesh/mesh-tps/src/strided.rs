//! Zero-copy point views over flat coordinate buffers.
//!
//! Landmarks frequently arrive as one flat buffer of interleaved
//! coordinates (`[sx0, sy0, sz0, dx0, dy0, dz0, sx1, ...]`). A
//! [`StridedPoints`] view reads points straight out of such a buffer using
//! an `(offset, stride, len)` triple, so the solver can consume it without
//! first copying into [`LandmarkPair`](crate::LandmarkPair)s.

use crate::{Landmarks, Real, TpsDimension, TpsError, TpsResult};
use nalgebra::{Const, Point};

/// A bounds-checked view of `len` points of dimension `D` inside a flat
/// buffer.
///
/// Point `i` occupies `data[offset + i * stride .. offset + i * stride + D]`.
///
/// # Examples
///
/// ```
/// use mesh_tps::StridedPoints;
/// use nalgebra::Point2;
///
/// // x, y, and an unrelated third value per record
/// let data = [1.0, 2.0, 99.0, 3.0, 4.0, 99.0];
/// let view = StridedPoints::<f64, 2>::new(&data, 0, 3, 2).unwrap();
///
/// assert_eq!(view.len(), 2);
/// assert_eq!(view.get(1), Some(Point2::new(3.0, 4.0)));
/// assert_eq!(view.get(2), None);
/// ```
///
/// Only 2D and 3D views exist, so a zero-dimensional view cannot be built:
///
/// ```compile_fail
/// use mesh_tps::StridedPoints;
///
/// let data: [f64; 0] = [];
/// let _ = StridedPoints::<f64, 0>::packed(&data);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StridedPoints<'a, T, const D: usize> {
    data: &'a [T],
    offset: usize,
    stride: usize,
    len: usize,
}

impl<'a, T: Real, const D: usize> StridedPoints<'a, T, D>
where
    Const<D>: TpsDimension,
{
    /// Creates a view of `len` points starting at `offset`, `stride` elements apart.
    ///
    /// # Errors
    ///
    /// - [`TpsError::InvalidStride`] if `stride < D` (points would overlap)
    /// - [`TpsError::ViewOutOfBounds`] if the last point would end past `data`
    pub fn new(data: &'a [T], offset: usize, stride: usize, len: usize) -> TpsResult<Self> {
        if stride < D {
            return Err(TpsError::InvalidStride {
                stride,
                dimension: D,
            });
        }

        if len > 0 {
            let required = (len - 1)
                .checked_mul(stride)
                .and_then(|n| n.checked_add(offset))
                .and_then(|n| n.checked_add(D))
                .unwrap_or(usize::MAX);
            if required > data.len() {
                return Err(TpsError::ViewOutOfBounds {
                    required,
                    available: data.len(),
                });
            }
        }

        Ok(Self {
            data,
            offset,
            stride,
            len,
        })
    }

    /// Views a tightly packed buffer `[x0, y0, (z0), x1, ...]`.
    ///
    /// # Errors
    ///
    /// Returns [`TpsError::ViewOutOfBounds`] if `data.len()` is not a multiple of `D`.
    pub fn packed(data: &'a [T]) -> TpsResult<Self> {
        if data.len() % D != 0 {
            return Err(TpsError::ViewOutOfBounds {
                required: data.len().div_ceil(D) * D,
                available: data.len(),
            });
        }
        Self::new(data, 0, D, data.len() / D)
    }

    /// Splits an interleaved landmark buffer into source and destination views.
    ///
    /// The buffer holds one record of `2 * D` values per landmark: the
    /// source coordinates followed by the destination coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`TpsError::ViewOutOfBounds`] if `data.len()` is not a multiple of `2 * D`.
    pub fn interleaved_pairs(data: &'a [T]) -> TpsResult<(Self, Self)> {
        let record = 2 * D;
        if data.len() % record != 0 {
            return Err(TpsError::ViewOutOfBounds {
                required: data.len().div_ceil(record) * record,
                available: data.len(),
            });
        }
        let len = data.len() / record;
        Ok((Self::new(data, 0, record, len)?, Self::new(data, D, record, len)?))
    }

    /// Number of points in the view.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the view holds no points.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns point `index`, or `None` if it is out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Point<T, D>> {
        (index < self.len).then(|| self.point(index))
    }

    /// Returns point `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    #[must_use]
    pub fn point(&self, index: usize) -> Point<T, D> {
        assert!(index < self.len, "point index {index} out of range for view of {}", self.len);
        let start = self.offset + index * self.stride;
        Point::from_slice(&self.data[start..start + D])
    }

    /// Iterates over the points in order.
    pub fn iter(&self) -> impl Iterator<Item = Point<T, D>> + 'a {
        let view = *self;
        (0..view.len).map(move |i| view.point(i))
    }
}

/// Source and destination views of equal length, read as landmark pairs.
#[derive(Debug, Clone, Copy)]
pub struct StridedLandmarks<'a, T, const D: usize> {
    sources: StridedPoints<'a, T, D>,
    destinations: StridedPoints<'a, T, D>,
}

impl<'a, T: Real, const D: usize> StridedLandmarks<'a, T, D>
where
    Const<D>: TpsDimension,
{
    /// Pairs up two views.
    ///
    /// # Errors
    ///
    /// Returns [`TpsError::LandmarkCountMismatch`] if the views differ in length.
    pub fn new(
        sources: StridedPoints<'a, T, D>,
        destinations: StridedPoints<'a, T, D>,
    ) -> TpsResult<Self> {
        if sources.len() != destinations.len() {
            return Err(TpsError::LandmarkCountMismatch {
                sources: sources.len(),
                destinations: destinations.len(),
            });
        }
        Ok(Self {
            sources,
            destinations,
        })
    }
}

impl<T: Real, const D: usize> Landmarks<T, D> for StridedLandmarks<'_, T, D>
where
    Const<D>: TpsDimension,
{
    #[inline]
    fn len(&self) -> usize {
        self.sources.len()
    }

    #[inline]
    fn source(&self, index: usize) -> Point<T, D> {
        self.sources.point(index)
    }

    #[inline]
    fn destination(&self, index: usize) -> Point<T, D> {
        self.destinations.point(index)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nalgebra::{Point2, Point3};

    #[test]
    fn test_packed_view() {
        let data = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let view = StridedPoints::<f64, 3>::packed(&data).unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(view.point(0), Point3::new(0.0, 1.0, 2.0));
        assert_eq!(view.point(1), Point3::new(3.0, 4.0, 5.0));
        assert_eq!(view.iter().count(), 2);
    }

    #[test]
    fn test_packed_rejects_ragged_buffer() {
        let data = [0.0, 1.0, 2.0, 3.0];
        let err = StridedPoints::<f64, 3>::packed(&data).unwrap_err();
        assert_eq!(
            err,
            TpsError::ViewOutOfBounds {
                required: 6,
                available: 4
            }
        );
    }

    #[test]
    fn test_stride_smaller_than_point() {
        let data = [0.0; 8];
        let err = StridedPoints::<f64, 3>::new(&data, 0, 2, 2).unwrap_err();
        assert_eq!(
            err,
            TpsError::InvalidStride {
                stride: 2,
                dimension: 3
            }
        );
    }

    #[test]
    fn test_view_past_end() {
        let data = [0.0; 5];
        // last point would need data[4..6]
        let err = StridedPoints::<f64, 2>::new(&data, 1, 3, 2).unwrap_err();
        assert_eq!(
            err,
            TpsError::ViewOutOfBounds {
                required: 6,
                available: 5
            }
        );
        assert!(StridedPoints::<f64, 2>::new(&[0.0; 6], 1, 3, 2).is_ok());
    }

    #[test]
    fn test_empty_view_ignores_offset() {
        let data: [f64; 0] = [];
        let view = StridedPoints::<f64, 2>::new(&data, 10, 4, 0).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.get(0), None);
    }

    #[test]
    fn test_interleaved_pairs() {
        let data = [
            0.0, 0.0, 10.0, 10.0, // pair 0
            1.0, 2.0, 11.0, 12.0, // pair 1
        ];
        let (sources, destinations) = StridedPoints::<f64, 2>::interleaved_pairs(&data).unwrap();
        assert_eq!(sources.point(1), Point2::new(1.0, 2.0));
        assert_eq!(destinations.point(0), Point2::new(10.0, 10.0));
        assert_eq!(destinations.point(1), Point2::new(11.0, 12.0));

        let landmarks = StridedLandmarks::new(sources, destinations).unwrap();
        assert_eq!(landmarks.len(), 2);
        assert_eq!(landmarks.source(0), Point2::new(0.0, 0.0));
        assert_eq!(landmarks.destination(1), Point2::new(11.0, 12.0));
    }

    #[test]
    fn test_mismatched_views() {
        let a = [0.0; 9];
        let b = [0.0; 6];
        let sources = StridedPoints::<f64, 3>::packed(&a).unwrap();
        let destinations = StridedPoints::<f64, 3>::packed(&b).unwrap();
        let err = StridedLandmarks::new(sources, destinations).unwrap_err();
        assert_eq!(
            err,
            TpsError::LandmarkCountMismatch {
                sources: 3,
                destinations: 2
            }
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_point_out_of_range_panics() {
        let data = [0.0, 0.0];
        let view = StridedPoints::<f64, 2>::packed(&data).unwrap();
        let _ = view.point(1);
    }
}
