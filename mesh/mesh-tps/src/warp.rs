//! Bulk application of a solved warp.

use crate::{Real, TpsCoefficients, TpsDimension, WarpParams};
use nalgebra::{Const, Point};
use rayon::prelude::*;
use tracing::debug;

/// Runs `f` on every element, on the rayon pool once `items` reaches
/// `parallel_threshold` elements.
///
/// Each element is visited exactly once and only by `f`, so both paths
/// produce identical results.
pub(crate) fn for_each_element<E, F>(items: &mut [E], parallel_threshold: usize, f: F)
where
    E: Send,
    F: Fn(&mut E) + Send + Sync,
{
    if items.len() >= parallel_threshold {
        items.par_iter_mut().for_each(f);
    } else {
        items.iter_mut().for_each(f);
    }
}

/// Warps a copy of `points`.
///
/// Element `i` of the result is
/// `coefficients.warp_point_blended(&points[i], params.blending_factor)`.
///
/// # Examples
///
/// ```
/// use mesh_tps::{TpsCoefficients2D, WarpParams, warp_points};
/// use nalgebra::{Point2, Vector2};
///
/// let shift = TpsCoefficients2D {
///     a1: Vector2::new(2.0, 0.0),
///     ..TpsCoefficients2D::identity()
/// };
/// let points = [Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
///
/// let half = warp_points(&shift, &points, &WarpParams::default().with_blending_factor(0.5));
/// assert_eq!(half, vec![Point2::new(1.0, 0.0), Point2::new(2.0, 1.0)]);
/// ```
#[must_use]
pub fn warp_points<T: Real, const D: usize>(
    coefficients: &TpsCoefficients<T, D>,
    points: &[Point<T, D>],
    params: &WarpParams<T>,
) -> Vec<Point<T, D>>
where
    Const<D>: TpsDimension,
{
    let mut warped = points.to_vec();
    warp_points_in_place(coefficients, &mut warped, params);
    warped
}

/// Warps `points` in place.
pub fn warp_points_in_place<T: Real, const D: usize>(
    coefficients: &TpsCoefficients<T, D>,
    points: &mut [Point<T, D>],
    params: &WarpParams<T>,
) where
    Const<D>: TpsDimension,
{
    let blend = params.blending_factor;
    debug!(
        points = points.len(),
        terms = coefficients.non_affine_terms.len(),
        parallel = params.is_parallel_for(points.len()),
        "Warping points"
    );

    for_each_element(points, params.parallel_threshold, |p| {
        *p = coefficients.warp_point_blended(p, blend);
    });
}
