//! Landmark-to-coefficients entry points.

use crate::{
    Landmarks, LinearSystem, Real, StridedLandmarks, StridedPoints, TpsCoefficients, TpsDimension,
    TpsResult, TpsSolverInput,
};
use nalgebra::Const;
use tracing::debug;

/// Solves the TPS coefficients for `input`, then strips the components its
/// flags disable.
///
/// An input without landmarks yields the identity warp.
///
/// # Errors
///
/// Returns [`TpsError::DegenerateSystem`](crate::TpsError::DegenerateSystem)
/// if the system cannot be factorized, which only happens for non-finite
/// landmark coordinates.
///
/// # Examples
///
/// ```
/// use mesh_tps::{LandmarkPair, TpsSolverInput2D, solve_coefficients};
/// use nalgebra::Point2;
///
/// let input = TpsSolverInput2D::new(vec![
///     LandmarkPair::new(Point2::new(0.0, 0.0), Point2::new(0.0, 0.0)),
///     LandmarkPair::new(Point2::new(1.0, 0.0), Point2::new(1.0, 0.0)),
///     LandmarkPair::new(Point2::new(0.0, 1.0), Point2::new(0.0, 1.0)),
///     LandmarkPair::new(Point2::new(1.0, 1.0), Point2::new(1.2, 1.3)),
/// ]);
/// let coefs = solve_coefficients(&input).unwrap();
///
/// let warped = coefs.warp_point(&Point2::new(1.0, 1.0));
/// assert!((warped - Point2::new(1.2, 1.3)).norm() < 1e-9);
/// ```
pub fn solve_coefficients<T: Real, const D: usize>(
    input: &TpsSolverInput<T, D>,
) -> TpsResult<TpsCoefficients<T, D>>
where
    Const<D>: TpsDimension,
{
    let mut coefficients = solve_landmarks(input.landmarks.as_slice())?;
    input.apply_modifiers(&mut coefficients);
    Ok(coefficients)
}

/// Solves the TPS coefficients straight from two strided views.
///
/// The views are read in place, without first collecting landmark pairs.
/// No affine modifiers are applied.
///
/// # Errors
///
/// - [`TpsError::LandmarkCountMismatch`](crate::TpsError::LandmarkCountMismatch)
///   if the views hold different numbers of points
/// - [`TpsError::DegenerateSystem`](crate::TpsError::DegenerateSystem) if the
///   system cannot be factorized
///
/// # Examples
///
/// ```
/// use mesh_tps::{StridedPoints, solve_coefficients_strided};
/// use nalgebra::Point3;
///
/// // [sx, sy, sz, dx, dy, dz] per landmark
/// let data = [
///     0.0, 0.0, 0.0, 1.0, 0.0, 0.0,
///     1.0, 0.0, 0.0, 2.0, 0.0, 0.0,
///     0.0, 1.0, 0.0, 1.0, 1.0, 0.0,
///     0.0, 0.0, 1.0, 1.0, 0.0, 1.0,
/// ];
/// let (sources, destinations) = StridedPoints::<f64, 3>::interleaved_pairs(&data).unwrap();
/// let coefs = solve_coefficients_strided(sources, destinations).unwrap();
///
/// let moved = coefs.warp_point(&Point3::new(0.5, 0.5, 0.5));
/// assert!((moved - Point3::new(1.5, 0.5, 0.5)).norm() < 1e-9);
/// ```
pub fn solve_coefficients_strided<T: Real, const D: usize>(
    sources: StridedPoints<'_, T, D>,
    destinations: StridedPoints<'_, T, D>,
) -> TpsResult<TpsCoefficients<T, D>>
where
    Const<D>: TpsDimension,
{
    let landmarks = StridedLandmarks::new(sources, destinations)?;
    solve_landmarks(&landmarks)
}

/// Solves the unmodified TPS coefficients for any landmark source.
///
/// # Errors
///
/// Returns [`TpsError::DegenerateSystem`](crate::TpsError::DegenerateSystem)
/// if the system cannot be factorized.
pub fn solve_landmarks<T, const D: usize, L>(landmarks: &L) -> TpsResult<TpsCoefficients<T, D>>
where
    T: Real,
    L: Landmarks<T, D> + ?Sized,
    Const<D>: TpsDimension,
{
    let Some(system) = LinearSystem::assemble(landmarks) else {
        debug!(dimension = D, "No landmarks, using identity warp");
        return Ok(TpsCoefficients::identity());
    };

    debug!(
        pairs = landmarks.len(),
        dimension = D,
        size = system.matrix.nrows(),
        "Assembled TPS system"
    );

    let solution = system.solve()?;
    Ok(TpsCoefficients::from_solution(landmarks, &solution))
}
