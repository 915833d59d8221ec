//! Solver input and warp configuration.
//!
//! [`TpsSolverInput`] carries the landmarks and the affine-control flags
//! that shape the solved coefficients. [`WarpParams`] controls how solved
//! coefficients are applied to bulk point data.

use crate::{LandmarkPair, Real};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Element count at which bulk warps switch to parallel evaluation.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 8192;

/// Landmarks plus the flags controlling which parts of the warp are kept.
///
/// All flags default to `true` (the full warp). Disabling one strips that
/// component from the solved coefficients; see
/// [`apply_modifiers`](Self::apply_modifiers) for the exact rules.
///
/// # Examples
///
/// ```
/// use mesh_tps::{LandmarkPair, TpsSolverInput3D, solve_coefficients};
/// use nalgebra::Point3;
///
/// let input = TpsSolverInput3D::new(vec![
///     LandmarkPair::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)),
///     LandmarkPair::new(Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)),
/// ])
/// .with_affine_translation(false)
/// .with_non_affine_warp(false);
///
/// let coefs = solve_coefficients(&input).unwrap();
/// assert!(coefs.non_affine_terms.is_empty());
/// assert_eq!(coefs.a1.norm(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "T: Real + Serialize",
        deserialize = "T: Real + Deserialize<'de>"
    ))
)]
pub struct TpsSolverInput<T: Real, const D: usize> {
    /// Fully-paired landmarks, in order.
    pub landmarks: Vec<LandmarkPair<T, D>>,
    /// Keep the constant term `a1`.
    pub apply_affine_translation: bool,
    /// Keep the magnitude of the linear terms.
    pub apply_affine_scale: bool,
    /// Keep the cross-axis components of the linear terms.
    pub apply_affine_rotation: bool,
    /// Keep the radial-basis terms.
    pub apply_non_affine_warp: bool,
}

/// Solver input for 2D warps.
pub type TpsSolverInput2D<T = f64> = TpsSolverInput<T, 2>;

/// Solver input for 3D warps.
pub type TpsSolverInput3D<T = f64> = TpsSolverInput<T, 3>;

impl<T: Real, const D: usize> Default for TpsSolverInput<T, D> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Real, const D: usize> TpsSolverInput<T, D> {
    /// Creates an input that keeps every component of the warp.
    #[must_use]
    pub const fn new(landmarks: Vec<LandmarkPair<T, D>>) -> Self {
        Self {
            landmarks,
            apply_affine_translation: true,
            apply_affine_scale: true,
            apply_affine_rotation: true,
            apply_non_affine_warp: true,
        }
    }

    /// Replaces the landmarks.
    #[must_use]
    pub fn with_landmarks(mut self, landmarks: Vec<LandmarkPair<T, D>>) -> Self {
        self.landmarks = landmarks;
        self
    }

    /// Appends one landmark.
    #[must_use]
    pub fn with_landmark(mut self, landmark: LandmarkPair<T, D>) -> Self {
        self.landmarks.push(landmark);
        self
    }

    /// Sets whether the constant term is kept.
    #[must_use]
    pub fn with_affine_translation(mut self, enabled: bool) -> Self {
        self.apply_affine_translation = enabled;
        self
    }

    /// Sets whether the magnitude of the linear terms is kept.
    #[must_use]
    pub fn with_affine_scale(mut self, enabled: bool) -> Self {
        self.apply_affine_scale = enabled;
        self
    }

    /// Sets whether the cross-axis components of the linear terms are kept.
    #[must_use]
    pub fn with_affine_rotation(mut self, enabled: bool) -> Self {
        self.apply_affine_rotation = enabled;
        self
    }

    /// Sets whether the radial-basis terms are kept.
    #[must_use]
    pub fn with_non_affine_warp(mut self, enabled: bool) -> Self {
        self.apply_non_affine_warp = enabled;
        self
    }
}

impl<T: Real, const D: usize> fmt::Display for TpsSolverInput<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TpsSolverInput{D}D{{landmarks = [")?;
        for (i, pair) in self.landmarks.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{pair}")?;
        }
        write!(
            f,
            "], apply_affine_translation = {}, apply_affine_scale = {}, \
             apply_affine_rotation = {}, apply_non_affine_warp = {}}}",
            self.apply_affine_translation,
            self.apply_affine_scale,
            self.apply_affine_rotation,
            self.apply_non_affine_warp
        )
    }
}

/// Parameters for applying a warp to bulk point data.
///
/// # Examples
///
/// ```
/// use mesh_tps::WarpParams;
///
/// let params = WarpParams::<f64>::default().with_blending_factor(0.5);
/// assert_eq!(params.blending_factor, 0.5);
///
/// let single_threaded = WarpParams::<f64>::sequential();
/// assert_eq!(single_threaded.parallel_threshold, usize::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WarpParams<T = f64> {
    /// Interpolation between the input (`0`) and the full warp (`1`).
    ///
    /// Values outside `[0, 1]` extrapolate.
    pub blending_factor: T,
    /// Element count at or above which evaluation runs on the rayon pool.
    pub parallel_threshold: usize,
}

impl<T: Real> Default for WarpParams<T> {
    fn default() -> Self {
        Self {
            blending_factor: T::one(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl<T: Real> WarpParams<T> {
    /// Default parameters that never parallelize.
    #[must_use]
    pub fn sequential() -> Self {
        Self::default().with_parallel_threshold(usize::MAX)
    }

    /// Sets the blending factor.
    #[must_use]
    pub fn with_blending_factor(mut self, blending_factor: T) -> Self {
        self.blending_factor = blending_factor;
        self
    }

    /// Sets the parallel threshold. `0` always parallelizes.
    #[must_use]
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Returns `true` if `count` elements would be evaluated in parallel.
    #[inline]
    #[must_use]
    pub const fn is_parallel_for(&self, count: usize) -> bool {
        count >= self.parallel_threshold
    }
}

impl<T: Real> fmt::Display for WarpParams<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WarpParams{{blending_factor = {}, parallel_threshold = {}}}",
            self.blending_factor, self.parallel_threshold
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn test_input_defaults() {
        let input = TpsSolverInput2D::<f64>::default();
        assert!(input.landmarks.is_empty());
        assert!(input.apply_affine_translation);
        assert!(input.apply_affine_scale);
        assert!(input.apply_affine_rotation);
        assert!(input.apply_non_affine_warp);
    }

    #[test]
    fn test_input_builders() {
        let pair = LandmarkPair::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        let input = TpsSolverInput2D::default()
            .with_landmark(pair)
            .with_affine_scale(false)
            .with_affine_rotation(false);

        assert_eq!(input.landmarks, vec![pair]);
        assert!(input.apply_affine_translation);
        assert!(!input.apply_affine_scale);
        assert!(!input.apply_affine_rotation);
        assert!(input.apply_non_affine_warp);

        let replaced = input.clone().with_landmarks(Vec::new());
        assert!(replaced.landmarks.is_empty());
        assert_ne!(replaced, input);
    }

    #[test]
    fn test_input_display() {
        let input = TpsSolverInput2D::new(vec![LandmarkPair::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
        )])
        .with_non_affine_warp(false);

        assert_eq!(
            input.to_string(),
            "TpsSolverInput2D{landmarks = [LandmarkPair2D{source = (0, 0), destination = (1, 1)}], \
             apply_affine_translation = true, apply_affine_scale = true, \
             apply_affine_rotation = true, apply_non_affine_warp = false}"
        );
    }

    #[test]
    fn test_warp_params() {
        let params = WarpParams::<f32>::default();
        assert!((params.blending_factor - 1.0).abs() < f32::EPSILON);
        assert_eq!(params.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert!(!params.is_parallel_for(DEFAULT_PARALLEL_THRESHOLD - 1));
        assert!(params.is_parallel_for(DEFAULT_PARALLEL_THRESHOLD));

        let always = params.with_parallel_threshold(0);
        assert!(always.is_parallel_for(0));
        assert!(!WarpParams::<f64>::sequential().is_parallel_for(usize::MAX - 1));
    }

    #[test]
    fn test_warp_params_display() {
        let params = WarpParams::<f64>::default().with_blending_factor(0.25);
        assert_eq!(
            params.to_string(),
            "WarpParams{blending_factor = 0.25, parallel_threshold = 8192}"
        );
    }
}
