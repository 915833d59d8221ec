//! Post-solve suppression of warp components.

use crate::{Real, TpsCoefficients, TpsSolverInput};
use nalgebra::SVector;

impl<T: Real, const D: usize> TpsCoefficients<T, D> {
    /// Zeroes the constant term `a1`.
    pub fn remove_translation(&mut self) {
        self.a1 = SVector::zeros();
    }

    /// Scales every linear term to unit length, keeping its direction.
    ///
    /// A zero-length term is left at zero.
    pub fn normalize_linear_terms(&mut self) {
        for mut column in self.linear.column_iter_mut() {
            let _ = column.try_normalize_mut(T::zero());
        }
    }

    /// Replaces linear term `k` with `e_k * |a(k+2)|`.
    ///
    /// Cross-axis components are dropped and each term keeps only its
    /// magnitude. The terms are not re-orthogonalized.
    pub fn axis_align_linear_terms(&mut self) {
        for (axis, mut column) in self.linear.column_iter_mut().enumerate() {
            let magnitude = column.norm();
            column.fill(T::zero());
            column[axis] = magnitude;
        }
    }

    /// Drops every radial-basis term, leaving a pure affine warp.
    pub fn remove_non_affine(&mut self) {
        self.non_affine_terms.clear();
    }
}

impl<T: Real, const D: usize> TpsSolverInput<T, D> {
    /// Strips the components this input disables from `coefficients`.
    ///
    /// Steps run in a fixed order, since scale and rotation suppression
    /// rewrite the same terms:
    ///
    /// 1. translation off: `a1 = 0`
    /// 2. scale off: each linear term normalized to unit length
    /// 3. rotation off: each linear term axis-aligned, keeping its magnitude
    /// 4. non-affine warp off: all radial-basis terms removed
    ///
    /// With both scale and rotation off, step 3 sees unit-length terms and
    /// the linear part becomes the identity.
    pub fn apply_modifiers(&self, coefficients: &mut TpsCoefficients<T, D>) {
        if !self.apply_affine_translation {
            coefficients.remove_translation();
        }
        if !self.apply_affine_scale {
            coefficients.normalize_linear_terms();
        }
        if !self.apply_affine_rotation {
            coefficients.axis_align_linear_terms();
        }
        if !self.apply_non_affine_warp {
            coefficients.remove_non_affine();
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use crate::{NonAffineTerm, TpsCoefficients3D, TpsSolverInput3D};
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Point3, Vector3};

    fn sample() -> TpsCoefficients3D {
        TpsCoefficients3D {
            a1: Vector3::new(1.0, 2.0, 3.0),
            // columns a2 = (3, 4, 0), a3 = (0, 2, 0), a4 = (0, 0, 0)
            linear: Matrix3::new(3.0, 0.0, 0.0, 4.0, 2.0, 0.0, 0.0, 0.0, 0.0),
            non_affine_terms: vec![NonAffineTerm::new(
                Vector3::new(0.1, 0.2, 0.3),
                Point3::origin(),
            )],
        }
    }

    #[test]
    fn test_all_enabled_is_noop() {
        let mut coefs = sample();
        TpsSolverInput3D::default().apply_modifiers(&mut coefs);
        assert_eq!(coefs, sample());
    }

    #[test]
    fn test_translation_off() {
        let mut coefs = sample();
        TpsSolverInput3D::default()
            .with_affine_translation(false)
            .apply_modifiers(&mut coefs);
        assert_eq!(coefs.a1, Vector3::zeros());
        assert_eq!(coefs.linear, sample().linear);
    }

    #[test]
    fn test_scale_off_normalizes_and_keeps_zero_column() {
        let mut coefs = sample();
        TpsSolverInput3D::default()
            .with_affine_scale(false)
            .apply_modifiers(&mut coefs);

        assert_relative_eq!(coefs.linear_term(0), Vector3::new(0.6, 0.8, 0.0), epsilon = 1e-12);
        assert_relative_eq!(coefs.linear_term(1), Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_eq!(coefs.linear_term(2), Vector3::zeros());
        assert!(coefs.linear.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_rotation_off_axis_aligns() {
        let mut coefs = sample();
        TpsSolverInput3D::default()
            .with_affine_rotation(false)
            .apply_modifiers(&mut coefs);

        assert_relative_eq!(coefs.linear_term(0), Vector3::new(5.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(coefs.linear_term(1), Vector3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
        assert_eq!(coefs.linear_term(2), Vector3::zeros());
    }

    #[test]
    fn test_scale_and_rotation_off_order() {
        let mut coefs = sample();
        TpsSolverInput3D::default()
            .with_affine_scale(false)
            .with_affine_rotation(false)
            .apply_modifiers(&mut coefs);

        // normalization runs first, so aligned magnitudes are 1 (or 0)
        assert_relative_eq!(coefs.linear_term(0), Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(coefs.linear_term(1), Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_eq!(coefs.linear_term(2), Vector3::zeros());
    }

    #[test]
    fn test_non_affine_off() {
        let mut coefs = sample();
        TpsSolverInput3D::default()
            .with_non_affine_warp(false)
            .apply_modifiers(&mut coefs);
        assert!(coefs.is_affine());
        assert_eq!(coefs.a1, sample().a1);
    }
}
