//! Solved TPS coefficients and their evaluation.

use crate::landmark::write_components;
use crate::{Landmarks, Real, TpsDimension, kernel_for};
use nalgebra::{Const, DVector, Point, SMatrix, SVector};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One radial-basis term `weight * U(control_point, p)` of the TPS equation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "T: Real + Serialize",
        deserialize = "T: Real + Deserialize<'de>"
    ))
)]
pub struct NonAffineTerm<T: Real, const D: usize> {
    /// Per-axis weight `wi`.
    pub weight: SVector<T, D>,
    /// The source landmark this term is centered on.
    pub control_point: Point<T, D>,
}

impl<T: Real, const D: usize> NonAffineTerm<T, D> {
    /// Creates a term.
    #[inline]
    #[must_use]
    pub const fn new(weight: SVector<T, D>, control_point: Point<T, D>) -> Self {
        Self {
            weight,
            control_point,
        }
    }
}

impl<T: Real, const D: usize> fmt::Display for NonAffineTerm<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NonAffineTerm{D}D{{weight = ")?;
        write_components(f, self.weight.as_slice())?;
        f.write_str(", control_point = ")?;
        write_components(f, self.control_point.coords.as_slice())?;
        f.write_str("}")
    }
}

/// The closed-form coefficients of one TPS warp.
///
/// The warp evaluates
///
/// ```text
/// f(p) = a1 + linear · p + SUM{ wi * U(controlPoint_i, p) }
/// ```
///
/// Column `k` of `linear` is the coefficient of input axis `k`, i.e. the
/// literature's `a2` (x), `a3` (y) and, in 3D, `a4` (z).
///
/// The default value is the identity warp.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "T: Real + Serialize",
        deserialize = "T: Real + Deserialize<'de>"
    ))
)]
pub struct TpsCoefficients<T: Real, const D: usize> {
    /// Constant term.
    pub a1: SVector<T, D>,
    /// Linear terms, one column per input axis.
    pub linear: SMatrix<T, D, D>,
    /// Radial-basis terms in landmark order.
    pub non_affine_terms: Vec<NonAffineTerm<T, D>>,
}

/// Coefficients of a 2D warp.
pub type TpsCoefficients2D<T = f64> = TpsCoefficients<T, 2>;

/// Coefficients of a 3D warp.
pub type TpsCoefficients3D<T = f64> = TpsCoefficients<T, 3>;

impl<T: Real, const D: usize> Default for TpsCoefficients<T, D> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real, const D: usize> TpsCoefficients<T, D> {
    /// The identity warp: zero translation, identity linear part, no terms.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            a1: SVector::zeros(),
            linear: SMatrix::identity(),
            non_affine_terms: Vec::new(),
        }
    }

    /// Unpacks per-axis solution vectors into coefficients.
    ///
    /// `solution[k]` is the solved vector for output axis `k`, laid out as
    /// `[w_0 .. w_{n-1}, a1, a2, .., a(D+1)]`. Control points are taken
    /// from the landmark sources, in order.
    ///
    /// # Panics
    ///
    /// Panics if a solution vector is shorter than `landmarks.len() + D + 1`.
    #[must_use]
    pub fn from_solution<L>(landmarks: &L, solution: &[DVector<T>; D]) -> Self
    where
        L: Landmarks<T, D> + ?Sized,
    {
        let n = landmarks.len();

        let a1 = SVector::from_fn(|axis, _| solution[axis][n]);
        let linear = SMatrix::from_fn(|axis, input_axis| solution[axis][n + 1 + input_axis]);
        let non_affine_terms = (0..n)
            .map(|i| {
                NonAffineTerm::new(
                    SVector::from_fn(|axis, _| solution[axis][i]),
                    landmarks.source(i),
                )
            })
            .collect();

        Self {
            a1,
            linear,
            non_affine_terms,
        }
    }

    /// Coefficient of input axis `axis` (`a2` for x, `a3` for y, `a4` for z).
    ///
    /// # Panics
    ///
    /// Panics if `axis >= D`.
    #[inline]
    #[must_use]
    pub fn linear_term(&self, axis: usize) -> SVector<T, D> {
        self.linear.column(axis).into_owned()
    }

    /// Returns `true` if the warp has no radial-basis terms.
    #[inline]
    #[must_use]
    pub fn is_affine(&self) -> bool {
        self.non_affine_terms.is_empty()
    }
}

impl<T: Real, const D: usize> TpsCoefficients<T, D>
where
    Const<D>: TpsDimension,
{
    /// Evaluates the warp at `p`.
    ///
    /// Terms are accumulated in their stored order, so the result is
    /// deterministic for a given coefficient set.
    ///
    /// # Examples
    ///
    /// ```
    /// use mesh_tps::TpsCoefficients3D;
    /// use nalgebra::Point3;
    ///
    /// let identity = TpsCoefficients3D::<f64>::identity();
    /// let p = Point3::new(1.0, -2.0, 3.5);
    /// assert_eq!(identity.warp_point(&p), p);
    /// ```
    #[must_use]
    pub fn warp_point(&self, p: &Point<T, D>) -> Point<T, D> {
        let kernel = kernel_for::<D>();
        let mut rv = self.a1 + self.linear * p.coords;
        for term in &self.non_affine_terms {
            rv += term.weight * kernel.evaluate(&term.control_point, p);
        }
        Point::from(rv)
    }

    /// Evaluates the warp at `p` and linearly blends towards it.
    ///
    /// Returns `p + blend * (warp(p) - p)`. A factor of exactly `0` returns
    /// `p` and exactly `1` returns [`warp_point`](Self::warp_point), both
    /// bit for bit. Factors outside `[0, 1]` extrapolate and are not clamped.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn warp_point_blended(&self, p: &Point<T, D>, blend: T) -> Point<T, D> {
        if blend == T::zero() {
            return *p;
        }
        let warped = self.warp_point(p);
        if blend == T::one() {
            return warped;
        }
        p + (warped - p) * blend
    }
}

impl<T: Real, const D: usize> fmt::Display for TpsCoefficients<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TpsCoefficients{D}D{{a1 = ")?;
        write_components(f, self.a1.as_slice())?;
        for axis in 0..D {
            write!(f, ", a{} = ", axis + 2)?;
            write_components(f, self.linear_term(axis).as_slice())?;
        }
        for (i, term) in self.non_affine_terms.iter().enumerate() {
            write!(f, ", w{i} = {term}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::LandmarkPair;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix2, Matrix3, Point2, Point3, Vector2, Vector3};

    #[test]
    fn test_default_is_identity() {
        let coefs = TpsCoefficients3D::<f64>::default();
        assert_eq!(coefs.a1, Vector3::zeros());
        assert_eq!(coefs.linear_term(0), Vector3::x());
        assert_eq!(coefs.linear_term(1), Vector3::y());
        assert_eq!(coefs.linear_term(2), Vector3::z());
        assert!(coefs.is_affine());
    }

    #[test]
    fn test_from_solution_layout() {
        let pairs = [
            LandmarkPair::new(Point2::new(5.0, 6.0), Point2::new(0.0, 0.0)),
            LandmarkPair::new(Point2::new(7.0, 8.0), Point2::new(0.0, 0.0)),
        ];
        // [w0, w1, a1, a2, a3] per axis
        let solution = [
            DVector::from_vec(vec![0.1, 0.2, 1.0, 2.0, 3.0]),
            DVector::from_vec(vec![0.3, 0.4, 4.0, 5.0, 6.0]),
        ];
        let coefs = TpsCoefficients::from_solution(&pairs[..], &solution);

        assert_eq!(coefs.a1, Vector2::new(1.0, 4.0));
        assert_eq!(coefs.linear_term(0), Vector2::new(2.0, 5.0));
        assert_eq!(coefs.linear_term(1), Vector2::new(3.0, 6.0));
        assert_eq!(coefs.non_affine_terms.len(), 2);
        assert_eq!(coefs.non_affine_terms[0].weight, Vector2::new(0.1, 0.3));
        assert_eq!(coefs.non_affine_terms[1].weight, Vector2::new(0.2, 0.4));
        assert_eq!(coefs.non_affine_terms[0].control_point, Point2::new(5.0, 6.0));
        assert_eq!(coefs.non_affine_terms[1].control_point, Point2::new(7.0, 8.0));
    }

    #[test]
    fn test_affine_evaluation() {
        let coefs = TpsCoefficients2D {
            a1: Vector2::new(1.0, -1.0),
            linear: Matrix2::new(2.0, 0.5, 0.0, 3.0),
            non_affine_terms: Vec::new(),
        };
        // a1 + x * a2 + y * a3, with a2 = (2, 0), a3 = (0.5, 3)
        let out = coefs.warp_point(&Point2::new(1.0, 2.0));
        assert_relative_eq!(out.x, 1.0 + 2.0 + 1.0, epsilon = 1e-12);
        assert_relative_eq!(out.y, -1.0 + 0.0 + 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_non_affine_term_uses_dimension_kernel() {
        let mut coefs = TpsCoefficients3D::<f64>::identity();
        coefs.non_affine_terms.push(NonAffineTerm::new(
            Vector3::new(1.0, 0.0, 0.0),
            Point3::origin(),
        ));
        // 3D kernel is |r|: adds 5 to x at distance 5
        let out = coefs.warp_point(&Point3::new(0.0, 3.0, 4.0));
        assert_relative_eq!(out.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(out.y, 3.0, epsilon = 1e-12);

        let mut coefs = TpsCoefficients2D::<f64>::identity();
        coefs.non_affine_terms.push(NonAffineTerm::new(
            Vector2::new(0.0, 1.0),
            Point2::origin(),
        ));
        // 2D kernel is r² ln r²: r² = 4
        let out = coefs.warp_point(&Point2::new(2.0, 0.0));
        assert_relative_eq!(out.y, 4.0 * 4.0_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_blend_one_is_exact_warp() {
        // p + (w - p) rounds away from w here
        let coefs = TpsCoefficients3D {
            linear: Matrix3::identity() * -2.9,
            ..TpsCoefficients3D::<f64>::identity()
        };
        let p = Point3::new(0.1, 0.0, 0.0);
        let warped = coefs.warp_point(&p);
        assert_ne!(p + (warped - p), warped);
        assert_eq!(coefs.warp_point_blended(&p, 1.0), warped);
    }

    #[test]
    fn test_blend_zero_is_exact_identity() {
        let coefs = TpsCoefficients3D {
            a1: Vector3::new(f64::INFINITY, 0.0, 0.0),
            ..TpsCoefficients3D::<f64>::identity()
        };
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(coefs.warp_point_blended(&p, 0.0), p);
    }

    #[test]
    fn test_blend_endpoints() {
        let coefs = TpsCoefficients3D {
            a1: Vector3::new(1.0, 2.0, 3.0),
            ..TpsCoefficients3D::<f64>::identity()
        };
        let p = Point3::new(0.5, 0.5, 0.5);

        assert_eq!(coefs.warp_point_blended(&p, 0.0), p);
        assert_eq!(coefs.warp_point_blended(&p, 1.0), coefs.warp_point(&p));
        assert_relative_eq!(
            coefs.warp_point_blended(&p, 0.5),
            Point3::new(1.0, 1.5, 2.0),
            epsilon = 1e-12
        );
        // not clamped
        assert_relative_eq!(
            coefs.warp_point_blended(&p, 2.0),
            Point3::new(2.5, 4.5, 6.5),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_display() {
        let mut coefs = TpsCoefficients2D::<f64>::identity();
        coefs.non_affine_terms.push(NonAffineTerm::new(
            Vector2::new(0.5, -0.5),
            Point2::new(1.0, 2.0),
        ));
        assert_eq!(
            coefs.to_string(),
            "TpsCoefficients2D{a1 = (0, 0), a2 = (1, 0), a3 = (0, 1), \
             w0 = NonAffineTerm2D{weight = (0.5, -0.5), control_point = (1, 2)}}"
        );
    }
}
