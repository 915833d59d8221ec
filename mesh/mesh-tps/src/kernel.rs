//! Radial basis kernels.
//!
//! The kernel is the `U` term of the TPS equation:
//!
//! ```text
//! f(p) = a1 + a2*p.x + a3*p.y (+ a4*p.z) + SUM{ wi * U(controlPoint_i, p) }
//! ```
//!
//! The two supported dimensions use different kernels:
//!
//! | Dimension | Kernel | `U(r)` |
//! |-----------|--------|--------|
//! | 2D | [`RadialBasis::ThinPlate`] | `r² · ln(r²)` |
//! | 3D | [`RadialBasis::Magnitude`] | `|r|` |
//!
//! Bookstein's formulation uses `r² · ln(r²)` everywhere. The 3D
//! kernel follows Gunz, Mitteroecker & Bookstein ("Semilandmarks in Three
//! Dimensions"), which uses the plain distance. The two are not scalings
//! of each other.

use crate::Real;
use nalgebra::{Const, Point};

/// Radial basis kernel `U(controlPoint, p)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RadialBasis {
    /// Bookstein thin-plate kernel: `r² · ln(r²)`.
    ///
    /// At `r² == 0` this returns the smallest positive normal value of the
    /// scalar type instead of zero, so the result is never zero or NaN.
    ThinPlate,

    /// Euclidean distance: `|r|`.
    Magnitude,
}

impl RadialBasis {
    /// Evaluates the kernel between a control point and a query point.
    ///
    /// Symmetric in its two arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use mesh_tps::RadialBasis;
    /// use nalgebra::{Point2, Point3};
    ///
    /// let u = RadialBasis::ThinPlate.evaluate(&Point2::new(0.0_f64, 0.0), &Point2::new(2.0, 0.0));
    /// assert!((u - 4.0 * 4.0_f64.ln()).abs() < 1e-12);
    ///
    /// let u = RadialBasis::Magnitude.evaluate(&Point3::new(0.0_f64, 0.0, 0.0), &Point3::new(0.0, 3.0, 4.0));
    /// assert!((u - 5.0).abs() < 1e-12);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn evaluate<T: Real, const D: usize>(self, control_point: &Point<T, D>, p: &Point<T, D>) -> T {
        let diff = control_point - p;
        match self {
            Self::ThinPlate => {
                let r2 = diff.norm_squared();
                if r2 == T::zero() {
                    T::min_positive()
                } else {
                    r2 * r2.ln()
                }
            }
            Self::Magnitude => diff.norm(),
        }
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for nalgebra::Const<2> {}
    impl Sealed for nalgebra::Const<3> {}
}

/// A spatial dimension the TPS engine supports.
///
/// Implemented for `Const<2>` and `Const<3>` only, so generic code bounded
/// by `Const<D>: TpsDimension` is restricted to 2D and 3D at compile time.
pub trait TpsDimension: sealed::Sealed {
    /// The kernel used for this dimension.
    const KERNEL: RadialBasis;
}

impl TpsDimension for Const<2> {
    const KERNEL: RadialBasis = RadialBasis::ThinPlate;
}

impl TpsDimension for Const<3> {
    const KERNEL: RadialBasis = RadialBasis::Magnitude;
}

/// Returns the kernel used for dimension `D`.
#[inline]
#[must_use]
pub const fn kernel_for<const D: usize>() -> RadialBasis
where
    Const<D>: TpsDimension,
{
    <Const<D> as TpsDimension>::KERNEL
}
