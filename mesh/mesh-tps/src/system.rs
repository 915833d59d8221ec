//! Assembly of the TPS linear system.
//!
//! A TPS warp `f(p) = a1 + A·p + SUM{ wi * U(ci, p) }` is linear in its
//! coefficients. Requiring `f(source_i) = destination_i` for every pair,
//! together with the side conditions `SUM{ wi } = 0` and
//! `SUM{ wi * source_i } = 0`, gives the square system
//!
//! ```text
//! | K   P | |w|   |v|
//! | Pᵀ  0 | |a| = |0|
//! ```
//!
//! where `K[i][j] = U(source_i, source_j)` and row `i` of `P` is
//! `[1, source_i.x, source_i.y (, source_i.z)]`. The system is solved once
//! per output axis, with `v` holding that axis of every destination.

use crate::{Landmarks, Real, TpsDimension, kernel_for};
use nalgebra::{Const, DMatrix, DVector};

/// The assembled `(n+D+1) × (n+D+1)` system for `n` landmark pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem<T: Real, const D: usize> {
    /// The matrix `L = [[K, P], [Pᵀ, 0]]`.
    pub matrix: DMatrix<T>,
    /// One right-hand side per output axis: destinations padded with `D + 1` zeros.
    pub rhs: [DVector<T>; D],
}

impl<T: Real, const D: usize> LinearSystem<T, D>
where
    Const<D>: TpsDimension,
{
    /// Builds the system for the given landmarks.
    ///
    /// Returns `None` when there are no landmarks: an empty system is
    /// degenerate and the caller should fall back to the identity warp.
    ///
    /// # Examples
    ///
    /// ```
    /// use mesh_tps::{LandmarkPair, LinearSystem};
    /// use nalgebra::Point3;
    ///
    /// let pairs = [
    ///     LandmarkPair::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)),
    ///     LandmarkPair::new(Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)),
    /// ];
    /// let system = LinearSystem::assemble(&pairs[..]).unwrap();
    /// assert_eq!(system.matrix.shape(), (6, 6));
    /// assert_eq!(system.num_pairs(), 2);
    ///
    /// let empty: [LandmarkPair<f64, 3>; 0] = [];
    /// assert!(LinearSystem::assemble(&empty[..]).is_none());
    /// ```
    #[must_use]
    pub fn assemble<L>(landmarks: &L) -> Option<Self>
    where
        L: Landmarks<T, D> + ?Sized,
    {
        let n = landmarks.len();
        if n == 0 {
            return None;
        }

        let size = n + D + 1;
        let kernel = kernel_for::<D>();
        let mut matrix = DMatrix::<T>::zeros(size, size);

        // K (upper-left), filled symmetrically
        for row in 0..n {
            let pi = landmarks.source(row);
            for col in row..n {
                let u = kernel.evaluate(&pi, &landmarks.source(col));
                matrix[(row, col)] = u;
                matrix[(col, row)] = u;
            }
        }

        // P (upper-right) and Pᵀ (lower-left); the lower-right block stays zero
        for i in 0..n {
            let p = landmarks.source(i);
            matrix[(i, n)] = T::one();
            matrix[(n, i)] = T::one();
            for axis in 0..D {
                matrix[(i, n + 1 + axis)] = p[axis];
                matrix[(n + 1 + axis, i)] = p[axis];
            }
        }

        let rhs = std::array::from_fn(|axis| {
            let mut v = DVector::<T>::zeros(size);
            for i in 0..n {
                v[i] = landmarks.destination(i)[axis];
            }
            v
        });

        Some(Self { matrix, rhs })
    }

    /// Number of landmark pairs the system was built from.
    #[inline]
    #[must_use]
    pub fn num_pairs(&self) -> usize {
        self.matrix.nrows() - (D + 1)
    }
}
