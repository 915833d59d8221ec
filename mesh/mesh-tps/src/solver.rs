//! Dense solve of the TPS system.
//!
//! `L` is symmetric but indefinite, and becomes rank-deficient when
//! landmarks are duplicated, collinear (2D), coplanar (3D), or fewer than
//! `D + 1`. The solve therefore uses a singular value decomposition: it is
//! rank revealing and yields the minimum-norm least-squares solution when
//! `L` is singular. The decomposition is computed once and reused for
//! every output axis.

use crate::{LinearSystem, Real, TpsDimension, TpsError, TpsResult};
use nalgebra::{Const, DVector, SVD};
use tracing::{debug, warn};

/// Upper bound on SVD iterations per matrix row.
///
/// Bounds the decomposition when the system holds NaN or infinite entries,
/// which never converge.
const SVD_ITERATIONS_PER_ROW: usize = 100;

impl<T: Real, const D: usize> LinearSystem<T, D>
where
    Const<D>: TpsDimension,
{
    /// Solves `L · c_k = v_k` for every axis `k`.
    ///
    /// Each returned vector is laid out as `[w_0 .. w_{n-1}, a1, a2, .., a(D+1)]`
    /// for that axis. Singular values below `σ_max · ε · (n + D + 1)` are
    /// treated as zero.
    ///
    /// # Errors
    ///
    /// Returns [`TpsError::DegenerateSystem`] if the decomposition does not
    /// converge (typically NaN or infinite landmark coordinates).
    pub fn solve(&self) -> TpsResult<[DVector<T>; D]> {
        let size = self.matrix.nrows();
        let max_iterations = SVD_ITERATIONS_PER_ROW * size.max(10);

        let svd = SVD::try_new(
            self.matrix.clone(),
            true,
            true,
            T::default_epsilon(),
            max_iterations,
        )
        .ok_or_else(|| {
            TpsError::DegenerateSystem(format!(
                "SVD of the {size}x{size} system did not converge"
            ))
        })?;

        let max_singular = svd
            .singular_values
            .iter()
            .fold(T::zero(), |acc, &s| acc.max(s));
        let tolerance = max_singular * T::default_epsilon() * T::from_count(size);
        let rank = svd
            .singular_values
            .iter()
            .filter(|&&s| s > tolerance)
            .count();

        let pairs = self.num_pairs();
        if rank < size && pairs > D {
            warn!(
                pairs,
                size,
                rank,
                "TPS system is rank-deficient; duplicate or degenerate landmarks reduce warp quality"
            );
        } else {
            debug!(pairs, size, rank, "Factorized TPS system");
        }

        let mut solution: [DVector<T>; D] = std::array::from_fn(|_| DVector::zeros(size));
        for (axis, (out, rhs)) in solution.iter_mut().zip(&self.rhs).enumerate() {
            *out = svd.solve(rhs, tolerance).map_err(|e| {
                TpsError::DegenerateSystem(format!("solve failed for axis {axis}: {e}"))
            })?;
        }

        Ok(solution)
    }
}
