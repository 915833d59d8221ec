//! Thin-plate spline (TPS) landmark warping.
//!
//! Given an ordered set of landmark pairs, this crate solves the closed-form
//! TPS warp that maps every source landmark exactly onto its destination
//! while bending the rest of space as little as possible. The solved warp
//! can then be evaluated at single points, applied to point sequences in
//! parallel, or applied to [`IndexedMesh`](mesh_types::IndexedMesh) vertex
//! positions.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with zero Bevy dependencies.
//!
//! # Quick Start
//!
//! ```
//! use mesh_tps::{LandmarkPair, TpsSolverInput3D, WarpParams, solve_coefficients, warp_mesh};
//! use mesh_types::unit_cube;
//! use nalgebra::Point3;
//!
//! // Pin four corners of the unit cube and pull the opposite one outwards
//! let input = TpsSolverInput3D::new(vec![
//!     LandmarkPair::fixed(Point3::new(0.0, 0.0, 0.0)),
//!     LandmarkPair::fixed(Point3::new(1.0, 0.0, 0.0)),
//!     LandmarkPair::fixed(Point3::new(0.0, 1.0, 0.0)),
//!     LandmarkPair::fixed(Point3::new(0.0, 0.0, 1.0)),
//!     LandmarkPair::new(Point3::new(1.0, 1.0, 1.0), Point3::new(1.5, 1.5, 1.5)),
//! ]);
//! let coefs = solve_coefficients(&input).unwrap();
//!
//! let warped = warp_mesh(&coefs, &unit_cube(), &WarpParams::default());
//! assert!((warped.vertices[6].position - Point3::new(1.5, 1.5, 1.5)).norm() < 1e-9);
//! ```
//!
//! # The Warp
//!
//! ```text
//! f(p) = a1 + a2*p.x + a3*p.y (+ a4*p.z) + SUM{ wi * U(controlPoint_i, p) }
//! ```
//!
//! | Dimension | Kernel `U` |
//! |-----------|------------|
//! | 2D | `r² · ln(r²)` |
//! | 3D | `|r|` |
//!
//! The coefficients come from one dense `(n + D + 1)²` linear system per
//! landmark set, factorized once by SVD and solved for each output axis.
//! Duplicate, collinear (2D) or coplanar (3D) landmarks make the system
//! rank-deficient; the solve still completes with the minimum-norm
//! least-squares coefficients, but the warp quality degrades silently.
//!
//! # Affine Control
//!
//! [`TpsSolverInput`] can strip parts of the solved warp:
//!
//! | Flag | Effect when `false` |
//! |------|---------------------|
//! | `apply_affine_translation` | `a1 = 0` |
//! | `apply_affine_scale` | linear terms normalized to unit length |
//! | `apply_affine_rotation` | linear terms axis-aligned, keeping magnitude |
//! | `apply_non_affine_warp` | radial-basis terms removed |

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod coefficients;
mod error;
mod kernel;
mod landmark;
mod mesh;
mod modifiers;
mod params;
mod scalar;
mod solve;
mod solver;
mod strided;
mod system;
mod warp;

pub use coefficients::{NonAffineTerm, TpsCoefficients, TpsCoefficients2D, TpsCoefficients3D};
pub use error::{TpsError, TpsResult};
pub use kernel::{RadialBasis, TpsDimension, kernel_for};
pub use landmark::{
    LandmarkPair, LandmarkPair2D, LandmarkPair3D, Landmarks, MaybeLandmarkPair, fully_paired,
};
pub use mesh::{warp_mesh, warp_mesh_2d};
pub use params::{
    DEFAULT_PARALLEL_THRESHOLD, TpsSolverInput, TpsSolverInput2D, TpsSolverInput3D, WarpParams,
};
pub use scalar::Real;
pub use solve::{solve_coefficients, solve_coefficients_strided, solve_landmarks};
pub use strided::{StridedLandmarks, StridedPoints};
pub use system::LinearSystem;
pub use warp::{warp_points, warp_points_in_place};
