//! Warping [`IndexedMesh`] vertex positions.
//!
//! Only positions change. Faces and every vertex attribute (normals, UVs,
//! colors, zone ids) are copied through untouched, and the input mesh is
//! never modified.

use crate::warp::for_each_element;
use crate::{TpsCoefficients2D, TpsCoefficients3D, WarpParams};
use mesh_types::IndexedMesh;
use nalgebra::Point2;
use tracing::info;

/// Returns a copy of `mesh` with every vertex position warped in 3D.
///
/// # Examples
///
/// ```
/// use mesh_tps::{TpsCoefficients3D, WarpParams, warp_mesh};
/// use mesh_types::unit_cube;
/// use nalgebra::Vector3;
///
/// let lift = TpsCoefficients3D {
///     a1: Vector3::new(0.0, 0.0, 1.0),
///     ..TpsCoefficients3D::identity()
/// };
/// let cube = unit_cube();
/// let lifted = warp_mesh(&lift, &cube, &WarpParams::default());
///
/// assert_eq!(lifted.faces, cube.faces);
/// assert_eq!(lifted.vertices[0].position.z, cube.vertices[0].position.z + 1.0);
/// ```
#[must_use]
pub fn warp_mesh(
    coefficients: &TpsCoefficients3D<f64>,
    mesh: &IndexedMesh,
    params: &WarpParams<f64>,
) -> IndexedMesh {
    let mut warped = mesh.clone();
    let blend = params.blending_factor;

    for_each_element(&mut warped.vertices, params.parallel_threshold, |vertex| {
        vertex.position = coefficients.warp_point_blended(&vertex.position, blend);
    });

    info!(
        vertices = warped.vertex_count(),
        faces = warped.face_count(),
        blend,
        "Warped mesh"
    );
    warped
}

/// Returns a copy of `mesh` with each vertex's `(x, y)` warped in 2D.
///
/// The `z` coordinate of every vertex is kept as is, so a 2D warp can be
/// applied to a flat or layered mesh.
#[must_use]
pub fn warp_mesh_2d(
    coefficients: &TpsCoefficients2D<f64>,
    mesh: &IndexedMesh,
    params: &WarpParams<f64>,
) -> IndexedMesh {
    let mut warped = mesh.clone();
    let blend = params.blending_factor;

    for_each_element(&mut warped.vertices, params.parallel_threshold, |vertex| {
        let planar = Point2::new(vertex.position.x, vertex.position.y);
        let moved = coefficients.warp_point_blended(&planar, blend);
        vertex.position.x = moved.x;
        vertex.position.y = moved.y;
    });

    info!(
        vertices = warped.vertex_count(),
        faces = warped.face_count(),
        blend,
        "Warped mesh in the xy plane"
    );
    warped
}
