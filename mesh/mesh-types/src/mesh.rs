//! Indexed triangle mesh.

use crate::Vertex;
use nalgebra::{Point2, Point3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Vertices and faces are stored separately, with each face referencing
/// three vertices by index. Faces use counter-clockwise winding when viewed
/// from outside.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into `vertices`.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Creates an empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Creates an empty mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Creates a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Creates a mesh from flat position and index arrays.
    ///
    /// Returns an empty mesh if either array length is not a multiple of 3.
    ///
    /// ```
    /// use mesh_types::IndexedMesh;
    ///
    /// let mesh = IndexedMesh::from_raw(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 1, 2]);
    /// assert_eq!(mesh.vertex_count(), 3);
    /// ```
    #[must_use]
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> Self {
        if positions.len() % 3 != 0 || indices.len() % 3 != 0 {
            return Self::new();
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| Vertex::from_coords(c[0], c[1], c[2]))
            .collect();
        let faces = indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

        Self { vertices, faces }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if the mesh has no vertices or no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Iterates over vertex positions.
    pub fn positions(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.vertices.iter().map(|v| &v.position)
    }

    /// Iterates mutably over vertex positions.
    pub fn positions_mut(&mut self) -> impl Iterator<Item = &mut Point3<f64>> {
        self.vertices.iter_mut().map(|v| &mut v.position)
    }

    /// Creates a flat triangulated grid in the XY plane at `z = 0`.
    ///
    /// The grid spans `[min, max]` with `cells_x * cells_y` quads, each
    /// split into two triangles. Vertex `(i, j)` sits at index
    /// `j * (cells_x + 1) + i`. A zero cell count yields an empty mesh.
    ///
    /// ```
    /// use mesh_types::IndexedMesh;
    /// use nalgebra::Point2;
    ///
    /// let grid = IndexedMesh::grid_xy(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0), 4, 4);
    /// assert_eq!(grid.vertex_count(), 25);
    /// assert_eq!(grid.face_count(), 32);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    // Truncation: grid indices are u32 like every other face index
    pub fn grid_xy(
        min: Point2<f64>,
        max: Point2<f64>,
        cells_x: usize,
        cells_y: usize,
    ) -> Self {
        if cells_x == 0 || cells_y == 0 {
            return Self::new();
        }

        let columns = cells_x + 1;
        let mut mesh = Self::with_capacity(columns * (cells_y + 1), 2 * cells_x * cells_y);

        for j in 0..=cells_y {
            let y = min.y + (max.y - min.y) * (j as f64 / cells_y as f64);
            for i in 0..=cells_x {
                let x = min.x + (max.x - min.x) * (i as f64 / cells_x as f64);
                mesh.vertices.push(Vertex::from_coords(x, y, 0.0));
            }
        }

        for j in 0..cells_y {
            for i in 0..cells_x {
                let a = (j * columns + i) as u32;
                let b = a + 1;
                let c = a + columns as u32;
                let d = c + 1;
                mesh.faces.push([a, b, d]);
                mesh.faces.push([a, d, c]);
            }
        }

        mesh
    }
}

/// Creates a unit cube from `(0, 0, 0)` to `(1, 1, 1)` with outward-facing winding.
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let corners = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ];
    let vertices = corners
        .iter()
        .map(|&[x, y, z]| Vertex::from_coords(x, y, z))
        .collect();

    let faces = vec![
        // bottom (-Z)
        [0, 2, 1],
        [0, 3, 2],
        // top (+Z)
        [4, 5, 6],
        [4, 6, 7],
        // front (-Y)
        [0, 1, 5],
        [0, 5, 4],
        // back (+Y)
        [2, 3, 7],
        [2, 7, 6],
        // left (-X)
        [0, 4, 7],
        [0, 7, 3],
        // right (+X)
        [1, 2, 6],
        [1, 6, 5],
    ];

    IndexedMesh::from_parts(vertices, faces)
}
