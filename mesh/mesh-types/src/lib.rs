//! Core mesh types shared by the CortenForge mesh crates.
//!
//! - [`Vertex`] - a position with optional attributes
//! - [`IndexedMesh`] - a triangle mesh with indexed vertices
//!
//! All coordinates are `f64` in a right-handed coordinate system. Faces
//! wind counter-clockwise when viewed from outside.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, Point3, Vertex};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::new(Point3::new(0.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(1.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(0.5, 1.0, 0.0)));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod mesh;
mod vertex;

pub use mesh::{IndexedMesh, unit_cube};
pub use vertex::{Vertex, VertexAttributes};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};
