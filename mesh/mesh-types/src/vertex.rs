//! Vertex types and attributes.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-vertex data carried alongside the position.
///
/// Deformations in this workspace only ever rewrite [`Vertex::position`];
/// attributes are carried through untouched so callers can decide whether
/// to recompute normals afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexAttributes {
    /// Unit normal vector.
    pub normal: Option<Vector3<f64>>,

    /// Texture coordinates (U, V).
    pub uv: Option<(f32, f32)>,

    /// RGB color.
    pub color: Option<[u8; 3]>,

    /// Material or segmentation zone.
    pub zone_id: Option<u32>,
}

impl VertexAttributes {
    /// Attributes with nothing set.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            normal: None,
            uv: None,
            color: None,
            zone_id: None,
        }
    }

    /// Returns `true` if no attribute is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.normal.is_none() && self.uv.is_none() && self.color.is_none() && self.zone_id.is_none()
    }
}

/// A mesh vertex: a position plus optional attributes.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Vertex};
///
/// let a = Vertex::new(Point3::new(1.0, 2.0, 3.0));
/// let b = Vertex::from_coords(1.0, 2.0, 3.0);
/// assert_eq!(a.position, b.position);
/// assert!(a.attributes.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in model space.
    pub position: Point3<f64>,

    /// Optional attributes.
    pub attributes: VertexAttributes,
}

impl Vertex {
    /// Creates a vertex with no attributes.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            attributes: VertexAttributes::empty(),
        }
    }

    /// Creates a vertex from raw coordinates.
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_attributes() {
        let attrs = VertexAttributes::empty();
        assert!(attrs.is_empty());
        assert_eq!(attrs, VertexAttributes::default());
    }

    #[test]
    fn test_attributes_with_normal() {
        let attrs = VertexAttributes {
            normal: Some(Vector3::z()),
            ..VertexAttributes::empty()
        };
        assert!(!attrs.is_empty());
        assert_eq!(attrs.normal, Some(Vector3::z()));
    }

    #[test]
    fn test_vertex_from_point() {
        let v: Vertex = Point3::new(4.0, 5.0, 6.0).into();
        assert!((v.position.y - 5.0).abs() < f64::EPSILON);
        assert!(v.attributes.is_empty());
    }
}
