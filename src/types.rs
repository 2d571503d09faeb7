//! Core data types for decoded STL content.
//!
//! These are CPU-side value types. GPU-oriented buffer layouts belong to the
//! rendering consumer; see [`crate::mesh`] for the standard conversion.

use glam::Vec3;

/// One STL facet: a normal plus exactly three vertices.
///
/// Vertex order is significant; together with the normal it defines the
/// face's winding/orientation. The parsed normal is passed through as-is,
/// whatever bytes or text were present in the file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Facet normal as stored in the file (not validated or normalized).
    pub normal: Vec3,
    /// The three vertex positions, in file order.
    pub vertices: [Vec3; 3],
}

impl Triangle {
    /// Create a new triangle from a normal and three vertices.
    pub fn new(normal: Vec3, vertices: [Vec3; 3]) -> Self {
        Self { normal, vertices }
    }

    /// Compute the winding-derived normal (not normalized).
    pub fn winding_normal(&self) -> Vec3 {
        let e1 = self.vertices[1] - self.vertices[0];
        let e2 = self.vertices[2] - self.vertices[0];
        e1.cross(e2)
    }

    /// Compute the normalized winding-derived normal, ignoring the stored one.
    ///
    /// Degenerate triangles yield a zero vector.
    pub fn flat_normal(&self) -> Vec3 {
        self.winding_normal().normalize_or_zero()
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self {
            normal: Vec3::ZERO,
            vertices: [Vec3::ZERO, Vec3::X, Vec3::Y],
        }
    }
}

/// The decoded content of an STL file: triangles in file order.
///
/// No deduplication, no adjacency, no spatial indexing. A soup is produced
/// once per successful parse and is immutable from the outside; consumers
/// read it through the slice accessor or iteration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleSoup {
    triangles: Vec<Triangle>,
}

impl TriangleSoup {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Number of triangles in the soup.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True if the soup holds no triangles (e.g. an empty solid).
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// All triangles, in file order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Iterate over the triangles in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }
}

impl<'a> IntoIterator for &'a TriangleSoup {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}
