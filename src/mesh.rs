//! Conversion from a triangle soup to renderable vertex/index data.
//!
//! This is the contract a rendering consumer expects: every triangle
//! contributes three fresh positions and one face over them, and vertex
//! normals are recomputed flat from the winding rather than trusting
//! whatever normals the file carried.

use crate::types::TriangleSoup;
use glam::Vec3;
use tracing::debug;

/// Flat-shaded vertex/index buffers built from a [`TriangleSoup`].
///
/// Vertices are not shared between faces, so `positions`, `normals`, and
/// `indices` all have length `3 * soup.len()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions, three per triangle, in soup order.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals; all three vertices of a face share its
    /// winding-derived normal.
    pub normals: Vec<Vec3>,
    /// Face indices, one consecutive triple per triangle.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Build a flat-shaded mesh from a triangle soup.
    ///
    /// Parsed normals are discarded; each face's normal is recomputed from
    /// its vertex winding (zero for degenerate faces).
    pub fn from_soup(soup: &TriangleSoup) -> Self {
        let vertex_count = soup.len() * 3;
        let mut mesh = Mesh {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(vertex_count),
        };

        for triangle in soup {
            let base = mesh.positions.len() as u32;
            mesh.positions.extend_from_slice(&triangle.vertices);

            let normal = triangle.flat_normal();
            mesh.normals.extend_from_slice(&[normal; 3]);

            mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
        }

        debug!(
            "built mesh: {} vertices, {} faces",
            mesh.positions.len(),
            mesh.indices.len() / 3
        );
        mesh
    }

    /// Number of faces in the mesh.
    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl From<&TriangleSoup> for Mesh {
    fn from(soup: &TriangleSoup) -> Self {
        Mesh::from_soup(soup)
    }
}
