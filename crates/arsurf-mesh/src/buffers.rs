//! Mesh buffer set produced for one surface section.

use glam::{Vec2, Vec3, Vec4};

/// Vertex color of boundary vertices: fully transparent.
pub const EDGE_COLOR: Vec4 = Vec4::ZERO;

/// Vertex color of interior vertices: fully opaque.
pub const INTERIOR_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

/// Structural problems detected by [`MeshBuffers::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshBufferError {
    /// An attribute list does not have one entry per vertex.
    #[error("{attribute} has {len} entries, expected {expected}")]
    AttributeLength {
        /// Name of the mismatched attribute.
        attribute: &'static str,
        /// Actual entry count.
        len: usize,
        /// Vertex count.
        expected: usize,
    },

    /// The index list is not a whole number of triangles.
    #[error("index count {0} is not a multiple of 3")]
    PartialTriangle(usize),

    /// An index points past the end of the position list.
    #[error("index {index} at slot {slot} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Position in the index list.
        slot: usize,
        /// Offending index value.
        index: u32,
        /// Number of vertices.
        vertex_count: usize,
    },
}

/// Per-vertex attribute lists and triangle indices for a single mesh section.
///
/// All attribute lists have the same length (the vertex count). Indices come
/// in triples, one per triangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
    /// Local-space vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals.
    pub normals: Vec<Vec3>,
    /// Texture coordinates.
    pub uvs: Vec<Vec2>,
    /// Linear RGBA vertex colors. Alpha carries the feathering signal.
    pub colors: Vec<Vec4>,
    /// Triangle list indices into `positions`.
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Creates an empty buffer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer set with room for `vertices` vertices and
    /// `indices` indices.
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            colors: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Appends one vertex with all of its attributes.
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2, color: Vec4) {
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        self.colors.push(color);
    }

    /// Appends one triangle.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns `true` if the buffers hold no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterates over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Geometric (unnormalized) normal of triangle `tri`, following the
    /// index winding.
    pub fn face_normal(&self, tri: usize) -> Option<Vec3> {
        let t = self.triangles().nth(tri)?;
        let a = *self.positions.get(t[0] as usize)?;
        let b = *self.positions.get(t[1] as usize)?;
        let c = *self.positions.get(t[2] as usize)?;
        Some((b - a).cross(c - a))
    }

    /// Checks the structural invariants of the buffer set.
    pub fn validate(&self) -> Result<(), MeshBufferError> {
        let expected = self.positions.len();
        let lengths = [
            ("normals", self.normals.len()),
            ("uvs", self.uvs.len()),
            ("colors", self.colors.len()),
        ];
        for (attribute, len) in lengths {
            if len != expected {
                return Err(MeshBufferError::AttributeLength {
                    attribute,
                    len,
                    expected,
                });
            }
        }

        if self.indices.len() % 3 != 0 {
            return Err(MeshBufferError::PartialTriangle(self.indices.len()));
        }

        if let Some((slot, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= expected)
        {
            return Err(MeshBufferError::IndexOutOfRange {
                slot,
                index,
                vertex_count: expected,
            });
        }

        Ok(())
    }

    /// Returns `true` if every float in every attribute is finite.
    pub fn is_finite(&self) -> bool {
        self.positions.iter().all(|p| p.is_finite())
            && self.normals.iter().all(|n| n.is_finite())
            && self.uvs.iter().all(|uv| uv.is_finite())
            && self.colors.iter().all(|c| c.is_finite())
    }
}
