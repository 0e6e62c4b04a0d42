//! Interleaved vertex data for hosts that upload surface meshes to the GPU.
//!
//! [`MeshBuffers`] keeps one list per attribute, which is what procedural
//! mesh APIs want. GPU pipelines prefer a single interleaved buffer, so
//! [`PackedSurfaceMesh`] flattens the attribute lists into [`SurfaceVertex`]
//! records that can be handed to `wgpu` without copying.

use crate::buffers::MeshBuffers;

/// One interleaved surface vertex (48 bytes).
///
/// Layout:
///   - `[0..12]`  position `[f32; 3]`
///   - `[12..24]` normal `[f32; 3]`
///   - `[24..32]` uv `[f32; 2]`
///   - `[32..48]` color `[f32; 4]` (linear RGBA, alpha = feather weight)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceVertex {
    /// Local-space position.
    pub position: [f32; 3],
    /// Vertex normal.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
    /// Vertex color.
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(SurfaceVertex, [u8; 48]);

/// A surface mesh flattened into an interleaved vertex buffer plus indices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedSurfaceMesh {
    /// Interleaved vertex buffer.
    pub vertices: Vec<SurfaceVertex>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
}

impl PackedSurfaceMesh {
    /// Interleaves `buffers`.
    ///
    /// Vertices are zipped over the shortest attribute list, so run
    /// [`MeshBuffers::validate`] first if the input is untrusted.
    pub fn from_buffers(buffers: &MeshBuffers) -> Self {
        let vertices = buffers
            .positions
            .iter()
            .zip(&buffers.normals)
            .zip(&buffers.uvs)
            .zip(&buffers.colors)
            .map(|(((p, n), uv), c)| SurfaceVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
                color: c.to_array(),
            })
            .collect();

        Self {
            vertices,
            indices: buffers.indices.clone(),
        }
    }

    /// Returns `true` if the mesh contains no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the vertex data as a byte slice for GPU upload (zero-copy).
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Returns the index data as a byte slice for GPU upload (zero-copy).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl From<&MeshBuffers> for PackedSurfaceMesh {
    fn from(buffers: &MeshBuffers) -> Self {
        Self::from_buffers(buffers)
    }
}
