//! Canonical `wgpu::VertexBufferLayout` for [`SurfaceVertex`].
//!
//! | Location | Offset | Format    | Field    |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x3 | position |
//! | 1        | 12     | Float32x3 | normal   |
//! | 2        | 24     | Float32x2 | uv       |
//! | 3        | 32     | Float32x4 | color    |

use std::mem;

use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use crate::packed::SurfaceVertex;

/// Vertex attributes matching the field order of [`SurfaceVertex`].
pub const SURFACE_VERTEX_ATTRIBUTES: [VertexAttribute; 4] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
    VertexAttribute {
        format: VertexFormat::Float32x2,
        offset: 24,
        shader_location: 2,
    },
    VertexAttribute {
        format: VertexFormat::Float32x4,
        offset: 32,
        shader_location: 3,
    },
];

/// The vertex buffer layout for surface render pipelines.
pub const SURFACE_VERTEX_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<SurfaceVertex>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &SURFACE_VERTEX_ATTRIBUTES,
};

/// Return the surface vertex buffer layout as an owned value.
pub fn surface_vertex_buffer_layout() -> VertexBufferLayout<'static> {
    SURFACE_VERTEX_LAYOUT
}

const _: () = assert!(
    mem::size_of::<SurfaceVertex>() == 48,
    "SurfaceVertex size changed, update SURFACE_VERTEX_LAYOUT"
);
const _: () = assert!(SURFACE_VERTEX_ATTRIBUTES[1].offset == mem::offset_of!(SurfaceVertex, normal) as u64);
const _: () = assert!(SURFACE_VERTEX_ATTRIBUTES[2].offset == mem::offset_of!(SurfaceVertex, uv) as u64);
const _: () = assert!(SURFACE_VERTEX_ATTRIBUTES[3].offset == mem::offset_of!(SurfaceVertex, color) as u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stride_matches_vertex_struct_size() {
        assert_eq!(
            SURFACE_VERTEX_LAYOUT.array_stride,
            mem::size_of::<SurfaceVertex>() as u64,
        );
    }

    #[test]
    fn test_attributes_fit_within_stride() {
        let stride = SURFACE_VERTEX_LAYOUT.array_stride;
        for (i, attr) in SURFACE_VERTEX_ATTRIBUTES.iter().enumerate() {
            assert!(
                attr.offset + attr.format.size() <= stride,
                "Attribute {i} at offset {} exceeds stride {stride}",
                attr.offset,
            );
        }
    }

    #[test]
    fn test_attributes_are_contiguous() {
        for pair in SURFACE_VERTEX_ATTRIBUTES.windows(2) {
            assert_eq!(pair[0].offset + pair[0].format.size(), pair[1].offset);
        }
    }

    #[test]
    fn test_shader_locations_are_sequential() {
        for (i, attr) in SURFACE_VERTEX_ATTRIBUTES.iter().enumerate() {
            assert_eq!(attr.shader_location, i as u32);
        }
    }

    #[test]
    fn test_helper_returns_same_layout() {
        let layout = surface_vertex_buffer_layout();
        assert_eq!(layout.array_stride, SURFACE_VERTEX_LAYOUT.array_stride);
        assert_eq!(layout.attributes.len(), SURFACE_VERTEX_LAYOUT.attributes.len());
    }
}
