//! Feathered surface meshing: boundary polygon in, indexed triangle buffers out.

pub mod buffers;
pub mod feather;
pub mod packed;
pub mod placement;
pub mod vertex_format;

pub use buffers::{EDGE_COLOR, INTERIOR_COLOR, MeshBufferError, MeshBuffers};
pub use feather::{
    FeatheredMesh, FeatheredMeshBuilder, MIN_BOUNDARY_POINTS, build_feathered_mesh,
    feather_interior_point,
};
pub use packed::{PackedSurfaceMesh, SurfaceVertex};
pub use placement::Placement;
pub use vertex_format::{
    SURFACE_VERTEX_ATTRIBUTES, SURFACE_VERTEX_LAYOUT, surface_vertex_buffer_layout,
};
