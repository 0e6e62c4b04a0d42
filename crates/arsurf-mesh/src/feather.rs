//! Feathered surface meshing: a "double border" around the boundary polygon
//! with a transparent outer ring, an opaque inner ring, and a fan over the
//! interior.
//!
//! ## Vertex layout
//!
//! Each boundary point `p[k]` yields two vertices:
//!
//! | Index    | Vertex                        | Alpha |
//! |----------|-------------------------------|-------|
//! | `2k`     | boundary point `p[k]`         | 0     |
//! | `2k + 1` | `p[k]` pulled toward origin   | 1     |
//!
//! ## Winding
//!
//! A boundary wound counter-clockwise about local +Z produces triangles that
//! are counter-clockwise when viewed from +Z, matching the vertex normal.
//!
//! The interior fan is anchored at vertex 1 and is only correct when the inner
//! ring is star-shaped with respect to that vertex. Non-convex outlines can
//! produce overlapping fan triangles; this is not corrected.

use glam::Vec3;

use crate::buffers::{EDGE_COLOR, INTERIOR_COLOR, MeshBuffers};
use crate::placement::Placement;

/// Fewest boundary points that form a polygon.
pub const MIN_BOUNDARY_POINTS: usize = 3;

/// Result of meshing one surface.
#[derive(Clone, Debug, PartialEq)]
pub enum FeatheredMesh {
    /// Too few boundary points; the section should be emptied.
    Cleared,
    /// Complete buffers plus the placement the mesh must be drawn at.
    Built {
        /// Section buffers in the surface's local frame.
        buffers: MeshBuffers,
        /// Local-to-world placement of the surface.
        placement: Placement,
    },
}

impl FeatheredMesh {
    /// Returns `true` for [`FeatheredMesh::Cleared`].
    pub fn is_cleared(&self) -> bool {
        matches!(self, Self::Cleared)
    }

    /// Returns the built buffers, if any.
    pub fn buffers(&self) -> Option<&MeshBuffers> {
        match self {
            Self::Cleared => None,
            Self::Built { buffers, .. } => Some(buffers),
        }
    }
}

/// Builds feathered meshes with a fixed feathering distance.
///
/// Stateless between calls: [`FeatheredMeshBuilder::build`] is a pure
/// function of its inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatheredMeshBuilder {
    feathering_distance: f32,
}

impl FeatheredMeshBuilder {
    /// Creates a builder. Negative and NaN distances are treated as 0.
    pub fn new(feathering_distance: f32) -> Self {
        Self {
            feathering_distance: sanitize_distance(feathering_distance),
        }
    }

    /// The effective feathering distance, in local units.
    pub fn feathering_distance(&self) -> f32 {
        self.feathering_distance
    }

    /// Meshes `boundary` (local-space, in polygon order).
    ///
    /// Returns [`FeatheredMesh::Cleared`] for fewer than
    /// [`MIN_BOUNDARY_POINTS`] points. Otherwise the result holds `2N`
    /// vertices and `9N - 6` indices: `2N` perimeter triangles and `N - 2`
    /// fan triangles.
    pub fn build(&self, boundary: &[Vec3], placement: &Placement) -> FeatheredMesh {
        let n = boundary.len();
        if n < MIN_BOUNDARY_POINTS {
            tracing::trace!(points = n, "boundary too small, clearing section");
            return FeatheredMesh::Cleared;
        }

        let Some(vertex_count) = ring_vertex_count(n) else {
            tracing::warn!(points = n, "boundary exceeds u32 index range, clearing section");
            return FeatheredMesh::Cleared;
        };

        let normal = placement.up_vector();
        let mut buffers = MeshBuffers::with_capacity(2 * n, 9 * n - 6);

        for &point in boundary {
            let interior = feather_interior_point(point, self.feathering_distance);
            buffers.push_vertex(point, normal, point.truncate(), EDGE_COLOR);
            buffers.push_vertex(interior, normal, interior.truncate(), INTERIOR_COLOR);
        }

        push_perimeter(&mut buffers, vertex_count / 2);
        push_interior_fan(&mut buffers, vertex_count / 2);

        tracing::trace!(
            points = n,
            vertices = buffers.vertex_count(),
            triangles = buffers.triangle_count(),
            "built feathered mesh"
        );

        FeatheredMesh::Built {
            buffers,
            placement: *placement,
        }
    }
}

impl Default for FeatheredMeshBuilder {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Convenience wrapper around [`FeatheredMeshBuilder::build`].
pub fn build_feathered_mesh(
    boundary: &[Vec3],
    feathering_distance: f32,
    placement: &Placement,
) -> FeatheredMesh {
    FeatheredMeshBuilder::new(feathering_distance).build(boundary, placement)
}

/// Moves `boundary` toward the local origin by
/// `min(|boundary|, feathering_distance)`.
///
/// Points no farther from the origin than the feathering distance land on
/// the origin exactly, which also covers a point sitting on the origin.
pub fn feather_interior_point(boundary: Vec3, feathering_distance: f32) -> Vec3 {
    let feathering_distance = sanitize_distance(feathering_distance);
    let distance = boundary.length();
    if distance <= feathering_distance {
        return Vec3::ZERO;
    }
    boundary - boundary.normalize_or_zero() * feathering_distance
}

/// Vertex count for `points` boundary points, if every index fits in `u32`.
fn ring_vertex_count(points: usize) -> Option<u32> {
    points.checked_mul(2).and_then(|count| u32::try_from(count).ok())
}

fn sanitize_distance(distance: f32) -> f32 {
    // f32::max returns the non-NaN operand.
    distance.max(0.0)
}

/// Quad strip between the outer and inner rings, closed back onto pair 0.
fn push_perimeter(buffers: &mut MeshBuffers, n: u32) {
    for i in 0..n - 1 {
        let b = 2 * i;
        buffers.push_triangle(b, b + 2, b + 1);
        buffers.push_triangle(b + 1, b + 2, b + 3);
    }

    let last = 2 * (n - 1);
    buffers.push_triangle(last, 0, last + 1);
    buffers.push_triangle(last + 1, 0, 1);
}

/// Fan over the inner ring (odd indices) anchored at vertex 1.
fn push_interior_fan(buffers: &mut MeshBuffers, n: u32) {
    for i in (3..2 * n - 1).step_by(2) {
        buffers.push_triangle(1, i, i + 2);
    }
}
