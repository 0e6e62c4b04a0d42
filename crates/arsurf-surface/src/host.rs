//! The seams between the renderer and the host environment.
//!
//! The host owns the tracked-surface session and the renderable mesh
//! objects. The renderer only queries surfaces through [`SurfaceHost`] and
//! drives mesh objects through [`MeshResource`].

use std::fmt;

use arsurf_mesh::{MeshBuffers, Placement};

use crate::surface::{SurfaceId, TrackedSurface};

/// Index of a mesh section within a [`MeshResource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(pub u32);

impl SectionId {
    /// The section surface meshes are written to unless configured otherwise.
    pub const PRIMARY: Self = Self(0);
}

impl Default for SectionId {
    fn default() -> Self {
        Self::PRIMARY
    }
}

/// Named reference to a host material. The host resolves the name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MaterialRef(pub String);

impl MaterialRef {
    /// Creates a material reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The material name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaterialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MaterialRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for MaterialRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Failure to create a mesh resource. Always recoverable: the surface is
/// retried on the next tick.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The host has no owner object to attach new mesh resources to.
    #[error("no owner available for new mesh resources")]
    OwnerMissing,

    /// The host declined to create the resource.
    #[error("mesh resource creation refused: {0}")]
    Refused(String),
}

/// Failure of a call on an existing mesh resource.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    /// The resource was destroyed by someone other than the renderer.
    #[error("mesh resource was invalidated externally")]
    Invalidated,

    /// The host rejected the call; the resource is still usable.
    #[error("host rejected mesh resource call: {0}")]
    Rejected(String),
}

/// A renderable mesh object owned by the host.
///
/// The renderer holds exactly one per registered surface and is the only
/// party that creates or destroys them.
pub trait MeshResource {
    /// Returns `false` if the host already tore the resource down.
    fn is_valid(&self) -> bool {
        true
    }

    /// Applies a material to the resource.
    fn assign_material(&mut self, material: &MaterialRef) -> Result<(), ResourceError>;

    /// Replaces the contents of `section` with `buffers`.
    fn set_section(&mut self, section: SectionId, buffers: &MeshBuffers)
    -> Result<(), ResourceError>;

    /// Empties `section`.
    fn clear_section(&mut self, section: SectionId) -> Result<(), ResourceError>;

    /// Moves the resource to `placement` in world space.
    fn set_world_transform(&mut self, placement: &Placement) -> Result<(), ResourceError>;

    /// Destroys the resource.
    fn destroy(self) -> Result<(), ResourceError>
    where
        Self: Sized;
}

/// The tracked-surface session and mesh factory provided by the host.
pub trait SurfaceHost {
    /// Mesh resource type produced by this host.
    type Resource: MeshResource;

    /// Snapshot of every live surface, in host order.
    fn live_surfaces(&self) -> Vec<TrackedSurface>;

    /// Creates a mesh resource for `surface`.
    fn create_mesh_resource(&mut self, surface: SurfaceId) -> Result<Self::Resource, HostError>;
}
