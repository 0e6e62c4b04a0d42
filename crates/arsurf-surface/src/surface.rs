//! Snapshot types describing the tracked surfaces reported by the host.

use std::fmt;

use arsurf_mesh::Placement;
use glam::Vec3;

/// Stable identity of a tracked surface, assigned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Lifecycle flag of a tracked surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TrackingState {
    /// Actively observed; the surface gets a mesh.
    Tracking,
    /// Was tracked, no longer observed.
    StoppedTracking,
    /// Known to the session but not currently tracked.
    #[default]
    NotTracking,
}

impl TrackingState {
    /// Returns `true` only for [`TrackingState::Tracking`].
    pub fn is_tracking(self) -> bool {
        self == Self::Tracking
    }
}

/// One host surface as seen during a single tick.
///
/// The host owns the real surface; this is a read-only copy of the fields the
/// renderer needs.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedSurface {
    /// Identity used as the registry key.
    pub id: SurfaceId,
    /// Current tracking state.
    pub tracking_state: TrackingState,
    /// Boundary polygon in the surface's local frame, in winding order.
    pub boundary: Vec<Vec3>,
    /// Local-to-world placement.
    pub placement: Placement,
}

impl TrackedSurface {
    /// Creates an actively tracked surface.
    pub fn new(id: SurfaceId, boundary: Vec<Vec3>, placement: Placement) -> Self {
        Self {
            id,
            tracking_state: TrackingState::Tracking,
            boundary,
            placement,
        }
    }

    /// Returns a copy with the given tracking state.
    pub fn with_state(mut self, tracking_state: TrackingState) -> Self {
        self.tracking_state = tracking_state;
        self
    }

    /// Current tracking state.
    pub fn tracking_state(&self) -> TrackingState {
        self.tracking_state
    }

    /// Boundary polygon in local space.
    pub fn boundary_polygon(&self) -> &[Vec3] {
        &self.boundary
    }

    /// Local-to-world placement.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Returns `true` if the surface is actively tracked.
    pub fn is_tracking(&self) -> bool {
        self.tracking_state.is_tracking()
    }
}
