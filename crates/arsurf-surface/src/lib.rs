//! Keeps one feathered mesh per tracked AR surface.
//!
//! Each frame the embedder calls [`SurfaceRenderer::tick`] with its
//! [`SurfaceHost`]. The renderer diffs the host's live surfaces against its
//! [`SurfaceRegistry`], creates mesh resources for new tracking surfaces,
//! rebuilds every tracking surface's mesh, and releases resources whose
//! surface vanished or stopped tracking.

mod host;
mod reconcile;
mod registry;
mod renderer;
mod surface;

#[cfg(test)]
mod testing;

pub use host::{HostError, MaterialRef, MeshResource, ResourceError, SectionId, SurfaceHost};
pub use reconcile::{ReconcilePlan, SurfaceWork, plan_reconciliation};
pub use registry::{ReleaseSummary, SurfaceRegistry};
pub use renderer::{
    DEFAULT_FEATHERING_DISTANCE, RendererSettings, SurfaceRenderer, TickReport,
    apply_feathered_mesh,
};
pub use surface::{SurfaceId, TrackedSurface, TrackingState};
