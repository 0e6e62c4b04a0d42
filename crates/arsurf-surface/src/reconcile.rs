//! Diffing the live surface snapshot against the registry.
//!
//! Both halves of a [`ReconcilePlan`] are computed from the same snapshot and
//! the registry as it stands before any creation or release, so a surface
//! observed as stopped during a tick is released in that same tick.

use std::collections::HashSet;

use crate::registry::SurfaceRegistry;
use crate::surface::{SurfaceId, TrackedSurface};

/// One surface that needs its mesh rebuilt this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceWork<'a> {
    /// The live, tracking surface.
    pub surface: &'a TrackedSurface,
    /// `true` if the registry had no resource for it at tick start.
    pub is_new: bool,
}

/// Worklists produced by [`plan_reconciliation`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReconcilePlan<'a> {
    /// Live tracking surfaces in snapshot order, each listed once.
    pub update: Vec<SurfaceWork<'a>>,
    /// Registered identities that are gone or no longer tracking, ascending.
    pub release: Vec<SurfaceId>,
}

impl ReconcilePlan<'_> {
    /// Number of surfaces that need a fresh resource.
    pub fn new_count(&self) -> usize {
        self.update.iter().filter(|w| w.is_new).count()
    }

    /// Returns `true` if there is nothing to update or release.
    pub fn is_empty(&self) -> bool {
        self.update.is_empty() && self.release.is_empty()
    }
}

/// Splits `live` into surfaces to update and registry entries to release.
///
/// Only [`TrackingState::Tracking`](crate::TrackingState::Tracking) surfaces
/// are updated. A registry entry is released when its identity is absent
/// from `live` or present only in a non-tracking state. If the host reports
/// an identity more than once, the first tracking occurrence wins.
pub fn plan_reconciliation<'a, R>(
    live: &'a [TrackedSurface],
    registry: &SurfaceRegistry<R>,
) -> ReconcilePlan<'a> {
    let mut tracking = HashSet::with_capacity(live.len());
    let update: Vec<SurfaceWork<'a>> = live
        .iter()
        .filter(|surface| surface.is_tracking())
        .filter(|surface| tracking.insert(surface.id))
        .map(|surface| SurfaceWork {
            surface,
            is_new: !registry.contains(surface.id),
        })
        .collect();

    let release: Vec<SurfaceId> = registry
        .ids()
        .into_iter()
        .filter(|id| !tracking.contains(id))
        .collect();

    ReconcilePlan { update, release }
}
