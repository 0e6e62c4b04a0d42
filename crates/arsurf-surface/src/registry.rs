//! Ownership table from surface identity to its mesh resource.

use std::collections::HashMap;

use crate::host::MeshResource;
use crate::surface::SurfaceId;

/// Outcome of [`SurfaceRegistry::release`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReleaseSummary {
    /// Entries whose resource was destroyed through the host.
    pub destroyed: usize,
    /// Entries whose resource was already invalid or failed to destroy.
    /// They are removed all the same.
    pub stale: usize,
}

impl ReleaseSummary {
    /// Total entries removed from the registry.
    pub fn removed(&self) -> usize {
        self.destroyed + self.stale
    }
}

/// Map from surface identity to the one mesh resource it owns.
///
/// Updated incrementally every tick; keys are surfaces that were live and
/// tracking as of the last reconciliation.
#[derive(Debug)]
pub struct SurfaceRegistry<R> {
    resources: HashMap<SurfaceId, R>,
}

impl<R> SurfaceRegistry<R> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            resources: HashMap::new(),
        }
    }

    /// Returns the number of registered surfaces.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if no surface is registered.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Returns `true` if `id` has a resource.
    pub fn contains(&self, id: SurfaceId) -> bool {
        self.resources.contains_key(&id)
    }

    /// Returns the resource of `id`, if any.
    pub fn get(&self, id: SurfaceId) -> Option<&R> {
        self.resources.get(&id)
    }

    /// Returns the resource of `id` mutably, if any.
    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut R> {
        self.resources.get_mut(&id)
    }

    /// Registers `resource` for `id`, returning the one it replaces.
    pub fn insert(&mut self, id: SurfaceId, resource: R) -> Option<R> {
        self.resources.insert(id, resource)
    }

    /// Unregisters `id` without touching its resource.
    pub fn remove(&mut self, id: SurfaceId) -> Option<R> {
        self.resources.remove(&id)
    }

    /// Registered identities in ascending order.
    pub fn ids(&self) -> Vec<SurfaceId> {
        let mut ids: Vec<SurfaceId> = self.resources.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterates over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (SurfaceId, &R)> {
        self.resources.iter().map(|(id, r)| (*id, r))
    }
}

impl<R: MeshResource> SurfaceRegistry<R> {
    /// Destroys and unregisters every identity in `ids`.
    ///
    /// Valid resources are destroyed through the host. The entry is removed
    /// whether or not the handle was still valid, and whether or not the
    /// destroy call succeeded. Identities that are not registered are
    /// ignored.
    pub fn release(&mut self, ids: &[SurfaceId]) -> ReleaseSummary {
        let mut summary = ReleaseSummary::default();

        for &id in ids {
            let Some(resource) = self.resources.remove(&id) else {
                continue;
            };

            if !resource.is_valid() {
                tracing::debug!(surface = %id, "released surface with stale mesh resource");
                summary.stale += 1;
                continue;
            }

            match resource.destroy() {
                Ok(()) => {
                    tracing::info!(surface = %id, "destroyed mesh resource");
                    summary.destroyed += 1;
                }
                Err(err) => {
                    tracing::warn!(surface = %id, error = %err, "mesh resource destroy failed");
                    summary.stale += 1;
                }
            }
        }

        summary
    }

    /// Releases every registered surface.
    pub fn release_all(&mut self) -> ReleaseSummary {
        let ids = self.ids();
        self.release(&ids)
    }
}

impl<R> Default for SurfaceRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}
