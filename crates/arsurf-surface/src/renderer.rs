//! Per-tick driver: reconcile the registry with the host, rebuild meshes,
//! release what is gone.

use arsurf_config::Config;
use arsurf_mesh::{FeatheredMesh, FeatheredMeshBuilder};

use crate::host::{MaterialRef, MeshResource, ResourceError, SectionId, SurfaceHost};
use crate::reconcile::{SurfaceWork, plan_reconciliation};
use crate::registry::{ReleaseSummary, SurfaceRegistry};

/// Default distance, in local units, the inner ring is pulled inward.
pub const DEFAULT_FEATHERING_DISTANCE: f32 = 10.0;

/// Knobs the embedder controls.
#[derive(Clone, Debug, PartialEq)]
pub struct RendererSettings {
    /// Width of the transparent-to-opaque fade, in local units (≥ 0).
    pub feathering_distance: f32,
    /// Material applied to every newly created mesh resource.
    pub default_material: Option<MaterialRef>,
    /// Section the surface mesh is written to.
    pub section: SectionId,
    /// Log the registered surface count after every tick.
    pub report_surface_count: bool,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            feathering_distance: DEFAULT_FEATHERING_DISTANCE,
            default_material: None,
            section: SectionId::PRIMARY,
            report_surface_count: true,
        }
    }
}

impl From<&Config> for RendererSettings {
    fn from(config: &Config) -> Self {
        Self {
            feathering_distance: config.surface.feathering_distance,
            default_material: config.surface.default_material.clone().map(MaterialRef),
            section: SectionId(config.surface.section_index),
            report_surface_count: config.debug.report_surface_count,
        }
    }
}

/// What a single [`SurfaceRenderer::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Mesh resources created for newly seen surfaces.
    pub created: usize,
    /// Surfaces skipped because the host refused to create a resource.
    pub creation_failures: usize,
    /// Surfaces whose section received fresh buffers.
    pub rebuilt: usize,
    /// Surfaces whose section was cleared for having too few boundary points.
    pub cleared: usize,
    /// Registry entries dropped because the host invalidated their resource.
    pub evicted: usize,
    /// Resources destroyed for surfaces that vanished or stopped tracking.
    pub released: usize,
    /// Entries released whose resource was already gone.
    pub stale_released: usize,
    /// Registered surfaces after the tick.
    pub registered: usize,
}

/// Owns the surface registry and keeps one feathered mesh per tracking
/// surface in sync with the host.
///
/// Must be driven from a single thread, once per frame. Every mutation goes
/// through `&mut self`, so the registry cannot be observed mid-tick.
#[derive(Debug)]
pub struct SurfaceRenderer<R> {
    builder: FeatheredMeshBuilder,
    settings: RendererSettings,
    registry: SurfaceRegistry<R>,
}

impl<R: MeshResource> SurfaceRenderer<R> {
    /// Creates a renderer with an empty registry.
    pub fn new(settings: RendererSettings) -> Self {
        Self {
            builder: FeatheredMeshBuilder::new(settings.feathering_distance),
            settings,
            registry: SurfaceRegistry::new(),
        }
    }

    /// Creates a renderer configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(RendererSettings::from(config))
    }

    /// Current settings.
    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    /// Replaces the settings. Takes effect on the next tick; the default
    /// material only applies to resources created afterwards.
    pub fn apply_settings(&mut self, settings: RendererSettings) {
        self.builder = FeatheredMeshBuilder::new(settings.feathering_distance);
        self.settings = settings;
    }

    /// The surface registry.
    pub fn registry(&self) -> &SurfaceRegistry<R> {
        &self.registry
    }

    /// Runs one reconciliation pass against `host`.
    ///
    /// Host failures are absorbed: refused creations are retried next tick,
    /// invalidated resources are dropped and recreated, and release always
    /// removes the registry entry.
    pub fn tick<H>(&mut self, host: &mut H) -> TickReport
    where
        H: SurfaceHost<Resource = R>,
    {
        let live = host.live_surfaces();
        let plan = plan_reconciliation(&live, &self.registry);
        let mut report = TickReport::default();
        tracing::trace!(
            update = plan.update.len(),
            new = plan.new_count(),
            release = plan.release.len(),
            "reconciliation planned"
        );

        for work in &plan.update {
            self.update_surface(host, work, &mut report);
        }

        let summary = self.registry.release(&plan.release);
        report.released = summary.destroyed;
        report.stale_released = summary.stale;
        report.registered = self.registry.len();

        if self.settings.report_surface_count {
            tracing::debug!(surfaces = report.registered, "Surfaces found: {}", report.registered);
        }

        report
    }

    /// Destroys every registered resource, e.g. when the embedder shuts down.
    pub fn shutdown(&mut self) -> ReleaseSummary {
        let summary = self.registry.release_all();
        tracing::info!(released = summary.removed(), "surface renderer shut down");
        summary
    }

    fn update_surface<H>(&mut self, host: &mut H, work: &SurfaceWork<'_>, report: &mut TickReport)
    where
        H: SurfaceHost<Resource = R>,
    {
        let surface = work.surface;
        let id = surface.id;
        let material = self.settings.default_material.as_ref();
        let Some(resource) = acquire_resource(&mut self.registry, host, work, material, report)
        else {
            return;
        };

        let mesh = self
            .builder
            .build(surface.boundary_polygon(), surface.placement());
        let cleared = mesh.is_cleared();

        match apply_feathered_mesh(resource, self.settings.section, &mesh) {
            Ok(()) if cleared => report.cleared += 1,
            Ok(()) => {
                report.rebuilt += 1;
                tracing::debug!(
                    surface = %id,
                    points = surface.boundary.len(),
                    "rebuilt surface mesh"
                );
            }
            Err(ResourceError::Invalidated) => {
                self.registry.remove(id);
                report.evicted += 1;
                tracing::warn!(surface = %id, "mesh resource invalidated during update, will recreate");
            }
            Err(err) => {
                tracing::warn!(surface = %id, error = %err, "surface mesh update rejected");
            }
        }
    }
}

/// Writes `mesh` into `section` of `resource`.
///
/// A built mesh replaces the section contents and then moves the resource to
/// the surface placement. A cleared mesh only empties the section.
pub fn apply_feathered_mesh<R: MeshResource>(
    resource: &mut R,
    section: SectionId,
    mesh: &FeatheredMesh,
) -> Result<(), ResourceError> {
    match mesh {
        FeatheredMesh::Cleared => resource.clear_section(section),
        FeatheredMesh::Built { buffers, placement } => {
            resource.set_section(section, buffers)?;
            resource.set_world_transform(placement)
        }
    }
}

/// Returns the registered resource for `work`, creating one if the surface is
/// new this tick or its resource is no longer valid.
fn acquire_resource<'r, R, H>(
    registry: &'r mut SurfaceRegistry<R>,
    host: &mut H,
    work: &SurfaceWork<'_>,
    material: Option<&MaterialRef>,
    report: &mut TickReport,
) -> Option<&'r mut R>
where
    R: MeshResource,
    H: SurfaceHost<Resource = R>,
{
    let id = work.surface.id;
    let mut needs_resource = work.is_new;
    if !work.is_new && registry.get(id).is_some_and(|resource| !resource.is_valid()) {
        registry.remove(id);
        report.evicted += 1;
        needs_resource = true;
        tracing::warn!(surface = %id, "mesh resource invalidated externally, recreating");
    }

    if needs_resource {
        match host.create_mesh_resource(id) {
            Ok(mut resource) => {
                if let Some(material) = material
                    && let Err(err) = resource.assign_material(material)
                {
                    tracing::warn!(surface = %id, %material, error = %err, "failed to assign material");
                }
                registry.insert(id, resource);
                report.created += 1;
                tracing::info!(surface = %id, "created mesh resource");
            }
            Err(err) => {
                report.creation_failures += 1;
                tracing::debug!(surface = %id, error = %err, "mesh resource creation failed, retrying next tick");
                return None;
            }
        }
    }

    registry.get_mut(id)
}
