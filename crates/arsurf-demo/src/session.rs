//! A scripted stand-in for an AR session: planes appear, grow, jitter, and
//! eventually stop tracking.

use arsurf_mesh::{MeshBuffers, PackedSurfaceMesh, Placement};
use arsurf_surface::{
    HostError, MaterialRef, MeshResource, ResourceError, SectionId, SurfaceHost, SurfaceId,
    TrackedSurface, TrackingState,
};
use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::{debug, info};

/// Host-side mesh object: keeps the interleaved GPU-ready copy of its section.
pub(crate) struct SimMesh {
    surface: SurfaceId,
    material: Option<MaterialRef>,
    section: Option<(SectionId, PackedSurfaceMesh)>,
    placement: Placement,
}

impl SimMesh {
    /// Triangles currently uploaded, 0 when the section is empty.
    pub(crate) fn triangle_count(&self) -> usize {
        self.section
            .as_ref()
            .map_or(0, |(_, packed)| packed.triangle_count())
    }
}

impl MeshResource for SimMesh {
    fn assign_material(&mut self, material: &MaterialRef) -> Result<(), ResourceError> {
        debug!(surface = %self.surface, %material, "material assigned");
        self.material = Some(material.clone());
        Ok(())
    }

    fn set_section(
        &mut self,
        section: SectionId,
        buffers: &MeshBuffers,
    ) -> Result<(), ResourceError> {
        buffers
            .validate()
            .map_err(|e| ResourceError::Rejected(e.to_string()))?;
        let packed = PackedSurfaceMesh::from_buffers(buffers);
        debug!(
            surface = %self.surface,
            vertex_bytes = packed.vertex_bytes().len(),
            index_bytes = packed.index_bytes().len(),
            "section uploaded"
        );
        self.section = Some((section, packed));
        Ok(())
    }

    fn clear_section(&mut self, section: SectionId) -> Result<(), ResourceError> {
        if self.section.as_ref().is_some_and(|(s, _)| *s == section) {
            self.section = None;
        }
        Ok(())
    }

    fn set_world_transform(&mut self, placement: &Placement) -> Result<(), ResourceError> {
        self.placement = *placement;
        Ok(())
    }

    fn destroy(self) -> Result<(), ResourceError> {
        info!(
            surface = %self.surface,
            triangles = self.triangle_count(),
            material = self.material.as_ref().map_or("<none>", MaterialRef::as_str),
            at = %self.placement.translation,
            "mesh destroyed"
        );
        Ok(())
    }
}

/// One plane in the script.
struct ScriptedPlane {
    id: SurfaceId,
    appears_at: u32,
    stops_at: Option<u32>,
    radius: f32,
    placement: Placement,
}

/// Session whose planes evolve deterministically with the frame number.
pub(crate) struct SimulatedSession {
    frame: u32,
    planes: Vec<ScriptedPlane>,
    refuse_once: Option<SurfaceId>,
    seed: u64,
}

impl SimulatedSession {
    pub(crate) fn new(seed: u64) -> Self {
        let planes = vec![
            // Floor: grows from a sliver into a decagon, then stops tracking.
            ScriptedPlane {
                id: SurfaceId(1),
                appears_at: 0,
                stops_at: Some(6),
                radius: 120.0,
                placement: Placement::from_translation(Vec3::new(0.0, 0.0, -140.0)),
            },
            // Table top.
            ScriptedPlane {
                id: SurfaceId(2),
                appears_at: 2,
                stops_at: None,
                radius: 45.0,
                placement: Placement::from_translation(Vec3::new(80.0, 20.0, -70.0)),
            },
            // Wall: the host refuses its first mesh.
            ScriptedPlane {
                id: SurfaceId(3),
                appears_at: 3,
                stops_at: None,
                radius: 200.0,
                placement: Placement::new(
                    Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
                    Vec3::new(0.0, 250.0, 0.0),
                ),
            },
        ];

        Self {
            frame: 0,
            planes,
            refuse_once: Some(SurfaceId(3)),
            seed,
        }
    }

    /// Advances the script by one frame.
    pub(crate) fn advance(&mut self) {
        self.frame += 1;
    }

    pub(crate) fn frame(&self) -> u32 {
        self.frame
    }

    fn boundary(&self, plane: &ScriptedPlane, jitter: &mut impl Rng) -> Vec<Vec3> {
        // Planes start with two points and gain two per frame, capped at ten.
        let age = self.frame - plane.appears_at;
        let points = (2 + 2 * age as usize).min(10);
        (0..points)
            .map(|k| {
                let angle = std::f32::consts::TAU * k as f32 / points as f32;
                let radius = plane.radius * jitter.gen_range(0.9..1.1);
                Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
            })
            .collect()
    }
}

impl SurfaceHost for SimulatedSession {
    type Resource = SimMesh;

    fn live_surfaces(&self) -> Vec<TrackedSurface> {
        // Jitter is reseeded per frame so the snapshot is stable within a frame.
        let mut jitter = Xoshiro256StarStar::seed_from_u64(self.seed ^ u64::from(self.frame));
        self.planes
            .iter()
            .filter(|plane| plane.appears_at <= self.frame)
            .map(|plane| {
                let state = match plane.stops_at {
                    Some(stop) if self.frame >= stop => TrackingState::StoppedTracking,
                    _ => TrackingState::Tracking,
                };
                TrackedSurface::new(plane.id, self.boundary(plane, &mut jitter), plane.placement)
                    .with_state(state)
            })
            .collect()
    }

    fn create_mesh_resource(&mut self, surface: SurfaceId) -> Result<SimMesh, HostError> {
        if self.refuse_once == Some(surface) {
            self.refuse_once = None;
            return Err(HostError::Refused("mesh pool exhausted".to_string()));
        }
        debug!(%surface, frame = self.frame, "mesh created");
        Ok(SimMesh {
            surface,
            material: None,
            section: None,
            placement: Placement::IDENTITY,
        })
    }
}
