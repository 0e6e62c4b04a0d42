//! Multi-frame runs of the surface renderer against a scripted AR session.

use std::collections::{BTreeSet, HashMap};

use arsurf_mesh::{MeshBuffers, Placement};
use arsurf_surface::{
    HostError, MaterialRef, MeshResource, RendererSettings, ResourceError, SectionId, SurfaceHost,
    SurfaceId, SurfaceRenderer, TrackedSurface, TrackingState,
};
use glam::{Quat, Vec3};

/// Mesh object that records the last section it received.
#[derive(Debug)]
struct PlaneMesh {
    vertices: usize,
    indices: Vec<u32>,
    placement: Option<Placement>,
    material: Option<String>,
}

impl MeshResource for PlaneMesh {
    fn assign_material(&mut self, material: &MaterialRef) -> Result<(), ResourceError> {
        self.material = Some(material.to_string());
        Ok(())
    }

    fn set_section(&mut self, _: SectionId, buffers: &MeshBuffers) -> Result<(), ResourceError> {
        buffers
            .validate()
            .map_err(|e| ResourceError::Rejected(e.to_string()))?;
        if !buffers.is_finite() {
            return Err(ResourceError::Rejected("non-finite vertex data".into()));
        }
        self.vertices = buffers.vertex_count();
        self.indices = buffers.indices.clone();
        Ok(())
    }

    fn clear_section(&mut self, _: SectionId) -> Result<(), ResourceError> {
        self.vertices = 0;
        self.indices.clear();
        Ok(())
    }

    fn set_world_transform(&mut self, placement: &Placement) -> Result<(), ResourceError> {
        self.placement = Some(*placement);
        Ok(())
    }

    fn destroy(self) -> Result<(), ResourceError> {
        Ok(())
    }
}

/// Scripted session: surfaces keyed by id, plus counters for host calls.
#[derive(Default)]
struct Session {
    surfaces: Vec<TrackedSurface>,
    creations: HashMap<SurfaceId, usize>,
    refuse: BTreeSet<SurfaceId>,
}

impl Session {
    fn upsert(&mut self, surface: TrackedSurface) {
        match self.surfaces.iter_mut().find(|s| s.id == surface.id) {
            Some(existing) => *existing = surface,
            None => self.surfaces.push(surface),
        }
    }

    fn set_state(&mut self, id: u64, state: TrackingState) {
        if let Some(surface) = self.surfaces.iter_mut().find(|s| s.id == SurfaceId(id)) {
            surface.tracking_state = state;
        }
    }

    fn remove(&mut self, id: u64) {
        self.surfaces.retain(|s| s.id != SurfaceId(id));
    }

    fn expected_registered(&self) -> Vec<SurfaceId> {
        let ids: BTreeSet<SurfaceId> = self
            .surfaces
            .iter()
            .filter(|s| s.is_tracking() && !self.refuse.contains(&s.id))
            .map(|s| s.id)
            .collect();
        ids.into_iter().collect()
    }
}

impl SurfaceHost for Session {
    type Resource = PlaneMesh;

    fn live_surfaces(&self) -> Vec<TrackedSurface> {
        self.surfaces.clone()
    }

    fn create_mesh_resource(&mut self, surface: SurfaceId) -> Result<PlaneMesh, HostError> {
        if self.refuse.contains(&surface) {
            return Err(HostError::OwnerMissing);
        }
        *self.creations.entry(surface).or_default() += 1;
        Ok(PlaneMesh {
            vertices: 0,
            indices: Vec::new(),
            placement: None,
            material: None,
        })
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("arsurf_surface=debug")
        .try_init();
}

fn plane(id: u64, points: usize, radius: f32) -> TrackedSurface {
    let boundary = (0..points)
        .map(|k| {
            let angle = std::f32::consts::TAU * k as f32 / points as f32;
            Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
        })
        .collect();
    let placement = Placement::new(
        Quat::from_rotation_z(id as f32 * 0.1),
        Vec3::new(id as f32, 0.0, -50.0),
    );
    TrackedSurface::new(SurfaceId(id), boundary, placement)
}

#[test]
fn test_registry_tracks_live_tracking_surfaces_across_frames() {
    init_tracing();
    let mut session = Session::default();
    let mut renderer = SurfaceRenderer::new(RendererSettings {
        feathering_distance: 5.0,
        default_material: Some(MaterialRef::new("M_ARSurface")),
        ..RendererSettings::default()
    });

    // Frame-by-frame script: each closure mutates the session before a tick.
    let script: Vec<Box<dyn Fn(&mut Session)>> = vec![
        Box::new(|s: &mut Session| s.upsert(plane(1, 4, 40.0))),
        Box::new(|s: &mut Session| {
            s.upsert(plane(2, 2, 10.0));
            s.upsert(plane(3, 6, 80.0).with_state(TrackingState::NotTracking));
        }),
        Box::new(|s: &mut Session| {
            s.upsert(plane(2, 5, 30.0));
            s.set_state(3, TrackingState::Tracking);
        }),
        Box::new(|s: &mut Session| s.set_state(1, TrackingState::StoppedTracking)),
        Box::new(|s: &mut Session| {
            s.remove(1);
            s.remove(2);
            s.upsert(plane(4, 3, 2.0));
        }),
        Box::new(|s: &mut Session| s.set_state(1, TrackingState::Tracking)),
        Box::new(|s: &mut Session| s.upsert(plane(1, 8, 60.0))),
    ];

    for (frame, step) in script.iter().enumerate() {
        step(&mut session);
        let report = renderer.tick(&mut session);
        assert_eq!(
            renderer.registry().ids(),
            session.expected_registered(),
            "frame {frame}"
        );
        assert_eq!(report.registered, renderer.registry().len());
        assert_eq!(report.creation_failures, 0);
    }

    // Surface 1 stopped, vanished, and came back: one resource per lifetime.
    assert_eq!(session.creations[&SurfaceId(1)], 2);
    assert_eq!(session.creations[&SurfaceId(3)], 1);
}

#[test]
fn test_mesh_contents_match_boundary() {
    init_tracing();
    let mut session = Session::default();
    session.upsert(plane(7, 12, 100.0));
    session.upsert(plane(8, 2, 100.0));
    let mut renderer = SurfaceRenderer::new(RendererSettings {
        default_material: Some(MaterialRef::new("M_ARSurface")),
        ..RendererSettings::default()
    });

    let report = renderer.tick(&mut session);
    assert_eq!(report.rebuilt, 1);
    assert_eq!(report.cleared, 1);

    let mesh = renderer.registry().get(SurfaceId(7)).unwrap();
    assert_eq!(mesh.vertices, 24);
    assert_eq!(mesh.indices.len(), 9 * 12 - 6);
    assert_eq!(mesh.placement, Some(session.surfaces[0].placement));
    assert_eq!(mesh.material.as_deref(), Some("M_ARSurface"));

    let degenerate = renderer.registry().get(SurfaceId(8)).unwrap();
    assert_eq!(degenerate.vertices, 0);
    assert_eq!(degenerate.placement, None);
}

#[test]
fn test_refused_surface_recovers_once_host_allows() {
    init_tracing();
    let mut session = Session::default();
    session.upsert(plane(1, 4, 10.0));
    session.upsert(plane(2, 4, 10.0));
    session.refuse.insert(SurfaceId(2));
    let mut renderer = SurfaceRenderer::new(RendererSettings::default());

    for _ in 0..3 {
        let report = renderer.tick(&mut session);
        assert_eq!(report.creation_failures, 1);
        assert_eq!(renderer.registry().ids(), vec![SurfaceId(1)]);
    }

    session.refuse.clear();
    let report = renderer.tick(&mut session);
    assert_eq!(report.created, 1);
    assert_eq!(renderer.registry().ids(), vec![SurfaceId(1), SurfaceId(2)]);
}

#[test]
fn test_surface_through_origin_produces_finite_mesh() {
    init_tracing();
    let mut session = Session::default();
    session.upsert(TrackedSurface::new(
        SurfaceId(1),
        vec![Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0), Vec3::new(0.0, 20.0, 0.0)],
        Placement::IDENTITY,
    ));
    let mut renderer = SurfaceRenderer::new(RendererSettings::default());

    // PlaneMesh rejects non-finite data, which would leave rebuilt at 0.
    let report = renderer.tick(&mut session);
    assert_eq!(report.rebuilt, 1);
}
