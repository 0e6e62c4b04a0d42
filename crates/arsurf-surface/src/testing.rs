//! In-memory host used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use arsurf_mesh::{MeshBuffers, Placement};
use glam::Vec3;

use crate::host::{HostError, MaterialRef, MeshResource, ResourceError, SectionId, SurfaceHost};
use crate::surface::{SurfaceId, TrackedSurface, TrackingState};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Event {
    Material {
        handle: u64,
        material: String,
    },
    SetSection {
        handle: u64,
        section: SectionId,
        vertices: usize,
        indices: usize,
    },
    Clear {
        handle: u64,
        section: SectionId,
    },
    Transform {
        handle: u64,
        placement: Placement,
    },
    Destroy {
        handle: u64,
    },
}

#[derive(Default)]
struct LogInner {
    events: Vec<Event>,
    positions: HashMap<u64, Vec<Vec3>>,
}

/// Shared record of every call made on fake resources.
#[derive(Clone, Default)]
pub(crate) struct ResourceLog(Rc<RefCell<LogInner>>);

impl ResourceLog {
    fn push(&self, event: Event) {
        self.0.borrow_mut().events.push(event);
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    pub(crate) fn destroyed(&self) -> Vec<u64> {
        self.0
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Destroy { handle } => Some(*handle),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn last_positions(&self, handle: u64) -> Option<Vec<Vec3>> {
        self.0.borrow().positions.get(&handle).cloned()
    }
}

/// One-shot error returned by the next `set_section` call.
type SectionFault = Rc<RefCell<Option<ResourceError>>>;

pub(crate) struct FakeResource {
    pub(crate) handle: u64,
    pub(crate) fail_destroy: bool,
    pub(crate) reject_material: bool,
    valid: Rc<Cell<bool>>,
    section_fault: SectionFault,
    log: ResourceLog,
}

impl FakeResource {
    pub(crate) fn new(handle: u64, log: &ResourceLog) -> Self {
        Self {
            handle,
            fail_destroy: false,
            reject_material: false,
            valid: Rc::new(Cell::new(true)),
            section_fault: SectionFault::default(),
            log: log.clone(),
        }
    }

    pub(crate) fn invalidate(&self) {
        self.valid.set(false);
    }

    fn check(&self) -> Result<(), ResourceError> {
        if self.valid.get() {
            Ok(())
        } else {
            Err(ResourceError::Invalidated)
        }
    }
}

impl MeshResource for FakeResource {
    fn is_valid(&self) -> bool {
        self.valid.get()
    }

    fn assign_material(&mut self, material: &MaterialRef) -> Result<(), ResourceError> {
        self.check()?;
        if self.reject_material {
            return Err(ResourceError::Rejected("unknown material".into()));
        }
        self.log.push(Event::Material {
            handle: self.handle,
            material: material.to_string(),
        });
        Ok(())
    }

    fn set_section(
        &mut self,
        section: SectionId,
        buffers: &MeshBuffers,
    ) -> Result<(), ResourceError> {
        self.check()?;
        if let Some(err) = self.section_fault.borrow_mut().take() {
            return Err(err);
        }
        self.log.push(Event::SetSection {
            handle: self.handle,
            section,
            vertices: buffers.vertex_count(),
            indices: buffers.indices.len(),
        });
        self.log
            .0
            .borrow_mut()
            .positions
            .insert(self.handle, buffers.positions.clone());
        Ok(())
    }

    fn clear_section(&mut self, section: SectionId) -> Result<(), ResourceError> {
        self.check()?;
        self.log.push(Event::Clear {
            handle: self.handle,
            section,
        });
        Ok(())
    }

    fn set_world_transform(&mut self, placement: &Placement) -> Result<(), ResourceError> {
        self.check()?;
        self.log.push(Event::Transform {
            handle: self.handle,
            placement: *placement,
        });
        Ok(())
    }

    fn destroy(self) -> Result<(), ResourceError> {
        if self.fail_destroy {
            return Err(ResourceError::Rejected("destroy blocked".into()));
        }
        self.log.push(Event::Destroy {
            handle: self.handle,
        });
        Ok(())
    }
}

pub(crate) struct FakeHost {
    pub(crate) surfaces: Vec<TrackedSurface>,
    pub(crate) log: ResourceLog,
    pub(crate) created: Vec<(SurfaceId, u64)>,
    pub(crate) refuse_next: usize,
    /// Handed to the next created resource as its first `set_section` result.
    pub(crate) fail_first_section: Option<ResourceError>,
    pub(crate) reject_materials: bool,
    validity: HashMap<u64, Rc<Cell<bool>>>,
    faults: HashMap<u64, SectionFault>,
    next_handle: u64,
}

impl FakeHost {
    pub(crate) fn new(surfaces: Vec<TrackedSurface>) -> Self {
        Self {
            surfaces,
            log: ResourceLog::default(),
            created: Vec::new(),
            refuse_next: 0,
            fail_first_section: None,
            reject_materials: false,
            validity: HashMap::new(),
            faults: HashMap::new(),
            next_handle: 0,
        }
    }

    pub(crate) fn set_state(&mut self, id: SurfaceId, state: TrackingState) {
        for surface in self.surfaces.iter_mut().filter(|s| s.id == id) {
            surface.tracking_state = state;
        }
    }

    pub(crate) fn invalidate(&mut self, handle: u64) {
        if let Some(flag) = self.validity.get(&handle) {
            flag.set(false);
        }
    }

    /// Makes the next `set_section` on `handle` fail with `err` while the
    /// resource itself stays valid.
    pub(crate) fn fail_section(&mut self, handle: u64, err: ResourceError) {
        if let Some(fault) = self.faults.get(&handle) {
            *fault.borrow_mut() = Some(err);
        }
    }
}

impl SurfaceHost for FakeHost {
    type Resource = FakeResource;

    fn live_surfaces(&self) -> Vec<TrackedSurface> {
        self.surfaces.clone()
    }

    fn create_mesh_resource(&mut self, surface: SurfaceId) -> Result<FakeResource, HostError> {
        if self.refuse_next > 0 {
            self.refuse_next -= 1;
            return Err(HostError::Refused("test refusal".into()));
        }
        let handle = self.next_handle;
        self.next_handle += 1;

        let mut resource = FakeResource::new(handle, &self.log);
        resource.reject_material = self.reject_materials;
        *resource.section_fault.borrow_mut() = self.fail_first_section.take();
        self.validity.insert(handle, Rc::clone(&resource.valid));
        self.faults
            .insert(handle, Rc::clone(&resource.section_fault));
        self.created.push((surface, handle));
        Ok(resource)
    }
}
