//! Cameras and the scene-owned camera registry.
//!
//! A behavior that renders a viewpoint holds a [`CameraLease`]. The lease
//! registers its camera on creation and unregisters it on drop, so the
//! registry never lists a camera whose owner is gone.

use glam::Vec2;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// First-person camera standing on the 2D plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera3D {
    pub position: Vec2,
    /// Yaw in radians
    pub rotation: f32,
    /// Eye height above the ground
    pub height: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Camera3D {
    /// Camera at a body's transform
    pub fn at(position: Vec2, rotation: f32) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Unit vector the camera looks along
    pub fn forwards(&self) -> Vec2 {
        Vec2::from_angle(self.rotation)
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            height: 0.5,
            fov: 75.0,
        }
    }
}

/// Id of a registered camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CameraId(u64);

#[derive(Debug, Default)]
struct Registry {
    cameras: HashMap<CameraId, Camera3D>,
    main: Option<CameraId>,
    next_id: u64,
}

/// Shared handle to the cameras of one scene
#[derive(Debug, Clone, Default)]
pub struct CameraRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl CameraRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `camera` for as long as the returned lease lives.
    ///
    /// The first camera registered into an empty registry becomes main.
    pub fn register(&self, camera: Camera3D) -> CameraLease {
        let mut registry = self.inner.write();
        let id = CameraId(registry.next_id);
        registry.next_id += 1;
        registry.cameras.insert(id, camera);
        if registry.main.is_none() {
            registry.main = Some(id);
        }
        log::debug!("CameraRegistry::register: {:?}", id);
        CameraLease {
            id,
            registry: self.clone(),
        }
    }

    fn unregister(&self, id: CameraId) {
        let mut registry = self.inner.write();
        registry.cameras.remove(&id);
        if registry.main == Some(id) {
            registry.main = None;
        }
        log::debug!("CameraRegistry::unregister: {:?}", id);
    }

    pub fn camera(&self, id: CameraId) -> Option<Camera3D> {
        self.inner.read().cameras.get(&id).copied()
    }

    pub fn main_camera(&self) -> Option<CameraId> {
        self.inner.read().main
    }

    /// State of the main camera
    pub fn main_view(&self) -> Option<Camera3D> {
        let registry = self.inner.read();
        registry.main.and_then(|id| registry.cameras.get(&id).copied())
    }

    /// Make a registered camera the main one. Unknown ids are ignored.
    pub fn set_main_camera(&self, id: CameraId) -> bool {
        let mut registry = self.inner.write();
        if !registry.cameras.contains_key(&id) {
            return false;
        }
        registry.main = Some(id);
        true
    }

    pub fn len(&self) -> usize {
        self.inner.read().cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().cameras.is_empty()
    }

    fn update(&self, id: CameraId, f: impl FnOnce(&mut Camera3D)) {
        if let Some(camera) = self.inner.write().cameras.get_mut(&id) {
            f(camera);
        }
    }
}

/// A registered camera, unregistered on drop
#[derive(Debug)]
pub struct CameraLease {
    id: CameraId,
    registry: CameraRegistry,
}

impl CameraLease {
    pub fn id(&self) -> CameraId {
        self.id
    }

    /// Current camera state
    pub fn get(&self) -> Camera3D {
        self.registry.camera(self.id).unwrap_or_default()
    }

    /// Replace the camera state
    pub fn set(&self, camera: Camera3D) {
        self.registry.update(self.id, |c| *c = camera);
    }

    /// Follow a body transform
    pub fn follow(&self, position: Vec2, rotation: f32) {
        self.registry.update(self.id, |c| {
            c.position = position;
            c.rotation = rotation;
        });
    }

    pub fn set_height(&self, height: f32) {
        self.registry.update(self.id, |c| c.height = height);
    }

    pub fn is_main(&self) -> bool {
        self.registry.main_camera() == Some(self.id)
    }

    pub fn make_main(&self) {
        self.registry.set_main_camera(self.id);
    }

    /// Register a copy of this camera for a successor.
    ///
    /// If this camera is main, the copy becomes main.
    pub fn hand_over(&self) -> CameraLease {
        let successor = self.registry.register(self.get());
        if self.is_main() {
            successor.make_main();
        }
        log::debug!("CameraLease::hand_over: {:?} -> {:?}", self.id, successor.id);
        successor
    }
}

impl Drop for CameraLease {
    fn drop(&mut self) {
        self.registry.unregister(self.id);
    }
}
