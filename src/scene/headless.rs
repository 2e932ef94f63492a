//! Engine-free implementations of the scene traits
//!
//! Used by the replay tool and by tests. Objects record what was done to
//! them so callers can inspect the result after a gesture.

use crate::processing::trajectory::ThrowPath;
use crate::scene::{HeldObject, ObjectFactory, RestSlot, TargetLocator, Viewport};
use glam::{Quat, Vec3};
use parking_lot::Mutex as ParkingMutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Inspectable state of a [`HeadlessBall`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallState {
    pub id: u32,
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub gravity: bool,
    pub charged: bool,
    /// Sum of all torque applied since the last velocity clear
    pub accumulated_torque: Vec3,
    pub attached: bool,
    pub launched: Option<ThrowPath>,
}

/// A ball whose state lives behind a shared handle.
///
/// The tracker owns the `Box<dyn HeldObject>`, so tests keep a
/// [`BallProbe`] to read the state back after ownership moves.
#[derive(Debug, Clone)]
pub struct HeadlessBall {
    state: Arc<ParkingMutex<BallState>>,
}

/// Read-only view of a [`HeadlessBall`]
#[derive(Debug, Clone)]
pub struct BallProbe {
    state: Arc<ParkingMutex<BallState>>,
}

impl BallProbe {
    pub fn snapshot(&self) -> BallState {
        self.state.lock().clone()
    }
}

impl HeadlessBall {
    pub fn new(id: u32, position: Vec3, rotation: Quat) -> Self {
        Self {
            state: Arc::new(ParkingMutex::new(BallState {
                id,
                position,
                rotation,
                gravity: true,
                ..Default::default()
            })),
        }
    }

    pub fn charged(self, charged: bool) -> Self {
        self.state.lock().charged = charged;
        self
    }

    pub fn probe(&self) -> BallProbe {
        BallProbe {
            state: self.state.clone(),
        }
    }
}

impl HeldObject for HeadlessBall {
    fn position(&self) -> Vec3 {
        self.state.lock().position
    }

    fn set_position(&mut self, position: Vec3) {
        self.state.lock().position = position;
    }

    fn rotation(&self) -> Quat {
        self.state.lock().rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.state.lock().rotation = rotation;
    }

    fn set_gravity(&mut self, enabled: bool) {
        self.state.lock().gravity = enabled;
    }

    fn clear_velocities(&mut self) {
        let mut state = self.state.lock();
        state.velocity = Vec3::ZERO;
        state.angular_velocity = Vec3::ZERO;
        state.accumulated_torque = Vec3::ZERO;
    }

    fn add_torque(&mut self, torque: Vec3) {
        let mut state = self.state.lock();
        state.accumulated_torque += torque;
        state.angular_velocity += torque;
    }

    fn is_charged(&self) -> bool {
        self.state.lock().charged
    }

    fn launch(&mut self, path: ThrowPath) {
        let mut state = self.state.lock();
        if let Some(first) = path.first() {
            state.position = first;
        }
        state.gravity = true;
        state.launched = Some(path);
    }

    fn attach(&mut self, slot: &RestSlot) {
        let mut state = self.state.lock();
        state.position = slot.position;
        state.rotation = slot.rotation;
        state.attached = true;
    }

    fn detach(&mut self) {
        self.state.lock().attached = false;
    }
}

/// Creates [`HeadlessBall`]s and remembers a probe for each
#[derive(Debug, Default)]
pub struct HeadlessFactory {
    next_id: u32,
    charged: bool,
    spawned: Arc<ParkingMutex<Vec<BallProbe>>>,
}

impl HeadlessFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every spawned ball charged
    pub fn charged(mut self, charged: bool) -> Self {
        self.charged = charged;
        self
    }

    /// Shared list of probes for balls created so far
    pub fn spawned(&self) -> Arc<ParkingMutex<Vec<BallProbe>>> {
        self.spawned.clone()
    }
}

impl ObjectFactory for HeadlessFactory {
    fn create(&mut self, position: Vec3, rotation: Quat) -> Box<dyn HeldObject> {
        self.next_id += 1;
        let ball = HeadlessBall::new(self.next_id, position, rotation).charged(self.charged);
        self.spawned.lock().push(ball.probe());
        tracing::debug!("Spawned headless ball {} at {:?}", self.next_id, position);
        Box::new(ball)
    }
}

/// Tag to position table
#[derive(Debug, Clone, Default)]
pub struct TaggedTargets {
    targets: HashMap<String, Vec3>,
}

impl TaggedTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tag: impl Into<String>, position: Vec3) -> Self {
        self.targets.insert(tag.into(), position);
        self
    }

    pub fn remove(&mut self, tag: &str) -> Option<Vec3> {
        self.targets.remove(tag)
    }
}

impl TargetLocator for TaggedTargets {
    fn find(&self, tag: &str) -> Option<Vec3> {
        self.targets.get(tag).copied()
    }
}

/// Perspective camera looking down its local +Z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeViewport {
    pub width: f32,
    pub height: f32,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub position: Vec3,
    pub rotation: Quat,
}

impl PinholeViewport {
    pub fn new(width: f32, height: f32, fov_y: f32) -> Self {
        Self {
            width,
            height,
            fov_y,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn at(mut self, position: Vec3, rotation: Quat) -> Self {
        self.position = position;
        self.rotation = rotation;
        self
    }
}

impl Default for PinholeViewport {
    fn default() -> Self {
        Self::new(1920.0, 1080.0, 60f32.to_radians())
    }
}

impl Viewport for PinholeViewport {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn camera_position(&self) -> Vec3 {
        self.position
    }

    fn screen_to_world(&self, screen: Vec3) -> Vec3 {
        let aspect = self.width / self.height;
        let half_height = (self.fov_y * 0.5).tan();
        let ndc_x = screen.x / self.width * 2.0 - 1.0;
        let ndc_y = screen.y / self.height * 2.0 - 1.0;

        let depth = screen.z;
        let local = Vec3::new(
            ndc_x * half_height * aspect * depth,
            ndc_y * half_height * depth,
            depth,
        );
        self.position + self.rotation * local
    }
}
