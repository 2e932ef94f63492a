//! Engine-facing seams
//!
//! The thrower never touches a renderer or physics world directly. It
//! talks to the engine through these traits, which are handed to the
//! tracker at construction.

pub mod headless;

use crate::processing::trajectory::ThrowPath;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Where the held object rests between throws and where replacements spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestSlot {
    pub position: Vec3,
    pub rotation: Quat,
}

impl RestSlot {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}

/// Handle to the ball the player is holding
pub trait HeldObject {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);

    /// Suspend or restore gravity on the rigid body
    fn set_gravity(&mut self, enabled: bool);
    fn clear_velocities(&mut self);
    fn add_torque(&mut self, torque: Vec3);

    /// Charged balls arc lower and curve
    fn is_charged(&self) -> bool;

    /// Start flying along `path`
    fn launch(&mut self, path: ThrowPath);

    /// Parent the object to a rest slot
    fn attach(&mut self, slot: &RestSlot);
    fn detach(&mut self);
}

/// Spawns replacement objects after a throw
pub trait ObjectFactory {
    fn create(&mut self, position: Vec3, rotation: Quat) -> Box<dyn HeldObject>;
}

/// Finds the aim-assist target by tag
pub trait TargetLocator {
    fn find(&self, tag: &str) -> Option<Vec3>;
}

/// Camera used to lift screen positions into the world
pub trait Viewport {
    /// Width and height in pixels
    fn size(&self) -> (f32, f32);
    fn camera_position(&self) -> Vec3;
    /// `screen.x` and `screen.y` are pixels from the bottom-left corner,
    /// `screen.z` is the distance in front of the camera.
    fn screen_to_world(&self, screen: Vec3) -> Vec3;
}
