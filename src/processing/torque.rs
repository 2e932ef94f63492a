//! Cosmetic spin applied to the held object while dragging

use glam::{Quat, Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorqueModel {
    pub multiplier: f32,
}

impl TorqueModel {
    pub fn new(multiplier: f32) -> Self {
        Self { multiplier }
    }

    /// Spin for one fixed tick.
    ///
    /// The smoothed delta is lifted into the holder's frame and crossed with
    /// the pointer-to-object direction, so swiping across the object spins it
    /// the way a flick would. Returns `None` when there is no movement to
    /// derive a direction from.
    pub fn torque(
        &self,
        held_position: Vec3,
        pointer_world: Vec3,
        average_delta: Vec2,
        frame_rotation: Quat,
    ) -> Option<Vec3> {
        let delta_direction = frame_rotation * average_delta.normalize_or_zero().extend(0.0);
        if delta_direction.length() <= 0.0 {
            return None;
        }

        let direction_to_held = (held_position - pointer_world).normalize_or_zero();
        let cross = direction_to_held.cross(delta_direction);
        Some(cross * self.multiplier * -1.0)
    }
}

impl Default for TorqueModel {
    fn default() -> Self {
        Self::new(0.3)
    }
}
