//! Held-object follow while dragging
//!
//! The held object chases the pointer's world position instead of
//! snapping to it. The default interpolates spherically with a factor of
//! `dt * follow_speed`; a linear variant and a damped spring are
//! available for devices with jittery reports.

use crate::config::schema::{FollowMode, SpringConfig};
use glam::{Quat, Vec3};

/// 3D spring state tracking position and velocity
#[derive(Debug, Clone)]
pub struct SpringState {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl SpringState {
    /// Create a new spring state at the given position with zero velocity
    pub fn new(initial: Vec3) -> Self {
        Self {
            position: initial,
            velocity: Vec3::ZERO,
        }
    }

    /// Advance the spring simulation by dt seconds toward the target
    ///
    /// Damped harmonic oscillator: F = -k * x - c * v
    pub fn step(&mut self, target: Vec3, config: &SpringConfig, dt: f32) {
        let displacement = self.position - target;
        let spring_force = -config.stiffness * displacement;
        let damping_force = -config.damping * self.velocity;
        let acceleration = (spring_force + damping_force) / config.mass;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Check if spring has settled (velocity and displacement below threshold)
    pub fn is_settled(&self, target: Vec3, threshold: f32) -> bool {
        self.position.distance(target) < threshold && self.velocity.length() < threshold
    }
}

/// Per-session follow state
#[derive(Debug, Clone)]
pub struct Follower {
    mode: FollowMode,
    speed: f32,
    spring: Option<SpringState>,
}

impl Follower {
    pub fn new(mode: FollowMode, speed: f32) -> Self {
        Self {
            mode,
            speed,
            spring: None,
        }
    }

    /// Forget spring velocity, e.g. when a new drag snaps the object
    pub fn reset(&mut self, position: Vec3) {
        self.spring = match self.mode {
            FollowMode::Spring(_) => Some(SpringState::new(position)),
            _ => None,
        };
    }

    /// Next position of an object at `current` chasing `target`
    pub fn step(&mut self, current: Vec3, target: Vec3, dt: f32) -> Vec3 {
        let t = dt * self.speed;
        match self.mode {
            FollowMode::Slerp => slerp(current, target, t),
            FollowMode::Lerp => current.lerp(target, t.clamp(0.0, 1.0)),
            FollowMode::Spring(config) => {
                let spring = self.spring.get_or_insert_with(|| SpringState::new(current));
                spring.step(target, &config, dt);
                spring.position
            }
        }
    }
}

/// Spherical interpolation of two position vectors.
///
/// Direction rotates along the arc between `a` and `b` while the length is
/// interpolated linearly. Falls back to a straight lerp when either vector
/// has no direction.
pub fn slerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let (len_a, len_b) = (a.length(), b.length());
    if len_a <= f32::EPSILON || len_b <= f32::EPSILON {
        return a.lerp(b, t);
    }

    let (dir_a, dir_b) = (a / len_a, b / len_b);
    let arc = Quat::from_rotation_arc(dir_a, dir_b);
    let direction = Quat::IDENTITY.slerp(arc, t) * dir_a;
    direction * (len_a + (len_b - len_a) * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> SpringConfig {
        SpringConfig {
            stiffness: 470.0,
            damping: 70.0,
            mass: 3.0,
        }
    }

    #[test]
    fn test_spring_approaches_target() {
        let config = default_config();
        let mut state = SpringState::new(Vec3::ZERO);
        let target = Vec3::new(1.0, 2.0, 3.0);

        for _ in 0..60 {
            state.step(target, &config, 1.0 / 60.0);
        }

        assert!(
            state.position.distance(target) < 0.2,
            "Position {:?} should be close to {:?}",
            state.position,
            target
        );
    }

    #[test]
    fn test_spring_settles() {
        let config = default_config();
        let mut state = SpringState::new(Vec3::ZERO);
        for _ in 0..600 {
            state.step(Vec3::X, &config, 1.0 / 60.0);
        }
        assert!(state.is_settled(Vec3::X, 1e-3));
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = Vec3::new(0.0, 0.0, 5.0);
        let b = Vec3::new(3.0, 0.0, 0.0);
        assert!(slerp(a, b, 0.0).distance(a) < 1e-5);
        assert!(slerp(a, b, 1.0).distance(b) < 1e-5);
        // Factor is clamped like a frame-time interpolation
        assert!(slerp(a, b, 4.0).distance(b) < 1e-5);
    }

    #[test]
    fn test_slerp_interpolates_length_and_angle() {
        let a = Vec3::new(0.0, 0.0, 2.0);
        let b = Vec3::new(4.0, 0.0, 0.0);
        let half = slerp(a, b, 0.5);

        assert!((half.length() - 3.0).abs() < 1e-4, "length {}", half.length());
        let expected_dir = Vec3::new(1.0, 0.0, 1.0).normalize();
        assert!(half.normalize().distance(expected_dir) < 1e-4);
    }

    #[test]
    fn test_slerp_from_origin_is_linear() {
        let b = Vec3::new(0.0, 4.0, 0.0);
        assert_eq!(slerp(Vec3::ZERO, b, 0.25), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_follower_lerp_uses_frame_time() {
        let mut follower = Follower::new(FollowMode::Lerp, 10.0);
        let next = follower.step(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), 0.05);
        assert!((next.z - 5.0).abs() < 1e-5, "next {:?}", next);
    }

    #[test]
    fn test_follower_spring_resets_velocity() {
        let mut follower = Follower::new(FollowMode::Spring(default_config()), 10.0);
        let mut pos = Vec3::ZERO;
        for _ in 0..10 {
            pos = follower.step(pos, Vec3::X * 10.0, 1.0 / 60.0);
        }
        follower.reset(Vec3::Y);

        // Right after a reset the spring starts from rest at the new position.
        let next = follower.step(Vec3::Y, Vec3::Y, 1.0 / 60.0);
        assert_eq!(next, Vec3::Y);
    }
}
