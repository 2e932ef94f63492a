//! Throw path generation
//!
//! A release is turned into three Bezier control points: the current
//! object position, a lifted midpoint, and an end point pushed along the
//! holder's forward axis. Charged throws arc lower and curve sideways,
//! and a nearby target can pull the end point toward itself. The curve
//! is then sampled past `t = 1` so the path keeps falling beyond the
//! nominal end point.

use crate::config::schema::ThrowerConfig;
use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Start, lifted midpoint and end of a quadratic Bezier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BezierControlTriple {
    pub start: Vec3,
    pub mid: Vec3,
    pub end: Vec3,
}

impl BezierControlTriple {
    pub fn new(start: Vec3, mid: Vec3, end: Vec3) -> Self {
        Self { start, mid, end }
    }

    /// Evaluate the curve at `t`. Values above 1 extrapolate.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        self.start * (u * u) + self.mid * (2.0 * u * t) + self.end * (t * t)
    }

    /// Sample `points` evenly spaced parameters over `[0, extrapolation]`.
    /// A single point is just the start.
    pub fn sample_extrapolated(&self, extrapolation: f32, points: usize) -> ThrowPath {
        match points {
            0 => ThrowPath::default(),
            1 => ThrowPath::new(vec![self.start]),
            _ => {
                let last = (points - 1) as f32;
                let samples = (0..points)
                    .map(|i| self.point_at(extrapolation * i as f32 / last))
                    .collect();
                ThrowPath::new(samples)
            }
        }
    }
}

/// Ordered world-space points a thrown object follows
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThrowPath {
    points: Vec<Vec3>,
}

impl ThrowPath {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn first(&self) -> Option<Vec3> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Vec3> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<Vec3> {
        self.points
    }
}

/// Everything known about a release that the path depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowInput {
    pub start: Vec3,
    pub average_delta: Vec2,
    /// Force measured at release
    pub force: f32,
    pub frame_rotation: Quat,
    pub charged: bool,
    pub target: Option<Vec3>,
}

/// Tunables for path shaping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryBuilder {
    pub height_multiplier: f32,
    pub charged_height_scale: f32,
    pub curve_influence: f32,
    pub pointer_influence: Vec2,
    pub help_influence: Vec3,
    pub help_radius: f32,
    pub extrapolation: f32,
    pub points: usize,
}

impl TrajectoryBuilder {
    pub fn from_config(config: &ThrowerConfig) -> Self {
        Self {
            height_multiplier: config.height_multiplier,
            charged_height_scale: config.charged_height_scale,
            curve_influence: config.curve_influence,
            pointer_influence: config.pointer_influence,
            help_influence: config.help_influence,
            help_radius: config.help_radius,
            extrapolation: config.extrapolation,
            points: config.points,
        }
    }

    /// Control points for a release, after lift, curve and aim-assist
    pub fn control_points(&self, input: &ThrowInput) -> BezierControlTriple {
        let force = input.force;
        let forward = input.frame_rotation * Vec3::Z;

        let pointer_direction = input.average_delta.normalize_or_zero() * self.pointer_influence;
        let local_direction = input.frame_rotation * pointer_direction.extend(0.0);

        let throw_vector =
            (forward * (force * 2.0) + local_direction * force).normalize_or_zero() * force;
        let mut end = input.start + throw_vector;

        let mut mid = input.start.lerp(end, 0.5);
        let height_scale = if input.charged { self.charged_height_scale } else { 1.0 };
        mid.y += force * self.height_multiplier * height_scale;

        if input.charged {
            let curve_direction = Vec3::new(-local_direction.x, 0.0, 0.0).normalize_or_zero();
            end += curve_direction * self.curve_influence;
        }

        if let Some(target) = input.target {
            end = self.assist(end, target);
        }

        BezierControlTriple::new(input.start, mid, end)
    }

    /// Pull `end` toward `target` per axis when it lands inside the help radius
    pub fn assist(&self, end: Vec3, target: Vec3) -> Vec3 {
        if target.distance(end) >= self.help_radius {
            return end;
        }
        let k = self.help_influence;
        Vec3::new(
            lerp(end.x, target.x, k.x),
            lerp(end.y, target.y, k.y),
            lerp(end.z, target.z, k.z),
        )
    }

    pub fn build(&self, input: &ThrowInput) -> (BezierControlTriple, ThrowPath) {
        let control = self.control_points(input);
        let path = control.sample_extrapolated(self.extrapolation, self.points);
        (control, path)
    }
}

impl Default for TrajectoryBuilder {
    fn default() -> Self {
        Self::from_config(&ThrowerConfig::default())
    }
}

// Exact at t = 0 and t = 1
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}
