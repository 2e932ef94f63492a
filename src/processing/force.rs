//! Release decision from the smoothed pointer delta
//!
//! A swipe only becomes a throw when it is both strong enough and
//! pointed along the throw axis. Anything else is treated as a cancel.

use crate::config::schema::ThrowerConfig;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What happens to the held object when the pointer lifts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReleaseKind {
    Throw,
    Cancel,
}

/// Force and alignment measured at release, with the resulting decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDecision {
    pub force: f32,
    pub direction_score: f32,
    pub kind: ReleaseKind,
}

impl ReleaseDecision {
    pub fn is_throw(&self) -> bool {
        self.kind == ReleaseKind::Throw
    }
}

/// Thresholds and scale used to judge a release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceModel {
    pub force_multiplier: f32,
    pub minimum_force: f32,
    pub minimum_dot: f32,
    pub reference_axis: Vec2,
}

impl ForceModel {
    pub fn from_config(config: &ThrowerConfig) -> Self {
        Self {
            force_multiplier: config.force_multiplier,
            minimum_force: config.minimum_force,
            minimum_dot: config.minimum_dot,
            reference_axis: config.reference_axis,
        }
    }

    /// Throw strength for a smoothed delta
    pub fn force(&self, average_delta: Vec2) -> f32 {
        average_delta.length() * self.force_multiplier
    }

    /// Alignment of the swipe with the reference axis, in [-1, 1]
    pub fn direction_score(&self, average_delta: Vec2) -> f32 {
        average_delta.normalize_or_zero().dot(self.reference_axis)
    }

    /// Both thresholds are strict
    pub fn decide(&self, force: f32, direction_score: f32) -> ReleaseKind {
        if direction_score > self.minimum_dot && force > self.minimum_force {
            ReleaseKind::Throw
        } else {
            ReleaseKind::Cancel
        }
    }

    pub fn evaluate(&self, average_delta: Vec2) -> ReleaseDecision {
        let force = self.force(average_delta);
        let direction_score = self.direction_score(average_delta);
        ReleaseDecision {
            force,
            direction_score,
            kind: self.decide(force, direction_score),
        }
    }
}

impl Default for ForceModel {
    fn default() -> Self {
        Self::from_config(&ThrowerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::history::SampleHistory;

    fn model() -> ForceModel {
        ForceModel {
            force_multiplier: 60.0,
            minimum_force: 0.4,
            minimum_dot: 0.2,
            reference_axis: Vec2::X,
        }
    }

    #[test]
    fn test_right_swipe_throws() {
        let mut history = SampleHistory::new(10);
        for _ in 0..3 {
            history.push(Vec2::new(1.0, 0.0));
        }

        let decision = model().evaluate(history.average());
        assert_eq!(history.average(), Vec2::new(1.0, 0.0));
        assert!((decision.force - 60.0).abs() < 1e-5, "force {}", decision.force);
        assert!((decision.direction_score - 1.0).abs() < 1e-6);
        assert_eq!(decision.kind, ReleaseKind::Throw);
    }

    #[test]
    fn test_tiny_swipe_cancels() {
        let mut history = SampleHistory::new(10);
        history.push(Vec2::new(0.001, 0.0));

        let decision = model().evaluate(history.average());
        assert!((decision.force - 0.06).abs() < 1e-5, "force {}", decision.force);
        assert_eq!(decision.kind, ReleaseKind::Cancel);
    }

    #[test]
    fn test_perpendicular_swipe_cancels() {
        let decision = model().evaluate(Vec2::new(0.0, 1.0));
        assert!(decision.force > 0.4);
        assert_eq!(decision.direction_score, 0.0);
        assert_eq!(decision.kind, ReleaseKind::Cancel);
    }

    #[test]
    fn test_zero_delta_cancels_without_nan() {
        let decision = model().evaluate(Vec2::ZERO);
        assert_eq!(decision.force, 0.0);
        assert_eq!(decision.direction_score, 0.0);
        assert_eq!(decision.kind, ReleaseKind::Cancel);
    }

    #[test]
    fn test_decision_is_monotonic() {
        let m = model();
        let forces = [0.41, 0.5, 1.0, 10.0, 60.0, 500.0];
        let scores = [0.21, 0.3, 0.5, 0.9, 1.0];

        for (i, &f) in forces.iter().enumerate() {
            for (j, &s) in scores.iter().enumerate() {
                assert_eq!(m.decide(f, s), ReleaseKind::Throw);
                for &f2 in &forces[i..] {
                    assert_eq!(m.decide(f2, s), ReleaseKind::Throw, "force {} -> {}", f, f2);
                }
                for &s2 in &scores[j..] {
                    assert_eq!(m.decide(f, s2), ReleaseKind::Throw, "score {} -> {}", s, s2);
                }
            }
        }
    }
}
