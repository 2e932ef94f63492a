//! Tunable thrower settings
//!
//! Everything here is plain data so it can live in a JSON file next to
//! the game assets. Missing fields fall back to the defaults below.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating a [`ThrowerConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Damped spring parameters for [`FollowMode::Spring`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 470.0,
            damping: 70.0,
            mass: 3.0,
        }
    }
}

/// How the held object chases the pointer while dragging
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FollowMode {
    #[default]
    Slerp,
    Lerp,
    Spring(SpringConfig),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThrowerConfig {
    // Dragging
    pub follow_speed: f32,
    pub follow_mode: FollowMode,
    pub torque_multiplier: f32,

    // Throw
    pub force_multiplier: f32,
    pub height_multiplier: f32,
    pub charged_height_scale: f32,
    pub curve_influence: f32,
    pub minimum_force: f32,
    /// Alignment threshold against `reference_axis`, in [-1, 1]
    pub minimum_dot: f32,
    pub reference_axis: Vec2,
    /// Which pointer axes bend the throw away from straight ahead
    pub pointer_influence: Vec2,

    // Aim assist
    /// Per-axis pull toward the target, each in [0, 1]
    pub help_influence: Vec3,
    pub help_radius: f32,
    pub target_tag: String,

    // Sampling
    pub history_capacity: usize,
    pub extrapolation: f32,
    pub points: usize,

    // Respawn
    pub respawn_delay_secs: f32,
}

impl Default for ThrowerConfig {
    fn default() -> Self {
        Self {
            follow_speed: 10.0,
            follow_mode: FollowMode::Slerp,
            torque_multiplier: 0.3,
            force_multiplier: 60.0,
            height_multiplier: 0.5,
            charged_height_scale: 0.5,
            curve_influence: 5.0,
            minimum_force: 0.4,
            minimum_dot: 0.2,
            reference_axis: Vec2::X,
            pointer_influence: Vec2::Y,
            help_influence: Vec3::ZERO,
            help_radius: 2.0,
            target_tag: "target".to_string(),
            history_capacity: 10,
            extrapolation: 2.0,
            points: 10,
            respawn_delay_secs: 1.0,
        }
    }
}

impl ThrowerConfig {
    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let data = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Check every range constraint, reporting the first violation
    pub fn validate(&self) -> ConfigResult<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::InvalidValue {
                field,
                reason: reason.into(),
            }
        }

        let finite = [
            ("followSpeed", self.follow_speed),
            ("torqueMultiplier", self.torque_multiplier),
            ("forceMultiplier", self.force_multiplier),
            ("heightMultiplier", self.height_multiplier),
            ("chargedHeightScale", self.charged_height_scale),
            ("curveInfluence", self.curve_influence),
            ("minimumForce", self.minimum_force),
            ("helpRadius", self.help_radius),
            ("respawnDelaySecs", self.respawn_delay_secs),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, format!("{} is not finite", value)));
            }
        }

        if self.follow_speed < 0.0 {
            return Err(invalid("followSpeed", "must not be negative"));
        }
        if let FollowMode::Spring(spring) = self.follow_mode {
            if !(spring.mass > 0.0) {
                return Err(invalid("followMode", "spring mass must be positive"));
            }
        }
        if !(-1.0..=1.0).contains(&self.minimum_dot) {
            let reason = format!("{} is outside [-1, 1]", self.minimum_dot);
            return Err(invalid("minimumDot", reason));
        }
        if !self.reference_axis.is_finite() || self.reference_axis.length_squared() == 0.0 {
            return Err(invalid("referenceAxis", "must be a non-zero vector"));
        }
        if !self.pointer_influence.is_finite() {
            return Err(invalid("pointerInfluence", "must be finite"));
        }
        let help = self.help_influence;
        for (axis, k) in [("x", help.x), ("y", help.y), ("z", help.z)] {
            if !(0.0..=1.0).contains(&k) {
                let reason = format!("{} component {} is outside [0, 1]", axis, k);
                return Err(invalid("helpInfluence", reason));
            }
        }
        if self.help_radius < 0.0 {
            return Err(invalid("helpRadius", "must not be negative"));
        }
        if self.history_capacity == 0 {
            return Err(invalid("historyCapacity", "must hold at least one delta"));
        }
        if !(1.0..=10.0).contains(&self.extrapolation) {
            let reason = format!("{} is outside [1, 10]", self.extrapolation);
            return Err(invalid("extrapolation", reason));
        }
        if !(3..=100).contains(&self.points) {
            return Err(invalid("points", format!("{} is outside [3, 100]", self.points)));
        }
        if self.respawn_delay_secs < 0.0 {
            return Err(invalid("respawnDelaySecs", "must not be negative"));
        }

        Ok(())
    }
}
