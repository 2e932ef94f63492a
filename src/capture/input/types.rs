use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// One pointer report from the device
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSample {
    /// Normalized screen position, x and y in [0, 1], origin top-left
    pub normalized: Vec2,
    /// World position as reported by the device
    pub world: Vec3,
    /// Time in milliseconds from device connect
    pub process_time_ms: f64,
}

impl PointerSample {
    pub fn new(normalized: Vec2, world: Vec3, process_time_ms: f64) -> Self {
        Self {
            normalized,
            world,
            process_time_ms,
        }
    }

    pub fn at(x: f32, y: f32, process_time_ms: f64) -> Self {
        Self::new(Vec2::new(x, y), Vec3::ZERO, process_time_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GesturePhase {
    Start,
    Hold,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEvent {
    pub phase: GesturePhase,
    pub sample: PointerSample,
}

impl PointerEvent {
    pub fn start(sample: PointerSample) -> Self {
        Self {
            phase: GesturePhase::Start,
            sample,
        }
    }

    pub fn hold(sample: PointerSample) -> Self {
        Self {
            phase: GesturePhase::Hold,
            sample,
        }
    }

    pub fn end(sample: PointerSample) -> Self {
        Self {
            phase: GesturePhase::End,
            sample,
        }
    }
}
