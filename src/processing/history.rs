//! Rolling history of pointer deltas
//!
//! Per-event pointer movement is noisy, so the throw and spin models
//! read a rolling average of the most recent screen-space deltas
//! instead of the raw last delta.

use glam::Vec2;
use std::collections::VecDeque;

/// Default number of deltas kept for smoothing
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Bounded FIFO of screen-space deltas with a running sum
#[derive(Debug, Clone)]
pub struct SampleHistory {
    deltas: VecDeque<Vec2>,
    capacity: usize,
    sum: Vec2,
}

impl SampleHistory {
    /// Create an empty history holding at most `capacity` deltas
    pub fn new(capacity: usize) -> Self {
        Self {
            deltas: VecDeque::with_capacity(capacity + 1),
            capacity,
            sum: Vec2::ZERO,
        }
    }

    /// Append a delta, evicting the oldest one once capacity is exceeded
    pub fn push(&mut self, delta: Vec2) {
        self.deltas.push_back(delta);
        self.sum += delta;

        while self.deltas.len() > self.capacity {
            if let Some(evicted) = self.deltas.pop_front() {
                self.sum -= evicted;
            }
        }
    }

    /// Drop every stored delta
    pub fn clear(&mut self) {
        self.deltas.clear();
        self.sum = Vec2::ZERO;
    }

    /// Arithmetic mean of the stored deltas, or zero when empty
    pub fn average(&self) -> Vec2 {
        if self.deltas.is_empty() {
            return Vec2::ZERO;
        }
        self.sum / self.deltas.len() as f32
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Vec2> {
        self.deltas.iter()
    }
}

impl Default for SampleHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
