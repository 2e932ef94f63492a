use crate::processing::follow::Follower;
use crate::processing::history::SampleHistory;
use glam::{Vec2, Vec3};
use uuid::Uuid;

/// State of one start-to-end drag.
///
/// Created when a gesture starts with a ball in hand and dropped when the
/// gesture ends, whether the ball was thrown or put back.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub id: Uuid,
    pub start_world: Vec3,
    pub last_screen: Vec2,
    pub last_world: Vec3,
    pub history: SampleHistory,
    pub follower: Follower,
}

impl DragSession {
    pub fn begin(
        screen: Vec2,
        world: Vec3,
        history_capacity: usize,
        mut follower: Follower,
    ) -> Self {
        follower.reset(world);
        Self {
            id: Uuid::new_v4(),
            start_world: world,
            last_screen: screen,
            last_world: world,
            history: SampleHistory::new(history_capacity),
            follower,
        }
    }

    /// Record a new pointer report.
    ///
    /// A last screen position of exactly zero means the device had no
    /// previous report, so no delta is recorded for it.
    pub fn record(&mut self, screen: Vec2, world: Vec3) {
        if self.last_screen != Vec2::ZERO {
            self.history.push(screen - self.last_screen);
        }
        self.last_screen = screen;
        self.last_world = world;
    }
}
