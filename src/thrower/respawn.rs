use uuid::Uuid;

/// Delay between a throw and its replacement ball.
///
/// Ticked by the owning tracker on its update loop. A dropped timer never
/// fires.
#[derive(Debug, Clone, PartialEq)]
pub struct RespawnTimer {
    /// Session whose throw scheduled this respawn
    pub session: Uuid,
    remaining: f32,
}

impl RespawnTimer {
    pub fn new(session: Uuid, delay_secs: f32) -> Self {
        Self {
            session,
            remaining: delay_secs.max(0.0),
        }
    }

    /// Advance by `dt` seconds; true once the delay has fully elapsed
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining = (self.remaining - dt).max(0.0);
        self.remaining == 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}
