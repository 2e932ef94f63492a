//! Swipe-to-throw controller
//!
//! Owns the drag lifecycle of the held ball: follow and spin while the
//! pointer is down, then throw or put back on release, then respawn.

pub mod error;
pub mod respawn;
pub mod session;
pub mod tracker;

pub use error::{ThrowerError, ThrowerResult};
pub use respawn::RespawnTimer;
pub use session::DragSession;
pub use tracker::{normalized_to_world, Collaborators, GestureTracker, ReleaseOutcome, TrackerState};
