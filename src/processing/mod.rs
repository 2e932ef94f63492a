//! Gesture processing
//!
//! Pure math shared by the tracker: delta smoothing, pointer follow,
//! the release decision, spin while dragging, and throw path shaping.

pub mod follow;
pub mod force;
pub mod history;
pub mod torque;
pub mod trajectory;

pub use follow::{slerp, Follower, SpringState};
pub use force::{ForceModel, ReleaseDecision, ReleaseKind};
pub use history::{SampleHistory, DEFAULT_HISTORY_CAPACITY};
pub use torque::TorqueModel;
pub use trajectory::{BezierControlTriple, ThrowInput, ThrowPath, TrajectoryBuilder};
