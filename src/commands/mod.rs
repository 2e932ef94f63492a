//! Tool-facing commands
//!
//! Entry points used by the `throw-replay` binary.

pub mod replay;

pub use replay::{replay_file, replay_gesture, write_outcomes, ReplayOptions};
