//! Input capture
//!
//! Device-facing side of the thrower: pointer events and their recording.

pub mod input;

pub use input::{PointerChannel, PointerEvent, PointerSample, Subscription};
