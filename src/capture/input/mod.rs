//! Pointer input
//!
//! A `PointerChannel` receives start/hold/end reports from the pointing
//! device and fans them out to scoped subscriptions. Gestures can be
//! recorded and written to JSON for later replay.

pub mod channel;
pub mod types;

pub use channel::{
    read_gesture, write_gesture, CaptureError, CaptureResult, PointerChannel, QueuedEvent,
    Subscription,
};
pub use types::{GesturePhase, PointerEvent, PointerSample};
