//! Swipe Throw - turn a pointer swipe into a thrown-ball trajectory.
//!
//! The crate tracks a drag from an external pointing device, smooths the
//! pointer movement, decides on release whether the swipe was a throw,
//! and builds the curved path the ball flies along. Rendering, physics
//! and spawning stay with the host engine behind the traits in [`scene`].

pub mod capture;
pub mod commands;
pub mod config;
pub mod processing;
pub mod scene;
pub mod thrower;

pub use capture::{PointerChannel, PointerEvent, PointerSample, Subscription};
pub use config::{ConfigError, ThrowerConfig};
pub use processing::{BezierControlTriple, ReleaseDecision, ReleaseKind, SampleHistory, ThrowPath};
pub use scene::{HeldObject, ObjectFactory, RestSlot, TargetLocator, Viewport};
pub use thrower::{Collaborators, GestureTracker, ReleaseOutcome, ThrowerError};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the tracing subscriber used by the bundled tools
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swipe_throw=debug,throw_replay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
