//! Thrower configuration
//!
//! All tunables live in a single serializable struct loaded from JSON.

pub mod schema;

pub use schema::{ConfigError, ConfigResult, FollowMode, SpringConfig, ThrowerConfig};
