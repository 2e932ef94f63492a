//! Thrower errors
//!
//! Gesture handling itself never fails; errors only come from building a
//! tracker. File-backed surfaces report through their own error types.

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThrowerError {
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigError),
}

/// Result type for thrower operations
pub type ThrowerResult<T> = Result<T, ThrowerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: ThrowerError = ConfigError::InvalidValue {
            field: "points",
            reason: "2 is outside [3, 100]".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value for points: 2 is outside [3, 100]"
        );
    }
}
