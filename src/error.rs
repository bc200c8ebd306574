//! Error types for the scheduling engine.
//!
//! Only configuration problems abort a run. Malformed per-unit fields are
//! normalized (see [`crate::normalize`]) and oversized units are handled by
//! the single-unit-day policy, so neither surfaces here.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Invalid scheduling configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_daily_minutes` must be positive.
    #[error("max_daily_minutes must be positive, got {0}")]
    NonPositiveDailyCap(i64),

    /// `max_weekly_minutes` must be positive.
    #[error("max_weekly_minutes must be positive, got {0}")]
    NonPositiveWeeklyCap(i64),

    /// `rest_day_interval` must not be negative (0 disables rest days).
    #[error("rest_day_interval must not be negative, got {0}")]
    NegativeRestInterval(i64),

    /// Configuration text could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Configuration file could not be read.
    #[error("Failed to read configuration file: {0}")]
    Io(String),
}

/// Errors surfaced by the scheduling pipeline.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Configuration rejected before any work was done.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Canonical unit projection could not be serialized for hashing.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The persistence collaborator failed.
    #[error("Store error: {0}")]
    Store(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let e = ConfigError::NonPositiveDailyCap(0);
        assert_eq!(e.to_string(), "max_daily_minutes must be positive, got 0");

        let e = ConfigError::NegativeRestInterval(-2);
        assert!(e.to_string().contains("-2"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: ScheduleError = ConfigError::NonPositiveWeeklyCap(-1).into();
        assert!(matches!(
            err,
            ScheduleError::Config(ConfigError::NonPositiveWeeklyCap(-1))
        ));
        assert!(err.to_string().starts_with("Invalid configuration"));
    }
}
