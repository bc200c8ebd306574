//! Scheduling configuration.
//!
//! Capacity limits, rest cadence, and the tunable parts of the engine.
//! Can be built in code or loaded from TOML; omitted fields take the
//! defaults below.
//!
//! ```toml
//! max_daily_minutes = 600
//! max_weekly_minutes = 3000
//! rest_day_interval = 5
//! start_date = "2024-07-01"
//! strategy = "location-clustered"
//!
//! [multipliers]
//! location = 1000
//! cast = 500
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::grouping::CastKeyPolicy;
use crate::scheduler::PackingStrategy;
use crate::weighting::WeightMultipliers;

/// Scheduling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Daily shooting cap (minutes). Must be positive.
    pub max_daily_minutes: i64,
    /// Cap per 7-day window (minutes). Must be positive.
    pub max_weekly_minutes: i64,
    /// A rest day follows every N working days. 0 disables rest days.
    pub rest_day_interval: i64,
    /// Calendar date of day 1. Without it days are labelled `"Day N"`.
    pub start_date: Option<NaiveDate>,
    /// Day-packing strategy.
    pub strategy: PackingStrategy,
    /// Cast grouping key policy.
    pub cast_key_policy: CastKeyPolicy,
    /// Priority multipliers.
    pub multipliers: WeightMultipliers,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            max_daily_minutes: 480,
            max_weekly_minutes: 2880,
            rest_day_interval: 6,
            start_date: None,
            strategy: PackingStrategy::default(),
            cast_key_policy: CastKeyPolicy::default(),
            multipliers: WeightMultipliers::default(),
        }
    }
}

impl ScheduleConfig {
    /// Creates a configuration with explicit capacity limits.
    pub fn new(max_daily_minutes: i64, max_weekly_minutes: i64, rest_day_interval: i64) -> Self {
        Self {
            max_daily_minutes,
            max_weekly_minutes,
            rest_day_interval,
            ..Default::default()
        }
    }

    /// Sets the calendar date of day 1.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the packing strategy.
    pub fn with_strategy(mut self, strategy: PackingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the cast key policy.
    pub fn with_cast_key_policy(mut self, policy: CastKeyPolicy) -> Self {
        self.cast_key_policy = policy;
        self
    }

    /// Sets the priority multipliers.
    pub fn with_multipliers(mut self, multipliers: WeightMultipliers) -> Self {
        self.multipliers = multipliers;
        self
    }

    /// Checks capacity limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_daily_minutes <= 0 {
            return Err(ConfigError::NonPositiveDailyCap(self.max_daily_minutes));
        }
        if self.max_weekly_minutes <= 0 {
            return Err(ConfigError::NonPositiveWeeklyCap(self.max_weekly_minutes));
        }
        if self.rest_day_interval < 0 {
            return Err(ConfigError::NegativeRestInterval(self.rest_day_interval));
        }
        Ok(())
    }

    /// Parses a TOML document and validates it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ScheduleConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::Io(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Validated limits converted to the builder's unsigned domain.
    pub(crate) fn limits(&self) -> Result<Limits, ConfigError> {
        self.validate()?;
        Ok(Limits {
            max_daily: saturate_u32(self.max_daily_minutes),
            max_weekly: saturate_u64(self.max_weekly_minutes),
            rest_interval: saturate_u32(self.rest_day_interval),
        })
    }
}

/// Validated capacity limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Limits {
    pub max_daily: u32,
    pub max_weekly: u64,
    pub rest_interval: u32,
}

fn saturate_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn saturate_u64(value: i64) -> u64 {
    u64::try_from(value.max(0)).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let c = ScheduleConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.max_daily_minutes, 480);
        assert_eq!(c.rest_day_interval, 6);
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        assert_eq!(
            ScheduleConfig::new(0, 2880, 6).validate(),
            Err(ConfigError::NonPositiveDailyCap(0))
        );
        assert_eq!(
            ScheduleConfig::new(480, -1, 6).validate(),
            Err(ConfigError::NonPositiveWeeklyCap(-1))
        );
        assert_eq!(
            ScheduleConfig::new(480, 2880, -1).validate(),
            Err(ConfigError::NegativeRestInterval(-1))
        );
        assert!(ScheduleConfig::new(480, 2880, 0).validate().is_ok());
    }

    #[test]
    fn test_from_toml_with_defaults() {
        let c = ScheduleConfig::from_toml_str(
            r#"
            max_daily_minutes = 600
            start_date = "2024-07-01"
            strategy = "location-clustered"
            cast_key_policy = "input-order"

            [multipliers]
            complexity = 75
            "#,
        )
        .unwrap();

        assert_eq!(c.max_daily_minutes, 600);
        assert_eq!(c.max_weekly_minutes, 2880);
        assert_eq!(c.start_date, NaiveDate::from_ymd_opt(2024, 7, 1));
        assert_eq!(c.strategy, PackingStrategy::LocationClustered);
        assert_eq!(c.cast_key_policy, CastKeyPolicy::InputOrder);
        assert_eq!(c.multipliers.complexity, 75);
        assert_eq!(c.multipliers.location, 1000);
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        let err = ScheduleConfig::from_toml_str("max_daily_minutes = -5").unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveDailyCap(-5));

        let err = ScheduleConfig::from_toml_str("max_daily_minutes = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_missing_file() {
        let err = ScheduleConfig::from_file("/nonexistent/schedule.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_limits() {
        let limits = ScheduleConfig::new(480, 2400, 3).limits().unwrap();
        assert_eq!(limits.max_daily, 480);
        assert_eq!(limits.max_weekly, 2400);
        assert_eq!(limits.rest_interval, 3);

        let huge = ScheduleConfig::new(i64::MAX, i64::MAX, 0).limits().unwrap();
        assert_eq!(huge.max_daily, u32::MAX);
    }
}
