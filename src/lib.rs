//! Shoot-day scheduling engine for film and video production.
//!
//! Takes a collection of scene-level production units (duration, time of
//! day, location, equipment, cast, props, priority weights) and assigns
//! them to numbered shooting days under daily and weekly time caps, a
//! rest-day cadence, and location continuity.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProductionUnit`, `Keywords`, `Weights`,
//!   `TimeOfDay`, `Schedule`, `ScheduleDay`, `TimeRange`
//! - **`normalize`**: Lenient raw input → `ProductionUnit` with warnings
//! - **`weighting`**: Scalar unit scores and priority ordering
//! - **`grouping`**: Relationship keys and equivalence-class grouping
//! - **`breakdown`**: Per-day resource aggregation
//! - **`scheduler`**: Day assignment (`ScheduleBuilder`) and `ScheduleKpi`
//! - **`fingerprint`**: Content hashing and change detection
//! - **`planner`**: Change-gated pipeline over a `ScheduleStore`
//! - **`config`**: `ScheduleConfig` with TOML loading
//! - **`validation`**: Input integrity checks (duplicate IDs, scene numbers)
//!
//! # Example
//!
//! ```
//! use shoot_schedule::config::ScheduleConfig;
//! use shoot_schedule::models::ProductionUnit;
//! use shoot_schedule::scheduler::build;
//!
//! let units = vec![
//!     ProductionUnit::new("s1", 1).with_location("Cafe").with_duration(240),
//!     ProductionUnit::new("s2", 2).with_location("Cafe").with_duration(240),
//!     ProductionUnit::new("s3", 3).with_location("Park").with_duration(60),
//! ];
//!
//! let schedule = build(&units, &ScheduleConfig::default()).unwrap();
//! assert_eq!(schedule.total_days, 2);
//! assert_eq!(schedule.days[0].scene_numbers(), vec![1, 2]);
//! ```
//!
//! # References
//!
//! - Clevé (2017), "Film Production Management"
//! - Honthaner (2010), "The Complete Film Production Handbook"

pub mod breakdown;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod grouping;
pub mod models;
pub mod normalize;
pub mod planner;
pub mod scheduler;
pub mod validation;
pub mod weighting;

pub use config::ScheduleConfig;
pub use error::{ConfigError, Result, ScheduleError};
pub use models::{ProductionUnit, Schedule, ScheduleDay};
pub use scheduler::ScheduleBuilder;
