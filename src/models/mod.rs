//! Scheduling domain models.
//!
//! Provides the input record ([`ProductionUnit`]) and the derived output
//! records ([`Schedule`], [`ScheduleDay`]).
//!
//! # Domain Mappings
//!
//! | shoot-schedule | Film set | Generic scheduling |
//! |----------------|----------|--------------------|
//! | ProductionUnit | Scene / caption card | Job |
//! | ScheduleDay | Shooting day | Bin / shift |
//! | Schedule | Shooting plan | Solution |

mod schedule;
mod unit;

pub use schedule::{Schedule, ScheduleDay, TimeRange};
pub use unit::{Keywords, ProductionUnit, TimeOfDay, Weights, MAX_WEIGHT, MIN_WEIGHT};
