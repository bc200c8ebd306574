//! Shoot-day scheduler and KPI evaluation.
//!
//! # Algorithm
//!
//! `ScheduleBuilder` is a greedy, single-pass heuristic: units are ordered
//! by weight score and poured into days that respect the daily cap, the
//! weekly cap, location continuity, and the rest-day cadence. It does not
//! minimize the number of days.
//!
//! # KPI
//!
//! `ScheduleKpi` summarizes a finished schedule: utilization, location
//! switches, oversized days, and weekly load.

mod builder;
mod kpi;

pub use builder::{build, PackingStrategy, ScheduleBuilder, WEEK_LENGTH};
pub use kpi::ScheduleKpi;
