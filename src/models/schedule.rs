//! Schedule (solution) model.
//!
//! A schedule is the ordered list of shooting days produced by one run of
//! the builder. It is derived data: every recomputation replaces it
//! wholesale.

use serde::{Deserialize, Serialize};

use super::{ProductionUnit, TimeOfDay};
use crate::breakdown::Breakdown;

/// A complete shooting plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Working days in shooting order.
    pub days: Vec<ScheduleDay>,
    /// Day indices left empty as rest days.
    pub rest_days: Vec<u32>,
    /// Number of working days.
    pub total_days: usize,
    /// Number of scheduled units.
    pub total_scenes: usize,
    /// Sum of all day durations (minutes).
    pub total_duration_minutes: u64,
    /// Fingerprint of the unit collection this schedule was built from.
    pub content_fingerprint: String,
    /// Fingerprint of the configuration the schedule was built with.
    #[serde(default)]
    pub config_fingerprint: String,
    /// Sum of per-unit weight scores. Informational only.
    pub optimization_score: i64,
    /// Resources needed across the whole schedule.
    pub breakdown: Breakdown,
}

/// One shooting day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDay {
    /// 1-based slot index. Rest days and week rollovers leave gaps.
    pub day_index: u32,
    /// Calendar date (`%Y-%m-%d`) or `"Day N"` without a start date.
    pub date_label: String,
    /// Location committed for the day.
    pub location: String,
    /// Time of day of the first scene.
    pub time_of_day: TimeOfDay,
    /// Call time to wrap time.
    pub time_range: TimeRange,
    /// Scenes in shooting order.
    pub scenes: Vec<ProductionUnit>,
    /// Sum of scene durations (minutes).
    pub estimated_duration_minutes: u32,
    /// Resources needed on this day.
    pub breakdown: Breakdown,
    /// A single scene longer than the daily cap was placed here alone.
    pub oversized: bool,
}

/// Call and wrap times, formatted `HH:MM`.
///
/// The end may run past midnight and is then rendered past 24 (`"26:30"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

impl TimeRange {
    /// Builds a range from a start (minutes after midnight) and a duration.
    pub fn from_minutes(start_minutes: u32, duration_minutes: u32) -> Self {
        Self {
            start: format_clock(start_minutes),
            end: format_clock(start_minutes.saturating_add(duration_minutes)),
        }
    }
}

fn format_clock(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

impl ScheduleDay {
    /// Number of scenes on this day.
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the day holds a given unit.
    pub fn contains(&self, unit_id: &str) -> bool {
        self.scenes.iter().any(|u| u.id == unit_id)
    }

    /// Scene numbers in shooting order.
    pub fn scene_numbers(&self) -> Vec<u32> {
        self.scenes.iter().map(|u| u.scene_number).collect()
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a schedule from closed days, filling in the totals and the
    /// schedule-wide breakdown.
    pub fn from_days(
        days: Vec<ScheduleDay>,
        rest_days: Vec<u32>,
        content_fingerprint: impl Into<String>,
        optimization_score: i64,
    ) -> Self {
        let mut breakdown = Breakdown::new();
        for day in &days {
            breakdown.merge(&day.breakdown);
        }
        Self {
            total_days: days.len(),
            total_scenes: days.iter().map(|d| d.scenes.len()).sum(),
            total_duration_minutes: days
                .iter()
                .map(|d| u64::from(d.estimated_duration_minutes))
                .sum(),
            days,
            rest_days,
            content_fingerprint: content_fingerprint.into(),
            config_fingerprint: String::new(),
            optimization_score,
            breakdown,
        }
    }

    /// Whether the schedule has no days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Last occupied slot index (working or rest), or 0 when empty.
    pub fn span_days(&self) -> u32 {
        let last_work = self.days.last().map(|d| d.day_index).unwrap_or(0);
        let last_rest = self.rest_days.last().copied().unwrap_or(0);
        last_work.max(last_rest)
    }

    /// Finds the working day with the given slot index.
    pub fn day(&self, day_index: u32) -> Option<&ScheduleDay> {
        self.days.iter().find(|d| d.day_index == day_index)
    }

    /// Finds the day a unit was assigned to.
    pub fn day_for_unit(&self, unit_id: &str) -> Option<&ScheduleDay> {
        self.days.iter().find(|d| d.contains(unit_id))
    }

    /// Whether a slot index is a rest day.
    pub fn is_rest_day(&self, day_index: u32) -> bool {
        self.rest_days.contains(&day_index)
    }

    /// Days that hold a single scene longer than the cap.
    pub fn oversized_days(&self) -> Vec<&ScheduleDay> {
        self.days.iter().filter(|d| d.oversized).collect()
    }

    /// All scheduled units in shooting order.
    pub fn units(&self) -> impl Iterator<Item = &ProductionUnit> {
        self.days.iter().flat_map(|d| d.scenes.iter())
    }
}
