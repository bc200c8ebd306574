//! Greedy shoot-day builder.
//!
//! # Algorithm
//!
//! 1. Score every unit and sort descending, ties by ascending scene number.
//! 2. With `LocationClustered`, build location and equipment group
//!    indexes and cluster the sorted list by them. `Greedy` skips this.
//! 3. Walk the list with a current-day accumulator. The day is closed when
//!    the next unit would push it over the daily cap, or when the next unit
//!    is at a different location.
//! 4. A unit longer than the daily cap gets a day of its own (flagged
//!    `oversized`), never split.
//! 5. After every `rest_day_interval` working days one slot is left empty.
//! 6. Minutes are also capped per 7-slot window. When a unit would push the
//!    window over, the day is closed and work resumes in the next window.
//!
//! # Complexity
//! O(n log n) for the sort, O(n) for the walk.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::breakdown::Breakdown;
use crate::config::{Limits, ScheduleConfig};
use crate::error::Result;
use crate::fingerprint;
use crate::grouping::{GroupingEngine, RelationshipKey};
use crate::models::{ProductionUnit, Schedule, ScheduleDay, TimeRange};
use crate::weighting::WeightModel;

/// Slots per weekly window.
pub const WEEK_LENGTH: u32 = 7;

/// How the sorted unit list is fed into the day walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackingStrategy {
    /// Walk units in score order; every location change starts a new day.
    /// No group indexes are built: the sorted list alone drives the walk.
    #[default]
    Greedy,
    /// Make each location's units contiguous first (locations ordered by
    /// their best-scored unit, units inside by equipment, then score).
    LocationClustered,
}

/// Builds schedules from production units.
///
/// # Example
///
/// ```
/// use shoot_schedule::config::ScheduleConfig;
/// use shoot_schedule::models::ProductionUnit;
/// use shoot_schedule::scheduler::ScheduleBuilder;
///
/// let units: Vec<ProductionUnit> = (1..=4)
///     .map(|n| ProductionUnit::new(format!("s{n}"), n).with_location("Studio").with_duration(120))
///     .collect();
///
/// let schedule = ScheduleBuilder::new(ScheduleConfig::new(480, 2880, 6))
///     .build(&units)
///     .unwrap();
/// assert_eq!(schedule.total_days, 1);
/// assert_eq!(schedule.total_duration_minutes, 480);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    config: ScheduleConfig,
}

impl ScheduleBuilder {
    /// Creates a builder for a configuration.
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Builds a schedule. Fails only on invalid configuration.
    pub fn build(&self, units: &[ProductionUnit]) -> Result<Schedule> {
        let content_fingerprint = fingerprint::fingerprint(units)?;
        self.build_with_fingerprint(units, content_fingerprint)
    }

    /// Builds a schedule for units whose fingerprint is already known.
    pub fn build_with_fingerprint(
        &self,
        units: &[ProductionUnit],
        content_fingerprint: String,
    ) -> Result<Schedule> {
        let limits = self.config.limits()?;
        let model = WeightModel::with_multipliers(self.config.multipliers);

        let order = self.order(&model, units);
        log::debug!(
            "scheduling {} units ({:?}, daily cap {} min, weekly cap {} min)",
            units.len(),
            self.config.strategy,
            limits.max_daily,
            limits.max_weekly
        );

        let mut walker = DayWalker::new(limits, self.config.start_date);
        for idx in order {
            walker.push(&units[idx]);
        }
        let (days, rest_days) = walker.finish();

        let mut schedule = Schedule::from_days(
            days,
            rest_days,
            content_fingerprint,
            model.total_score(units),
        );
        schedule.config_fingerprint = fingerprint::config_fingerprint(&self.config)?;
        Ok(schedule)
    }

    /// Indices of `units` in walk order.
    fn order(&self, model: &WeightModel, units: &[ProductionUnit]) -> Vec<usize> {
        let order = model.sort_indices(units);
        match self.config.strategy {
            PackingStrategy::Greedy => order,
            PackingStrategy::LocationClustered => {
                let grouping = GroupingEngine::new().with_cast_policy(self.config.cast_key_policy);
                cluster_by_location(units, &order, &grouping)
            }
        }
    }
}

/// Builds a schedule with the given configuration.
pub fn build(units: &[ProductionUnit], config: &ScheduleConfig) -> Result<Schedule> {
    ScheduleBuilder::new(config.clone()).build(units)
}

fn cluster_by_location(
    units: &[ProductionUnit],
    order: &[usize],
    grouping: &GroupingEngine,
) -> Vec<usize> {
    let mut rank = vec![0usize; units.len()];
    for (pos, &idx) in order.iter().enumerate() {
        rank[idx] = pos;
    }

    let equipment: Vec<String> = units
        .iter()
        .map(|u| grouping.key_for(u, RelationshipKey::SameEquipment))
        .collect();

    let mut clusters: Vec<Vec<usize>> = grouping
        .group_indices(units, RelationshipKey::SameLocation)
        .into_values()
        .collect();
    for members in &mut clusters {
        members.sort_by_key(|&i| rank[i]);

        // Equipment sub-groups ordered by their first (best) member.
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        for (pos, &i) in members.iter().enumerate() {
            first_seen.entry(equipment[i].as_str()).or_insert(pos);
        }
        members.sort_by_key(|&i| (first_seen[equipment[i].as_str()], rank[i]));
    }
    clusters.sort_by_key(|members| members.first().map(|&i| rank[i]).unwrap_or(usize::MAX));

    clusters.into_iter().flatten().collect()
}

/// Day-walk state.
struct DayWalker {
    limits: Limits,
    start_date: Option<NaiveDate>,
    days: Vec<ScheduleDay>,
    rest_days: Vec<u32>,
    current: Vec<ProductionUnit>,
    current_location: String,
    current_minutes: u64,
    /// Slot the open (or next) day takes.
    next_index: u32,
    working_days_closed: u32,
    /// Window of `next_index` while no day is open.
    window: u32,
    window_minutes: u64,
}

impl DayWalker {
    fn new(limits: Limits, start_date: Option<NaiveDate>) -> Self {
        Self {
            limits,
            start_date,
            days: Vec::new(),
            rest_days: Vec::new(),
            current: Vec::new(),
            current_location: String::new(),
            current_minutes: 0,
            next_index: 1,
            working_days_closed: 0,
            window: 0,
            window_minutes: 0,
        }
    }

    fn push(&mut self, unit: &ProductionUnit) {
        let minutes = u64::from(unit.estimated_duration_minutes);

        if !self.current.is_empty()
            && (self.current_minutes + minutes > u64::from(self.limits.max_daily)
                || unit.location() != self.current_location)
        {
            self.close_day();
        }

        if self.window_minutes + self.current_minutes + minutes > self.limits.max_weekly {
            if !self.current.is_empty() {
                self.close_day();
            }
            // A unit larger than a whole window still goes into a fresh one.
            if self.window_minutes > 0 {
                self.roll_window();
            }
        }

        if self.current.is_empty() {
            self.current_location = unit.location().to_string();
        }
        self.current.push(unit.clone());
        self.current_minutes += minutes;
    }

    fn close_day(&mut self) {
        let scenes = std::mem::take(&mut self.current);
        let Some(first) = scenes.first() else {
            return;
        };

        let day_index = self.next_index;
        let minutes = u32::try_from(self.current_minutes).unwrap_or(u32::MAX);
        let time_of_day = first.time_of_day;
        let oversized = scenes.len() == 1 && first.exceeds(self.limits.max_daily);
        if oversized {
            log::warn!(
                "scene {} ('{}') runs {} min, over the daily cap of {} min; scheduled alone on day {}",
                first.scene_number,
                first.id,
                minutes,
                self.limits.max_daily,
                day_index
            );
        }

        let day = ScheduleDay {
            day_index,
            date_label: self.date_label(day_index),
            location: std::mem::take(&mut self.current_location),
            time_of_day,
            time_range: TimeRange::from_minutes(time_of_day.call_time_minutes(), minutes),
            breakdown: Breakdown::aggregate(&scenes),
            estimated_duration_minutes: minutes,
            scenes,
            oversized,
        };
        log::debug!(
            "closed day {} at '{}': {} scenes, {} min",
            day.day_index,
            day.location,
            day.scenes.len(),
            day.estimated_duration_minutes
        );
        self.days.push(day);

        self.window_minutes += self.current_minutes;
        self.current_minutes = 0;
        self.working_days_closed += 1;
        self.next_index = day_index + 1;

        let interval = self.limits.rest_interval;
        if interval > 0 && self.working_days_closed % interval == 0 {
            log::debug!("rest day at slot {}", self.next_index);
            self.rest_days.push(self.next_index);
            self.next_index += 1;
        }
        self.sync_window();
    }

    /// Moves `next_index` to the first slot of the next window.
    fn roll_window(&mut self) {
        self.next_index = (self.window + 1) * WEEK_LENGTH + 1;
        log::debug!(
            "weekly cap reached ({} min), resuming at slot {}",
            self.window_minutes,
            self.next_index
        );
        self.sync_window();
    }

    fn sync_window(&mut self) {
        let window = (self.next_index - 1) / WEEK_LENGTH;
        if window != self.window {
            self.window = window;
            self.window_minutes = 0;
        }
    }

    fn date_label(&self, day_index: u32) -> String {
        self.start_date
            .and_then(|start| start.checked_add_days(Days::new(u64::from(day_index - 1))))
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("Day {day_index}"))
    }

    fn finish(mut self) -> (Vec<ScheduleDay>, Vec<u32>) {
        self.close_day();
        let last = self.days.last().map(|d| d.day_index).unwrap_or(0);
        self.rest_days.retain(|&slot| slot < last);
        (self.days, self.rest_days)
    }
}
