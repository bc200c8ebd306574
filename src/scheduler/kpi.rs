//! Schedule quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Working days | Days with at least one scene |
//! | Rest days | Empty rest slots inside the plan |
//! | Oversized days | Days holding one scene longer than the daily cap |
//! | Avg day minutes | Mean shooting minutes per working day |
//! | Avg utilization | Mean of day minutes / daily cap |
//! | Location switches | Consecutive working days at different locations |
//! | Max window minutes | Largest total in any 7-slot window |

use std::collections::BTreeMap;

use super::builder::WEEK_LENGTH;
use crate::config::ScheduleConfig;
use crate::models::Schedule;

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    /// Slots spanned by the plan, rest days included.
    pub total_days: u32,
    pub working_days: usize,
    pub rest_days: usize,
    pub oversized_days: usize,
    pub avg_day_minutes: f64,
    /// Mean day load against the daily cap. Oversized days count as > 1.0.
    pub avg_utilization: f64,
    pub location_switches: usize,
    pub max_window_minutes: u64,
}

impl ScheduleKpi {
    /// Computes KPIs for a schedule built with `config`.
    pub fn calculate(schedule: &Schedule, config: &ScheduleConfig) -> Self {
        let working_days = schedule.days.len();
        let day_minutes: Vec<f64> = schedule
            .days
            .iter()
            .map(|d| f64::from(d.estimated_duration_minutes))
            .collect();

        let avg_day_minutes = mean(&day_minutes);
        let avg_utilization = if config.max_daily_minutes > 0 {
            avg_day_minutes / config.max_daily_minutes as f64
        } else {
            0.0
        };

        let location_switches = schedule
            .days
            .windows(2)
            .filter(|pair| pair[0].location != pair[1].location)
            .count();

        let mut windows: BTreeMap<u32, u64> = BTreeMap::new();
        for day in &schedule.days {
            *windows
                .entry((day.day_index - 1) / WEEK_LENGTH)
                .or_insert(0) += u64::from(day.estimated_duration_minutes);
        }

        Self {
            total_days: schedule.span_days(),
            working_days,
            rest_days: schedule.rest_days.len(),
            oversized_days: schedule.days.iter().filter(|d| d.oversized).count(),
            avg_day_minutes,
            avg_utilization,
            location_switches,
            max_window_minutes: windows.values().copied().max().unwrap_or(0),
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_location_switches: usize, min_utilization: f64) -> bool {
        self.location_switches <= max_location_switches && self.avg_utilization >= min_utilization
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductionUnit;
    use crate::scheduler::build;

    fn unit(scene: u32, location: &str, minutes: u32) -> ProductionUnit {
        ProductionUnit::new(format!("s{scene}"), scene)
            .with_location(location)
            .with_duration(minutes)
    }

    #[test]
    fn test_kpi_basic() {
        let units = vec![unit(1, "A", 240), unit(2, "A", 240), unit(3, "B", 120), unit(4, "A", 600)];
        let config = ScheduleConfig::new(480, 2880, 2);
        let schedule = build(&units, &config).unwrap();
        let kpi = ScheduleKpi::calculate(&schedule, &config);

        // Days: [s1 s2]@A, [s3]@B, rest, [s4]@A (oversized)
        assert_eq!(kpi.working_days, 3);
        assert_eq!(kpi.rest_days, 1);
        assert_eq!(kpi.total_days, 4);
        assert_eq!(kpi.oversized_days, 1);
        assert_eq!(kpi.location_switches, 2);
        assert!((kpi.avg_day_minutes - 400.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - 400.0 / 480.0).abs() < 1e-10);
        assert_eq!(kpi.max_window_minutes, 1200);
    }

    #[test]
    fn test_kpi_empty() {
        let config = ScheduleConfig::default();
        let schedule = build(&[], &config).unwrap();
        let kpi = ScheduleKpi::calculate(&schedule, &config);
        assert_eq!(kpi.working_days, 0);
        assert_eq!(kpi.total_days, 0);
        assert_eq!(kpi.avg_utilization, 0.0);
        assert_eq!(kpi.max_window_minutes, 0);
    }

    #[test]
    fn test_meets_thresholds() {
        let units: Vec<_> = (1..=4).map(|n| unit(n, "A", 120)).collect();
        let config = ScheduleConfig::new(480, 2880, 6);
        let schedule = build(&units, &config).unwrap();
        let kpi = ScheduleKpi::calculate(&schedule, &config);

        assert!(kpi.meets_thresholds(0, 0.99));
        assert!(!kpi.meets_thresholds(0, 1.01));
    }
}
