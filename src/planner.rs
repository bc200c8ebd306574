//! Change-gated scheduling pipeline.
//!
//! The planner ties the engine to the persistence collaborator: it
//! fingerprints the incoming units, reuses the stored schedule when the
//! fingerprint is unchanged and the schedule was built with the same
//! configuration, and otherwise rebuilds and saves a fresh one.
//!
//! The engine itself never serializes concurrent writes for the same
//! project; a [`ScheduleStore`] that is shared between threads has to do
//! that (the in-memory store holds one lock per call).

use std::collections::HashMap;
use std::sync::Mutex;

use crate::config::ScheduleConfig;
use crate::error::{Result, ScheduleError};
use crate::fingerprint::{config_fingerprint, fingerprint, should_recompute};
use crate::models::{ProductionUnit, Schedule};
use crate::scheduler::ScheduleBuilder;

/// Persistence seam for schedules, keyed by project id.
pub trait ScheduleStore: Send + Sync {
    /// Fingerprint stored with the project's schedule, if any.
    fn load_fingerprint(&self, project_id: &str) -> Result<Option<String>>;

    /// The project's stored schedule, if any.
    fn load_schedule(&self, project_id: &str) -> Result<Option<Schedule>>;

    /// Replaces the project's schedule (and its fingerprint).
    fn save(&self, project_id: &str, schedule: &Schedule) -> Result<()>;
}

/// In-process store, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryScheduleStore {
    schedules: Mutex<HashMap<String, Schedule>>,
}

impl InMemoryScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored projects.
    pub fn len(&self) -> usize {
        self.schedules.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Schedule>>> {
        self.schedules
            .lock()
            .map_err(|e| ScheduleError::Store(format!("store lock poisoned: {e}")))
    }
}

impl ScheduleStore for InMemoryScheduleStore {
    fn load_fingerprint(&self, project_id: &str) -> Result<Option<String>> {
        Ok(self
            .lock()?
            .get(project_id)
            .map(|s| s.content_fingerprint.clone()))
    }

    fn load_schedule(&self, project_id: &str) -> Result<Option<Schedule>> {
        Ok(self.lock()?.get(project_id).cloned())
    }

    fn save(&self, project_id: &str, schedule: &Schedule) -> Result<()> {
        self.lock()?
            .insert(project_id.to_string(), schedule.clone());
        Ok(())
    }
}

/// Result of a planning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Input unchanged; the stored schedule was returned without a write.
    Reused(Schedule),
    /// Input changed (or nothing stored); a new schedule was built and saved.
    Recomputed(Schedule),
}

impl PlanOutcome {
    /// The schedule, either way.
    pub fn schedule(&self) -> &Schedule {
        match self {
            Self::Reused(s) | Self::Recomputed(s) => s,
        }
    }

    pub fn into_schedule(self) -> Schedule {
        match self {
            Self::Reused(s) | Self::Recomputed(s) => s,
        }
    }

    pub fn was_recomputed(&self) -> bool {
        matches!(self, Self::Recomputed(_))
    }
}

/// Runs the change-gated pipeline against a store.
///
/// # Example
/// ```
/// use shoot_schedule::config::ScheduleConfig;
/// use shoot_schedule::models::ProductionUnit;
/// use shoot_schedule::planner::{InMemoryScheduleStore, Planner};
///
/// let store = InMemoryScheduleStore::new();
/// let planner = Planner::new(ScheduleConfig::default());
/// let units = vec![ProductionUnit::new("s1", 1).with_duration(60)];
///
/// assert!(planner.plan("film-1", &units, &store).unwrap().was_recomputed());
/// assert!(!planner.plan("film-1", &units, &store).unwrap().was_recomputed());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    builder: ScheduleBuilder,
}

impl Planner {
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            builder: ScheduleBuilder::new(config),
        }
    }

    pub fn config(&self) -> &ScheduleConfig {
        self.builder.config()
    }

    /// Returns the stored schedule when `units` and the configuration are
    /// unchanged, otherwise builds, saves, and returns a new one.
    ///
    /// Configuration is validated before the store is touched.
    pub fn plan<S: ScheduleStore + ?Sized>(
        &self,
        project_id: &str,
        units: &[ProductionUnit],
        store: &S,
    ) -> Result<PlanOutcome> {
        self.config().validate()?;

        let new_fingerprint = fingerprint(units)?;
        let config_fp = config_fingerprint(self.config())?;
        let stored_fingerprint = store.load_fingerprint(project_id)?;

        if !should_recompute(&new_fingerprint, stored_fingerprint.as_deref()) {
            match store.load_schedule(project_id)? {
                Some(schedule) if schedule.config_fingerprint == config_fp => {
                    log::info!("project {project_id}: units unchanged, reusing stored schedule");
                    return Ok(PlanOutcome::Reused(schedule));
                }
                Some(_) => {
                    log::info!("project {project_id}: configuration changed, rebuilding");
                }
                None => {
                    log::warn!(
                        "project {project_id}: fingerprint stored without schedule, rebuilding"
                    );
                }
            }
        }

        let schedule = self
            .builder
            .build_with_fingerprint(units, new_fingerprint)?;
        store.save(project_id, &schedule)?;
        log::info!(
            "project {project_id}: scheduled {} scenes over {} days",
            schedule.total_scenes,
            schedule.total_days
        );
        Ok(PlanOutcome::Recomputed(schedule))
    }
}
