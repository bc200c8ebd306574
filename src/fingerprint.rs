//! Content fingerprints for change detection.
//!
//! A fingerprint is the SHA-256 digest of a canonical JSON projection of
//! the unit collection. Only fields that influence the schedule are
//! projected, in a fixed order, and units keep their input order, so
//! reordering units changes the fingerprint.
//!
//! There is no semantic diffing: a changed fingerprint means the whole
//! schedule is rebuilt.
//!
//! [`config_fingerprint`] digests a [`ScheduleConfig`] the same way, so a
//! stored schedule can be matched against the settings it was built with.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::ScheduleConfig;
use crate::error::Result;
use crate::models::{ProductionUnit, TimeOfDay};

/// Tracked fields of one unit, in hashing order.
#[derive(Serialize)]
struct CanonicalUnit<'a> {
    scene_number: u32,
    title: &'a str,
    estimated_duration_minutes: u32,
    time_of_day: TimeOfDay,
    location: &'a str,
    date: &'a str,
    equipment: &'a str,
    cast: &'a [String],
    props: &'a [String],
    special_requirements: &'a [String],
    weights: [u8; 5],
}

impl<'a> From<&'a ProductionUnit> for CanonicalUnit<'a> {
    fn from(unit: &'a ProductionUnit) -> Self {
        let kw = &unit.keywords;
        let w = unit.weights.clamped();
        Self {
            scene_number: unit.scene_number,
            title: &unit.title,
            estimated_duration_minutes: unit.estimated_duration_minutes,
            time_of_day: unit.time_of_day,
            location: &kw.location,
            date: &kw.date,
            equipment: &kw.equipment,
            cast: &kw.cast,
            props: &kw.props,
            special_requirements: &kw.special_requirements,
            weights: [
                w.location_priority,
                w.equipment_priority,
                w.cast_priority,
                w.time_priority,
                w.complexity,
            ],
        }
    }
}

/// Computes the hex-encoded SHA-256 fingerprint of a unit collection.
///
/// # Example
/// ```
/// use shoot_schedule::fingerprint::fingerprint;
/// use shoot_schedule::models::ProductionUnit;
///
/// let units = vec![ProductionUnit::new("a", 1).with_duration(30)];
/// let fp = fingerprint(&units).unwrap();
/// assert_eq!(fp.len(), 64);
/// assert_eq!(fp, fingerprint(&units.clone()).unwrap());
/// ```
pub fn fingerprint(units: &[ProductionUnit]) -> Result<String> {
    let projection: Vec<CanonicalUnit<'_>> = units.iter().map(CanonicalUnit::from).collect();
    let mut hasher = Sha256::new();
    serde_json::to_writer(&mut hasher, &projection)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Computes the hex-encoded SHA-256 fingerprint of a configuration.
pub fn config_fingerprint(config: &ScheduleConfig) -> Result<String> {
    let mut hasher = Sha256::new();
    serde_json::to_writer(&mut hasher, config)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Whether a schedule must be rebuilt.
///
/// True when nothing is stored yet or the fingerprints differ.
pub fn should_recompute(new_fingerprint: &str, stored_fingerprint: Option<&str>) -> bool {
    stored_fingerprint != Some(new_fingerprint)
}

/// Remembers the last fingerprint for one unit collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeDetector {
    stored: Option<String>,
}

impl ChangeDetector {
    /// Creates a detector with nothing stored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detector seeded with a previously stored fingerprint.
    pub fn with_stored(fingerprint: impl Into<String>) -> Self {
        Self {
            stored: Some(fingerprint.into()),
        }
    }

    /// The stored fingerprint, if any.
    pub fn stored(&self) -> Option<&str> {
        self.stored.as_deref()
    }

    /// Fingerprints `units` and reports whether they differ from the stored
    /// fingerprint. Returns the new fingerprint alongside the decision.
    pub fn check(&self, units: &[ProductionUnit]) -> Result<(String, bool)> {
        let fp = fingerprint(units)?;
        let changed = should_recompute(&fp, self.stored());
        Ok((fp, changed))
    }

    /// Records a fingerprint after a successful recomputation.
    pub fn record(&mut self, fingerprint: impl Into<String>) {
        self.stored = Some(fingerprint.into());
    }
}
