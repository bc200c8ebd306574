//! Resource breakdown aggregation.
//!
//! A breakdown is the deduplicated resource summary for a shooting day or
//! for a whole schedule: every location, cast member, equipment string,
//! prop, and special requirement that the covered units need.
//!
//! Empty location and equipment strings are kept as `""` entries rather
//! than filtered out, so a breakdown shows that some unit had no value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::ProductionUnit;

/// Deduplicated resource sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub locations: BTreeSet<String>,
    pub cast: BTreeSet<String>,
    pub equipment: BTreeSet<String>,
    pub props: BTreeSet<String>,
    pub special_requirements: BTreeSet<String>,
}

impl Breakdown {
    /// Creates an empty breakdown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates the resources of every unit.
    ///
    /// # Example
    /// ```
    /// use shoot_schedule::breakdown::Breakdown;
    /// use shoot_schedule::models::ProductionUnit;
    ///
    /// let units = vec![
    ///     ProductionUnit::new("a", 1).with_location("Cafe").with_cast_member("Kim"),
    ///     ProductionUnit::new("b", 2).with_location("Cafe").with_cast_member("Kim"),
    /// ];
    /// let breakdown = Breakdown::aggregate(&units);
    /// assert_eq!(breakdown.locations.len(), 1);
    /// assert_eq!(breakdown.cast.len(), 1);
    /// ```
    pub fn aggregate<'a, I>(units: I) -> Self
    where
        I: IntoIterator<Item = &'a ProductionUnit>,
    {
        let mut breakdown = Self::new();
        for unit in units {
            breakdown.add_unit(unit);
        }
        breakdown
    }

    /// Adds one unit's resources.
    pub fn add_unit(&mut self, unit: &ProductionUnit) {
        let kw = &unit.keywords;
        self.locations.insert(kw.location.clone());
        self.equipment.insert(kw.equipment.clone());
        self.cast.extend(kw.cast.iter().cloned());
        self.props.extend(kw.props.iter().cloned());
        self.special_requirements
            .extend(kw.special_requirements.iter().cloned());
    }

    /// Merges another breakdown into this one.
    pub fn merge(&mut self, other: &Breakdown) {
        self.locations.extend(other.locations.iter().cloned());
        self.cast.extend(other.cast.iter().cloned());
        self.equipment.extend(other.equipment.iter().cloned());
        self.props.extend(other.props.iter().cloned());
        self.special_requirements
            .extend(other.special_requirements.iter().cloned());
    }

    /// Whether every set is empty.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.cast.is_empty()
            && self.equipment.is_empty()
            && self.props.is_empty()
            && self.special_requirements.is_empty()
    }
}

/// Aggregates the resources of a unit slice.
pub fn aggregate(units: &[ProductionUnit]) -> Breakdown {
    Breakdown::aggregate(units)
}
