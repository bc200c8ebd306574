//! Relationship grouping.
//!
//! Partitions units by one shared attribute. Used by the builder for
//! locality (location and equipment clusters) and available to callers for
//! reporting.
//!
//! Every input unit lands in exactly one group. Units with an empty value
//! are grouped under the empty-string key instead of being dropped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::ProductionUnit;

/// Separator used when joining a cast list into a key.
pub const CAST_KEY_SEPARATOR: &str = ",";

/// Attribute to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipKey {
    SameUser,
    SameLocation,
    SameDate,
    SameEquipment,
    SameCast,
    SameTimeOfDay,
}

/// How a cast list becomes a grouping key.
///
/// `Sorted` makes `["A", "B"]` and `["B", "A"]` collide; `InputOrder`
/// keeps them apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CastKeyPolicy {
    #[default]
    Sorted,
    InputOrder,
}

/// Units sharing one key value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub key: String,
    pub members: Vec<ProductionUnit>,
}

impl Group {
    fn new(key: String) -> Self {
        Self {
            key,
            members: Vec::new(),
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sum of member durations (minutes).
    pub fn total_duration_minutes(&self) -> u64 {
        self.members
            .iter()
            .map(|u| u64::from(u.estimated_duration_minutes))
            .sum()
    }
}

/// Groups keyed by attribute value, in key order.
pub type Grouping = BTreeMap<String, Group>;

/// Groups units by a relationship key.
///
/// # Example
/// ```
/// use shoot_schedule::grouping::{GroupingEngine, RelationshipKey};
/// use shoot_schedule::models::ProductionUnit;
///
/// let units = vec![
///     ProductionUnit::new("a", 1).with_location("Cafe"),
///     ProductionUnit::new("b", 2).with_location("Park"),
///     ProductionUnit::new("c", 3).with_location("Cafe"),
/// ];
/// let groups = GroupingEngine::new().group_by(&units, RelationshipKey::SameLocation);
/// assert_eq!(groups["Cafe"].len(), 2);
/// assert_eq!(groups["Park"].len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupingEngine {
    cast_policy: CastKeyPolicy,
}

impl GroupingEngine {
    /// Creates an engine with the default (sorted) cast policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cast key policy.
    pub fn with_cast_policy(mut self, policy: CastKeyPolicy) -> Self {
        self.cast_policy = policy;
        self
    }

    /// The grouping key of one unit.
    pub fn key_for(&self, unit: &ProductionUnit, relationship: RelationshipKey) -> String {
        let kw = &unit.keywords;
        match relationship {
            RelationshipKey::SameUser => unit.user_id.clone(),
            RelationshipKey::SameLocation => kw.location.clone(),
            RelationshipKey::SameDate => kw.date.clone(),
            RelationshipKey::SameEquipment => kw.equipment.clone(),
            RelationshipKey::SameTimeOfDay => unit.time_of_day.as_str().to_string(),
            RelationshipKey::SameCast => match self.cast_policy {
                CastKeyPolicy::InputOrder => kw.cast.join(CAST_KEY_SEPARATOR),
                CastKeyPolicy::Sorted => {
                    let mut cast: Vec<&str> = kw.cast.iter().map(String::as_str).collect();
                    cast.sort_unstable();
                    cast.join(CAST_KEY_SEPARATOR)
                }
            },
        }
    }

    /// Partitions units by `relationship`. Members keep input order.
    pub fn group_by(&self, units: &[ProductionUnit], relationship: RelationshipKey) -> Grouping {
        let mut groups = Grouping::new();
        for unit in units {
            let key = self.key_for(unit, relationship);
            groups
                .entry(key.clone())
                .or_insert_with(|| Group::new(key))
                .members
                .push(unit.clone());
        }
        groups
    }

    /// Partitions unit positions by `relationship`, without cloning units.
    pub fn group_indices(
        &self,
        units: &[ProductionUnit],
        relationship: RelationshipKey,
    ) -> BTreeMap<String, Vec<usize>> {
        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, unit) in units.iter().enumerate() {
            groups
                .entry(self.key_for(unit, relationship))
                .or_default()
                .push(i);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeOfDay;

    fn sample_units() -> Vec<ProductionUnit> {
        vec![
            ProductionUnit::new("u1", 1)
                .with_user("alice")
                .with_location("Cafe")
                .with_equipment("Dolly")
                .with_date("2024-05-01")
                .with_cast_member("A")
                .with_cast_member("B"),
            ProductionUnit::new("u2", 2)
                .with_user("bob")
                .with_location("Park")
                .with_equipment("Crane")
                .with_time_of_day(TimeOfDay::Night)
                .with_cast_member("B")
                .with_cast_member("A"),
            ProductionUnit::new("u3", 3)
                .with_user("alice")
                .with_location("Cafe")
                .with_cast_member("C"),
            ProductionUnit::new("u4", 4).with_user("alice"),
        ]
    }

    fn total_members(groups: &Grouping) -> usize {
        groups.values().map(Group::len).sum()
    }

    #[test]
    fn test_group_by_location() {
        let units = sample_units();
        let groups = GroupingEngine::new().group_by(&units, RelationshipKey::SameLocation);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups["Cafe"].len(), 2);
        assert_eq!(groups["Park"].len(), 1);
        // Unkeyed unit is kept under "".
        assert_eq!(groups[""].members[0].id, "u4");
    }

    #[test]
    fn test_partition_property_for_every_key() {
        let units = sample_units();
        let engine = GroupingEngine::new();
        for key in [
            RelationshipKey::SameUser,
            RelationshipKey::SameLocation,
            RelationshipKey::SameDate,
            RelationshipKey::SameEquipment,
            RelationshipKey::SameCast,
            RelationshipKey::SameTimeOfDay,
        ] {
            let groups = engine.group_by(&units, key);
            assert_eq!(total_members(&groups), units.len(), "{key:?}");
        }
    }

    #[test]
    fn test_sorted_cast_policy_collides_permutations() {
        let units = sample_units();
        let groups = GroupingEngine::new().group_by(&units, RelationshipKey::SameCast);
        assert_eq!(groups["A,B"].len(), 2);
        assert!(groups.contains_key("C"));
        assert!(groups.contains_key(""));
    }

    #[test]
    fn test_input_order_cast_policy_keeps_permutations_apart() {
        let units = sample_units();
        let groups = GroupingEngine::new()
            .with_cast_policy(CastKeyPolicy::InputOrder)
            .group_by(&units, RelationshipKey::SameCast);
        assert_eq!(groups["A,B"].len(), 1);
        assert_eq!(groups["B,A"].len(), 1);
    }

    #[test]
    fn test_group_by_time_of_day_and_user() {
        let units = sample_units();
        let engine = GroupingEngine::new();

        let by_time = engine.group_by(&units, RelationshipKey::SameTimeOfDay);
        assert_eq!(by_time["afternoon"].len(), 3);
        assert_eq!(by_time["night"].len(), 1);

        let by_user = engine.group_by(&units, RelationshipKey::SameUser);
        assert_eq!(by_user["alice"].len(), 3);
    }

    #[test]
    fn test_members_keep_input_order_and_input_untouched() {
        let units = sample_units();
        let before = units.clone();
        let groups = GroupingEngine::new().group_by(&units, RelationshipKey::SameUser);
        let ids: Vec<&str> = groups["alice"].members.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u3", "u4"]);
        assert_eq!(units, before);
    }

    #[test]
    fn test_group_indices() {
        let units = sample_units();
        let index = GroupingEngine::new().group_indices(&units, RelationshipKey::SameEquipment);
        assert_eq!(index["Dolly"], vec![0]);
        assert_eq!(index["Crane"], vec![1]);
        assert_eq!(index[""], vec![2, 3]);
    }

    #[test]
    fn test_empty_input() {
        let groups = GroupingEngine::new().group_by(&[], RelationshipKey::SameLocation);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_group_duration() {
        let units = vec![
            ProductionUnit::new("a", 1).with_location("X").with_duration(30),
            ProductionUnit::new("b", 2).with_location("X").with_duration(45),
        ];
        let groups = GroupingEngine::new().group_by(&units, RelationshipKey::SameLocation);
        assert_eq!(groups["X"].total_duration_minutes(), 75);
    }
}
