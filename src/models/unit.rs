//! Production unit model.
//!
//! A production unit is one scene (caption card): the atom that gets
//! assigned to a shooting day. Units are immutable input to the engine;
//! loosely-typed documents are turned into units by [`crate::normalize`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest accepted priority weight.
pub const MIN_WEIGHT: u8 = 1;
/// Highest accepted priority weight.
pub const MAX_WEIGHT: u8 = 5;

/// One scene to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionUnit {
    /// Unique unit identifier.
    pub id: String,
    /// Owning user (used by same-user grouping).
    pub user_id: String,
    /// Scene number (1-based).
    pub scene_number: u32,
    /// Scene title.
    pub title: String,
    /// Estimated shooting time in minutes.
    pub estimated_duration_minutes: u32,
    /// Lighting/time-of-day requirement.
    pub time_of_day: TimeOfDay,
    /// Resource keywords (location, cast, equipment, ...).
    pub keywords: Keywords,
    /// Priority weights, each in `[1, 5]`.
    pub weights: Weights,
}

/// Resource metadata attached to a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keywords {
    pub location: String,
    pub date: String,
    pub equipment: String,
    pub cast: Vec<String>,
    pub props: Vec<String>,
    pub special_requirements: Vec<String>,
}

/// Scheduling priority weights.
///
/// Every field is always present and lies in `[MIN_WEIGHT, MAX_WEIGHT]`
/// when built through [`Weights::new`] or the normalizer.
/// Deserialized values are not checked; scoring and fingerprinting go
/// through [`Weights::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    pub location_priority: u8,
    pub equipment_priority: u8,
    pub cast_priority: u8,
    pub time_priority: u8,
    pub complexity: u8,
}

/// Time of day a scene must be shot in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Dawn,
    Morning,
    #[default]
    Afternoon,
    Evening,
    Night,
    Day,
}

impl ProductionUnit {
    /// Creates a unit with default metadata (all weights 1, afternoon).
    pub fn new(id: impl Into<String>, scene_number: u32) -> Self {
        Self {
            id: id.into(),
            user_id: String::new(),
            scene_number: scene_number.max(1),
            title: String::new(),
            estimated_duration_minutes: 0,
            time_of_day: TimeOfDay::default(),
            keywords: Keywords::default(),
            weights: Weights::default(),
        }
    }

    /// Sets the owning user.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the estimated duration in minutes.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.estimated_duration_minutes = minutes;
        self
    }

    /// Sets the time of day.
    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = time_of_day;
        self
    }

    /// Sets the location keyword.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.keywords.location = location.into();
        self
    }

    /// Sets the date keyword.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.keywords.date = date.into();
        self
    }

    /// Sets the equipment keyword.
    pub fn with_equipment(mut self, equipment: impl Into<String>) -> Self {
        self.keywords.equipment = equipment.into();
        self
    }

    /// Adds a cast member.
    pub fn with_cast_member(mut self, name: impl Into<String>) -> Self {
        self.keywords.cast.push(name.into());
        self
    }

    /// Adds a prop.
    pub fn with_prop(mut self, prop: impl Into<String>) -> Self {
        self.keywords.props.push(prop.into());
        self
    }

    /// Adds a special requirement.
    pub fn with_special_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.keywords.special_requirements.push(requirement.into());
        self
    }

    /// Sets the priority weights.
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Location keyword.
    #[inline]
    pub fn location(&self) -> &str {
        &self.keywords.location
    }

    /// Whether this unit alone exceeds a daily cap.
    #[inline]
    pub fn exceeds(&self, max_daily_minutes: u32) -> bool {
        self.estimated_duration_minutes > max_daily_minutes
    }
}

impl Weights {
    /// Creates weights, clamping each value into `[1, 5]`.
    pub fn new(location: u8, equipment: u8, cast: u8, time: u8, complexity: u8) -> Self {
        Self {
            location_priority: clamp_weight(location),
            equipment_priority: clamp_weight(equipment),
            cast_priority: clamp_weight(cast),
            time_priority: clamp_weight(time),
            complexity: clamp_weight(complexity),
        }
    }

    /// Same weights with every field forced back into range.
    pub fn clamped(self) -> Self {
        Self::new(
            self.location_priority,
            self.equipment_priority,
            self.cast_priority,
            self.time_priority,
            self.complexity,
        )
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(MIN_WEIGHT, MIN_WEIGHT, MIN_WEIGHT, MIN_WEIGHT, MIN_WEIGHT)
    }
}

#[inline]
fn clamp_weight(value: u8) -> u8 {
    value.clamp(MIN_WEIGHT, MAX_WEIGHT)
}

impl TimeOfDay {
    /// All variants in declaration order.
    pub const ALL: [TimeOfDay; 6] = [
        TimeOfDay::Dawn,
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
        TimeOfDay::Day,
    ];

    /// Parses an English or Korean time-of-day label (case-insensitive).
    ///
    /// Returns `None` for anything unrecognized; callers decide the fallback.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        match label.as_str() {
            "dawn" | "새벽" => Some(Self::Dawn),
            "morning" | "아침" | "오전" => Some(Self::Morning),
            "afternoon" | "오후" => Some(Self::Afternoon),
            "evening" | "저녁" => Some(Self::Evening),
            "night" | "밤" => Some(Self::Night),
            "day" | "낮" => Some(Self::Day),
            _ => None,
        }
    }

    /// Lowercase English name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dawn => "dawn",
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
            Self::Day => "day",
        }
    }

    /// Conventional call time, in minutes after midnight.
    pub fn call_time_minutes(&self) -> u32 {
        match self {
            Self::Dawn => 5 * 60,
            Self::Morning => 7 * 60,
            Self::Day => 9 * 60,
            Self::Afternoon => 13 * 60,
            Self::Evening => 17 * 60,
            Self::Night => 20 * 60,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_builder() {
        let unit = ProductionUnit::new("u1", 3)
            .with_user("director")
            .with_title("Rooftop chase")
            .with_duration(45)
            .with_time_of_day(TimeOfDay::Night)
            .with_location("Rooftop")
            .with_equipment("Drone")
            .with_cast_member("Kim")
            .with_cast_member("Lee")
            .with_prop("Briefcase")
            .with_special_requirement("Rain machine");

        assert_eq!(unit.scene_number, 3);
        assert_eq!(unit.location(), "Rooftop");
        assert_eq!(unit.keywords.cast, vec!["Kim", "Lee"]);
        assert_eq!(unit.time_of_day, TimeOfDay::Night);
        assert_eq!(unit.weights, Weights::default());
    }

    #[test]
    fn test_scene_number_floor() {
        assert_eq!(ProductionUnit::new("u", 0).scene_number, 1);
    }

    #[test]
    fn test_weights_clamped() {
        let w = Weights::new(0, 9, 3, 5, 1);
        assert_eq!(w.location_priority, 1);
        assert_eq!(w.equipment_priority, 5);
        assert_eq!(w.cast_priority, 3);

        let raw = Weights {
            location_priority: 7,
            equipment_priority: 0,
            cast_priority: 2,
            time_priority: 2,
            complexity: 2,
        };
        let c = raw.clamped();
        assert_eq!(c.location_priority, 5);
        assert_eq!(c.equipment_priority, 1);
    }

    #[test]
    fn test_time_of_day_parse() {
        assert_eq!(TimeOfDay::parse("Night"), Some(TimeOfDay::Night));
        assert_eq!(TimeOfDay::parse(" dawn "), Some(TimeOfDay::Dawn));
        assert_eq!(TimeOfDay::parse("새벽"), Some(TimeOfDay::Dawn));
        assert_eq!(TimeOfDay::parse("오전"), Some(TimeOfDay::Morning));
        assert_eq!(TimeOfDay::parse("noonish"), None);
        assert_eq!(TimeOfDay::default(), TimeOfDay::Afternoon);
    }

    #[test]
    fn test_time_of_day_serde() {
        let json = serde_json::to_string(&TimeOfDay::Evening).unwrap();
        assert_eq!(json, "\"evening\"");
        let back: TimeOfDay = serde_json::from_str("\"dawn\"").unwrap();
        assert_eq!(back, TimeOfDay::Dawn);
    }

    #[test]
    fn test_exceeds() {
        let unit = ProductionUnit::new("u", 1).with_duration(600);
        assert!(unit.exceeds(480));
        assert!(!unit.exceeds(600));
    }
}
