//! Normalization of loosely-typed scene documents.
//!
//! Scene documents arrive from the editing layer with optional fields,
//! numbers stored as strings, and free-text durations such as `"5분"` or
//! `"1h 30m"`. This module is the single place where such input becomes a
//! [`ProductionUnit`]. Nothing here fails: every malformed field gets a
//! documented default and a [`NormalizationWarning`] is reported to the
//! caller's [`NormalizationObserver`].
//!
//! # Defaults
//!
//! | Field | Default |
//! |-------|---------|
//! | weight | 1 (out-of-range values are clamped into `[1, 5]`) |
//! | duration | [`DEFAULT_DURATION_MINUTES`] |
//! | time of day | afternoon |
//! | scene number | 1-based position in the input |
//! | id | `scene-{position}` |

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::models::{Keywords, ProductionUnit, TimeOfDay, Weights, MAX_WEIGHT, MIN_WEIGHT};

/// Duration used when a document has none or it cannot be parsed.
pub const DEFAULT_DURATION_MINUTES: u32 = 5;

/// A scene document as stored by the editing layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawUnit {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub scene_number: Option<Value>,
    pub title: Option<String>,
    #[serde(alias = "estimatedDurationMinutes")]
    pub estimated_duration: Option<Value>,
    pub time_of_day: Option<String>,
    pub keywords: Option<RawKeywords>,
    pub weights: Option<RawWeights>,
}

/// Keyword block of a scene document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawKeywords {
    pub location: Option<String>,
    pub date: Option<String>,
    pub equipment: Option<String>,
    pub cast: Option<Vec<String>>,
    pub props: Option<Vec<String>>,
    pub special_requirements: Option<Vec<String>>,
}

/// Weight block of a scene document. Values may be numbers or strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawWeights {
    pub location_priority: Option<Value>,
    pub equipment_priority: Option<Value>,
    pub cast_priority: Option<Value>,
    pub time_priority: Option<Value>,
    pub complexity: Option<Value>,
}

/// A field that was replaced by a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationWarning {
    MissingId {
        fallback: String,
    },
    InvalidSceneNumber {
        unit_id: String,
        value: Option<String>,
        fallback: u32,
    },
    MissingWeight {
        unit_id: String,
        field: &'static str,
    },
    InvalidWeight {
        unit_id: String,
        field: &'static str,
        value: String,
    },
    WeightOutOfRange {
        unit_id: String,
        field: &'static str,
        value: i64,
        clamped: u8,
    },
    InvalidDuration {
        unit_id: String,
        value: Option<String>,
    },
    UnknownTimeOfDay {
        unit_id: String,
        value: Option<String>,
    },
}

impl fmt::Display for NormalizationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId { fallback } => write!(f, "unit without id, using '{fallback}'"),
            Self::InvalidSceneNumber {
                unit_id,
                value,
                fallback,
            } => write!(
                f,
                "unit '{unit_id}': invalid scene number {value:?}, using {fallback}"
            ),
            Self::MissingWeight { unit_id, field } => {
                write!(f, "unit '{unit_id}': missing weight '{field}', using 1")
            }
            Self::InvalidWeight {
                unit_id,
                field,
                value,
            } => write!(
                f,
                "unit '{unit_id}': weight '{field}' is not numeric ({value}), using 1"
            ),
            Self::WeightOutOfRange {
                unit_id,
                field,
                value,
                clamped,
            } => write!(
                f,
                "unit '{unit_id}': weight '{field}'={value} out of range, clamped to {clamped}"
            ),
            Self::InvalidDuration { unit_id, value } => write!(
                f,
                "unit '{unit_id}': unusable duration {value:?}, using {DEFAULT_DURATION_MINUTES} minutes"
            ),
            Self::UnknownTimeOfDay { unit_id, value } => write!(
                f,
                "unit '{unit_id}': unknown time of day {value:?}, using afternoon"
            ),
        }
    }
}

/// Receives normalization warnings.
pub trait NormalizationObserver {
    fn on_warning(&mut self, warning: NormalizationWarning);
}

/// Forwards warnings to `log::warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl NormalizationObserver for LogObserver {
    fn on_warning(&mut self, warning: NormalizationWarning) {
        log::warn!("{warning}");
    }
}

/// Keeps every warning for later inspection.
#[derive(Debug, Clone, Default)]
pub struct CollectingObserver {
    pub warnings: Vec<NormalizationWarning>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NormalizationObserver for CollectingObserver {
    fn on_warning(&mut self, warning: NormalizationWarning) {
        self.warnings.push(warning);
    }
}

/// Normalizes a whole document list. Scene-number fallbacks use each
/// document's 1-based position.
pub fn normalize_units(
    raws: &[RawUnit],
    observer: &mut dyn NormalizationObserver,
) -> Vec<ProductionUnit> {
    raws.iter()
        .enumerate()
        .map(|(i, raw)| normalize_unit(raw, i as u32 + 1, observer))
        .collect()
}

/// Normalizes one document.
///
/// # Example
/// ```
/// use shoot_schedule::models::TimeOfDay;
/// use shoot_schedule::normalize::{normalize_unit, CollectingObserver, RawUnit};
///
/// let raw: RawUnit = serde_json::from_str(
///     r#"{"id": "c1", "sceneNumber": 2, "estimatedDuration": "5분", "timeOfDay": "밤"}"#,
/// ).unwrap();
/// let mut observer = CollectingObserver::new();
/// let unit = normalize_unit(&raw, 1, &mut observer);
/// assert_eq!(unit.estimated_duration_minutes, 5);
/// assert_eq!(unit.time_of_day, TimeOfDay::Night);
/// // All five weights were missing.
/// assert_eq!(observer.warnings.len(), 5);
/// ```
pub fn normalize_unit(
    raw: &RawUnit,
    fallback_scene_number: u32,
    observer: &mut dyn NormalizationObserver,
) -> ProductionUnit {
    let fallback_scene_number = fallback_scene_number.max(1);

    let id = match raw.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(id) => id.to_string(),
        None => {
            let fallback = format!("scene-{fallback_scene_number}");
            observer.on_warning(NormalizationWarning::MissingId {
                fallback: fallback.clone(),
            });
            fallback
        }
    };

    let scene_number = match raw.scene_number.as_ref().and_then(value_to_scene_number) {
        Some(n) => n,
        None => {
            observer.on_warning(NormalizationWarning::InvalidSceneNumber {
                unit_id: id.clone(),
                value: raw.scene_number.as_ref().map(Value::to_string),
                fallback: fallback_scene_number,
            });
            fallback_scene_number
        }
    };

    let estimated_duration_minutes = match raw
        .estimated_duration
        .as_ref()
        .and_then(value_to_duration_minutes)
    {
        Some(minutes) => minutes,
        None => {
            observer.on_warning(NormalizationWarning::InvalidDuration {
                unit_id: id.clone(),
                value: raw.estimated_duration.as_ref().map(Value::to_string),
            });
            DEFAULT_DURATION_MINUTES
        }
    };

    let time_of_day = match raw.time_of_day.as_deref().and_then(TimeOfDay::parse) {
        Some(t) => t,
        None => {
            observer.on_warning(NormalizationWarning::UnknownTimeOfDay {
                unit_id: id.clone(),
                value: raw.time_of_day.clone(),
            });
            TimeOfDay::default()
        }
    };

    let raw_weights = raw.weights.clone().unwrap_or_default();
    let mut weight = |field: &'static str, value: &Option<Value>| {
        normalize_weight(&id, field, value.as_ref(), observer)
    };
    let weights = Weights {
        location_priority: weight("locationPriority", &raw_weights.location_priority),
        equipment_priority: weight("equipmentPriority", &raw_weights.equipment_priority),
        cast_priority: weight("castPriority", &raw_weights.cast_priority),
        time_priority: weight("timePriority", &raw_weights.time_priority),
        complexity: weight("complexity", &raw_weights.complexity),
    };

    let kw = raw.keywords.clone().unwrap_or_default();
    let keywords = Keywords {
        location: trimmed(kw.location),
        date: trimmed(kw.date),
        equipment: trimmed(kw.equipment),
        cast: cleaned(kw.cast),
        props: cleaned(kw.props),
        special_requirements: cleaned(kw.special_requirements),
    };

    ProductionUnit {
        id,
        user_id: trimmed(raw.user_id.clone()),
        scene_number,
        title: trimmed(raw.title.clone()),
        estimated_duration_minutes,
        time_of_day,
        keywords,
        weights,
    }
}

fn normalize_weight(
    unit_id: &str,
    field: &'static str,
    value: Option<&Value>,
    observer: &mut dyn NormalizationObserver,
) -> u8 {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        observer.on_warning(NormalizationWarning::MissingWeight {
            unit_id: unit_id.to_string(),
            field,
        });
        return MIN_WEIGHT;
    };

    let Some(n) = value_to_f64(value).filter(|n| n.is_finite()) else {
        observer.on_warning(NormalizationWarning::InvalidWeight {
            unit_id: unit_id.to_string(),
            field,
            value: value.to_string(),
        });
        return MIN_WEIGHT;
    };

    let rounded = n.round() as i64;
    let clamped = rounded.clamp(i64::from(MIN_WEIGHT), i64::from(MAX_WEIGHT)) as u8;
    if i64::from(clamped) != rounded {
        observer.on_warning(NormalizationWarning::WeightOutOfRange {
            unit_id: unit_id.to_string(),
            field,
            value: rounded,
            clamped,
        });
    }
    clamped
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn value_to_scene_number(value: &Value) -> Option<u32> {
    let n = value_to_f64(value)?;
    if !n.is_finite() || n < 1.0 || n > f64::from(u32::MAX) {
        return None;
    }
    Some(n.round() as u32)
}

fn value_to_duration_minutes(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            let minutes = n.as_f64()?;
            if !minutes.is_finite() || minutes < 0.0 || minutes > f64::from(u32::MAX) {
                return None;
            }
            Some(minutes.ceil() as u32)
        }
        Value::String(s) => parse_duration_minutes(s),
        _ => None,
    }
}

// (suffix, minutes per unit), longest suffixes first.
const DURATION_UNITS: &[(&str, f64)] = &[
    ("시간", 60.0),
    ("hours", 60.0),
    ("hour", 60.0),
    ("hrs", 60.0),
    ("hr", 60.0),
    ("h", 60.0),
    ("분", 1.0),
    ("minutes", 1.0),
    ("minute", 1.0),
    ("mins", 1.0),
    ("min", 1.0),
    ("m", 1.0),
    ("초", 1.0 / 60.0),
    ("seconds", 1.0 / 60.0),
    ("second", 1.0 / 60.0),
    ("secs", 1.0 / 60.0),
    ("sec", 1.0 / 60.0),
    ("s", 1.0 / 60.0),
];

/// Parses a free-text duration into whole minutes (rounded up).
///
/// Reads the first `number [unit]` pair. Further pairs are added only while
/// each carries an explicit unit, so `"1시간 30분"` and `"1h30m"` give 90
/// but `"3~4분"` gives 3. A bare number is minutes. Returns `None` when no
/// number is present, the number is malformed, or the text is negative.
///
/// ```
/// use shoot_schedule::normalize::parse_duration_minutes;
///
/// assert_eq!(parse_duration_minutes("5분"), Some(5));
/// assert_eq!(parse_duration_minutes("1.5 hours"), Some(90));
/// assert_eq!(parse_duration_minutes("about"), None);
/// ```
pub fn parse_duration_minutes(text: &str) -> Option<u32> {
    let s = text.trim();
    if s.starts_with('-') {
        return None;
    }
    let start = s.find(|c: char| c.is_ascii_digit())?;

    let mut rest = &s[start..];
    let mut total = 0.0_f64;
    let mut has_unit = false;
    while rest.starts_with(|c: char| c.is_ascii_digit()) {
        let (value, after) = leading_number(rest)?;
        let after = after.trim_start();
        match duration_unit(after) {
            Some((factor, unit_len)) => {
                total += value * factor;
                has_unit = true;
                rest = after[unit_len..].trim_start();
            }
            // A bare number only counts as the first pair.
            None => {
                if !has_unit {
                    total = value;
                }
                break;
            }
        }
    }

    if total > f64::from(u32::MAX) {
        return None;
    }
    Some(total.ceil() as u32)
}

/// Splits a leading decimal number off `text`. A `.` counts only when a
/// digit follows it; `"1.2.3"` is rejected.
fn leading_number(text: &str) -> Option<(f64, &str)> {
    let digits = |t: &str| t.find(|c: char| !c.is_ascii_digit()).unwrap_or(t.len());

    let mut len = digits(text);
    if len == 0 {
        return None;
    }
    if let Some(frac) = text[len..].strip_prefix('.') {
        let frac_len = digits(frac);
        if frac_len > 0 {
            len += 1 + frac_len;
        }
    }

    let tail = &text[len..];
    if tail
        .strip_prefix('.')
        .is_some_and(|t| t.starts_with(|c: char| c.is_ascii_digit()))
    {
        return None;
    }
    Some((text[..len].parse().ok()?, tail))
}

/// Matches a unit suffix at the start of `text`. ASCII suffixes must end at
/// a word boundary (`"5 scenes"` has no unit).
fn duration_unit(text: &str) -> Option<(f64, usize)> {
    DURATION_UNITS
        .iter()
        .find(|(suffix, _)| {
            text.get(..suffix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(suffix))
                && !(suffix.is_ascii()
                    && text[suffix.len()..].starts_with(|c: char| c.is_ascii_alphabetic()))
        })
        .map(|&(suffix, factor)| (factor, suffix.len()))
}

fn trimmed(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

fn cleaned(values: Option<Vec<String>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
