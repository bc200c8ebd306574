//! Input integrity checks for unit collections.
//!
//! The builder accepts any unit collection; these checks are an optional
//! pre-flight for callers that want to reject inconsistent scene lists
//! before scheduling. Detects:
//! - Duplicate unit IDs
//! - Empty unit IDs
//! - Two units sharing a scene number

use crate::models::ProductionUnit;
use std::collections::HashMap;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two units share the same ID.
    DuplicateId,
    /// A unit has an empty ID.
    EmptyId,
    /// Two units share the same scene number.
    DuplicateSceneNumber,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a unit collection.
///
/// Checks:
/// 1. Every unit has a non-empty ID
/// 2. No duplicate IDs
/// 3. No duplicate scene numbers
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_units(units: &[ProductionUnit]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids: HashMap<&str, usize> = HashMap::new();
    let mut scenes: HashMap<u32, &str> = HashMap::new();

    for (pos, unit) in units.iter().enumerate() {
        if unit.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Unit at position {pos} has an empty ID"),
            ));
        } else if let Some(first) = ids.insert(unit.id.as_str(), pos) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!(
                    "Duplicate unit ID: {} (positions {first} and {pos})",
                    unit.id
                ),
            ));
        }

        if let Some(other) = scenes.insert(unit.scene_number, unit.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSceneNumber,
                format!(
                    "Scene number {} used by '{}' and '{}'",
                    unit.scene_number, other, unit.id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_units() -> Vec<ProductionUnit> {
        vec![
            ProductionUnit::new("s1", 1).with_location("Cafe"),
            ProductionUnit::new("s2", 2).with_location("Park"),
            ProductionUnit::new("s3", 3).with_location("Cafe"),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_units(&sample_units()).is_ok());
        assert!(validate_units(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let mut units = sample_units();
        units.push(ProductionUnit::new("s1", 4));

        let errors = validate_units(&units).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert!(errors[0].message.contains("positions 0 and 3"));
    }

    #[test]
    fn test_empty_id() {
        let units = vec![ProductionUnit::new("  ", 1)];
        let errors = validate_units(&units).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyId);
    }

    #[test]
    fn test_duplicate_scene_number() {
        let mut units = sample_units();
        units.push(ProductionUnit::new("s4", 2));

        let errors = validate_units(&units).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateSceneNumber && e.message.contains("'s2'")));
    }

    #[test]
    fn test_multiple_errors() {
        let units = vec![
            ProductionUnit::new("a", 1),
            ProductionUnit::new("a", 1),
            ProductionUnit::new("", 2),
        ];
        let errors = validate_units(&units).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
