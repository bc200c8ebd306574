//! Scene priority scoring.
//!
//! Each unit gets a scalar score from its five priority weights. Units are
//! scheduled in descending score order, ties broken by ascending scene
//! number, so identical input always yields the same order.
//!
//! # Formula
//!
//! ```text
//! score = location * 1000 + cast * 500 + time * 200 + equipment * 100 + complexity * 50
//! ```
//!
//! The multipliers are held in [`WeightMultipliers`] so the ordering can be
//! audited or tuned without touching the builder.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::ProductionUnit;

/// Score type. Higher = scheduled earlier.
pub type UnitScore = i64;

/// Per-factor multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightMultipliers {
    pub location: i64,
    pub cast: i64,
    pub time: i64,
    pub equipment: i64,
    pub complexity: i64,
}

impl Default for WeightMultipliers {
    fn default() -> Self {
        Self {
            location: 1000,
            cast: 500,
            time: 200,
            equipment: 100,
            complexity: 50,
        }
    }
}

/// Computes unit scores and the scheduling order.
///
/// # Example
/// ```
/// use shoot_schedule::models::{ProductionUnit, Weights};
/// use shoot_schedule::weighting::WeightModel;
///
/// let model = WeightModel::default();
/// let unit = ProductionUnit::new("s1", 1).with_weights(Weights::new(5, 1, 1, 1, 1));
/// assert_eq!(model.score(&unit), 5000 + 500 + 200 + 100 + 50);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightModel {
    multipliers: WeightMultipliers,
}

impl WeightModel {
    /// Creates a model with the default multipliers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model with custom multipliers.
    pub fn with_multipliers(multipliers: WeightMultipliers) -> Self {
        Self { multipliers }
    }

    /// The multipliers in use.
    pub fn multipliers(&self) -> &WeightMultipliers {
        &self.multipliers
    }

    /// Scores a unit. Out-of-range weights are clamped into `[1, 5]` first,
    /// so a zero weight counts as 1.
    pub fn score(&self, unit: &ProductionUnit) -> UnitScore {
        let w = unit.weights.clamped();
        let m = &self.multipliers;
        i64::from(w.location_priority) * m.location
            + i64::from(w.cast_priority) * m.cast
            + i64::from(w.time_priority) * m.time
            + i64::from(w.equipment_priority) * m.equipment
            + i64::from(w.complexity) * m.complexity
    }

    /// Sum of scores across units.
    pub fn total_score(&self, units: &[ProductionUnit]) -> UnitScore {
        units.iter().map(|u| self.score(u)).sum()
    }

    /// Returns indices into `units`, highest score first.
    ///
    /// Ties fall back to ascending scene number, then input position.
    pub fn sort_indices(&self, units: &[ProductionUnit]) -> Vec<usize> {
        let scores: Vec<UnitScore> = units.iter().map(|u| self.score(u)).collect();
        let mut indices: Vec<usize> = (0..units.len()).collect();
        indices.sort_by(|&a, &b| {
            compare(scores[a], units[a].scene_number, scores[b], units[b].scene_number)
        });
        indices
    }

    /// Returns units in scheduling order.
    pub fn sort<'a>(&self, units: &'a [ProductionUnit]) -> Vec<&'a ProductionUnit> {
        self.sort_indices(units).into_iter().map(|i| &units[i]).collect()
    }
}

fn compare(score_a: UnitScore, scene_a: u32, score_b: UnitScore, scene_b: u32) -> Ordering {
    score_b.cmp(&score_a).then(scene_a.cmp(&scene_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weights;

    fn unit(id: &str, scene: u32, weights: Weights) -> ProductionUnit {
        ProductionUnit::new(id, scene).with_weights(weights)
    }

    #[test]
    fn test_default_score_is_all_ones() {
        let model = WeightModel::new();
        let u = ProductionUnit::new("u", 1);
        assert_eq!(model.score(&u), 1850);
    }

    #[test]
    fn test_max_score() {
        let model = WeightModel::new();
        let u = unit("u", 1, Weights::new(5, 5, 5, 5, 5));
        assert_eq!(model.score(&u), 9250);
    }

    #[test]
    fn test_zero_weight_counts_as_one() {
        let model = WeightModel::new();
        let mut u = ProductionUnit::new("u", 1);
        u.weights.location_priority = 0;
        assert_eq!(model.score(&u), 1850);
    }

    #[test]
    fn test_location_dominates_cast() {
        let model = WeightModel::new();
        let loc = unit("loc", 1, Weights::new(2, 1, 1, 1, 1));
        let cast = unit("cast", 2, Weights::new(1, 1, 2, 1, 1));
        assert!(model.score(&loc) > model.score(&cast));
    }

    #[test]
    fn test_sort_descending_with_scene_tiebreak() {
        let model = WeightModel::new();
        let units = vec![
            unit("low", 1, Weights::default()),
            unit("tie_b", 7, Weights::new(3, 1, 1, 1, 1)),
            unit("high", 9, Weights::new(5, 1, 1, 1, 1)),
            unit("tie_a", 4, Weights::new(3, 1, 1, 1, 1)),
        ];
        let order: Vec<&str> = model.sort(&units).iter().map(|u| u.id.as_str()).collect();
        assert_eq!(order, vec!["high", "tie_a", "tie_b", "low"]);
    }

    #[test]
    fn test_sort_is_stable_for_full_ties() {
        let model = WeightModel::new();
        let units = vec![unit("first", 2, Weights::default()), unit("second", 2, Weights::default())];
        assert_eq!(model.sort_indices(&units), vec![0, 1]);
    }

    #[test]
    fn test_custom_multipliers() {
        let model = WeightModel::with_multipliers(WeightMultipliers {
            location: 0,
            cast: 0,
            time: 0,
            equipment: 0,
            complexity: 10,
        });
        let u = unit("u", 1, Weights::new(5, 5, 5, 5, 3));
        assert_eq!(model.score(&u), 30);
    }

    #[test]
    fn test_total_score() {
        let model = WeightModel::new();
        let units = vec![ProductionUnit::new("a", 1), ProductionUnit::new("b", 2)];
        assert_eq!(model.total_score(&units), 3700);
        assert!(model.sort_indices(&[]).is_empty());
    }
}
