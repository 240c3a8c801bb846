// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nutrition and exercise reference table loading.
//!
//! Both tables are loaded once at startup and shared read-only. Data problems
//! (duplicate names, impossible values, burn rates that disagree with their
//! baseline) are reported here as warnings so they never surface later as
//! silently wrong numbers.

use crate::models::exercise::{ExerciseCategory, ExerciseEntry};
use crate::models::nutrition::NutritionEntry;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const BUILTIN_NUTRITION: &str = include_str!("../../data/nutrition.json");
const BUILTIN_EXERCISES: &str = include_str!("../../data/exercises.json");

pub const NUTRITION_FILE: &str = "nutrition.json";
pub const EXERCISES_FILE: &str = "exercises.json";

/// Relative difference between an explicit and a derived burn rate above
/// which the entry is flagged.
const RATE_MISMATCH_TOLERANCE: f64 = 0.10;

/// Canonical lookup key: trimmed and lowercased.
pub fn canonical_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Deserialize)]
struct RawTable<T> {
    #[serde(default)]
    version: String,
    entries: Vec<T>,
}

#[derive(Deserialize)]
struct RawNutrition {
    name: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
}

#[derive(Deserialize)]
struct RawExercise {
    name: String,
    category: String,
    duration: f64,
    calories: f64,
    #[serde(default)]
    calories_per_minute: Option<f64>,
    #[serde(default)]
    notes: String,
}

/// Data-quality problem found while loading.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceWarning {
    DuplicateNutrition(String),
    DuplicateExercise(String),
    InvalidEntry { name: String, reason: String },
    RateMismatch { name: String, given: f64, derived: f64 },
}

/// Versioned, immutable reference data.
#[derive(Debug, Default, Clone)]
pub struct ReferenceTables {
    nutrition_version: String,
    exercise_version: String,
    nutrition: Vec<NutritionEntry>,
    exercises: Vec<ExerciseEntry>,
    nutrition_index: HashMap<String, usize>,
    exercise_index: HashMap<String, usize>,
    warnings: Vec<ReferenceWarning>,
}

impl ReferenceTables {
    /// Tables compiled into the binary.
    pub fn builtin() -> Result<Self, ReferenceError> {
        Self::load_from_json(BUILTIN_NUTRITION, BUILTIN_EXERCISES)
    }

    /// Load both tables from a data directory.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ReferenceError> {
        let dir = dir.as_ref();
        let nutrition = fs::read_to_string(dir.join(NUTRITION_FILE))
            .map_err(|e| ReferenceError::IoError(format!("{}: {}", NUTRITION_FILE, e)))?;
        let exercises = fs::read_to_string(dir.join(EXERCISES_FILE))
            .map_err(|e| ReferenceError::IoError(format!("{}: {}", EXERCISES_FILE, e)))?;
        Self::load_from_json(&nutrition, &exercises)
    }

    /// Load both tables from JSON strings.
    pub fn load_from_json(nutrition_json: &str, exercises_json: &str) -> Result<Self, ReferenceError> {
        let raw_nutrition: RawTable<RawNutrition> = serde_json::from_str(nutrition_json)
            .map_err(|e| ReferenceError::ParseError(format!("nutrition: {}", e)))?;
        let raw_exercises: RawTable<RawExercise> = serde_json::from_str(exercises_json)
            .map_err(|e| ReferenceError::ParseError(format!("exercises: {}", e)))?;

        let mut tables = Self {
            nutrition_version: raw_nutrition.version,
            exercise_version: raw_exercises.version,
            ..Self::default()
        };

        for raw in raw_nutrition.entries {
            tables.push_nutrition(raw);
        }
        for raw in raw_exercises.entries {
            tables.push_exercise(raw);
        }

        for warning in &tables.warnings {
            tracing::warn!(warning = ?warning, "Reference data problem");
        }

        if tables.nutrition.is_empty() && tables.exercises.is_empty() {
            return Err(ReferenceError::Empty);
        }

        tracing::info!(
            nutrition = tables.nutrition.len(),
            exercises = tables.exercises.len(),
            warnings = tables.warnings.len(),
            nutrition_version = %tables.nutrition_version,
            exercise_version = %tables.exercise_version,
            "Loaded reference tables"
        );
        Ok(tables)
    }

    fn push_nutrition(&mut self, raw: RawNutrition) {
        let name = canonical_name(&raw.name);
        if name.is_empty() {
            self.warnings.push(ReferenceWarning::InvalidEntry {
                name: raw.name,
                reason: "empty name".to_string(),
            });
            return;
        }
        if [raw.calories, raw.protein, raw.carbs, raw.fats]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            self.warnings.push(ReferenceWarning::InvalidEntry {
                name,
                reason: "negative or non-finite nutrient value".to_string(),
            });
            return;
        }
        if self.nutrition_index.contains_key(&name) {
            self.warnings.push(ReferenceWarning::DuplicateNutrition(name));
            return;
        }

        self.nutrition_index.insert(name.clone(), self.nutrition.len());
        self.nutrition.push(NutritionEntry {
            name,
            calories_per_serving: raw.calories,
            protein_grams: raw.protein,
            carbs_grams: raw.carbs,
            fats_grams: raw.fats,
        });
    }

    fn push_exercise(&mut self, raw: RawExercise) {
        let name = canonical_name(&raw.name);
        if name.is_empty() {
            self.warnings.push(ReferenceWarning::InvalidEntry {
                name: raw.name,
                reason: "empty name".to_string(),
            });
            return;
        }
        if !(raw.duration.is_finite() && raw.duration > 0.0) {
            self.warnings.push(ReferenceWarning::InvalidEntry {
                name,
                reason: "baseline duration must be positive".to_string(),
            });
            return;
        }
        if !(raw.calories.is_finite() && raw.calories >= 0.0) {
            self.warnings.push(ReferenceWarning::InvalidEntry {
                name,
                reason: "baseline calories must be non-negative".to_string(),
            });
            return;
        }
        if self.exercise_index.contains_key(&name) {
            self.warnings.push(ReferenceWarning::DuplicateExercise(name));
            return;
        }

        let derived = raw.calories / raw.duration;
        let calories_per_minute = match raw.calories_per_minute {
            Some(given) if given.is_finite() && given > 0.0 => {
                if (given - derived).abs() > derived * RATE_MISMATCH_TOLERANCE {
                    self.warnings.push(ReferenceWarning::RateMismatch {
                        name: name.clone(),
                        given,
                        derived,
                    });
                }
                given
            }
            Some(_) => {
                self.warnings.push(ReferenceWarning::InvalidEntry {
                    name,
                    reason: "calories per minute must be positive".to_string(),
                });
                return;
            }
            None => derived,
        };

        if calories_per_minute <= 0.0 {
            self.warnings.push(ReferenceWarning::InvalidEntry {
                name,
                reason: "zero burn rate".to_string(),
            });
            return;
        }

        self.exercise_index.insert(name.clone(), self.exercises.len());
        self.exercises.push(ExerciseEntry {
            name,
            category: ExerciseCategory::parse_lenient(&raw.category),
            baseline_duration_minutes: raw.duration,
            baseline_calories: raw.calories,
            calories_per_minute,
            notes: raw.notes,
        });
    }

    pub fn nutrition(&self) -> &[NutritionEntry] {
        &self.nutrition
    }

    pub fn exercises(&self) -> &[ExerciseEntry] {
        &self.exercises
    }

    /// Exact lookup by canonical name.
    pub fn nutrition_by_name(&self, name: &str) -> Option<&NutritionEntry> {
        self.nutrition_index
            .get(&canonical_name(name))
            .map(|&i| &self.nutrition[i])
    }

    /// Exact lookup by canonical name.
    pub fn exercise_by_name(&self, name: &str) -> Option<&ExerciseEntry> {
        self.exercise_index
            .get(&canonical_name(name))
            .map(|&i| &self.exercises[i])
    }

    pub fn warnings(&self) -> &[ReferenceWarning] {
        &self.warnings
    }

    /// Combined version tag ("nutrition/exercises").
    pub fn version(&self) -> String {
        format!("{}/{}", self.nutrition_version, self.exercise_version)
    }
}

/// Errors from reference data loading.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("Failed to read reference data: {0}")]
    IoError(String),

    #[error("Failed to parse reference data: {0}")]
    ParseError(String),

    #[error("Reference data contains no usable entries")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUTRITION: &str = r#"{
        "version": "test-1",
        "entries": [
            {"name": "Oatmeal", "calories": 150, "protein": 5, "carbs": 27, "fats": 3},
            {"name": "oatmeal ", "calories": 160, "protein": 6, "carbs": 28, "fats": 3},
            {"name": "beef", "calories": 250, "protein": 26, "carbs": 0, "fats": 15},
            {"name": "bad", "calories": -1, "protein": 0, "carbs": 0, "fats": 0}
        ]
    }"#;

    const EXERCISES: &str = r#"{
        "version": "test-1",
        "entries": [
            {"name": "Running", "category": "running", "duration": 30, "calories": 330},
            {"name": "yoga flow", "category": "Yoga", "duration": 60, "calories": 180, "calories_per_minute": 5},
            {"name": "zero", "category": "other", "duration": 0, "calories": 10}
        ]
    }"#;

    #[test]
    fn test_duplicates_keep_first_and_warn() {
        let tables = ReferenceTables::load_from_json(NUTRITION, EXERCISES).unwrap();

        let oatmeal = tables.nutrition_by_name("OATMEAL").unwrap();
        assert_eq!(oatmeal.calories_per_serving, 150.0);
        assert_eq!(tables.nutrition().len(), 2);
        assert!(tables
            .warnings()
            .contains(&ReferenceWarning::DuplicateNutrition("oatmeal".to_string())));
    }

    #[test]
    fn test_derived_rate() {
        let tables = ReferenceTables::load_from_json(NUTRITION, EXERCISES).unwrap();
        let running = tables.exercise_by_name(" running").unwrap();
        assert_eq!(running.calories_per_minute, 11.0);
        assert_eq!(running.category, ExerciseCategory::Running);
    }

    #[test]
    fn test_rate_mismatch_flagged_but_explicit_value_kept() {
        let tables = ReferenceTables::load_from_json(NUTRITION, EXERCISES).unwrap();
        let yoga = tables.exercise_by_name("yoga flow").unwrap();
        assert_eq!(yoga.calories_per_minute, 5.0);
        assert!(tables.warnings().iter().any(|w| matches!(
            w,
            ReferenceWarning::RateMismatch { name, .. } if name == "yoga flow"
        )));
    }

    #[test]
    fn test_invalid_entries_skipped() {
        let tables = ReferenceTables::load_from_json(NUTRITION, EXERCISES).unwrap();
        assert!(tables.nutrition_by_name("bad").is_none());
        assert!(tables.exercise_by_name("zero").is_none());
        assert_eq!(tables.exercises().len(), 2);
    }

    #[test]
    fn test_parse_error() {
        let result = ReferenceTables::load_from_json("not json", EXERCISES);
        assert!(matches!(result, Err(ReferenceError::ParseError(_))));
    }

    #[test]
    fn test_builtin_tables_are_clean() {
        let tables = ReferenceTables::builtin().unwrap();
        assert!(!tables.nutrition().is_empty());
        assert!(!tables.exercises().is_empty());
        assert!(
            tables.warnings().is_empty(),
            "builtin data has problems: {:?}",
            tables.warnings()
        );
    }
}
