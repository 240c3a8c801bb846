// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise reference model and workout categories.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Broad workout category used by the reference table, catalog and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseCategory {
    Cardio,
    Strength,
    Yoga,
    Swimming,
    Cycling,
    Running,
    #[serde(other)]
    Other,
}

impl ExerciseCategory {
    pub const ALL: [ExerciseCategory; 7] = [
        ExerciseCategory::Cardio,
        ExerciseCategory::Strength,
        ExerciseCategory::Yoga,
        ExerciseCategory::Swimming,
        ExerciseCategory::Cycling,
        ExerciseCategory::Running,
        ExerciseCategory::Other,
    ];

    /// Default burn rate (kcal/min, reference body weight) when no named
    /// exercise is known.
    ///
    /// This is the only copy of these numbers. Both workout logging and the
    /// suggestion engine go through [`crate::services::calories`].
    pub const fn default_calories_per_minute(self) -> f64 {
        match self {
            ExerciseCategory::Cardio => 10.0,
            ExerciseCategory::Strength => 6.0,
            ExerciseCategory::Yoga => 3.0,
            ExerciseCategory::Swimming => 10.0,
            ExerciseCategory::Cycling => 8.0,
            ExerciseCategory::Running => 11.0,
            ExerciseCategory::Other => 7.0,
        }
    }

    /// Lowercase name, as used in JSON and free-text search.
    pub const fn as_str(self) -> &'static str {
        match self {
            ExerciseCategory::Cardio => "cardio",
            ExerciseCategory::Strength => "strength",
            ExerciseCategory::Yoga => "yoga",
            ExerciseCategory::Swimming => "swimming",
            ExerciseCategory::Cycling => "cycling",
            ExerciseCategory::Running => "running",
            ExerciseCategory::Other => "other",
        }
    }

    /// Cardio-like categories (the "Cardio" workout type covers all of them).
    pub const fn is_cardio_family(self) -> bool {
        matches!(
            self,
            ExerciseCategory::Cardio
                | ExerciseCategory::Running
                | ExerciseCategory::Cycling
                | ExerciseCategory::Swimming
        )
    }

    /// Parse a loosely formatted category name. Unknown names map to `Other`.
    pub fn parse_lenient(raw: &str) -> Self {
        let raw = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == raw)
            .unwrap_or(ExerciseCategory::Other)
    }
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry of the exercise reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseEntry {
    /// Canonical (trimmed, lowercase) name
    pub name: String,
    pub category: ExerciseCategory,
    /// Duration the baseline calories refer to
    pub baseline_duration_minutes: f64,
    pub baseline_calories: f64,
    /// Burn rate; derived from the baseline when absent in source data
    pub calories_per_minute: f64,
    #[serde(default)]
    pub notes: String,
}

impl ExerciseEntry {
    /// Rate implied by the baseline duration and calories.
    pub fn derived_calories_per_minute(&self) -> f64 {
        if self.baseline_duration_minutes > 0.0 {
            self.baseline_calories / self.baseline_duration_minutes
        } else {
            0.0
        }
    }
}
