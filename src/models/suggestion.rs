// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Suggested workouts (computed per request, never stored).

use crate::models::catalog::Equipment;
use crate::models::exercise::ExerciseCategory;
use crate::models::profile::{FocusArea, TrainingLevel};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Where a suggestion came from.
///
/// Catalog suggestions point at a stored catalog document; dynamic ones were
/// built on the fly from the exercise reference table and have no document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkoutSource {
    Catalog { workout_id: String },
    Dynamic { exercise: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SuggestedWorkout {
    pub source: WorkoutSource,
    pub title: String,
    pub category: ExerciseCategory,
    pub difficulty: TrainingLevel,
    pub duration_minutes: f64,
    pub estimated_calories: u32,
    pub exercise_count: u32,
    pub target_muscle_groups: Vec<FocusArea>,
    pub equipment: Vec<Equipment>,
    /// Profile focus areas this workout covers
    #[serde(default)]
    pub matched_focus_areas: Vec<FocusArea>,
    /// False when shown only because nothing at the user's level matched
    #[serde(default = "default_true")]
    pub level_appropriate: bool,
    #[serde(default)]
    pub reason: String,
}

fn default_true() -> bool {
    true
}
