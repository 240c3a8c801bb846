// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logged workout model for storage and API.

use crate::models::exercise::ExerciseCategory;
use crate::models::suggestion::WorkoutSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Workout stored in Firestore (`workouts` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoggedWorkout {
    /// Document ID (ULID)
    pub id: String,
    /// Owner
    pub user_id: String,
    pub name: String,
    pub workout_type: ExerciseCategory,
    pub duration_minutes: f64,
    pub calories: u32,
    /// Set once the user typed a calorie value; edits then leave it alone
    #[serde(default)]
    pub calories_overridden: bool,
    /// When the workout took place
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub reps: Option<u32>,
    /// Suggestion this workout was created from, if any
    #[serde(default)]
    pub source: Option<WorkoutSource>,
    pub created_at: String,
    pub updated_at: String,
}
