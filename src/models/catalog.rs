// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout catalog entries (stored in the `workout_catalog` collection).

use crate::models::exercise::ExerciseCategory;
use crate::models::profile::{FocusArea, TrainingLevel};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Dumbbells,
    Barbell,
    Kettlebell,
    Machine,
    Cable,
    Bench,
    ResistanceBand,
    Mat,
    CardioMachine,
    PullUpBar,
}

impl Equipment {
    /// Equipment you normally only find in a gym.
    pub const fn gym_only(self) -> bool {
        matches!(
            self,
            Equipment::Barbell | Equipment::Machine | Equipment::Cable | Equipment::CardioMachine
        )
    }

    /// Equipment that still counts as a bodyweight session.
    pub const fn bodyweight_friendly(self) -> bool {
        matches!(self, Equipment::Mat | Equipment::PullUpBar)
    }
}

/// A pre-built workout in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CatalogWorkout {
    /// Catalog ID (also used as document ID)
    pub id: String,
    pub title: String,
    pub category: ExerciseCategory,
    pub difficulty: TrainingLevel,
    pub duration_minutes: f64,
    #[serde(default)]
    pub target_muscles: Vec<FocusArea>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    /// Exercise names in the order they are performed
    #[serde(default)]
    pub exercises: Vec<String>,
    /// Catalog-specific burn rate; category default applies when absent
    #[serde(default)]
    pub calories_per_minute: Option<f64>,
    /// Position in the seeded catalog, used for stable ordering
    #[serde(default)]
    pub sort_order: u32,
}

impl CatalogWorkout {
    pub fn exercise_count(&self) -> u32 {
        self.exercises.len() as u32
    }
}
