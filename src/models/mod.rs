// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod catalog;
pub mod challenge;
pub mod diet;
pub mod exercise;
pub mod goal;
pub mod nutrition;
pub mod profile;
pub mod stats;
pub mod suggestion;
pub mod workout;

pub use catalog::{CatalogWorkout, Equipment};
pub use challenge::Challenge;
pub use diet::{DietEntry, MealType};
pub use exercise::{ExerciseCategory, ExerciseEntry};
pub use goal::{Goal, GoalStatus};
pub use nutrition::{Macros, NutritionEntry};
pub use profile::{FocusArea, PrimaryGoal, TrainingLevel, UserGoalProfile, WorkoutType};
pub use stats::DashboardStats;
pub use suggestion::{SuggestedWorkout, WorkoutSource};
pub use workout::LoggedWorkout;
