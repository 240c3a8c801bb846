// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal-based workout suggestions.
//!
//! Filters the workout catalog by the user's preferred workout types and
//! focus areas, prefers entries at or below their training level, and ranks
//! what is left. Output is deterministic for a given profile and catalog.

use crate::models::catalog::CatalogWorkout;
use crate::models::exercise::{ExerciseCategory, ExerciseEntry};
use crate::models::profile::{FocusArea, TrainingLevel, UserGoalProfile, WorkoutType};
use crate::models::suggestion::{SuggestedWorkout, WorkoutSource};
use crate::services::calories::{self, CalorieBasis};
use std::collections::BTreeSet;
use validator::Validate;

/// Why no suggestions could be produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SuggestError {
    #[error("Goal profile is incomplete: {0}")]
    InvalidProfile(String),

    /// The catalog has not been populated yet.
    #[error("Workout catalog is empty")]
    EmptyCatalog,
}

struct Candidate<'a> {
    position: usize,
    workout: &'a CatalogWorkout,
    matched: Vec<FocusArea>,
    level_appropriate: bool,
}

/// Suggest catalog workouts for a goal profile.
///
/// Returns `Ok(vec![])` when the catalog has entries but none fit the
/// profile; that is a different situation from [`SuggestError::EmptyCatalog`].
pub fn suggest(
    profile: &UserGoalProfile,
    catalog: &[CatalogWorkout],
) -> Result<Vec<SuggestedWorkout>, SuggestError> {
    profile
        .validate()
        .map_err(|e| SuggestError::InvalidProfile(e.to_string()))?;

    if catalog.is_empty() {
        return Err(SuggestError::EmptyCatalog);
    }

    let mut candidates: Vec<Candidate<'_>> = catalog
        .iter()
        .enumerate()
        .filter(|(_, w)| matches_workout_types(&profile.workout_types, w))
        .filter_map(|(position, workout)| {
            let matched = matched_focus_areas(&profile.focus_areas, workout);
            if matched.is_empty() {
                return None;
            }
            Some(Candidate {
                position,
                workout,
                matched,
                level_appropriate: workout.difficulty <= profile.training_level,
            })
        })
        .collect();

    // Prefer level-appropriate entries; if there are none, show the rest
    // rather than nothing.
    if candidates.iter().any(|c| c.level_appropriate) {
        candidates.retain(|c| c.level_appropriate);
    } else if !candidates.is_empty() {
        tracing::debug!(
            level = ?profile.training_level,
            count = candidates.len(),
            "No level-appropriate workouts, falling back to all matches"
        );
    }

    candidates.sort_by(|a, b| {
        b.level_appropriate
            .cmp(&a.level_appropriate)
            .then_with(|| b.matched.len().cmp(&a.matched.len()))
            .then_with(|| a.position.cmp(&b.position))
    });

    Ok(candidates
        .into_iter()
        .map(|c| {
            let mut suggestion = catalog_suggestion(c.workout, c.workout.duration_minutes);
            suggestion.reason = format!(
                "Fits your goal to {}: {}",
                profile.primary_goal.describe(),
                c.matched
                    .iter()
                    .map(|f| f.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            suggestion.matched_focus_areas = c.matched;
            suggestion.level_appropriate = c.level_appropriate;
            suggestion
        })
        .collect())
}

/// Suggestion for a catalog workout performed for `duration_minutes`.
pub fn catalog_suggestion(workout: &CatalogWorkout, duration_minutes: f64) -> SuggestedWorkout {
    SuggestedWorkout {
        source: WorkoutSource::Catalog {
            workout_id: workout.id.clone(),
        },
        title: workout.title.clone(),
        category: workout.category,
        difficulty: workout.difficulty,
        duration_minutes,
        estimated_calories: calories::estimate(calories::catalog_basis(workout), duration_minutes),
        exercise_count: workout.exercise_count(),
        target_muscle_groups: workout.target_muscles.clone(),
        equipment: workout.equipment.clone(),
        matched_focus_areas: Vec::new(),
        level_appropriate: true,
        reason: String::new(),
    }
}

/// Quick-start suggestion built from a reference exercise.
///
/// Uses the exercise's baseline duration unless one is given.
pub fn quick_workout(entry: &ExerciseEntry, duration_minutes: Option<f64>) -> SuggestedWorkout {
    let duration_minutes = duration_minutes.unwrap_or(entry.baseline_duration_minutes);
    SuggestedWorkout {
        source: WorkoutSource::Dynamic {
            exercise: entry.name.clone(),
        },
        title: title_case(&entry.name),
        category: entry.category,
        difficulty: TrainingLevel::Beginner,
        duration_minutes,
        estimated_calories: calories::estimate(CalorieBasis::Entry(entry), duration_minutes),
        exercise_count: 1,
        target_muscle_groups: Vec::new(),
        equipment: Vec::new(),
        matched_focus_areas: Vec::new(),
        level_appropriate: true,
        reason: "Quick start".to_string(),
    }
}

/// Whether any of the user's workout types fits the catalog entry.
fn matches_workout_types(types: &BTreeSet<WorkoutType>, workout: &CatalogWorkout) -> bool {
    types.iter().any(|t| matches_workout_type(*t, workout))
}

fn matches_workout_type(workout_type: WorkoutType, workout: &CatalogWorkout) -> bool {
    let category = workout.category;
    let strength_or_cardio = category == ExerciseCategory::Strength || category.is_cardio_family();

    match workout_type {
        WorkoutType::Gym => strength_or_cardio,
        WorkoutType::Home => {
            strength_or_cardio
                && category != ExerciseCategory::Swimming
                && !workout.equipment.iter().any(|e| e.gym_only())
        }
        WorkoutType::Cardio => category.is_cardio_family(),
        WorkoutType::Yoga => category == ExerciseCategory::Yoga,
        WorkoutType::Bodyweight => {
            category == ExerciseCategory::Strength
                && workout.equipment.iter().all(|e| e.bodyweight_friendly())
        }
    }
}

/// Profile focus areas the workout covers, in profile order.
fn matched_focus_areas(wanted: &BTreeSet<FocusArea>, workout: &CatalogWorkout) -> Vec<FocusArea> {
    wanted
        .iter()
        .copied()
        .filter(|w| {
            *w == FocusArea::FullBody || workout.target_muscles.iter().any(|t| t.matches(*w))
        })
        .collect()
}

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
