// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calorie estimation from duration.
//!
//! Every calorie number the service produces (logged workouts, quick-start
//! and catalog suggestions) comes from [`estimate`]. Category fallbacks come
//! from [`ExerciseCategory::default_calories_per_minute`].

use crate::models::catalog::CatalogWorkout;
use crate::models::exercise::{ExerciseCategory, ExerciseEntry};
use crate::services::matcher;
use crate::services::reference::ReferenceTables;

/// What the burn rate is taken from.
#[derive(Debug, Clone, Copy)]
pub enum CalorieBasis<'a> {
    /// A named reference exercise
    Entry(&'a ExerciseEntry),
    /// Only the category is known
    Category(ExerciseCategory),
    /// An explicit rate (kcal/min)
    Rate(f64),
}

impl CalorieBasis<'_> {
    pub fn calories_per_minute(&self) -> f64 {
        match self {
            CalorieBasis::Entry(entry) => entry.calories_per_minute,
            CalorieBasis::Category(category) => category.default_calories_per_minute(),
            CalorieBasis::Rate(rate) => *rate,
        }
    }
}

/// Estimated calories for `duration_minutes` of activity.
///
/// Non-positive or non-finite durations give 0. The product is rounded once,
/// at the end.
pub fn estimate(basis: CalorieBasis<'_>, duration_minutes: f64) -> u32 {
    if !duration_minutes.is_finite() || duration_minutes <= 0.0 {
        return 0;
    }

    let rate = basis.calories_per_minute();
    if !rate.is_finite() || rate <= 0.0 {
        return 0;
    }

    // Float-to-int `as` saturates
    (rate * duration_minutes).round() as u32
}

/// Parse a user-entered duration. Anything non-numeric is 0.
pub fn parse_duration(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite())
        .unwrap_or(0.0)
}

/// Pick the basis for a workout by name, falling back to its type.
///
/// An exact or closest reference match wins; otherwise the category default.
pub fn basis_for<'a>(
    tables: &'a ReferenceTables,
    name: &str,
    category: ExerciseCategory,
) -> CalorieBasis<'a> {
    match matcher::exact_or_closest(name, tables.exercises()) {
        Some(entry) => CalorieBasis::Entry(entry),
        None => CalorieBasis::Category(category),
    }
}

/// Basis for a catalog workout: its own rate when given, else its category.
pub fn catalog_basis(workout: &CatalogWorkout) -> CalorieBasis<'static> {
    match workout.calories_per_minute {
        Some(rate) if rate.is_finite() && rate > 0.0 => CalorieBasis::Rate(rate),
        _ => CalorieBasis::Category(workout.category),
    }
}
