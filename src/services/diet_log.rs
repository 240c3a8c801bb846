// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Building diet log entries from the nutrition table.

use crate::models::diet::{DietEntry, MealType};
use crate::models::nutrition::Macros;
use crate::services::reference::ReferenceTables;
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};

/// Fields for a new diet entry. Explicit values win over table values.
#[derive(Debug, Clone)]
pub struct NewDietEntry {
    pub food_name: String,
    pub meal: MealType,
    pub servings: f64,
    pub calories: Option<f64>,
    pub protein_grams: Option<f64>,
    pub carbs_grams: Option<f64>,
    pub fats_grams: Option<f64>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DietLogError {
    #[error("servings must be a positive number")]
    InvalidServings,

    #[error("'{0}' is not in the nutrition table; enter calories manually")]
    UnknownFood(String),
}

/// Build a diet entry, scaling macros from the nutrition table when the food
/// is known by exact name.
pub fn create_diet_entry(
    tables: &ReferenceTables,
    user_id: &str,
    input: NewDietEntry,
    now: DateTime<Utc>,
) -> Result<DietEntry, DietLogError> {
    if !input.servings.is_finite() || input.servings <= 0.0 {
        return Err(DietLogError::InvalidServings);
    }

    let food_name = input.food_name.trim().to_string();
    let from_table = tables
        .nutrition_by_name(&food_name)
        .map(|entry| entry.scaled(input.servings));

    let base = match (from_table, input.calories) {
        (Some(scaled), _) => scaled,
        (None, Some(_)) => Macros::default(),
        (None, None) => return Err(DietLogError::UnknownFood(food_name)),
    };

    let non_negative = |value: Option<f64>, fallback: f64| {
        value
            .filter(|v| v.is_finite())
            .unwrap_or(fallback)
            .max(0.0)
    };

    Ok(DietEntry {
        id: ulid::Ulid::new().to_string(),
        user_id: user_id.to_string(),
        food_name,
        meal: input.meal,
        servings: input.servings,
        calories: non_negative(input.calories, base.calories),
        protein_grams: non_negative(input.protein_grams, base.protein_grams),
        carbs_grams: non_negative(input.carbs_grams, base.carbs_grams),
        fats_grams: non_negative(input.fats_grams, base.fats_grams),
        date: input.date.unwrap_or(now),
        created_at: format_utc_rfc3339(now),
    })
}
