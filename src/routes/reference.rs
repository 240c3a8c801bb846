// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reference table lookups and the calorie estimator.

use crate::error::{AppError, Result};
use crate::models::{ExerciseCategory, ExerciseEntry, NutritionEntry};
use crate::services::calories::{self, CalorieBasis};
use crate::services::matcher;
use crate::services::workout_log::DurationInput;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/nutrition/search", get(search_nutrition))
        .route("/api/exercises/search", get(search_exercises))
        .route("/api/exercises/lookup", get(lookup_exercise))
        .route("/api/calories/estimate", post(estimate_calories))
}

// ─── Search ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Serialize)]
pub struct SearchResponse<T> {
    pub query: String,
    pub results: Vec<T>,
}

/// Search the nutrition table. Short queries return no results.
async fn search_nutrition(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Json<SearchResponse<NutritionEntry>> {
    let results: Vec<NutritionEntry> = matcher::search_nutrition(&state.reference, &params.q)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(query = %params.q, count = results.len(), "Nutrition search");
    Json(SearchResponse {
        query: params.q,
        results,
    })
}

async fn search_exercises(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Json<SearchResponse<ExerciseEntry>> {
    let results: Vec<ExerciseEntry> = matcher::search_exercise(&state.reference, &params.q)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(query = %params.q, count = results.len(), "Exercise search");
    Json(SearchResponse {
        query: params.q,
        results,
    })
}

#[derive(Deserialize)]
struct LookupQuery {
    #[serde(default)]
    name: String,
}

/// Exact match, else the closest search hit.
async fn lookup_exercise(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupQuery>,
) -> Result<Json<ExerciseEntry>> {
    matcher::exact_or_closest(&params.name, state.reference.exercises())
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No exercise matching '{}'", params.name.trim())))
}

// ─── Estimate ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    /// Exercise name looked up in the reference table
    #[serde(default)]
    pub exercise: Option<String>,
    /// Fallback category when the name is unknown
    #[serde(default)]
    pub workout_type: Option<ExerciseCategory>,
    pub duration: DurationInput,
    /// Explicit burn rate; wins over name and type
    #[serde(default)]
    pub calories_per_minute: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EstimateResponse {
    pub calories: u32,
    pub calories_per_minute: f64,
    pub duration_minutes: f64,
    /// Reference exercise the rate was taken from, if any
    pub matched_exercise: Option<String>,
}

async fn estimate_calories(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>> {
    let duration_minutes = body.duration.minutes();

    let basis = match (body.calories_per_minute, body.exercise.as_deref()) {
        (Some(rate), _) => {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(AppError::Validation(
                    "calories_per_minute must be positive".to_string(),
                ));
            }
            CalorieBasis::Rate(rate)
        }
        (None, Some(name)) => calories::basis_for(
            &state.reference,
            name,
            body.workout_type.unwrap_or(ExerciseCategory::Other),
        ),
        (None, None) => match body.workout_type {
            Some(category) => CalorieBasis::Category(category),
            None => {
                return Err(AppError::BadRequest(
                    "Provide an exercise, a workout_type or a calories_per_minute".to_string(),
                ))
            }
        },
    };

    let matched_exercise = match basis {
        CalorieBasis::Entry(entry) => Some(entry.name.clone()),
        _ => None,
    };

    Ok(Json(EstimateResponse {
        calories: calories::estimate(basis, duration_minutes),
        calories_per_minute: basis.calories_per_minute(),
        duration_minutes,
        matched_exercise,
    }))
}
