// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout log routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ExerciseCategory, LoggedWorkout, SuggestedWorkout, WorkoutSource};
use crate::routes::{owned, DateRangeQuery};
use crate::services::matcher;
use crate::services::suggest::{catalog_suggestion, quick_workout};
use crate::services::workout_log::{self, DurationInput, NewWorkout, WorkoutEdit};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Longest single workout accepted, in minutes.
const MAX_DURATION_MINUTES: f64 = 24.0 * 60.0;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route("/api/workouts/accept", post(accept_suggestion))
        .route("/api/workouts/{id}", put(update_workout).delete(delete_workout))
        .route("/api/workouts/{id}/recalculate", post(recalculate_workout))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutsResponse {
    pub workouts: Vec<LoggedWorkout>,
    pub total: u32,
}

async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<DateRangeQuery>,
) -> Result<Json<WorkoutsResponse>> {
    let range = params.parse()?;
    let workouts = state.db.list_workouts(&user.user_id, range).await?;

    tracing::debug!(
        user_id = %user.user_id,
        from = ?range.from,
        to = ?range.to,
        count = workouts.len(),
        "Fetched workouts"
    );

    Ok(Json(WorkoutsResponse {
        total: workouts.len() as u32,
        workouts,
    }))
}

// ─── Create ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkoutRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    /// Inferred from the matched reference exercise when omitted
    #[serde(default)]
    pub workout_type: Option<ExerciseCategory>,
    pub duration: DurationInput,
    /// Explicit calories; marks the workout as manually overridden
    #[serde(default)]
    #[validate(range(max = 20000))]
    pub calories: Option<u32>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    #[validate(range(max = 100))]
    pub sets: Option<u32>,
    #[serde(default)]
    #[validate(range(max = 1000))]
    pub reps: Option<u32>,
}

fn check_duration(duration: &DurationInput) -> Result<()> {
    let minutes = duration.minutes();
    if minutes < 0.0 || minutes > MAX_DURATION_MINUTES {
        return Err(AppError::Validation(format!(
            "duration must be between 0 and {} minutes",
            MAX_DURATION_MINUTES
        )));
    }
    Ok(())
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<LoggedWorkout>)> {
    body.validate()?;
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be blank".to_string()));
    }
    check_duration(&body.duration)?;

    let workout_type = body
        .workout_type
        .or_else(|| {
            matcher::exact_or_closest(&body.name, state.reference.exercises())
                .map(|entry| entry.category)
        })
        .unwrap_or(ExerciseCategory::Other);

    let workout = workout_log::create_workout(
        &state.reference,
        &user.user_id,
        NewWorkout {
            name: body.name,
            workout_type,
            duration: body.duration,
            calories: body.calories,
            date: body.date,
            completed: body.completed,
            sets: body.sets,
            reps: body.reps,
        },
        Utc::now(),
    );

    state.db.set_workout(&workout).await?;

    tracing::info!(
        user_id = %user.user_id,
        workout_id = %workout.id,
        workout_type = %workout.workout_type,
        calories = workout.calories,
        overridden = workout.calories_overridden,
        "Workout logged"
    );

    Ok((StatusCode::CREATED, Json(workout)))
}

// ─── Accept Suggestion ───────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AcceptSuggestionRequest {
    pub source: WorkoutSource,
    /// Session length; the suggestion's own duration when omitted
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
}

/// Log a workout from a suggestion.
///
/// The suggestion is rebuilt from the catalog or reference table so the
/// stored calories always come from the estimator.
async fn accept_suggestion(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<AcceptSuggestionRequest>,
) -> Result<(StatusCode, Json<LoggedWorkout>)> {
    if let Some(minutes) = body.duration_minutes {
        check_duration(&DurationInput::Minutes(minutes))?;
    }

    let suggestion: SuggestedWorkout = match &body.source {
        WorkoutSource::Catalog { workout_id } => {
            let catalog_workout = state
                .db
                .get_catalog_workout(workout_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Catalog workout {} not found", workout_id))
                })?;
            let duration = body
                .duration_minutes
                .unwrap_or(catalog_workout.duration_minutes);
            catalog_suggestion(&catalog_workout, duration)
        }
        WorkoutSource::Dynamic { exercise } => {
            let entry = state
                .reference
                .exercise_by_name(exercise)
                .ok_or_else(|| AppError::NotFound(format!("Exercise '{}' not found", exercise)))?;
            quick_workout(entry, body.duration_minutes)
        }
    };

    let workout = workout_log::from_suggestion(
        &user.user_id,
        &suggestion,
        body.date,
        body.completed,
        Utc::now(),
    );
    state.db.set_workout(&workout).await?;

    tracing::info!(
        user_id = %user.user_id,
        workout_id = %workout.id,
        source = ?workout.source,
        calories = workout.calories,
        "Suggestion accepted"
    );

    Ok((StatusCode::CREATED, Json(workout)))
}

// ─── Edit / Delete ───────────────────────────────────────────

async fn load_owned_workout(
    state: &AppState,
    user: &AuthUser,
    workout_id: &str,
) -> Result<LoggedWorkout> {
    let workout = state.db.get_workout(workout_id).await?;
    owned(workout, |w| w.user_id.as_str(), &user.user_id, "Workout")
}

/// Edit a workout. Calories are only recomputed when `recalculate` is set.
async fn update_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(workout_id): Path<String>,
    Json(edit): Json<WorkoutEdit>,
) -> Result<Json<LoggedWorkout>> {
    if edit.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Validation("name must not be blank".to_string()));
    }
    if let Some(duration) = &edit.duration {
        check_duration(duration)?;
    }

    let mut workout = load_owned_workout(&state, &user, &workout_id).await?;
    let recalculated = workout_log::apply_edit(&state.reference, &mut workout, edit, Utc::now());
    state.db.set_workout(&workout).await?;

    tracing::debug!(
        user_id = %user.user_id,
        workout_id = %workout.id,
        recalculated,
        overridden = workout.calories_overridden,
        "Workout updated"
    );

    Ok(Json(workout))
}

/// Re-estimate calories from the workout's current values, clearing any override.
async fn recalculate_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(workout_id): Path<String>,
) -> Result<Json<LoggedWorkout>> {
    let mut workout = load_owned_workout(&state, &user, &workout_id).await?;
    workout_log::recalculate(&state.reference, &mut workout, Utc::now());
    state.db.set_workout(&workout).await?;

    Ok(Json(workout))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(workout_id): Path<String>,
) -> Result<StatusCode> {
    let workout = load_owned_workout(&state, &user, &workout_id).await?;
    state.db.delete_workout(&workout.id).await?;

    tracing::info!(user_id = %user.user_id, workout_id = %workout.id, "Workout deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_duration_bounds() {
        assert!(check_duration(&DurationInput::Minutes(45.5)).is_ok());
        assert!(check_duration(&DurationInput::Text("abc".to_string())).is_ok());
        assert!(check_duration(&DurationInput::Minutes(-5.0)).is_err());
        assert!(check_duration(&DurationInput::Minutes(2000.0)).is_err());
    }

    #[test]
    fn test_create_request_validation() {
        let body: CreateWorkoutRequest = serde_json::from_value(serde_json::json!({
            "name": "",
            "duration": 30
        }))
        .unwrap();
        assert!(body.validate().is_err());

        let body: CreateWorkoutRequest = serde_json::from_value(serde_json::json!({
            "name": "Running",
            "duration": "30",
            "sets": 500
        }))
        .unwrap();
        assert!(body.validate().is_err());
    }
}
