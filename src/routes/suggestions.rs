// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout suggestion routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::SuggestedWorkout;
use crate::services::{matcher, suggest};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Shown when the catalog has workouts but none fit the profile.
pub const NO_MATCHES_MESSAGE: &str =
    "No workouts match your current goals. Try adding more focus areas or workout types.";

/// Upper bound for a quick-start session.
const MAX_QUICK_MINUTES: f64 = 600.0;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/suggestions", get(get_suggestions))
        .route("/api/suggestions/quick", get(get_quick_suggestion))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    Ok,
    NoMatches,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SuggestionsResponse {
    pub status: SuggestionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub suggestions: Vec<SuggestedWorkout>,
}

/// Suggestions for the caller's saved goal profile.
///
/// No stored profile is `goals_not_set`; an empty catalog is
/// `data_not_ready`; no fitting workouts is a normal `no_matches` response.
async fn get_suggestions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SuggestionsResponse>> {
    let profile = state
        .db
        .get_goal_profile(&user.user_id)
        .await?
        .ok_or(AppError::GoalsNotSet)?;

    let catalog = state.db.get_catalog().await?;
    let suggestions = suggest(&profile, &catalog)?;

    tracing::debug!(
        user_id = %user.user_id,
        catalog_size = catalog.len(),
        count = suggestions.len(),
        "Computed workout suggestions"
    );

    Ok(Json(suggestions_response(suggestions)))
}

fn suggestions_response(suggestions: Vec<SuggestedWorkout>) -> SuggestionsResponse {
    if suggestions.is_empty() {
        SuggestionsResponse {
            status: SuggestionStatus::NoMatches,
            message: Some(NO_MATCHES_MESSAGE.to_string()),
            suggestions,
        }
    } else {
        SuggestionsResponse {
            status: SuggestionStatus::Ok,
            message: None,
            suggestions,
        }
    }
}

#[derive(Deserialize)]
struct QuickQuery {
    #[serde(default)]
    exercise: String,
    minutes: Option<f64>,
}

/// Single-exercise session built from the exercise reference table.
async fn get_quick_suggestion(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QuickQuery>,
) -> Result<Json<SuggestedWorkout>> {
    if let Some(minutes) = params.minutes {
        if !minutes.is_finite() || minutes <= 0.0 || minutes > MAX_QUICK_MINUTES {
            return Err(AppError::Validation(format!(
                "minutes must be between 0 and {}",
                MAX_QUICK_MINUTES
            )));
        }
    }

    let entry = matcher::exact_or_closest(&params.exercise, state.reference.exercises())
        .ok_or_else(|| {
            AppError::NotFound(format!("No exercise matching '{}'", params.exercise.trim()))
        })?;

    Ok(Json(suggest::quick_workout(entry, params.minutes)))
}
