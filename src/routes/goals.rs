// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Numeric goal routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Goal, GoalStatus};
use crate::routes::owned;
use crate::services::progress::{self, GoalProgress};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
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

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/goals", get(list_goals).post(create_goal))
        .route("/api/goals/{id}/progress", put(update_progress))
        .route("/api/goals/{id}/cancel", post(cancel_goal))
}

/// A goal with its computed progress.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: GoalProgress,
}

impl GoalView {
    fn new(goal: Goal, now: DateTime<Utc>) -> Self {
        let progress = progress::compute_goal_progress(&goal, now);
        Self { goal, progress }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalsResponse {
    pub goals: Vec<GoalView>,
}

async fn list_goals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<GoalsResponse>> {
    let now = Utc::now();
    let goals = state
        .db
        .list_goals(&user.user_id)
        .await?
        .into_iter()
        .map(|goal| GoalView::new(goal, now))
        .collect();

    Ok(Json(GoalsResponse { goals }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGoalRequest {
    #[validate(length(min = 1, max = 100, message = "title must be 1-100 characters"))]
    pub title: String,
    #[validate(range(exclusive_min = 0.0, message = "target_value must be positive"))]
    pub target_value: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "current_value must not be negative"))]
    pub current_value: f64,
    #[validate(length(max = 20))]
    pub unit: String,
    pub target_date: DateTime<Utc>,
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<GoalView>)> {
    body.validate()?;

    let now = Utc::now();
    let timestamp = format_utc_rfc3339(now);
    let mut goal = Goal {
        id: ulid::Ulid::new().to_string(),
        user_id: user.user_id.clone(),
        title: body.title.trim().to_string(),
        target_value: body.target_value,
        current_value: body.current_value,
        unit: body.unit.trim().to_string(),
        target_date: body.target_date,
        status: GoalStatus::Active,
        created_at: timestamp.clone(),
        updated_at: timestamp,
    };
    progress::recompute_status(&mut goal);

    state.db.set_goal(&goal).await?;

    tracing::info!(
        user_id = %user.user_id,
        goal_id = %goal.id,
        status = ?goal.status,
        "Goal created"
    );

    Ok((StatusCode::CREATED, Json(GoalView::new(goal, now))))
}

async fn load_owned_goal(state: &AppState, user: &AuthUser, goal_id: &str) -> Result<Goal> {
    let goal = state.db.get_goal(goal_id).await?;
    owned(goal, |g| g.user_id.as_str(), &user.user_id, "Goal")
}

#[derive(Debug, Deserialize, Validate)]
pub struct ProgressUpdateRequest {
    #[validate(range(min = 0.0, message = "current_value must not be negative"))]
    pub current_value: f64,
}

/// Record progress. Reaching the target completes an active goal.
async fn update_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(goal_id): Path<String>,
    Json(body): Json<ProgressUpdateRequest>,
) -> Result<Json<GoalView>> {
    body.validate()?;

    let mut goal = load_owned_goal(&state, &user, &goal_id).await?;
    if goal.status == GoalStatus::Cancelled {
        return Err(AppError::Conflict(
            "Cannot record progress on a cancelled goal".to_string(),
        ));
    }

    let now = Utc::now();
    let completed = progress::update_current_value(&mut goal, body.current_value);
    goal.updated_at = format_utc_rfc3339(now);
    state.db.set_goal(&goal).await?;

    if completed {
        tracing::info!(user_id = %user.user_id, goal_id = %goal.id, "Goal completed");
    }

    Ok(Json(GoalView::new(goal, now)))
}

async fn cancel_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(goal_id): Path<String>,
) -> Result<Json<GoalView>> {
    let mut goal = load_owned_goal(&state, &user, &goal_id).await?;
    progress::cancel(&mut goal)?;

    let now = Utc::now();
    goal.updated_at = format_utc_rfc3339(now);
    state.db.set_goal(&goal).await?;

    tracing::info!(user_id = %user.user_id, goal_id = %goal.id, "Goal cancelled");
    Ok(Json(GoalView::new(goal, now)))
}
