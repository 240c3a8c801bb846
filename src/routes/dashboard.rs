// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard and challenge routes.

use crate::db::firestore::DateRange;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::challenge::{milestones, reached_milestones};
use crate::models::stats::workout_streak;
use crate::models::{DashboardStats, GoalStatus, LoggedWorkout};
use crate::routes::DateRangeQuery;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/challenges/{id}", get(get_challenge))
}

// ─── Dashboard ───────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardResponse {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub stats: DashboardStats,
    /// Consumed minus burned, per day
    pub net_calories_by_day: BTreeMap<String, f64>,
    /// Consecutive days with a completed workout, ending today
    pub streak_days: u32,
    pub active_goals: u32,
    pub completed_goals: u32,
}

/// Aggregates for the requested window, computed from stored entries.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<DateRangeQuery>,
) -> Result<Json<DashboardResponse>> {
    let range = params.parse()?;

    // The streak looks back past `from`, so load every workout once.
    let (all_workouts, meals, goals) = tokio::try_join!(
        state.db.list_workouts(&user.user_id, DateRange::default()),
        state.db.list_diet_entries(&user.user_id, range),
        state.db.list_goals(&user.user_id),
    )?;

    let in_range: Vec<LoggedWorkout> = all_workouts
        .iter()
        .filter(|w| range.contains(&w.date))
        .cloned()
        .collect();

    let stats = DashboardStats::from_entries(&in_range, &meals);
    let streak_days = workout_streak(&all_workouts, Utc::now().date_naive());
    let count_status =
        |status: GoalStatus| goals.iter().filter(|g| g.status == status).count() as u32;

    tracing::debug!(
        user_id = %user.user_id,
        workouts = stats.total_workouts,
        meals = stats.meals_logged,
        streak_days,
        "Computed dashboard"
    );

    Ok(Json(DashboardResponse {
        from: range.from,
        to: range.to,
        net_calories_by_day: stats.net_calories_by_day(),
        streak_days,
        active_goals: count_status(GoalStatus::Active),
        completed_goals: count_status(GoalStatus::Completed),
        stats,
    }))
}

// ─── Challenges ──────────────────────────────────────────────

/// Challenge as seen by one participant. Other users' progress is not exposed.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChallengeResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub target_value: u32,
    pub unit: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub participant_count: u32,
    pub milestones: Vec<u32>,
    pub joined: bool,
    pub your_progress: u32,
    pub reached_milestones: Vec<u32>,
}

async fn get_challenge(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(challenge_id): Path<String>,
) -> Result<Json<ChallengeResponse>> {
    let challenge = state
        .db
        .get_challenge(&challenge_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Challenge {} not found", challenge_id)))?;

    let progress = challenge.participants.get(&user.user_id).copied();
    let your_progress = progress.unwrap_or(0);

    Ok(Json(ChallengeResponse {
        participant_count: challenge.participants.len() as u32,
        milestones: milestones(challenge.target_value),
        joined: progress.is_some(),
        your_progress,
        reached_milestones: reached_milestones(challenge.target_value, your_progress),
        id: challenge.id,
        title: challenge.title,
        description: challenge.description,
        target_value: challenge.target_value,
        unit: challenge.unit,
        start_date: challenge.start_date,
        end_date: challenge.end_date,
    }))
}
