// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal profile routes.
//!
//! The profile is only ever written by an explicit `PUT`.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::UserGoalProfile;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/profile", get(get_profile).put(save_profile))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    /// `None` until the user saves goals for the first time
    pub profile: Option<UserGoalProfile>,
    pub goals_set: bool,
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let profile = state.db.get_goal_profile(&user.user_id).await?;

    Ok(Json(ProfileResponse {
        goals_set: profile.is_some(),
        profile,
    }))
}

/// Validate and store the goal profile.
async fn save_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(mut profile): Json<UserGoalProfile>,
) -> Result<Json<ProfileResponse>> {
    profile.validate()?;
    profile.updated_at = format_utc_rfc3339(chrono::Utc::now());

    state.db.set_goal_profile(&user.user_id, &profile).await?;

    tracing::info!(
        user_id = %user.user_id,
        goal = ?profile.primary_goal,
        level = ?profile.training_level,
        focus_areas = profile.focus_areas.len(),
        "Goal profile saved"
    );

    Ok(Json(ProfileResponse {
        profile: Some(profile),
        goals_set: true,
    }))
}
