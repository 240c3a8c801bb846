// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diet log routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{DietEntry, Macros, MealType};
use crate::routes::{owned, DateRangeQuery};
use crate::services::diet_log::{self, NewDietEntry};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
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
        .route("/api/meals", get(list_meals).post(create_meal))
        .route("/api/meals/{id}", delete(delete_meal))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealsResponse {
    pub meals: Vec<DietEntry>,
    /// Sum over `meals`
    pub totals: Macros,
}

async fn list_meals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<DateRangeQuery>,
) -> Result<Json<MealsResponse>> {
    let range = params.parse()?;
    let meals = state.db.list_diet_entries(&user.user_id, range).await?;
    let totals: Macros = meals.iter().map(DietEntry::macros).sum();

    Ok(Json(MealsResponse { meals, totals }))
}

fn default_servings() -> f64 {
    1.0
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMealRequest {
    #[validate(length(min = 1, max = 100, message = "food_name must be 1-100 characters"))]
    pub food_name: String,
    pub meal: MealType,
    #[serde(default = "default_servings")]
    #[validate(range(exclusive_min = 0.0, max = 50.0, message = "servings must be between 0 and 50"))]
    pub servings: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 20000.0))]
    pub calories: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub protein_grams: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub carbs_grams: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub fats_grams: Option<f64>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Log a meal. Known foods get macros from the nutrition table.
async fn create_meal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<DietEntry>)> {
    body.validate()?;

    let entry = diet_log::create_diet_entry(
        &state.reference,
        &user.user_id,
        NewDietEntry {
            food_name: body.food_name,
            meal: body.meal,
            servings: body.servings,
            calories: body.calories,
            protein_grams: body.protein_grams,
            carbs_grams: body.carbs_grams,
            fats_grams: body.fats_grams,
            date: body.date,
        },
        Utc::now(),
    )?;

    state.db.set_diet_entry(&entry).await?;

    tracing::info!(
        user_id = %user.user_id,
        entry_id = %entry.id,
        meal = ?entry.meal,
        calories = entry.calories,
        "Meal logged"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

async fn delete_meal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(entry_id): Path<String>,
) -> Result<StatusCode> {
    let entry = state.db.get_diet_entry(&entry_id).await?;
    let entry = owned(entry, |e| e.user_id.as_str(), &user.user_id, "Meal")?;
    state.db.delete_diet_entry(&entry.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
