// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod dashboard;
pub mod goals;
pub mod meals;
pub mod profile;
pub mod reference;
pub mod suggestions;
pub mod workouts;

use crate::db::firestore::DateRange;
use crate::error::{AppError, Result};
use crate::middleware::auth::require_auth;
use crate::time_utils::parse_utc_rfc3339;
use crate::AppState;
use axum::http::{header, Method};
use axum::{middleware, routing::get, Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
    /// Reference table version ("nutrition/exercises")
    pub reference_version: String,
}

/// Health check response
async fn health_check(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
        reference_version: state.reference.version(),
    })
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new().route("/health", get(health_check));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .merge(reference::routes())
        .merge(profile::routes())
        .merge(suggestions::routes())
        .merge(workouts::routes())
        .merge(meals::routes())
        .merge(goals::routes())
        .merge(dashboard::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

// ─── Shared Query Parameters ─────────────────────────────────

/// `?from=&to=` window used by the list and dashboard endpoints.
///
/// Accepts RFC3339 timestamps or plain `YYYY-MM-DD` dates. A plain `to`
/// date includes the whole day.
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl DateRangeQuery {
    pub fn parse(&self) -> Result<DateRange> {
        let from = self
            .from
            .as_deref()
            .map(|raw| parse_bound(raw, "from", false))
            .transpose()?;
        let to = self
            .to
            .as_deref()
            .map(|raw| parse_bound(raw, "to", true))
            .transpose()?;

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(AppError::BadRequest(
                    "'from' must not be after 'to'".to_string(),
                ));
            }
        }

        Ok(DateRange { from, to })
    }
}

fn parse_bound(raw: &str, param: &str, end_of_day: bool) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Some(timestamp) = parse_utc_rfc3339(raw) {
        return Ok(timestamp);
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!(
            "Invalid '{}' parameter: must be YYYY-MM-DD or RFC3339 datetime",
            param
        ))
    })?;
    let date = if end_of_day { date.succ_opt() } else { Some(date) };

    date.and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::BadRequest(format!("'{}' is out of range", param)))
}

/// Load a user-owned document, treating someone else's as missing.
pub(crate) fn owned<T>(doc: Option<T>, owner: impl Fn(&T) -> &str, user_id: &str, what: &str) -> Result<T> {
    match doc {
        Some(doc) if owner(&doc) == user_id => Ok(doc),
        _ => Err(AppError::NotFound(format!("{} not found", what))),
    }
}
