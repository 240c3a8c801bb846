// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::diet_log::DietLogError;
use crate::services::progress::GoalTransitionError;
use crate::services::suggest::SuggestError;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The user has not saved a goal profile.
    #[error("No fitness goals set")]
    GoalsNotSet,

    /// Reference or catalog data has not been populated.
    #[error("Data not ready: {0}")]
    DataNotReady(String),

    /// The document store did not answer in time; safe to retry.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub const GOALS_NOT_SET_MESSAGE: &'static str =
        "Set your fitness goals to get personalized workout suggestions.";
    pub const DATA_NOT_READY_MESSAGE: &'static str =
        "Workout service may need initialization. Please try again shortly.";

    /// Whether the client may retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::StoreUnavailable(_) | AppError::DataNotReady(_))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<SuggestError> for AppError {
    fn from(err: SuggestError) -> Self {
        match err {
            SuggestError::InvalidProfile(msg) => AppError::Validation(msg),
            SuggestError::EmptyCatalog => {
                AppError::DataNotReady("workout catalog is empty".to_string())
            }
        }
    }
}

impl From<DietLogError> for AppError {
    fn from(err: DietLogError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<GoalTransitionError> for AppError {
    fn from(err: GoalTransitionError) -> Self {
        AppError::Conflict(err.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    retryable: bool,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let retryable = self.is_retryable();
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", Some(msg.clone()))
            }
            AppError::GoalsNotSet => (
                StatusCode::CONFLICT,
                "goals_not_set",
                Some(Self::GOALS_NOT_SET_MESSAGE.to_string()),
            ),
            AppError::DataNotReady(msg) => {
                tracing::warn!(reason = %msg, "Data not ready");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "data_not_ready",
                    Some(Self::DATA_NOT_READY_MESSAGE.to_string()),
                )
            }
            AppError::StoreUnavailable(msg) => {
                tracing::warn!(reason = %msg, "Store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "store_unavailable",
                    Some(Self::DATA_NOT_READY_MESSAGE.to_string()),
                )
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", Some(msg.clone())),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
            retryable,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
