// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use fitness_tracker::error::AppError;
use fitness_tracker::services::SuggestError;

mod common;

async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    (status, common::json_body(response).await)
}

#[tokio::test]
async fn test_goals_not_set_response() {
    let (status, body) = render(AppError::GoalsNotSet).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "goals_not_set");
    assert_eq!(body["details"], AppError::GOALS_NOT_SET_MESSAGE);
    assert!(body.get("retryable").is_none());
}

#[tokio::test]
async fn test_empty_catalog_is_data_not_ready() {
    let (status, body) = render(SuggestError::EmptyCatalog.into()).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "data_not_ready");
    assert_eq!(body["retryable"], true);
}

#[tokio::test]
async fn test_store_timeout_is_retryable() {
    let (status, body) = render(AppError::StoreUnavailable("get_catalog timed out".into())).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "store_unavailable");
    assert_eq!(
        body["details"],
        "Workout service may need initialization. Please try again shortly."
    );
    assert_eq!(body["retryable"], true);
}

#[tokio::test]
async fn test_database_errors_hide_details() {
    let (status, body) = render(AppError::Database("connection reset".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "database_error");
    assert!(body.get("details").is_none());
}

#[test]
fn test_user_facing_messages_are_distinct() {
    assert_ne!(AppError::GOALS_NOT_SET_MESSAGE, AppError::DATA_NOT_READY_MESSAGE);
    assert!(!AppError::Conflict("x".into()).is_retryable());
    assert!(AppError::DataNotReady("x".into()).is_retryable());
}
