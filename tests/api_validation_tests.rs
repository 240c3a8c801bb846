// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.
//!
//! Validation runs before any store access, so these pass offline.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;

async fn send(
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(common::authed_request(method, uri, &token, body))
        .await
        .unwrap();
    let status = response.status();
    (status, common::json_body(response).await)
}

#[tokio::test]
async fn test_profile_requires_focus_areas() {
    let (status, body) = send(
        "PUT",
        "/api/profile",
        Some(json!({
            "primary_goal": "gain_muscle",
            "focus_areas": [],
            "training_level": "beginner",
            "workout_types": ["gym"]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"].as_str().unwrap().contains("focus area"));
}

#[tokio::test]
async fn test_profile_requires_workout_types() {
    let (status, body) = send(
        "PUT",
        "/api/profile",
        Some(json!({
            "primary_goal": "lose_weight",
            "focus_areas": ["full_body"],
            "training_level": "intermediate",
            "workout_types": []
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_invalid_date_format() {
    let (status, body) = send("GET", "/api/workouts?from=invalid-date", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_inverted_dashboard_range() {
    let (status, _) = send("GET", "/api/dashboard?from=2024-02-01&to=2024-01-01", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_workout_name_too_long() {
    let (status, body) = send(
        "POST",
        "/api/workouts",
        Some(json!({ "name": "a".repeat(101), "duration": 30 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_workout_blank_name() {
    let (status, _) = send(
        "POST",
        "/api/workouts",
        Some(json!({ "name": "   ", "duration": 30 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_workout_negative_duration() {
    let (status, _) = send(
        "POST",
        "/api/workouts",
        Some(json!({ "name": "Running", "duration": -10 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_goal_target_must_be_positive() {
    let (status, body) = send(
        "POST",
        "/api/goals",
        Some(json!({
            "title": "Lose weight",
            "target_value": 0,
            "unit": "kg",
            "target_date": "2030-01-01T00:00:00Z"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_meal_servings_must_be_positive() {
    let (status, _) = send(
        "POST",
        "/api/meals",
        Some(json!({ "food_name": "oatmeal", "meal": "breakfast", "servings": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_food_without_calories() {
    let (status, body) = send(
        "POST",
        "/api/meals",
        Some(json!({ "food_name": "mystery stew", "meal": "dinner" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_str().unwrap().contains("mystery stew"));
}

#[tokio::test]
async fn test_quick_suggestion_rejects_bad_minutes() {
    let (status, _) = send("GET", "/api/suggestions/quick?exercise=running&minutes=-5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_estimate_needs_a_basis() {
    let (status, body) = send("POST", "/api/calories/estimate", Some(json!({ "duration": 30 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}
