// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end API flows against the Firestore emulator.

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

struct Client {
    app: axum::Router,
    token: String,
}

impl Client {
    async fn new() -> Self {
        let (app, state) = common::create_emulator_app().await;
        let token = common::create_test_jwt(&common::unique_user_id(), &state.config.jwt_signing_key);
        Self { app, token }
    }

    async fn call(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(common::authed_request(method, uri, &self.token, body))
            .await
            .unwrap();
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return (status, Value::Null);
        }
        (status, common::json_body(response).await)
    }
}

#[tokio::test]
async fn test_suggestions_require_saved_goals() {
    require_emulator!();

    let client = Client::new().await;

    let (status, body) = client.call("GET", "/api/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["goals_set"], false);

    let (status, body) = client.call("GET", "/api/suggestions", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "goals_not_set");
}

#[tokio::test]
async fn test_profile_then_suggestions_then_accept() {
    require_emulator!();

    let client = Client::new().await;

    // The catalog is shared; seed it so this test does not depend on order
    let db = common::test_db().await;
    let raw = std::fs::read_to_string("data/workout_catalog.json").unwrap();
    let catalog: Vec<fitness_tracker::models::CatalogWorkout> = serde_json::from_str(&raw).unwrap();
    db.seed_catalog(&catalog).await.unwrap();

    let (status, _) = client
        .call(
            "PUT",
            "/api/profile",
            Some(json!({
                "primary_goal": "gain_muscle",
                "focus_areas": ["chest"],
                "training_level": "beginner",
                "workout_types": ["gym"]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = client.call("GET", "/api/suggestions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let first = &body["suggestions"][0];
    assert_eq!(first["source"]["workout_id"], "upper-body-dumbbell-basics");

    let (status, logged) = client
        .call(
            "POST",
            "/api/workouts/accept",
            Some(json!({ "source": first["source"].clone(), "completed": true })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(logged["name"], first["title"]);
    assert_eq!(logged["workout_type"], first["category"]);
    assert_eq!(logged["duration_minutes"], first["duration_minutes"]);
    assert_eq!(logged["calories"], first["estimated_calories"]);

    let (_, list) = client.call("GET", "/api/workouts", None).await;
    assert_eq!(list["total"], 1);
}

#[tokio::test]
async fn test_manual_calories_survive_edits() {
    require_emulator!();

    let client = Client::new().await;

    let (status, created) = client
        .call(
            "POST",
            "/api/workouts",
            Some(json!({ "name": "Running", "duration": 30, "calories": 250 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["calories"], 250);
    assert_eq!(created["calories_overridden"], true);
    assert_eq!(created["workout_type"], "running");

    let id = created["id"].as_str().unwrap().to_string();
    let (_, edited) = client
        .call("PUT", &format!("/api/workouts/{}", id), Some(json!({ "duration": 60 })))
        .await;
    assert_eq!(edited["duration_minutes"], 60.0);
    assert_eq!(edited["calories"], 250);

    let (_, recalculated) = client
        .call("POST", &format!("/api/workouts/{}/recalculate", id), None)
        .await;
    assert_eq!(recalculated["calories"], 660);
    assert_eq!(recalculated["calories_overridden"], false);

    let (status, _) = client
        .call("DELETE", &format!("/api/workouts/{}", id), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_goal_lifecycle() {
    require_emulator!();

    let client = Client::new().await;

    let (status, goal) = client
        .call(
            "POST",
            "/api/goals",
            Some(json!({
                "title": "Log 50 workouts",
                "target_value": 50,
                "unit": "workouts",
                "target_date": "2099-01-01T00:00:00Z"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(goal["status"], "active");
    assert_eq!(goal["progress"]["percent"], 0.0);

    let id = goal["id"].as_str().unwrap().to_string();
    let (_, updated) = client
        .call(
            "PUT",
            &format!("/api/goals/{}/progress", id),
            Some(json!({ "current_value": 50 })),
        )
        .await;
    assert_eq!(updated["status"], "completed");
    assert_eq!(updated["progress"]["percent"], 100.0);

    let (status, body) = client
        .call("POST", &format!("/api/goals/{}/cancel", id), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_other_users_documents_are_hidden() {
    require_emulator!();

    let owner = Client::new().await;
    let intruder = Client::new().await;

    let (_, created) = owner
        .call(
            "POST",
            "/api/meals",
            Some(json!({ "food_name": "oatmeal", "meal": "breakfast", "servings": 2 })),
        )
        .await;
    assert_eq!(created["calories"], 300.0);

    let id = created["id"].as_str().unwrap();
    let (status, _) = intruder
        .call("DELETE", &format!("/api/meals/{}", id), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_aggregates() {
    require_emulator!();

    let client = Client::new().await;

    client
        .call(
            "POST",
            "/api/workouts",
            Some(json!({
                "name": "Cycling",
                "duration": 40,
                "date": "2024-04-02T07:00:00Z",
                "completed": true
            })),
        )
        .await;
    client
        .call(
            "POST",
            "/api/meals",
            Some(json!({
                "food_name": "oatmeal",
                "meal": "breakfast",
                "date": "2024-04-02T08:00:00Z"
            })),
        )
        .await;

    let (status, body) = client
        .call("GET", "/api/dashboard?from=2024-04-01&to=2024-04-30", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["total_workouts"], 1);
    assert_eq!(body["stats"]["meals_logged"], 1);
    assert_eq!(body["stats"]["consumed"]["calories"], 150.0);
    assert!(body["net_calories_by_day"]["2024-04-02"].is_number());
}
