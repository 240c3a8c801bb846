// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use fitness_tracker::config::Config;
use fitness_tracker::db::FirestoreDb;
use fitness_tracker::middleware::auth::create_jwt;
use fitness_tracker::routes::create_router;
use fitness_tracker::services::ReferenceTables;
use fitness_tracker::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    let config = Config::test_default();
    FirestoreDb::new(&config.gcp_project_id, config.store_timeout)
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

fn build_app(db: FirestoreDb) -> (axum::Router, Arc<AppState>) {
    let reference = ReferenceTables::builtin().expect("Built-in reference tables should load");

    let state = Arc::new(AppState {
        config: Config::test_default(),
        db,
        reference: Arc::new(reference),
    });

    (create_router(state.clone()), state)
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    build_app(test_db_offline())
}

/// Create a test app backed by the Firestore emulator.
#[allow(dead_code)]
pub async fn create_emulator_app() -> (axum::Router, Arc<AppState>) {
    build_app(test_db().await)
}

/// Create a session token for `user_id` signed with `signing_key`.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    create_jwt(user_id, signing_key).expect("Failed to create JWT")
}

/// Unique user ID for test isolation.
#[allow(dead_code)]
pub fn unique_user_id() -> String {
    format!("test-user-{}", ulid::Ulid::new())
}

/// Build an authenticated request, with an optional JSON body.
#[allow(dead_code)]
pub fn authed_request(
    method: &str,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body should be JSON")
}

/// Parse an RFC3339 timestamp, panicking on bad input.
#[allow(dead_code)]
pub fn parse_time(raw: &str) -> chrono::DateTime<chrono::Utc> {
    fitness_tracker::time_utils::parse_utc_rfc3339(raw).expect("valid RFC3339 timestamp")
}
