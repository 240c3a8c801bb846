// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitness-Tracker API Server
//!
//! Serves the workout log, diet log, goals and suggestion endpoints on top
//! of Firestore and the static nutrition/exercise reference tables.

use fitness_tracker::{
    config::Config, db::FirestoreDb, services::ReferenceTables, AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Fitness-Tracker API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id, config.store_timeout).await?;

    // Load reference tables
    let reference = load_reference_tables(&config)?;
    tracing::info!(
        foods = reference.nutrition().len(),
        exercises = reference.exercises().len(),
        version = %reference.version(),
        "Reference tables loaded"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        reference: Arc::new(reference),
    });

    // Build router
    let app = fitness_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Load tables from `DATA_DIR`, or the compiled-in copy if it is absent.
fn load_reference_tables(config: &Config) -> Result<ReferenceTables, Box<dyn std::error::Error>> {
    if config.data_dir.is_dir() {
        tracing::info!(path = %config.data_dir.display(), "Loading reference tables");
        Ok(ReferenceTables::load_from_dir(&config.data_dir)?)
    } else {
        tracing::warn!(
            path = %config.data_dir.display(),
            "Data directory not found, using built-in reference tables"
        );
        Ok(ReferenceTables::builtin()?)
    }
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fitness_tracker=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
