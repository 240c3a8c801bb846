// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Populate the `workout_catalog` collection.
//!
//! Usage: `seed-catalog [path/to/workout_catalog.json]`
//! Defaults to `$DATA_DIR/workout_catalog.json`.

use fitness_tracker::{config::Config, db::FirestoreDb, models::CatalogWorkout};
use std::collections::HashSet;
use std::path::PathBuf;

const CATALOG_FILE: &str = "workout_catalog.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data_dir.join(CATALOG_FILE));

    tracing::info!(path = %path.display(), "Loading workout catalog");
    let raw = std::fs::read_to_string(&path)?;
    let catalog: Vec<CatalogWorkout> = serde_json::from_str(&raw)?;

    let mut seen = HashSet::new();
    if let Some(dup) = catalog.iter().find(|w| !seen.insert(w.id.as_str())) {
        anyhow::bail!("duplicate catalog id '{}'", dup.id);
    }
    if catalog.is_empty() {
        anyhow::bail!("{} contains no workouts", path.display());
    }

    let db = FirestoreDb::new(&config.gcp_project_id, config.store_timeout).await?;
    let written = db.seed_catalog(&catalog).await?;

    tracing::info!(count = written, project = %config.gcp_project_id, "Seeding complete");
    Ok(())
}
