// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Goal profiles and goals (keyed by user)
//! - Logged workouts and diet entries
//! - The workout catalog read by the suggestion engine
//! - Community challenges
//!
//! Every call is bounded by the configured store timeout (catalog seeding
//! bounds each document write). A timeout or a network failure surfaces as
//! [`AppError::StoreUnavailable`], which clients may retry.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{
    CatalogWorkout, Challenge, DietEntry, Goal, LoggedWorkout, UserGoalProfile,
};
use chrono::{DateTime, Utc};
use firestore::errors::FirestoreError;
use futures_util::{stream, StreamExt};
use std::future::Future;
use std::time::Duration;

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Inclusive-exclusive date window for log queries. Open ends are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| *date >= from) && self.to.is_none_or(|to| *date < to)
    }
}

/// Map a Firestore failure to an API error.
///
/// Network failures and errors Firestore marks as retryable become
/// [`AppError::StoreUnavailable`]; anything else is a plain database error.
fn store_error(err: FirestoreError) -> AppError {
    let transient = match &err {
        FirestoreError::NetworkError(_) => true,
        FirestoreError::DatabaseError(db_err) => {
            db_err.retry_possible || db_err.public.code == "DeadlineExceeded"
        }
        _ => false,
    };

    if transient {
        tracing::warn!(error = %err, "Transient Firestore error");
        AppError::StoreUnavailable(err.to_string())
    } else {
        AppError::Database(err.to_string())
    }
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
    timeout: Duration,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str, timeout: Duration) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id, timeout).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
            timeout,
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str, timeout: Duration) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
            timeout,
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            client: None,
            timeout: Duration::from_secs(crate::config::DEFAULT_STORE_TIMEOUT_SECS),
        }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Run a store call under the configured timeout.
    async fn timed<T, F>(&self, op: &'static str, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    op,
                    timeout_secs = self.timeout.as_secs(),
                    "Firestore call timed out"
                );
                Err(AppError::StoreUnavailable(format!("{} timed out", op)))
            }
        }
    }

    // ─── Goal Profile Operations ─────────────────────────────────

    /// Get a user's goal profile, if one was ever saved.
    pub async fn get_goal_profile(&self, user_id: &str) -> Result<Option<UserGoalProfile>, AppError> {
        let client = self.get_client()?;
        self.timed("get_goal_profile", async {
            client
                .fluent()
                .select()
                .by_id_in(collections::GOAL_PROFILES)
                .obj()
                .one(user_id)
                .await
                .map_err(store_error)
        })
        .await
    }

    /// Create or replace a user's goal profile.
    pub async fn set_goal_profile(
        &self,
        user_id: &str,
        profile: &UserGoalProfile,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;
        self.timed("set_goal_profile", async {
            let _: () = client
                .fluent()
                .update()
                .in_col(collections::GOAL_PROFILES)
                .document_id(user_id)
                .object(profile)
                .execute()
                .await
                .map_err(store_error)?;
            Ok(())
        })
        .await
    }

    // ─── Goal Operations ─────────────────────────────────────────

    pub async fn get_goal(&self, goal_id: &str) -> Result<Option<Goal>, AppError> {
        let client = self.get_client()?;
        self.timed("get_goal", async {
            client
                .fluent()
                .select()
                .by_id_in(collections::GOALS)
                .obj()
                .one(goal_id)
                .await
                .map_err(store_error)
        })
        .await
    }

    /// All goals owned by a user, newest first.
    pub async fn list_goals(&self, user_id: &str) -> Result<Vec<Goal>, AppError> {
        let client = self.get_client()?;
        let mut goals: Vec<Goal> = self
            .timed("list_goals", async {
                client
                    .fluent()
                    .select()
                    .from(collections::GOALS)
                    .filter(|q| q.for_all([q.field("user_id").eq(user_id)]))
                    .obj()
                    .query()
                    .await
                    .map_err(store_error)
            })
            .await?;

        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(goals)
    }

    pub async fn set_goal(&self, goal: &Goal) -> Result<(), AppError> {
        let client = self.get_client()?;
        self.timed("set_goal", async {
            let _: () = client
                .fluent()
                .update()
                .in_col(collections::GOALS)
                .document_id(&goal.id)
                .object(goal)
                .execute()
                .await
                .map_err(store_error)?;
            Ok(())
        })
        .await
    }

    // ─── Workout Operations ──────────────────────────────────────

    pub async fn get_workout(&self, workout_id: &str) -> Result<Option<LoggedWorkout>, AppError> {
        let client = self.get_client()?;
        self.timed("get_workout", async {
            client
                .fluent()
                .select()
                .by_id_in(collections::WORKOUTS)
                .obj()
                .one(workout_id)
                .await
                .map_err(store_error)
        })
        .await
    }

    /// Workouts for a user within a date range, most recent first.
    ///
    /// The range is applied in memory so the query needs no composite index.
    pub async fn list_workouts(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<Vec<LoggedWorkout>, AppError> {
        let client = self.get_client()?;
        let workouts: Vec<LoggedWorkout> = self
            .timed("list_workouts", async {
                client
                    .fluent()
                    .select()
                    .from(collections::WORKOUTS)
                    .filter(|q| q.for_all([q.field("user_id").eq(user_id)]))
                    .obj()
                    .query()
                    .await
                    .map_err(store_error)
            })
            .await?;

        let mut workouts: Vec<LoggedWorkout> = workouts
            .into_iter()
            .filter(|w| range.contains(&w.date))
            .collect();
        workouts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        Ok(workouts)
    }

    /// Create or replace a workout.
    pub async fn set_workout(&self, workout: &LoggedWorkout) -> Result<(), AppError> {
        let client = self.get_client()?;
        self.timed("set_workout", async {
            let _: () = client
                .fluent()
                .update()
                .in_col(collections::WORKOUTS)
                .document_id(&workout.id)
                .object(workout)
                .execute()
                .await
                .map_err(store_error)?;
            Ok(())
        })
        .await
    }

    pub async fn delete_workout(&self, workout_id: &str) -> Result<(), AppError> {
        let client = self.get_client()?;
        self.timed("delete_workout", async {
            client
                .fluent()
                .delete()
                .from(collections::WORKOUTS)
                .document_id(workout_id)
                .execute()
                .await
                .map_err(store_error)
        })
        .await
    }

    // ─── Diet Operations ─────────────────────────────────────────

    pub async fn get_diet_entry(&self, entry_id: &str) -> Result<Option<DietEntry>, AppError> {
        let client = self.get_client()?;
        self.timed("get_diet_entry", async {
            client
                .fluent()
                .select()
                .by_id_in(collections::DIET_ENTRIES)
                .obj()
                .one(entry_id)
                .await
                .map_err(store_error)
        })
        .await
    }

    /// Diet entries for a user within a date range, most recent first.
    pub async fn list_diet_entries(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<Vec<DietEntry>, AppError> {
        let client = self.get_client()?;
        let entries: Vec<DietEntry> = self
            .timed("list_diet_entries", async {
                client
                    .fluent()
                    .select()
                    .from(collections::DIET_ENTRIES)
                    .filter(|q| q.for_all([q.field("user_id").eq(user_id)]))
                    .obj()
                    .query()
                    .await
                    .map_err(store_error)
            })
            .await?;

        let mut entries: Vec<DietEntry> = entries
            .into_iter()
            .filter(|e| range.contains(&e.date))
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        Ok(entries)
    }

    pub async fn set_diet_entry(&self, entry: &DietEntry) -> Result<(), AppError> {
        let client = self.get_client()?;
        self.timed("set_diet_entry", async {
            let _: () = client
                .fluent()
                .update()
                .in_col(collections::DIET_ENTRIES)
                .document_id(&entry.id)
                .object(entry)
                .execute()
                .await
                .map_err(store_error)?;
            Ok(())
        })
        .await
    }

    pub async fn delete_diet_entry(&self, entry_id: &str) -> Result<(), AppError> {
        let client = self.get_client()?;
        self.timed("delete_diet_entry", async {
            client
                .fluent()
                .delete()
                .from(collections::DIET_ENTRIES)
                .document_id(entry_id)
                .execute()
                .await
                .map_err(store_error)
        })
        .await
    }

    // ─── Catalog Operations ──────────────────────────────────────

    /// The full workout catalog in seeded order. Empty until seeded.
    pub async fn get_catalog(&self) -> Result<Vec<CatalogWorkout>, AppError> {
        let client = self.get_client()?;
        let mut catalog: Vec<CatalogWorkout> = self
            .timed("get_catalog", async {
                client
                    .fluent()
                    .select()
                    .from(collections::WORKOUT_CATALOG)
                    .obj()
                    .query()
                    .await
                    .map_err(store_error)
            })
            .await?;

        catalog.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.id.cmp(&b.id)));
        Ok(catalog)
    }

    pub async fn get_catalog_workout(
        &self,
        workout_id: &str,
    ) -> Result<Option<CatalogWorkout>, AppError> {
        let client = self.get_client()?;
        self.timed("get_catalog_workout", async {
            client
                .fluent()
                .select()
                .by_id_in(collections::WORKOUT_CATALOG)
                .obj()
                .one(workout_id)
                .await
                .map_err(store_error)
        })
        .await
    }

    /// Store catalog workouts.
    ///
    /// Uses concurrent writes with a limit to avoid overloading Firestore.
    /// Returns the number of documents written.
    pub async fn seed_catalog(&self, workouts: &[CatalogWorkout]) -> Result<usize, AppError> {
        let client = self.get_client()?;

        stream::iter(workouts.to_vec())
            .map(|workout| async move {
                self.timed("seed_catalog", async {
                    let _: () = client
                        .fluent()
                        .update()
                        .in_col(collections::WORKOUT_CATALOG)
                        .document_id(&workout.id)
                        .object(&workout)
                        .execute()
                        .await
                        .map_err(store_error)?;
                    Ok(())
                })
                .await
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        tracing::info!(count = workouts.len(), "Workout catalog seeded");
        Ok(workouts.len())
    }

    // ─── Challenge Operations ────────────────────────────────────

    pub async fn get_challenge(&self, challenge_id: &str) -> Result<Option<Challenge>, AppError> {
        let client = self.get_client()?;
        self.timed("get_challenge", async {
            client
                .fluent()
                .select()
                .by_id_in(collections::CHALLENGES)
                .obj()
                .one(challenge_id)
                .await
                .map_err(store_error)
        })
        .await
    }

    pub async fn set_challenge(&self, challenge: &Challenge) -> Result<(), AppError> {
        let client = self.get_client()?;
        self.timed("set_challenge", async {
            let _: () = client
                .fluent()
                .update()
                .in_col(collections::CHALLENGES)
                .document_id(&challenge.id)
                .object(challenge)
                .execute()
                .await
                .map_err(store_error)?;
            Ok(())
        })
        .await
    }
}
