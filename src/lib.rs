// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitness-Tracker: calorie estimation and workout suggestions
//!
//! This crate provides the backend API for logging workouts and meals,
//! estimating calories from reference tables, and suggesting workouts
//! that fit a user's saved goal profile.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::ReferenceTables;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    /// Nutrition and exercise tables, read-only after startup
    pub reference: Arc<ReferenceTables>,
}
