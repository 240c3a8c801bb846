// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod calories;
pub mod diet_log;
pub mod matcher;
pub mod progress;
pub mod reference;
pub mod suggest;
pub mod workout_log;

pub use calories::{estimate, CalorieBasis};
pub use progress::{compute_goal_progress, GoalProgress};
pub use reference::{ReferenceError, ReferenceTables};
pub use suggest::{suggest, SuggestError};
