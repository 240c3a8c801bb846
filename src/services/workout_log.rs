// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Creating and editing logged workouts.
//!
//! Calories are estimated when a workout is created. After that they only
//! change when the user types a value or explicitly asks for recalculation;
//! edits to name, type or duration leave them alone.

use crate::models::exercise::ExerciseCategory;
use crate::models::suggestion::SuggestedWorkout;
use crate::models::workout::LoggedWorkout;
use crate::services::calories::{self, basis_for};
use crate::services::reference::ReferenceTables;
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Duration as entered: a number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    Minutes(f64),
    Text(String),
}

impl DurationInput {
    /// Minutes, with non-numeric text treated as 0.
    pub fn minutes(&self) -> f64 {
        match self {
            DurationInput::Minutes(m) if m.is_finite() => *m,
            DurationInput::Minutes(_) => 0.0,
            DurationInput::Text(raw) => calories::parse_duration(raw),
        }
    }
}

/// Fields for a new workout.
#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub name: String,
    pub workout_type: ExerciseCategory,
    pub duration: DurationInput,
    /// Explicit calorie value; skips estimation
    pub calories: Option<u32>,
    pub date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
}

/// Partial update of an existing workout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutEdit {
    pub name: Option<String>,
    pub workout_type: Option<ExerciseCategory>,
    pub duration: Option<DurationInput>,
    pub calories: Option<u32>,
    pub date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    /// Re-estimate calories from the edited values
    #[serde(default)]
    pub recalculate: bool,
}

/// Build a new workout, estimating calories unless given.
pub fn create_workout(
    tables: &ReferenceTables,
    user_id: &str,
    input: NewWorkout,
    now: DateTime<Utc>,
) -> LoggedWorkout {
    let duration_minutes = input.duration.minutes().max(0.0);
    let (calories, calories_overridden) = match input.calories {
        Some(explicit) => (explicit, true),
        None => (
            calories::estimate(
                basis_for(tables, &input.name, input.workout_type),
                duration_minutes,
            ),
            false,
        ),
    };

    let timestamp = format_utc_rfc3339(now);
    LoggedWorkout {
        id: ulid::Ulid::new().to_string(),
        user_id: user_id.to_string(),
        name: input.name.trim().to_string(),
        workout_type: input.workout_type,
        duration_minutes,
        calories,
        calories_overridden,
        date: input.date.unwrap_or(now),
        completed: input.completed,
        sets: input.sets,
        reps: input.reps,
        source: None,
        created_at: timestamp.clone(),
        updated_at: timestamp,
    }
}

/// Build a workout from an accepted suggestion.
///
/// Name, type, duration and calorie estimate are carried over unchanged.
pub fn from_suggestion(
    user_id: &str,
    suggestion: &SuggestedWorkout,
    date: Option<DateTime<Utc>>,
    completed: bool,
    now: DateTime<Utc>,
) -> LoggedWorkout {
    let timestamp = format_utc_rfc3339(now);
    LoggedWorkout {
        id: ulid::Ulid::new().to_string(),
        user_id: user_id.to_string(),
        name: suggestion.title.clone(),
        workout_type: suggestion.category,
        duration_minutes: suggestion.duration_minutes,
        calories: suggestion.estimated_calories,
        calories_overridden: false,
        date: date.unwrap_or(now),
        completed,
        sets: None,
        reps: None,
        source: Some(suggestion.source.clone()),
        created_at: timestamp.clone(),
        updated_at: timestamp,
    }
}

/// Apply an edit. Returns `true` if calories were recomputed.
pub fn apply_edit(
    tables: &ReferenceTables,
    workout: &mut LoggedWorkout,
    edit: WorkoutEdit,
    now: DateTime<Utc>,
) -> bool {
    if let Some(name) = edit.name {
        workout.name = name.trim().to_string();
    }
    if let Some(kind) = edit.workout_type {
        workout.workout_type = kind;
    }
    if let Some(duration) = edit.duration {
        workout.duration_minutes = duration.minutes().max(0.0);
    }
    if let Some(date) = edit.date {
        workout.date = date;
    }
    if let Some(completed) = edit.completed {
        workout.completed = completed;
    }
    if edit.sets.is_some() {
        workout.sets = edit.sets;
    }
    if edit.reps.is_some() {
        workout.reps = edit.reps;
    }
    workout.updated_at = format_utc_rfc3339(now);

    match edit.calories {
        Some(explicit) => {
            workout.calories = explicit;
            workout.calories_overridden = true;
            false
        }
        None if edit.recalculate => {
            recalculate(tables, workout, now);
            true
        }
        None => false,
    }
}

/// Re-estimate calories from the workout's current name, type and duration.
///
/// Clears any manual override.
pub fn recalculate(tables: &ReferenceTables, workout: &mut LoggedWorkout, now: DateTime<Utc>) {
    workout.calories = calories::estimate(
        basis_for(tables, &workout.name, workout.workout_type),
        workout.duration_minutes,
    );
    workout.calories_overridden = false;
    workout.updated_at = format_utc_rfc3339(now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::suggestion::WorkoutSource;
    use crate::models::TrainingLevel;
    use chrono::TimeZone;

    fn tables() -> ReferenceTables {
        ReferenceTables::builtin().unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn new_workout(name: &str, kind: ExerciseCategory, duration: DurationInput) -> NewWorkout {
        NewWorkout {
            name: name.to_string(),
            workout_type: kind,
            duration,
            calories: None,
            date: None,
            completed: true,
            sets: None,
            reps: None,
        }
    }

    #[test]
    fn test_duration_input() {
        assert_eq!(DurationInput::Minutes(30.0).minutes(), 30.0);
        assert_eq!(DurationInput::Text("45".to_string()).minutes(), 45.0);
        assert_eq!(DurationInput::Text("soon".to_string()).minutes(), 0.0);

        let parsed: DurationInput = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(parsed.minutes(), 12.5);
        let parsed: DurationInput = serde_json::from_str("20").unwrap();
        assert_eq!(parsed.minutes(), 20.0);
    }

    #[test]
    fn test_create_uses_named_exercise_rate() {
        let w = create_workout(
            &tables(),
            "u1",
            new_workout("Running", ExerciseCategory::Running, DurationInput::Minutes(30.0)),
            now(),
        );
        // running: 330 kcal / 30 min
        assert_eq!(w.calories, 330);
        assert!(!w.calories_overridden);
        assert_eq!(w.date, now());
    }

    #[test]
    fn test_create_falls_back_to_category() {
        let w = create_workout(
            &tables(),
            "u1",
            new_workout("Garage session", ExerciseCategory::Strength, DurationInput::Minutes(40.0)),
            now(),
        );
        assert_eq!(w.calories, 240);
    }

    #[test]
    fn test_create_with_non_numeric_duration() {
        let w = create_workout(
            &tables(),
            "u1",
            new_workout(
                "Running",
                ExerciseCategory::Running,
                DurationInput::Text("a while".to_string()),
            ),
            now(),
        );
        assert_eq!(w.duration_minutes, 0.0);
        assert_eq!(w.calories, 0);
    }

    #[test]
    fn test_explicit_calories_on_create() {
        let mut input = new_workout("Running", ExerciseCategory::Running, DurationInput::Minutes(30.0));
        input.calories = Some(500);
        let w = create_workout(&tables(), "u1", input, now());
        assert_eq!(w.calories, 500);
        assert!(w.calories_overridden);
    }

    #[test]
    fn test_edit_keeps_overridden_calories() {
        let t = tables();
        let mut input = new_workout("Running", ExerciseCategory::Running, DurationInput::Minutes(30.0));
        input.calories = Some(500);
        let mut w = create_workout(&t, "u1", input, now());

        let recomputed = apply_edit(
            &t,
            &mut w,
            WorkoutEdit {
                duration: Some(DurationInput::Minutes(60.0)),
                ..WorkoutEdit::default()
            },
            now(),
        );

        assert!(!recomputed);
        assert_eq!(w.duration_minutes, 60.0);
        assert_eq!(w.calories, 500);
    }

    #[test]
    fn test_edit_does_not_recompute_without_request() {
        let t = tables();
        let mut w = create_workout(
            &t,
            "u1",
            new_workout("Running", ExerciseCategory::Running, DurationInput::Minutes(30.0)),
            now(),
        );

        apply_edit(
            &t,
            &mut w,
            WorkoutEdit {
                duration: Some(DurationInput::Minutes(60.0)),
                ..WorkoutEdit::default()
            },
            now(),
        );
        assert_eq!(w.calories, 330);

        let recomputed = apply_edit(
            &t,
            &mut w,
            WorkoutEdit {
                recalculate: true,
                ..WorkoutEdit::default()
            },
            now(),
        );
        assert!(recomputed);
        assert_eq!(w.calories, 660);
    }

    #[test]
    fn test_explicit_recalculate_clears_override() {
        let t = tables();
        let mut input = new_workout("Running", ExerciseCategory::Running, DurationInput::Minutes(30.0));
        input.calories = Some(999);
        let mut w = create_workout(&t, "u1", input, now());

        recalculate(&t, &mut w, now());
        assert_eq!(w.calories, 330);
        assert!(!w.calories_overridden);
    }

    #[test]
    fn test_from_suggestion_round_trip() {
        let suggestion = SuggestedWorkout {
            source: WorkoutSource::Catalog {
                workout_id: "pull-day".to_string(),
            },
            title: "Pull Day".to_string(),
            category: ExerciseCategory::Strength,
            difficulty: TrainingLevel::Intermediate,
            duration_minutes: 45.0,
            estimated_calories: calories::estimate(
                calories::CalorieBasis::Category(ExerciseCategory::Strength),
                45.0,
            ),
            exercise_count: 5,
            target_muscle_groups: vec![],
            equipment: vec![],
            matched_focus_areas: vec![],
            level_appropriate: true,
            reason: String::new(),
        };

        let w = from_suggestion("u1", &suggestion, None, false, now());
        assert_eq!(w.name, "Pull Day");
        assert_eq!(w.workout_type, ExerciseCategory::Strength);
        assert_eq!(w.duration_minutes, 45.0);
        assert_eq!(w.calories, 270);
        assert!(!w.calories_overridden);
        assert_eq!(w.source, Some(suggestion.source.clone()));
    }
}
