//! Dashboard statistics aggregated from logged workouts and meals.
//!
//! Computed on demand from the entries in the requested date range; nothing
//! here is persisted.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::nutrition::Macros;
use crate::models::{DietEntry, LoggedWorkout};

/// Aggregated statistics for one user and date range.
#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardStats {
    // ─── Workout Stats ───────────────────────────────────────────
    /// Workouts logged in range
    pub total_workouts: u32,
    /// Workouts marked completed
    pub completed_workouts: u32,
    pub total_minutes: f64,
    pub calories_burned: u64,

    // ─── By Type ─────────────────────────────────────────────────
    /// Workout count per type (for pie charts)
    pub workouts_by_type: HashMap<String, u32>,
    /// Calories burned per type
    pub calories_by_type: HashMap<String, u64>,

    // ─── Nutrition ───────────────────────────────────────────────
    pub meals_logged: u32,
    pub consumed: Macros,

    // ─── Time Series ─────────────────────────────────────────────
    /// Calories burned per day ("YYYY-MM-DD")
    pub burned_by_day: BTreeMap<String, u64>,
    /// Calories consumed per day ("YYYY-MM-DD")
    pub consumed_by_day: BTreeMap<String, f64>,
}

impl DashboardStats {
    /// Build stats from a set of workouts and meals.
    pub fn from_entries(workouts: &[LoggedWorkout], meals: &[DietEntry]) -> Self {
        let mut stats = Self::default();
        for workout in workouts {
            stats.add_workout(workout);
        }
        for meal in meals {
            stats.add_meal(meal);
        }
        stats
    }

    /// Add a workout.
    pub fn add_workout(&mut self, workout: &LoggedWorkout) {
        self.total_workouts += 1;
        if workout.completed {
            self.completed_workouts += 1;
        }
        self.total_minutes += workout.duration_minutes.max(0.0);
        self.calories_burned += u64::from(workout.calories);

        let type_key = workout.workout_type.as_str().to_string();
        *self.workouts_by_type.entry(type_key.clone()).or_insert(0) += 1;
        *self.calories_by_type.entry(type_key).or_insert(0) += u64::from(workout.calories);

        *self.burned_by_day.entry(day_key(&workout.date)).or_insert(0) +=
            u64::from(workout.calories);
    }

    /// Add a meal.
    pub fn add_meal(&mut self, meal: &DietEntry) {
        self.meals_logged += 1;
        self.consumed = self.consumed + meal.macros();
        *self.consumed_by_day.entry(day_key(&meal.date)).or_insert(0.0) += meal.calories;
    }

    /// Consumed minus burned calories per day, over every day with any entry.
    pub fn net_calories_by_day(&self) -> BTreeMap<String, f64> {
        let mut net: BTreeMap<String, f64> = self.consumed_by_day.clone();
        for (day, burned) in &self.burned_by_day {
            *net.entry(day.clone()).or_insert(0.0) -= *burned as f64;
        }
        net
    }
}

/// Number of consecutive days, ending at `today` (or yesterday when nothing
/// is logged yet today), with at least one completed workout.
pub fn workout_streak(workouts: &[LoggedWorkout], today: chrono::NaiveDate) -> u32 {
    let days: HashSet<chrono::NaiveDate> = workouts
        .iter()
        .filter(|w| w.completed)
        .map(|w| w.date.date_naive())
        .collect();

    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(d) => d,
            None => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        cursor = match cursor.pred_opt() {
            Some(d) => d,
            None => break,
        };
    }
    streak
}

/// Extract "YYYY-MM-DD" from a timestamp.
fn day_key(date: &chrono::DateTime<chrono::Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}
