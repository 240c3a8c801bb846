//! Diet log model.

use crate::models::nutrition::Macros;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// A logged meal (`diet_entries` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DietEntry {
    /// Document ID (ULID)
    pub id: String,
    pub user_id: String,
    pub food_name: String,
    pub meal: MealType,
    pub servings: f64,
    pub calories: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fats_grams: f64,
    pub date: DateTime<Utc>,
    pub created_at: String,
}

impl DietEntry {
    pub fn macros(&self) -> Macros {
        Macros {
            calories: self.calories,
            protein_grams: self.protein_grams,
            carbs_grams: self.carbs_grams,
            fats_grams: self.fats_grams,
        }
    }
}
