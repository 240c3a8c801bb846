// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nutrition reference model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Macro-nutrient profile of one serving of a food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NutritionEntry {
    /// Canonical (trimmed, lowercase) name
    pub name: String,
    pub calories_per_serving: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fats_grams: f64,
}

/// Macro totals for some number of servings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Macros {
    pub calories: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fats_grams: f64,
}

impl NutritionEntry {
    /// Macros for `servings` servings of this food.
    pub fn scaled(&self, servings: f64) -> Macros {
        Macros {
            calories: self.calories_per_serving * servings,
            protein_grams: self.protein_grams * servings,
            carbs_grams: self.carbs_grams * servings,
            fats_grams: self.fats_grams * servings,
        }
    }
}

impl std::ops::Add for Macros {
    type Output = Macros;

    fn add(self, other: Macros) -> Macros {
        Macros {
            calories: self.calories + other.calories,
            protein_grams: self.protein_grams + other.protein_grams,
            carbs_grams: self.carbs_grams + other.carbs_grams,
            fats_grams: self.fats_grams + other.fats_grams,
        }
    }
}

impl std::iter::Sum for Macros {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Macros::default(), |acc, m| acc + m)
    }
}
