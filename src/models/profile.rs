// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User goal profile (goal wizard output).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryGoal {
    LoseWeight,
    GainMuscle,
    BuildStrength,
    ImproveEndurance,
    MaintainFitness,
    GainWeight,
}

impl PrimaryGoal {
    /// Short phrase for suggestion rationales.
    pub const fn describe(self) -> &'static str {
        match self {
            PrimaryGoal::LoseWeight => "lose weight",
            PrimaryGoal::GainMuscle => "gain muscle",
            PrimaryGoal::BuildStrength => "build strength",
            PrimaryGoal::ImproveEndurance => "improve endurance",
            PrimaryGoal::MaintainFitness => "maintain fitness",
            PrimaryGoal::GainWeight => "gain weight",
        }
    }
}

/// Body region a workout targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    FullBody,
    UpperBody,
    LowerBody,
    Chest,
    Back,
    Shoulders,
    Arms,
    Legs,
    Core,
}

impl FocusArea {
    /// Regional parent, if any (Chest → UpperBody, Legs → LowerBody).
    pub const fn region(self) -> Option<FocusArea> {
        match self {
            FocusArea::Chest | FocusArea::Back | FocusArea::Shoulders | FocusArea::Arms => {
                Some(FocusArea::UpperBody)
            }
            FocusArea::Legs => Some(FocusArea::LowerBody),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FocusArea::FullBody => "full body",
            FocusArea::UpperBody => "upper body",
            FocusArea::LowerBody => "lower body",
            FocusArea::Chest => "chest",
            FocusArea::Back => "back",
            FocusArea::Shoulders => "shoulders",
            FocusArea::Arms => "arms",
            FocusArea::Legs => "legs",
            FocusArea::Core => "core",
        }
    }

    /// Whether a workout tagged `self` serves someone who asked for `wanted`.
    ///
    /// FullBody on either side matches everything; a region matches its parts
    /// and vice versa.
    pub fn matches(self, wanted: FocusArea) -> bool {
        self == wanted
            || self == FocusArea::FullBody
            || wanted == FocusArea::FullBody
            || self.region() == Some(wanted)
            || wanted.region() == Some(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum TrainingLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Where/how the user prefers to train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Gym,
    Home,
    Cardio,
    Yoga,
    Bodyweight,
}

/// Goal profile stored in Firestore, keyed by user ID.
///
/// Only written through an explicit save; never derived from activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserGoalProfile {
    pub primary_goal: PrimaryGoal,
    #[validate(length(min = 1, message = "select at least one focus area"))]
    pub focus_areas: BTreeSet<FocusArea>,
    pub training_level: TrainingLevel,
    #[validate(length(min = 1, message = "select at least one workout type"))]
    pub workout_types: BTreeSet<WorkoutType>,
    /// Last explicit save (ISO 8601)
    #[serde(default)]
    pub updated_at: String,
}
