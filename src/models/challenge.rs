// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Community challenge model and milestone generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of milestones a challenge is split into (before rounding).
const MILESTONE_DIVISIONS: u32 = 6;

/// Community challenge (`challenges` collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    /// Document ID
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub target_value: u32,
    pub unit: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Progress per participant (user ID → value)
    #[serde(default)]
    pub participants: HashMap<String, u32>,
}

/// Milestone values for a target.
///
/// One step size for every target: `max(1, ceil(target / 6))`. The last
/// milestone is always the target itself.
pub fn milestones(target: u32) -> Vec<u32> {
    if target == 0 {
        return Vec::new();
    }

    let step = target.div_ceil(MILESTONE_DIVISIONS).max(1);
    let mut values: Vec<u32> = (1..)
        .map_while(|i: u32| i.checked_mul(step))
        .take_while(|v| *v < target)
        .collect();
    values.push(target);
    values
}

/// Milestones already reached by `progress`.
pub fn reached_milestones(target: u32, progress: u32) -> Vec<u32> {
    milestones(target)
        .into_iter()
        .filter(|m| *m <= progress)
        .collect()
}
