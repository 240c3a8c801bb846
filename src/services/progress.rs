// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal progress and status transitions.

use crate::models::goal::{Goal, GoalStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Progress snapshot for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalProgress {
    pub percent: f64,
    /// Signed; negative means overdue
    pub days_remaining: i64,
    /// Never below 0
    pub display_days_remaining: i64,
    pub is_overdue: bool,
    pub status: GoalStatus,
}

/// Invalid goal status change.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GoalTransitionError {
    #[error("Goal is already {0:?}")]
    AlreadyTerminal(GoalStatus),
}

/// Percent of target reached, in [0, 100]. A zero target is 0%.
pub fn progress_percent(goal: &Goal) -> f64 {
    if goal.target_value.is_nan() || goal.target_value <= 0.0 || !goal.current_value.is_finite() {
        return 0.0;
    }
    (goal.current_value / goal.target_value * 100.0).clamp(0.0, 100.0)
}

/// Whole days until `target_date`, rounded up. Negative when overdue.
pub fn days_remaining(target_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = target_date.signed_duration_since(now).num_milliseconds();
    millis.div_euclid(MILLIS_PER_DAY) + i64::from(millis.rem_euclid(MILLIS_PER_DAY) != 0)
}

/// Days remaining for display: clamped at 0.
pub fn display_days_remaining(target_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    days_remaining(target_date, now).max(0)
}

/// Complete an active goal whose target has been reached.
///
/// Returns whether the status changed. Completed and cancelled goals are
/// never touched.
pub fn recompute_status(goal: &mut Goal) -> bool {
    if goal.status == GoalStatus::Active && goal.current_value >= goal.target_value {
        goal.status = GoalStatus::Completed;
        return true;
    }
    false
}

/// Cancel an active goal (explicit user action).
pub fn cancel(goal: &mut Goal) -> Result<(), GoalTransitionError> {
    if goal.status.is_terminal() {
        return Err(GoalTransitionError::AlreadyTerminal(goal.status));
    }
    goal.status = GoalStatus::Cancelled;
    Ok(())
}

/// Record a new current value and apply any automatic transition.
///
/// Returns whether the status changed.
pub fn update_current_value(goal: &mut Goal, current_value: f64) -> bool {
    goal.current_value = current_value;
    recompute_status(goal)
}

pub fn compute_goal_progress(goal: &Goal, now: DateTime<Utc>) -> GoalProgress {
    let days = days_remaining(goal.target_date, now);
    GoalProgress {
        percent: progress_percent(goal),
        days_remaining: days,
        display_days_remaining: days.max(0),
        is_overdue: goal.status == GoalStatus::Active && days < 0,
        status: goal.status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap()
    }

    fn goal(current: f64, target: f64, status: GoalStatus) -> Goal {
        Goal {
            id: "g1".to_string(),
            user_id: "u1".to_string(),
            title: "Run 50 km".to_string(),
            target_value: target,
            current_value: current,
            unit: "km".to_string(),
            target_date: now() + Duration::days(10),
            status,
            created_at: "2024-06-01T00:00:00Z".to_string(),
            updated_at: "2024-06-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(&goal(25.0, 50.0, GoalStatus::Active)), 50.0);
        assert_eq!(progress_percent(&goal(75.0, 50.0, GoalStatus::Active)), 100.0);
        assert_eq!(progress_percent(&goal(10.0, 0.0, GoalStatus::Active)), 0.0);
        assert_eq!(progress_percent(&goal(-5.0, 50.0, GoalStatus::Active)), 0.0);
    }

    #[test]
    fn test_progress_monotonic_and_bounded() {
        let mut last = 0.0;
        for i in 0..200 {
            let p = progress_percent(&goal(i as f64 * 0.75, 60.0, GoalStatus::Active));
            assert!((0.0..=100.0).contains(&p));
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn test_reaching_target_completes() {
        let mut g = goal(50.0, 50.0, GoalStatus::Active);
        assert_eq!(progress_percent(&g), 100.0);
        assert!(recompute_status(&mut g));
        assert_eq!(g.status, GoalStatus::Completed);
    }

    #[test]
    fn test_completed_never_reverts() {
        let mut g = goal(50.0, 50.0, GoalStatus::Completed);
        assert!(!update_current_value(&mut g, 10.0));
        assert_eq!(g.status, GoalStatus::Completed);
    }

    #[test]
    fn test_cancelled_is_terminal() {
        let mut g = goal(10.0, 50.0, GoalStatus::Active);
        cancel(&mut g).unwrap();
        assert_eq!(g.status, GoalStatus::Cancelled);

        assert!(!update_current_value(&mut g, 100.0));
        assert_eq!(g.status, GoalStatus::Cancelled);
        assert_eq!(
            cancel(&mut g),
            Err(GoalTransitionError::AlreadyTerminal(GoalStatus::Cancelled))
        );
    }

    #[test]
    fn test_cannot_cancel_completed() {
        let mut g = goal(50.0, 50.0, GoalStatus::Completed);
        assert!(cancel(&mut g).is_err());
        assert_eq!(g.status, GoalStatus::Completed);
    }

    #[test]
    fn test_days_remaining_overdue() {
        let target = now() - Duration::days(3);
        assert_eq!(days_remaining(target, now()), -3);
        assert_eq!(display_days_remaining(target, now()), 0);
    }

    #[test]
    fn test_days_remaining_rounds_up() {
        assert_eq!(days_remaining(now() + Duration::hours(1), now()), 1);
        assert_eq!(days_remaining(now() + Duration::hours(36), now()), 2);
        // Sub-second remainders still count as a partial day
        assert_eq!(days_remaining(now() + Duration::milliseconds(500), now()), 1);
        assert_eq!(days_remaining(now() - Duration::milliseconds(500), now()), 0);
        assert_eq!(days_remaining(now(), now()), 0);
        // 1.5 days late: ceil(-1.5) = -1
        assert_eq!(days_remaining(now() - Duration::hours(36), now()), -1);
    }

    #[test]
    fn test_compute_goal_progress() {
        let mut g = goal(20.0, 50.0, GoalStatus::Active);
        g.target_date = now() - Duration::days(3);

        let p = compute_goal_progress(&g, now());
        assert_eq!(p.percent, 40.0);
        assert_eq!(p.days_remaining, -3);
        assert_eq!(p.display_days_remaining, 0);
        assert!(p.is_overdue);

        g.status = GoalStatus::Completed;
        assert!(!compute_goal_progress(&g, now()).is_overdue);
    }
}
