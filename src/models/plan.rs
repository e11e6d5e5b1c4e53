// ABOUTME: Weekly plan, workout, and workout-exercise entities
// ABOUTME: Includes the set-clamping rule applied after every adjustment
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Lower bound on per-exercise sets after any adjustment
pub const SET_FLOOR: u32 = 2;

/// Upper bound on per-exercise sets after any adjustment
pub const SET_CEILING: u32 = 6;

/// Lifecycle status of a weekly plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// The week currently being trained
    Active,
    /// A fully processed past week
    Completed,
}

impl PlanStatus {
    /// Stable string form used for storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for PlanStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(AppError::validation(format!("unknown plan status: {other}"))),
        }
    }
}

/// Lifecycle status of a single workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    /// Scheduled but not yet trained
    Pending,
    /// Finished; `completed_at` is set exactly once on this transition
    Completed,
    /// Explicitly skipped by the user
    Skipped,
}

impl WorkoutStatus {
    /// Stable string form used for storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Skipped => "skipped",
        }
    }
}

impl FromStr for WorkoutStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "skipped" => Ok(Self::Skipped),
            other => Err(AppError::validation(format!(
                "unknown workout status: {other}"
            ))),
        }
    }
}

/// One user's plan for one training week
///
/// `week_number` is unique per user and monotonically increasing; once a week
/// exists it is never regenerated, which is what makes the weekly adjustment
/// idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Plan identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Training week this plan covers, starting at 1
    pub week_number: u32,
    /// Plan lifecycle status
    pub status: PlanStatus,
    /// Cumulative intensity multiplier, starting at 1.00
    pub difficulty_multiplier: f64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl WorkoutPlan {
    /// Create a fresh active plan for a user/week
    #[must_use]
    pub fn new(user_id: Uuid, week_number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            week_number,
            status: PlanStatus::Active,
            difficulty_multiplier: 1.0,
            created_at: Utc::now(),
        }
    }
}

/// A single scheduled workout inside a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Workout identifier
    pub id: Uuid,
    /// Owning plan
    pub plan_id: Uuid,
    /// Day of week 1-7, unique within a plan
    pub day_of_week: u8,
    /// Derived label: the day's muscle groups joined with "/"
    pub workout_type: String,
    /// Workout lifecycle status
    pub status: WorkoutStatus,
    /// Set exactly once, on the transition to `Completed`
    pub completed_at: Option<DateTime<Utc>>,
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} ({})", self.day_of_week, self.workout_type)
    }
}

/// One prescribed exercise within a workout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExercise {
    /// Row identifier
    pub id: Uuid,
    /// Owning workout
    pub workout_id: Uuid,
    /// Catalog exercise slug
    pub exercise_slug: String,
    /// Display/execution order, unique within the workout
    pub order_index: u32,
    /// Working sets, always within `[SET_FLOOR, SET_CEILING]`
    pub sets: u32,
    /// Lower bound of the target rep range
    pub reps_min: u32,
    /// Upper bound of the target rep range
    pub reps_max: u32,
    /// Rest between sets, in seconds
    pub rest_seconds: u32,
    /// Coaching note shown to the user
    pub notes: Option<String>,
}

/// Scale a set count by a factor, rounding and clamping to `[2, 6]`
#[must_use]
pub fn scale_sets(sets: u32, factor: f64) -> u32 {
    let scaled = (f64::from(sets) * factor).round() as i64;
    scaled.clamp(i64::from(SET_FLOOR), i64::from(SET_CEILING)) as u32
}

/// Shift a set count by a signed delta, clamping to `[2, 6]`
#[must_use]
pub fn shift_sets(sets: u32, delta: i32) -> u32 {
    (i64::from(sets) + i64::from(delta)).clamp(i64::from(SET_FLOOR), i64::from(SET_CEILING)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_sets_stay_within_bounds() {
        // Property from the adjustment contract: any sets in [1, 10] scaled
        // by any factor in [0.5, 1.5] lands in [2, 6].
        for sets in 1..=10 {
            for step in 0..=10 {
                let factor = 0.5 + f64::from(step) * 0.1;
                let scaled = scale_sets(sets, factor);
                assert!((SET_FLOOR..=SET_CEILING).contains(&scaled));
            }
        }
    }

    #[test]
    fn scaling_rounds_to_nearest() {
        assert_eq!(scale_sets(3, 1.1), 3); // 3.3 -> 3
        assert_eq!(scale_sets(3, 1.2), 4); // 3.6 -> 4
        assert_eq!(scale_sets(4, 0.9), 4); // 3.6 -> 4
        assert_eq!(scale_sets(6, 1.1), 6); // 6.6 clamps to 6
        assert_eq!(scale_sets(2, 0.5), 2); // 1.0 clamps to 2
    }

    #[test]
    fn shifted_sets_stay_within_bounds() {
        assert_eq!(shift_sets(5, 2), 6);
        assert_eq!(shift_sets(3, -2), 2);
        assert_eq!(shift_sets(4, 1), 5);
        assert_eq!(shift_sets(2, -1), 2);
    }
}
