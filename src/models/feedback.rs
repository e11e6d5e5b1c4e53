// ABOUTME: Workout feedback model, rating enum, and input validation
// ABOUTME: One feedback row per completed workout, upserted idempotently
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Maximum length accepted for feedback notes
pub const MAX_FEEDBACK_NOTES_LEN: usize = 500;

/// Subjective difficulty reported after a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyRating {
    /// The workout felt easy; a load increase is on the table
    Easy,
    /// The workout felt about right
    Ok,
    /// The workout felt hard; a load decrease is on the table
    Hard,
}

impl DifficultyRating {
    /// Stable string form used for storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Ok => "ok",
            Self::Hard => "hard",
        }
    }

    /// Score contribution used by the readiness aggregator
    #[must_use]
    pub const fn score(self) -> f64 {
        match self {
            Self::Easy => 100.0,
            Self::Ok => 50.0,
            Self::Hard => 0.0,
        }
    }
}

impl FromStr for DifficultyRating {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "ok" => Ok(Self::Ok),
            "hard" => Ok(Self::Hard),
            other => Err(AppError::validation(format!(
                "unknown difficulty rating: {other}"
            ))),
        }
    }
}

/// Stored feedback, one-to-one with a completed workout
///
/// Later submissions for the same workout update the row in place; the upsert
/// is keyed by `workout_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutFeedback {
    /// The workout this feedback belongs to (unique key)
    pub workout_id: Uuid,
    /// Subjective difficulty
    pub rating: DifficultyRating,
    /// How long the session took, in minutes
    pub duration_minutes: Option<u32>,
    /// Free-text notes, at most [`MAX_FEEDBACK_NOTES_LEN`] characters
    pub notes: Option<String>,
    /// Last submission time
    pub submitted_at: DateTime<Utc>,
}

/// Raw feedback submission, validated before it reaches the core
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackInput {
    /// Target workout
    pub workout_id: Uuid,
    /// Subjective difficulty
    pub difficulty_rating: DifficultyRating,
    /// Optional session duration in minutes, must be positive when present
    pub duration_minutes: Option<u32>,
    /// Optional free-text notes
    pub notes: Option<String>,
}

impl FeedbackInput {
    /// Validate and convert into a storable [`WorkoutFeedback`]
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when notes exceed
    /// [`MAX_FEEDBACK_NOTES_LEN`] characters or `duration_minutes` is zero.
    pub fn into_feedback(self, now: DateTime<Utc>) -> AppResult<WorkoutFeedback> {
        if let Some(notes) = &self.notes {
            if notes.chars().count() > MAX_FEEDBACK_NOTES_LEN {
                return Err(AppError::validation(format!(
                    "notes must be at most {MAX_FEEDBACK_NOTES_LEN} characters"
                )));
            }
        }
        if self.duration_minutes == Some(0) {
            return Err(AppError::validation(
                "duration_minutes must be a positive integer",
            ));
        }
        Ok(WorkoutFeedback {
            workout_id: self.workout_id,
            rating: self.difficulty_rating,
            duration_minutes: self.duration_minutes,
            notes: self.notes,
            submitted_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(notes: Option<String>, duration: Option<u32>) -> FeedbackInput {
        FeedbackInput {
            workout_id: Uuid::new_v4(),
            difficulty_rating: DifficultyRating::Ok,
            duration_minutes: duration,
            notes,
        }
    }

    #[test]
    fn overlong_notes_are_rejected() {
        let notes = "x".repeat(MAX_FEEDBACK_NOTES_LEN + 1);
        assert!(input(Some(notes), None).into_feedback(Utc::now()).is_err());

        let notes = "x".repeat(MAX_FEEDBACK_NOTES_LEN);
        assert!(input(Some(notes), None).into_feedback(Utc::now()).is_ok());
    }

    #[test]
    fn zero_duration_is_rejected() {
        assert!(input(None, Some(0)).into_feedback(Utc::now()).is_err());
        assert!(input(None, Some(45)).into_feedback(Utc::now()).is_ok());
    }

    #[test]
    fn rating_scores_match_aggregator_contract() {
        assert!((DifficultyRating::Easy.score() - 100.0).abs() < f64::EPSILON);
        assert!((DifficultyRating::Ok.score() - 50.0).abs() < f64::EPSILON);
        assert!(DifficultyRating::Hard.score().abs() < f64::EPSILON);
    }
}
