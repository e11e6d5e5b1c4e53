// ABOUTME: Workout completion transitions and feedback intake validation
// ABOUTME: Emits completion events the gamification collaborator consumes
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::database::{FeedbackRepo, WorkoutRepo};
use crate::errors::{AppError, AppResult};
use crate::models::{FeedbackInput, WorkoutFeedback, WorkoutStatus};

/// Emitted when a workout transitions to completed
///
/// The caller forwards this to the gamification side-channel (streaks,
/// achievements); the adjustment core never sees it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CompletionEvent {
    /// The completed workout
    pub workout_id: Uuid,
    /// When the workout completed
    pub completed_at: DateTime<Utc>,
    /// True when the workout was already completed and nothing changed
    pub already_completed: bool,
}

/// Completion and feedback service
pub struct FeedbackService {
    workouts: Arc<dyn WorkoutRepo>,
    feedback: Arc<dyn FeedbackRepo>,
}

impl FeedbackService {
    /// Create the service over its repositories
    #[must_use]
    pub fn new(workouts: Arc<dyn WorkoutRepo>, feedback: Arc<dyn FeedbackRepo>) -> Self {
        Self { workouts, feedback }
    }

    /// Mark a workout completed; `completed_at` is written exactly once
    ///
    /// A second completion call is a no-op reporting `already_completed`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown workout and propagates
    /// storage failures.
    pub async fn complete_workout(
        &self,
        workout_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<CompletionEvent> {
        let workout = self
            .workouts
            .get_workout(workout_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("workout {workout_id}")))?;

        if workout.status == WorkoutStatus::Completed {
            return Ok(CompletionEvent {
                workout_id,
                completed_at: workout.completed_at.unwrap_or(now),
                already_completed: true,
            });
        }

        self.workouts.complete_workout(workout_id, now).await?;
        debug!(%workout_id, "workout completed");
        Ok(CompletionEvent {
            workout_id,
            completed_at: now,
            already_completed: false,
        })
    }

    /// Validate and store feedback for a completed workout
    ///
    /// Later submissions for the same workout update the row in place.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown workout,
    /// [`AppError::Validation`] when the workout is not completed or the
    /// input fails validation, and propagates storage failures.
    pub async fn submit_feedback(
        &self,
        input: FeedbackInput,
        now: DateTime<Utc>,
    ) -> AppResult<WorkoutFeedback> {
        let workout = self
            .workouts
            .get_workout(input.workout_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("workout {}", input.workout_id)))?;
        if workout.status != WorkoutStatus::Completed {
            return Err(AppError::validation(
                "feedback can only be attached to a completed workout",
            ));
        }

        let feedback = input.into_feedback(now)?;
        self.feedback.upsert_feedback(&feedback).await?;
        Ok(feedback)
    }
}
