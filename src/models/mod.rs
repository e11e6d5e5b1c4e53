// ABOUTME: Core domain models for the repkit training plan engine
// ABOUTME: Re-exports profiles, exercises, plans, workouts, and feedback types
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Data Models
//!
//! Storage-agnostic entities shared by the generator, aggregator, and
//! mutator. All models derive `Serialize`/`Deserialize` so the thin calling
//! layers can pass them through unchanged.
//!
//! ## Invariants
//!
//! - A plan's `week_number` is unique per user and never reused.
//! - `WorkoutExercise::sets` is always clamped to `[2, 6]` after adjustment.
//! - Feedback attaches only to workouts whose status is `Completed`.
//! - An exercise swap always preserves at least one shared muscle group.

mod exercise;
mod feedback;
mod plan;
mod profile;

pub use exercise::{Difficulty, Exercise, MuscleGroup};
pub use feedback::{DifficultyRating, FeedbackInput, WorkoutFeedback, MAX_FEEDBACK_NOTES_LEN};
pub use plan::{
    scale_sets, shift_sets, PlanStatus, Workout, WorkoutExercise, WorkoutPlan, WorkoutStatus,
    SET_CEILING, SET_FLOOR,
};
pub use profile::{ExperienceLevel, Goal, Location, UserProfile};
