// ABOUTME: Storage abstraction: narrow per-entity repository traits
// ABOUTME: Backed by SQLite in production and an in-memory store in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Database Abstraction
//!
//! The engine only ever sees these four narrow repositories, so the
//! generation and adjustment logic can run against [`sqlite::SqliteDatabase`]
//! in production and [`memory::MemoryDatabase`] in tests without changes.
//!
//! `insert_plan_if_absent` is the load-bearing contract: it must be atomic
//! insert-if-absent so a concurrent duplicate cron trigger cannot create two
//! plans for the same (user, week). The SQLite backend enforces it with a
//! unique index on `(user_id, week_number)`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::{
    PlanStatus, UserProfile, Workout, WorkoutExercise, WorkoutFeedback, WorkoutPlan,
};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryDatabase;
pub use sqlite::SqliteDatabase;

/// Onboarding profile storage
#[async_trait]
pub trait ProfileRepo: Send + Sync {
    /// Insert or replace a user's profile
    async fn upsert_profile(&self, profile: &UserProfile) -> AppResult<()>;

    /// Fetch a user's profile
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>>;

    /// Advance the profile's current training week
    async fn set_current_week(&self, user_id: Uuid, week_number: u32) -> AppResult<()>;
}

/// Weekly plan storage
#[async_trait]
pub trait PlanRepo: Send + Sync {
    /// Insert a plan unless one already exists for (user, week)
    ///
    /// Returns `true` when the plan was inserted, `false` when a plan for
    /// that user/week was already present. Must be atomic.
    async fn insert_plan_if_absent(&self, plan: &WorkoutPlan) -> AppResult<bool>;

    /// Fetch a user's plan for a given week
    async fn get_plan(&self, user_id: Uuid, week_number: u32) -> AppResult<Option<WorkoutPlan>>;

    /// Update a plan's lifecycle status
    async fn set_plan_status(&self, plan_id: Uuid, status: PlanStatus) -> AppResult<()>;

    /// User IDs holding an active plan for the given week, in ascending ID
    /// order so seeded batch runs are reproducible
    async fn users_with_active_plan(&self, week_number: u32) -> AppResult<Vec<Uuid>>;
}

/// Workout and workout-exercise storage
#[async_trait]
pub trait WorkoutRepo: Send + Sync {
    /// Insert a workout
    async fn insert_workout(&self, workout: &Workout) -> AppResult<()>;

    /// Insert a batch of exercises for a workout
    async fn insert_exercises(&self, exercises: &[WorkoutExercise]) -> AppResult<()>;

    /// Fetch a workout by ID
    async fn get_workout(&self, workout_id: Uuid) -> AppResult<Option<Workout>>;

    /// All workouts in a plan, ordered by day of week
    async fn workouts_for_plan(&self, plan_id: Uuid) -> AppResult<Vec<Workout>>;

    /// All exercises in a workout, ordered by order index
    async fn exercises_for_workout(&self, workout_id: Uuid) -> AppResult<Vec<WorkoutExercise>>;

    /// Mark a workout completed at the given time
    ///
    /// Only transitions workouts that are not yet completed; `completed_at`
    /// is written exactly once.
    async fn complete_workout(&self, workout_id: Uuid, completed_at: DateTime<Utc>)
        -> AppResult<()>;

    /// Completion timestamps for a user since a cutoff, newest-last
    async fn completions_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<DateTime<Utc>>>;
}

/// Workout feedback storage
#[async_trait]
pub trait FeedbackRepo: Send + Sync {
    /// Insert or update feedback, keyed by workout ID
    async fn upsert_feedback(&self, feedback: &WorkoutFeedback) -> AppResult<()>;

    /// Fetch feedback for a workout
    async fn get_feedback(&self, workout_id: Uuid) -> AppResult<Option<WorkoutFeedback>>;

    /// All feedback rows attached to the given workouts
    async fn feedback_for_workouts(&self, workout_ids: &[Uuid])
        -> AppResult<Vec<WorkoutFeedback>>;
}
