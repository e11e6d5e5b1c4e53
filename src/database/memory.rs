// ABOUTME: In-memory repository implementation for tests and local tooling
// ABOUTME: HashMap-backed store behind a tokio RwLock, no persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{FeedbackRepo, PlanRepo, ProfileRepo, WorkoutRepo};
use crate::errors::AppResult;
use crate::models::{
    PlanStatus, UserProfile, Workout, WorkoutExercise, WorkoutFeedback, WorkoutPlan, WorkoutStatus,
};

#[derive(Default)]
struct Store {
    profiles: HashMap<Uuid, UserProfile>,
    plans: Vec<WorkoutPlan>,
    workouts: Vec<Workout>,
    exercises: Vec<WorkoutExercise>,
    feedback: HashMap<Uuid, WorkoutFeedback>,
}

/// In-memory database implementing every repository trait
///
/// Substituted for SQLite in tests; clones share the same store.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    inner: Arc<RwLock<Store>>,
}

impl MemoryDatabase {
    /// Create an empty in-memory database
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepo for MemoryDatabase {
    async fn upsert_profile(&self, profile: &UserProfile) -> AppResult<()> {
        let mut store = self.inner.write().await;
        store.profiles.insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let store = self.inner.read().await;
        Ok(store.profiles.get(&user_id).cloned())
    }

    async fn set_current_week(&self, user_id: Uuid, week_number: u32) -> AppResult<()> {
        let mut store = self.inner.write().await;
        if let Some(profile) = store.profiles.get_mut(&user_id) {
            profile.current_week = week_number;
        }
        Ok(())
    }
}

#[async_trait]
impl PlanRepo for MemoryDatabase {
    async fn insert_plan_if_absent(&self, plan: &WorkoutPlan) -> AppResult<bool> {
        let mut store = self.inner.write().await;
        let exists = store
            .plans
            .iter()
            .any(|existing| existing.user_id == plan.user_id && existing.week_number == plan.week_number);
        if exists {
            return Ok(false);
        }
        store.plans.push(plan.clone());
        Ok(true)
    }

    async fn get_plan(&self, user_id: Uuid, week_number: u32) -> AppResult<Option<WorkoutPlan>> {
        let store = self.inner.read().await;
        Ok(store
            .plans
            .iter()
            .find(|plan| plan.user_id == user_id && plan.week_number == week_number)
            .cloned())
    }

    async fn set_plan_status(&self, plan_id: Uuid, status: PlanStatus) -> AppResult<()> {
        let mut store = self.inner.write().await;
        if let Some(plan) = store.plans.iter_mut().find(|plan| plan.id == plan_id) {
            plan.status = status;
        }
        Ok(())
    }

    async fn users_with_active_plan(&self, week_number: u32) -> AppResult<Vec<Uuid>> {
        let store = self.inner.read().await;
        let mut users: Vec<Uuid> = store
            .plans
            .iter()
            .filter(|plan| plan.week_number == week_number && plan.status == PlanStatus::Active)
            .map(|plan| plan.user_id)
            .collect();
        // Stable ordering keeps seeded batch runs reproducible.
        users.sort_unstable();
        Ok(users)
    }
}

#[async_trait]
impl WorkoutRepo for MemoryDatabase {
    async fn insert_workout(&self, workout: &Workout) -> AppResult<()> {
        let mut store = self.inner.write().await;
        store.workouts.push(workout.clone());
        Ok(())
    }

    async fn insert_exercises(&self, exercises: &[WorkoutExercise]) -> AppResult<()> {
        let mut store = self.inner.write().await;
        store.exercises.extend(exercises.iter().cloned());
        Ok(())
    }

    async fn get_workout(&self, workout_id: Uuid) -> AppResult<Option<Workout>> {
        let store = self.inner.read().await;
        Ok(store
            .workouts
            .iter()
            .find(|workout| workout.id == workout_id)
            .cloned())
    }

    async fn workouts_for_plan(&self, plan_id: Uuid) -> AppResult<Vec<Workout>> {
        let store = self.inner.read().await;
        let mut workouts: Vec<Workout> = store
            .workouts
            .iter()
            .filter(|workout| workout.plan_id == plan_id)
            .cloned()
            .collect();
        workouts.sort_by_key(|workout| workout.day_of_week);
        Ok(workouts)
    }

    async fn exercises_for_workout(&self, workout_id: Uuid) -> AppResult<Vec<WorkoutExercise>> {
        let store = self.inner.read().await;
        let mut exercises: Vec<WorkoutExercise> = store
            .exercises
            .iter()
            .filter(|exercise| exercise.workout_id == workout_id)
            .cloned()
            .collect();
        exercises.sort_by_key(|exercise| exercise.order_index);
        Ok(exercises)
    }

    async fn complete_workout(
        &self,
        workout_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut store = self.inner.write().await;
        if let Some(workout) = store
            .workouts
            .iter_mut()
            .find(|workout| workout.id == workout_id && workout.status != WorkoutStatus::Completed)
        {
            workout.status = WorkoutStatus::Completed;
            workout.completed_at = Some(completed_at);
        }
        Ok(())
    }

    async fn completions_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<DateTime<Utc>>> {
        let store = self.inner.read().await;
        let plan_ids: Vec<Uuid> = store
            .plans
            .iter()
            .filter(|plan| plan.user_id == user_id)
            .map(|plan| plan.id)
            .collect();
        let mut completions: Vec<DateTime<Utc>> = store
            .workouts
            .iter()
            .filter(|workout| plan_ids.contains(&workout.plan_id))
            .filter_map(|workout| workout.completed_at)
            .filter(|completed_at| *completed_at >= since)
            .collect();
        completions.sort_unstable();
        Ok(completions)
    }
}

#[async_trait]
impl FeedbackRepo for MemoryDatabase {
    async fn upsert_feedback(&self, feedback: &WorkoutFeedback) -> AppResult<()> {
        let mut store = self.inner.write().await;
        store.feedback.insert(feedback.workout_id, feedback.clone());
        Ok(())
    }

    async fn get_feedback(&self, workout_id: Uuid) -> AppResult<Option<WorkoutFeedback>> {
        let store = self.inner.read().await;
        Ok(store.feedback.get(&workout_id).cloned())
    }

    async fn feedback_for_workouts(
        &self,
        workout_ids: &[Uuid],
    ) -> AppResult<Vec<WorkoutFeedback>> {
        let store = self.inner.read().await;
        Ok(workout_ids
            .iter()
            .filter_map(|workout_id| store.feedback.get(workout_id).cloned())
            .collect())
    }
}
