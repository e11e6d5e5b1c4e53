// ABOUTME: Onboarding service: stores the profile and creates the first week
// ABOUTME: Idempotent; re-running onboarding returns the existing plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::catalog::ExerciseCatalog;
use crate::database::{PlanRepo, ProfileRepo, WorkoutRepo};
use crate::errors::AppResult;
use crate::models::{UserProfile, Workout, WorkoutExercise, WorkoutPlan, WorkoutStatus};
use crate::plans::PlanGenerator;

/// A workout with its ordered exercises, for read paths
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutDetail {
    /// The workout row
    pub workout: Workout,
    /// Its exercises, ordered by `order_index`
    pub exercises: Vec<WorkoutExercise>,
}

/// A plan with all its workouts, for read paths
#[derive(Debug, Clone, Serialize)]
pub struct PlanDetail {
    /// The plan row
    pub plan: WorkoutPlan,
    /// Workouts ordered by day of week
    pub workouts: Vec<WorkoutDetail>,
}

/// Onboarding and plan read service
pub struct PlanService {
    profiles: Arc<dyn ProfileRepo>,
    plans: Arc<dyn PlanRepo>,
    workouts: Arc<dyn WorkoutRepo>,
    catalog: Arc<ExerciseCatalog>,
}

impl PlanService {
    /// Create the service over its repositories and the catalog
    #[must_use]
    pub fn new(
        profiles: Arc<dyn ProfileRepo>,
        plans: Arc<dyn PlanRepo>,
        workouts: Arc<dyn WorkoutRepo>,
        catalog: Arc<ExerciseCatalog>,
    ) -> Self {
        Self {
            profiles,
            plans,
            workouts,
            catalog,
        }
    }

    /// Store the profile and generate the user's first training week
    ///
    /// Re-running for a user who already has a plan for that week is a
    /// no-op that returns the existing plan.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::AppError::Validation`] for an invalid
    /// profile and propagates storage failures.
    pub async fn onboard(&self, profile: &UserProfile) -> AppResult<WorkoutPlan> {
        profile.validate()?;

        let generated = PlanGenerator::new(&self.catalog).generate_week(profile)?;
        self.profiles.upsert_profile(profile).await?;

        let plan = WorkoutPlan::new(profile.user_id, profile.current_week);
        if !self.plans.insert_plan_if_absent(&plan).await? {
            // AlreadyExists is success: the week was generated before.
            if let Some(existing) = self
                .plans
                .get_plan(profile.user_id, profile.current_week)
                .await?
            {
                return Ok(existing);
            }
        }

        for day in &generated {
            let workout = Workout {
                id: Uuid::new_v4(),
                plan_id: plan.id,
                day_of_week: day.day_of_week,
                workout_type: day.workout_type.clone(),
                status: WorkoutStatus::Pending,
                completed_at: None,
            };
            let exercises: Vec<WorkoutExercise> = day
                .exercises
                .iter()
                .enumerate()
                .map(|(index, prescription)| WorkoutExercise {
                    id: Uuid::new_v4(),
                    workout_id: workout.id,
                    exercise_slug: prescription.exercise_slug.clone(),
                    order_index: index as u32,
                    sets: prescription.sets,
                    reps_min: prescription.reps_min,
                    reps_max: prescription.reps_max,
                    rest_seconds: prescription.rest_seconds,
                    notes: None,
                })
                .collect();
            self.workouts.insert_workout(&workout).await?;
            self.workouts.insert_exercises(&exercises).await?;
        }

        info!(
            user_id = %profile.user_id,
            week = profile.current_week,
            days = generated.len(),
            "generated first-week plan"
        );
        Ok(plan)
    }

    /// Load a user's plan for a week with all workouts and exercises
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn get_week(
        &self,
        user_id: Uuid,
        week_number: u32,
    ) -> AppResult<Option<PlanDetail>> {
        let Some(plan) = self.plans.get_plan(user_id, week_number).await? else {
            return Ok(None);
        };
        let mut workouts = Vec::new();
        for workout in self.workouts.workouts_for_plan(plan.id).await? {
            let exercises = self.workouts.exercises_for_workout(workout.id).await?;
            workouts.push(WorkoutDetail { workout, exercises });
        }
        Ok(Some(PlanDetail { plan, workouts }))
    }
}
