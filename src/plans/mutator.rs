// ABOUTME: Weekly plan mutation: idempotent clone, volume adjust, and swaps
// ABOUTME: Applies the decision engine output to create the next week's plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Plan Mutator
//!
//! Advances a user to the next training week:
//!
//! 1. Idempotency check: if the target week already exists, succeed without
//!    touching anything.
//! 2. Clone the source week's workouts, statuses reset to pending.
//! 3. Clone each exercise, deriving sets from the adjustment (scaled or
//!    shifted, always clamped to `[2, 6]`) and replacing notes with a
//!    direction-appropriate coaching string.
//! 4. On every 4th week, swap two random non-first exercises per large
//!    workout for the highest-overlap alternatives (variety).
//! 5. When the decision asks for directional swaps, substitute toward the
//!    next harder or easier difficulty tier.
//!
//! Any replacement lookup that finds no candidate leaves the original
//! exercise untouched. A missing source plan aborts with a typed failure the
//! cron loop reports and retries on its next invocation.

use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::ExerciseCatalog;
use crate::database::{PlanRepo, WorkoutRepo};
use crate::errors::{AppError, AppResult};
use crate::intelligence::{AdjustmentAction, PlanAdjustment, VolumeAdjustment};
use crate::models::{
    scale_sets, shift_sets, Difficulty, Workout, WorkoutExercise, WorkoutPlan, WorkoutStatus,
};

/// Variety swaps run on every week divisible by this interval
pub const VARIETY_INTERVAL_WEEKS: u32 = 4;

/// Workouts with at least this many exercises participate in variety swaps
const VARIETY_MIN_EXERCISES: usize = 4;

/// How many exercises a variety pass replaces per workout
const VARIETY_SWAP_COUNT: usize = 2;

/// Result of a week advance, structured for the calling layer
#[derive(Debug, Clone, Serialize)]
pub struct AdvanceOutcome {
    /// Whether the target week is in place (created now or already there)
    pub success: bool,
    /// Human-readable account of what happened
    pub message: String,
    /// The week this advance targeted
    pub target_week: u32,
    /// True when this call created the plan, false on the idempotent path
    pub created: bool,
}

/// Applies adjustment decisions to produce next week's plan
pub struct PlanMutator {
    plans: Arc<dyn PlanRepo>,
    workouts: Arc<dyn WorkoutRepo>,
    catalog: Arc<ExerciseCatalog>,
}

impl PlanMutator {
    /// Create a mutator over the given repositories and catalog
    #[must_use]
    pub fn new(
        plans: Arc<dyn PlanRepo>,
        workouts: Arc<dyn WorkoutRepo>,
        catalog: Arc<ExerciseCatalog>,
    ) -> Self {
        Self {
            plans,
            workouts,
            catalog,
        }
    }

    /// Clone `source_week` into `target_week` with the adjustment applied
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the user has no plan for
    /// `source_week`, and propagates storage failures.
    pub async fn advance_week<R: Rng>(
        &self,
        user_id: Uuid,
        source_week: u32,
        target_week: u32,
        adjustment: &PlanAdjustment,
        rng: &mut R,
    ) -> AppResult<AdvanceOutcome> {
        // Idempotency check short-circuits all mutation.
        if self.plans.get_plan(user_id, target_week).await?.is_some() {
            debug!(%user_id, target_week, "plan already exists, skipping");
            return Ok(AdvanceOutcome {
                success: true,
                message: format!("plan for week {target_week} already exists"),
                target_week,
                created: false,
            });
        }

        let source_plan = self
            .plans
            .get_plan(user_id, source_week)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("no plan found for user {user_id} week {source_week}"))
            })?;
        let source_workouts = self.workouts.workouts_for_plan(source_plan.id).await?;
        if source_workouts.is_empty() {
            return Err(AppError::not_found(format!(
                "plan for week {source_week} has no workouts"
            )));
        }

        let mut new_plan = WorkoutPlan::new(user_id, target_week);
        new_plan.difficulty_multiplier =
            source_plan.difficulty_multiplier * adjustment.intensity_multiplier;

        // The unique (user_id, week_number) index is the real correctness
        // guarantee against a concurrent duplicate cron trigger.
        if !self.plans.insert_plan_if_absent(&new_plan).await? {
            return Ok(AdvanceOutcome {
                success: true,
                message: format!("plan for week {target_week} already exists"),
                target_week,
                created: false,
            });
        }

        let note = Self::coaching_note(adjustment.action);
        for source_workout in &source_workouts {
            let new_workout = Workout {
                id: Uuid::new_v4(),
                plan_id: new_plan.id,
                day_of_week: source_workout.day_of_week,
                workout_type: source_workout.workout_type.clone(),
                status: WorkoutStatus::Pending,
                completed_at: None,
            };

            let source_exercises = self
                .workouts
                .exercises_for_workout(source_workout.id)
                .await?;
            let mut new_exercises: Vec<WorkoutExercise> = source_exercises
                .iter()
                .map(|exercise| WorkoutExercise {
                    id: Uuid::new_v4(),
                    workout_id: new_workout.id,
                    exercise_slug: exercise.exercise_slug.clone(),
                    order_index: exercise.order_index,
                    sets: match adjustment.volume {
                        VolumeAdjustment::Scale(factor) => scale_sets(exercise.sets, factor),
                        VolumeAdjustment::Delta(delta) => shift_sets(exercise.sets, delta),
                    },
                    reps_min: exercise.reps_min,
                    reps_max: exercise.reps_max,
                    rest_seconds: exercise.rest_seconds,
                    notes: Some(note.into()),
                })
                .collect();

            if target_week % VARIETY_INTERVAL_WEEKS == 0 {
                self.apply_variety_swaps(&mut new_exercises, rng);
            }
            if adjustment.exercise_swaps != 0 {
                self.apply_directional_swaps(&mut new_exercises, adjustment.exercise_swaps);
            }

            self.workouts.insert_workout(&new_workout).await?;
            self.workouts.insert_exercises(&new_exercises).await?;
        }

        info!(
            %user_id,
            target_week,
            action = ?adjustment.action,
            "created adjusted plan"
        );
        Ok(AdvanceOutcome {
            success: true,
            message: format!("created plan for week {target_week}: {}", adjustment.reason),
            target_week,
            created: true,
        })
    }

    const fn coaching_note(action: AdjustmentAction) -> &'static str {
        match action {
            AdjustmentAction::Increase => {
                "Load increased from last week. Keep every rep controlled."
            }
            AdjustmentAction::Decrease => {
                "Load reduced this week to support recovery. Prioritize form."
            }
            AdjustmentAction::Maintain => {
                "Same target as last week. Aim for crisp, consistent reps."
            }
        }
    }

    /// Replace two random non-first exercises with fresh alternatives
    fn apply_variety_swaps<R: Rng>(&self, exercises: &mut [WorkoutExercise], rng: &mut R) {
        if exercises.len() < VARIETY_MIN_EXERCISES {
            return;
        }

        let mut candidates: Vec<usize> = (1..exercises.len()).collect();
        candidates.shuffle(rng);

        for index in candidates.into_iter().take(VARIETY_SWAP_COUNT) {
            let used: HashSet<String> = exercises
                .iter()
                .map(|exercise| exercise.exercise_slug.clone())
                .collect();
            let Some(current) = self.catalog.get(&exercises[index].exercise_slug) else {
                continue;
            };
            if let Some(replacement) = self.catalog.find_replacement(current, &used, None) {
                debug!(
                    from = %exercises[index].exercise_slug,
                    to = %replacement.slug,
                    "variety swap"
                );
                exercises[index].exercise_slug = replacement.slug.clone();
            }
        }
    }

    /// Swap the trailing exercises toward a harder or easier tier
    ///
    /// A positive count targets the next harder tier, negative the next
    /// easier. No candidate on the target tier means the original stays.
    fn apply_directional_swaps(&self, exercises: &mut [WorkoutExercise], swaps: i32) {
        let count = swaps.unsigned_abs() as usize;
        let harder = swaps > 0;
        let swap_range: Vec<usize> = (1..exercises.len()).rev().take(count).collect();

        for index in swap_range {
            let used: HashSet<String> = exercises
                .iter()
                .map(|exercise| exercise.exercise_slug.clone())
                .collect();
            let Some(current) = self.catalog.get(&exercises[index].exercise_slug) else {
                continue;
            };
            let target_tier: Option<Difficulty> = if harder {
                current.difficulty.harder()
            } else {
                current.difficulty.easier()
            };
            let Some(tier) = target_tier else {
                continue;
            };
            if let Some(replacement) = self.catalog.find_replacement(current, &used, Some(tier)) {
                debug!(
                    from = %exercises[index].exercise_slug,
                    to = %replacement.slug,
                    harder,
                    "directional swap"
                );
                exercises[index].exercise_slug = replacement.slug.clone();
            }
        }
    }
}
