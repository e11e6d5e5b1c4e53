// ABOUTME: Weekly cron service: sequential per-user progressive-overload pass
// ABOUTME: Partial-failure tolerant; one user's error never aborts the batch
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Weekly Adjustment
//!
//! The external cron calls [`WeeklyAdjustmentService::run_week`] once per
//! week: list users with an active plan for the completed week, then adjust
//! each sequentially. A per-user failure is caught at the loop boundary,
//! logged with user context, and counted; the next cron invocation retries
//! naturally because plan creation is idempotent.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::ExerciseCatalog;
use crate::database::{FeedbackRepo, PlanRepo, ProfileRepo, WorkoutRepo};
use crate::errors::{AppError, AppResult};
use crate::intelligence::{
    AdjustmentInput, AdjustmentStrategy, PlanAdjustment, ReadinessAggregator, ReadinessScore,
};
use crate::models::{DifficultyRating, PlanStatus};
use crate::plans::{AdvanceOutcome, PlanMutator};

/// History window the readiness aggregator looks back over
pub const TRAILING_WINDOW_DAYS: i64 = 28;

/// Outcome of one user's weekly adjustment
#[derive(Debug, Clone, Serialize)]
pub struct AdjustmentReport {
    /// The adjusted user
    pub user_id: Uuid,
    /// What the mutator did
    pub outcome: AdvanceOutcome,
    /// The decision that was applied
    #[serde(skip)]
    pub adjustment: PlanAdjustment,
    /// Readiness computed for the completed week
    pub readiness: ReadinessScore,
}

/// Success/error counts for one cron invocation
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BatchSummary {
    /// Users considered
    pub processed: usize,
    /// Users whose target week is in place (created or already existed)
    pub succeeded: usize,
    /// Users whose adjustment failed and will be retried next run
    pub failed: usize,
}

/// The weekly cron service
pub struct WeeklyAdjustmentService {
    profiles: Arc<dyn ProfileRepo>,
    plans: Arc<dyn PlanRepo>,
    workouts: Arc<dyn WorkoutRepo>,
    feedback: Arc<dyn FeedbackRepo>,
    mutator: PlanMutator,
    strategy: Arc<dyn AdjustmentStrategy>,
}

impl WeeklyAdjustmentService {
    /// Wire the service; `strategy` selects the adjustment policy
    #[must_use]
    pub fn new(
        profiles: Arc<dyn ProfileRepo>,
        plans: Arc<dyn PlanRepo>,
        workouts: Arc<dyn WorkoutRepo>,
        feedback: Arc<dyn FeedbackRepo>,
        catalog: Arc<ExerciseCatalog>,
        strategy: Arc<dyn AdjustmentStrategy>,
    ) -> Self {
        let mutator = PlanMutator::new(Arc::clone(&plans), Arc::clone(&workouts), catalog);
        Self {
            profiles,
            plans,
            workouts,
            feedback,
            mutator,
            strategy,
        }
    }

    /// Adjust one user from `completed_week` into the following week
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the user's profile or the
    /// completed week's plan is missing; propagates storage failures.
    pub async fn adjust_user(
        &self,
        user_id: Uuid,
        completed_week: u32,
        now: DateTime<Utc>,
        rng: &mut ChaCha8Rng,
    ) -> AppResult<AdjustmentReport> {
        let profile = self
            .profiles
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("profile for user {user_id}")))?;
        let plan = self
            .plans
            .get_plan(user_id, completed_week)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("no plan for user {user_id} week {completed_week}"))
            })?;

        let workouts = self.workouts.workouts_for_plan(plan.id).await?;
        let workout_ids: Vec<Uuid> = workouts.iter().map(|workout| workout.id).collect();
        let feedback = self.feedback.feedback_for_workouts(&workout_ids).await?;
        let ratings: Vec<DifficultyRating> =
            feedback.iter().map(|entry| entry.rating).collect();
        let completions = self
            .workouts
            .completions_since(user_id, now - Duration::days(TRAILING_WINDOW_DAYS))
            .await?;

        let readiness = ReadinessAggregator::compute(&workouts, &feedback, &completions, now);
        let adjustment = self.strategy.decide(&AdjustmentInput {
            ratings: &ratings,
            readiness: Some(&readiness),
            experience: profile.experience_level,
            current_week: completed_week,
        });

        let target_week = completed_week + 1;
        let outcome = self
            .mutator
            .advance_week(user_id, completed_week, target_week, &adjustment, rng)
            .await?;

        // Close out the source week on the idempotent path too: a crash
        // between plan creation and this update must not leave the old plan
        // active forever.
        if plan.status != PlanStatus::Completed {
            self.plans
                .set_plan_status(plan.id, PlanStatus::Completed)
                .await?;
        }
        if profile.current_week < target_week {
            self.profiles.set_current_week(user_id, target_week).await?;
        }

        Ok(AdjustmentReport {
            user_id,
            outcome,
            adjustment,
            readiness,
        })
    }

    /// Run the weekly pass for every user with an active plan at
    /// `completed_week`
    ///
    /// The RNG driving variety swaps is seeded from `seed`, making a whole
    /// batch reproducible.
    ///
    /// # Errors
    ///
    /// Only the initial user listing can fail the batch; per-user errors are
    /// logged and counted instead.
    pub async fn run_week(&self, completed_week: u32, seed: u64) -> AppResult<BatchSummary> {
        let users = self.plans.users_with_active_plan(completed_week).await?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut summary = BatchSummary::default();

        for user_id in users {
            summary.processed += 1;
            match self
                .adjust_user(user_id, completed_week, Utc::now(), &mut rng)
                .await
            {
                Ok(report) => {
                    summary.succeeded += 1;
                    info!(
                        %user_id,
                        target_week = report.outcome.target_week,
                        policy = self.strategy.name(),
                        reason = %report.adjustment.reason,
                        "weekly adjustment done"
                    );
                }
                Err(err) if err.is_already_exists() => {
                    // Idempotent re-run: the target week is already there.
                    summary.succeeded += 1;
                }
                Err(err) => {
                    summary.failed += 1;
                    warn!(%user_id, completed_week, error = %err, "weekly adjustment failed");
                }
            }
        }

        info!(
            completed_week,
            processed = summary.processed,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "weekly adjustment batch finished"
        );
        Ok(summary)
    }
}
