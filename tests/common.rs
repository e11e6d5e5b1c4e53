// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Profile builders, in-memory wiring, and week-completion helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test setup for `repkit` integration tests.

use std::collections::HashSet;
use std::sync::{Arc, Once};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use repkit::catalog::ExerciseCatalog;
use repkit::database::MemoryDatabase;
use repkit::intelligence::{AdjustmentStrategy, FeedbackRatioStrategy};
use repkit::models::{
    DifficultyRating, ExperienceLevel, FeedbackInput, Goal, Location, UserProfile, WorkoutPlan,
};
use repkit::services::{FeedbackService, PlanService, WeeklyAdjustmentService};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// A gym profile with barbell and bench available
pub fn gym_profile(goal: Goal, frequency: u8, experience: ExperienceLevel) -> UserProfile {
    UserProfile {
        user_id: Uuid::new_v4(),
        goal,
        frequency_per_week: frequency,
        location: Location::Gym,
        experience_level: experience,
        equipment: ["barbell", "bench"].iter().map(|&s| s.into()).collect(),
        limitations: HashSet::new(),
        current_week: 1,
    }
}

/// Wire a plan service over the shared in-memory database
pub fn plan_service(db: &Arc<MemoryDatabase>) -> PlanService {
    PlanService::new(
        db.clone(),
        db.clone(),
        db.clone(),
        Arc::new(ExerciseCatalog::builtin()),
    )
}

/// Wire a feedback service over the shared in-memory database
pub fn feedback_service(db: &Arc<MemoryDatabase>) -> FeedbackService {
    FeedbackService::new(db.clone(), db.clone())
}

/// Wire the weekly adjustment service with the given policy
pub fn weekly_service(
    db: &Arc<MemoryDatabase>,
    strategy: Arc<dyn AdjustmentStrategy>,
) -> WeeklyAdjustmentService {
    WeeklyAdjustmentService::new(
        db.clone(),
        db.clone(),
        db.clone(),
        db.clone(),
        Arc::new(ExerciseCatalog::builtin()),
        strategy,
    )
}

/// Wire the weekly adjustment service with the canonical policy
pub fn canonical_weekly_service(db: &Arc<MemoryDatabase>) -> WeeklyAdjustmentService {
    weekly_service(db, Arc::new(FeedbackRatioStrategy))
}

/// Onboard a user, returning the generated plan
pub async fn onboard(db: &Arc<MemoryDatabase>, profile: &UserProfile) -> WorkoutPlan {
    init_test_logging();
    plan_service(db).onboard(profile).await.unwrap()
}

/// Complete the plan's first workouts and attach the given ratings
///
/// Completion timestamps are spread one per day ending at `now` so the
/// readiness aggregator sees a tight, realistic cadence.
pub async fn complete_week_with_ratings(
    db: &Arc<MemoryDatabase>,
    plan: &WorkoutPlan,
    ratings: &[DifficultyRating],
    now: DateTime<Utc>,
) {
    use repkit::database::WorkoutRepo;

    let service = feedback_service(db);
    let workouts = db.workouts_for_plan(plan.id).await.unwrap();
    assert!(
        ratings.len() <= workouts.len(),
        "more ratings than workouts in the plan"
    );

    for (index, rating) in ratings.iter().enumerate() {
        let workout = &workouts[index];
        let completed_at =
            now - chrono::Duration::days((ratings.len() - 1 - index) as i64) - chrono::Duration::hours(30);
        service
            .complete_workout(workout.id, completed_at)
            .await
            .unwrap();
        service
            .submit_feedback(
                FeedbackInput {
                    workout_id: workout.id,
                    difficulty_rating: *rating,
                    duration_minutes: Some(45),
                    notes: None,
                },
                completed_at,
            )
            .await
            .unwrap();
    }
}
