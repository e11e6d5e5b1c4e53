// ABOUTME: End-to-end tests for the weekly adjustment service
// ABOUTME: Feedback-direction scenarios, idempotent re-runs, and batch behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;

use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use repkit::database::{MemoryDatabase, PlanRepo, ProfileRepo, WorkoutRepo};
use repkit::intelligence::{ReadinessStrategy, VolumeAdjustment};
use repkit::models::{DifficultyRating, ExperienceLevel, Goal, PlanStatus, WorkoutPlan};

use common::{
    canonical_weekly_service, complete_week_with_ratings, gym_profile, onboard, weekly_service,
};

#[tokio::test]
async fn easy_majority_scales_volume_up_ten_percent() {
    let db = Arc::new(MemoryDatabase::new());
    let profile = gym_profile(Goal::GainMuscle, 3, ExperienceLevel::Intermediate);
    let plan = onboard(&db, &profile).await;

    let now = Utc::now();
    complete_week_with_ratings(&db, &plan, &[DifficultyRating::Easy; 3], now).await;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let report = canonical_weekly_service(&db)
        .adjust_user(profile.user_id, 1, now, &mut rng)
        .await
        .unwrap();

    assert!(report.outcome.created);
    assert_eq!(report.adjustment.volume, VolumeAdjustment::Scale(1.1));
    assert_eq!(report.adjustment.feedback_count, 3);

    let next = db.get_plan(profile.user_id, 2).await.unwrap().unwrap();
    assert!((next.difficulty_multiplier - 1.1).abs() < 1e-9);

    // The user advances and the completed plan is closed out.
    let updated = db.get_profile(profile.user_id).await.unwrap().unwrap();
    assert_eq!(updated.current_week, 2);
}

#[tokio::test]
async fn hard_majority_scales_volume_down() {
    let db = Arc::new(MemoryDatabase::new());
    let profile = gym_profile(Goal::GainMuscle, 3, ExperienceLevel::Intermediate);
    let plan = onboard(&db, &profile).await;

    let now = Utc::now();
    complete_week_with_ratings(
        &db,
        &plan,
        &[
            DifficultyRating::Hard,
            DifficultyRating::Hard,
            DifficultyRating::Ok,
        ],
        now,
    )
    .await;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let report = canonical_weekly_service(&db)
        .adjust_user(profile.user_id, 1, now, &mut rng)
        .await
        .unwrap();

    assert_eq!(report.adjustment.volume, VolumeAdjustment::Scale(0.9));
    let next = db.get_plan(profile.user_id, 2).await.unwrap().unwrap();
    assert!((next.difficulty_multiplier - 0.9).abs() < 1e-9);
}

#[tokio::test]
async fn mixed_feedback_holds_volume_steady() {
    let db = Arc::new(MemoryDatabase::new());
    let profile = gym_profile(Goal::Maintenance, 3, ExperienceLevel::Intermediate);
    let plan = onboard(&db, &profile).await;

    let now = Utc::now();
    complete_week_with_ratings(
        &db,
        &plan,
        &[
            DifficultyRating::Easy,
            DifficultyRating::Ok,
            DifficultyRating::Hard,
        ],
        now,
    )
    .await;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let report = canonical_weekly_service(&db)
        .adjust_user(profile.user_id, 1, now, &mut rng)
        .await
        .unwrap();

    assert_eq!(report.adjustment.volume, VolumeAdjustment::Scale(1.0));
    assert!(report.adjustment.reason.contains("mixed feedback"));
}

#[tokio::test]
async fn two_feedback_entries_are_not_enough_to_adjust() {
    let db = Arc::new(MemoryDatabase::new());
    let profile = gym_profile(Goal::GainMuscle, 4, ExperienceLevel::Intermediate);
    let plan = onboard(&db, &profile).await;

    let now = Utc::now();
    complete_week_with_ratings(&db, &plan, &[DifficultyRating::Easy; 2], now).await;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let report = canonical_weekly_service(&db)
        .adjust_user(profile.user_id, 1, now, &mut rng)
        .await
        .unwrap();

    assert_eq!(report.adjustment.volume, VolumeAdjustment::Scale(1.0));
    assert_eq!(report.adjustment.feedback_count, 2);
    assert!(report.adjustment.reason.contains("insufficient feedback"));

    // Next week still gets created, just unchanged.
    let next = db.get_plan(profile.user_id, 2).await.unwrap().unwrap();
    assert!((next.difficulty_multiplier - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn adjusting_the_same_week_twice_creates_one_plan() {
    let db = Arc::new(MemoryDatabase::new());
    let profile = gym_profile(Goal::GainMuscle, 3, ExperienceLevel::Intermediate);
    let plan = onboard(&db, &profile).await;

    let now = Utc::now();
    complete_week_with_ratings(&db, &plan, &[DifficultyRating::Easy; 3], now).await;

    let service = canonical_weekly_service(&db);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let first = service
        .adjust_user(profile.user_id, 1, now, &mut rng)
        .await
        .unwrap();
    let second = service
        .adjust_user(profile.user_id, 1, now, &mut rng)
        .await
        .unwrap();

    assert!(first.outcome.created);
    assert!(!second.outcome.created);
    assert!(second.outcome.success);

    let next = db.get_plan(profile.user_id, 2).await.unwrap().unwrap();
    let workouts = db.workouts_for_plan(next.id).await.unwrap();
    assert_eq!(workouts.len(), 3, "re-run must not duplicate workouts");
}

#[tokio::test]
async fn interrupted_close_out_heals_on_the_next_run() {
    let db = Arc::new(MemoryDatabase::new());
    let profile = gym_profile(Goal::GainMuscle, 3, ExperienceLevel::Intermediate);
    let plan = onboard(&db, &profile).await;

    let now = Utc::now();
    complete_week_with_ratings(&db, &plan, &[DifficultyRating::Easy; 3], now).await;

    // A previous run created week 2 but crashed before closing out week 1.
    db.insert_plan_if_absent(&WorkoutPlan::new(profile.user_id, 2))
        .await
        .unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let report = canonical_weekly_service(&db)
        .adjust_user(profile.user_id, 1, now, &mut rng)
        .await
        .unwrap();
    assert!(!report.outcome.created);

    // The re-run finished the interrupted bookkeeping.
    let source = db.get_plan(profile.user_id, 1).await.unwrap().unwrap();
    assert_eq!(source.status, PlanStatus::Completed);
    let updated = db.get_profile(profile.user_id).await.unwrap().unwrap();
    assert_eq!(updated.current_week, 2);

    // The user no longer shows up in the week-1 batch listing.
    assert!(db.users_with_active_plan(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn batch_counts_one_failure_without_aborting() {
    let db = Arc::new(MemoryDatabase::new());

    let alice = gym_profile(Goal::GainMuscle, 3, ExperienceLevel::Intermediate);
    let bob = gym_profile(Goal::LoseWeight, 3, ExperienceLevel::Beginner);
    let now = Utc::now();
    for profile in [&alice, &bob] {
        let plan = onboard(&db, profile).await;
        complete_week_with_ratings(&db, &plan, &[DifficultyRating::Ok; 3], now).await;
    }

    // A plan with no matching profile: adjustment for this user must fail.
    let orphan = Uuid::new_v4();
    db.insert_plan_if_absent(&WorkoutPlan::new(orphan, 1))
        .await
        .unwrap();

    let summary = canonical_weekly_service(&db).run_week(1, 42).await.unwrap();
    assert_eq!(summary.processed, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);

    assert!(db.get_plan(alice.user_id, 2).await.unwrap().is_some());
    assert!(db.get_plan(bob.user_id, 2).await.unwrap().is_some());
    assert!(db.get_plan(orphan, 2).await.unwrap().is_none());
}

#[tokio::test]
async fn readiness_policy_applies_set_deltas() {
    let db = Arc::new(MemoryDatabase::new());
    let profile = gym_profile(Goal::GainMuscle, 3, ExperienceLevel::Intermediate);
    let plan = onboard(&db, &profile).await;

    // Perfect week: every workout completed on a daily cadence, all easy.
    let now = Utc::now();
    complete_week_with_ratings(&db, &plan, &[DifficultyRating::Easy; 3], now).await;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let report = weekly_service(&db, Arc::new(ReadinessStrategy))
        .adjust_user(profile.user_id, 1, now, &mut rng)
        .await
        .unwrap();

    assert!(report.readiness.overall >= 80);
    assert_eq!(report.adjustment.volume, VolumeAdjustment::Delta(2));

    // gain_muscle/intermediate starts at 4 sets; +2 hits the ceiling of 6.
    let next = db.get_plan(profile.user_id, 2).await.unwrap().unwrap();
    let workouts = db.workouts_for_plan(next.id).await.unwrap();
    for workout in &workouts {
        for exercise in db.exercises_for_workout(workout.id).await.unwrap() {
            assert_eq!(exercise.sets, 6);
        }
    }
}
