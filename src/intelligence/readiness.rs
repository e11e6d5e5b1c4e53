// ABOUTME: Readiness score aggregation from workout history and feedback
// ABOUTME: Weighted blend of completion, sentiment, consistency, and recovery
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Readiness Aggregation
//!
//! Produces a 0-100 readiness estimate from four sub-scores:
//!
//! | Factor | Weight | Signal |
//! |---|---|---|
//! | completion rate | 40% | completed / total workouts for the week |
//! | feedback score | 30% | mean of easy=100 / ok=50 / hard=0 |
//! | consistency | 20% | average gap between completions, trailing ~4 weeks |
//! | recovery | 10% | hours since the most recent completed workout |
//!
//! Every factor defaults to a neutral 50 when its inputs are missing, so a
//! brand-new user scores straight down the middle rather than at an extreme.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Workout, WorkoutFeedback, WorkoutStatus};

const COMPLETION_WEIGHT: f64 = 0.4;
const FEEDBACK_WEIGHT: f64 = 0.3;
const CONSISTENCY_WEIGHT: f64 = 0.2;
const RECOVERY_WEIGHT: f64 = 0.1;

/// Neutral score used whenever a factor has no data
const NEUTRAL_SCORE: f64 = 50.0;

/// Aggregated readiness, each component rounded for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessScore {
    /// Weighted overall score, 0-100
    pub overall: u32,
    /// Share of the week's workouts completed, 0-100
    pub completion_rate: u32,
    /// Feedback sentiment, 0-100
    pub feedback_score: u32,
    /// Training cadence regularity, 0-100
    pub consistency_score: u32,
    /// Recency of the last session relative to recovery windows, 0-100
    pub recovery_indicator: u32,
}

/// Computes [`ReadinessScore`] from plain history slices
///
/// The aggregator is pure: the service layer fetches the week's workouts,
/// the week's feedback, and the trailing completion timestamps, then hands
/// them over. That keeps scoring deterministic and trivially testable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadinessAggregator;

impl ReadinessAggregator {
    /// Compute the readiness score for a completed week
    ///
    /// `recent_completions` are completion timestamps over the trailing ~4
    /// weeks in any order; `now` anchors the recovery window.
    #[must_use]
    pub fn compute(
        week_workouts: &[Workout],
        feedback: &[WorkoutFeedback],
        recent_completions: &[DateTime<Utc>],
        now: DateTime<Utc>,
    ) -> ReadinessScore {
        let completion = Self::completion_rate(week_workouts);
        let sentiment = Self::feedback_score(feedback);
        let consistency = Self::consistency_score(recent_completions);
        let recovery = Self::recovery_indicator(recent_completions, now);

        let overall = COMPLETION_WEIGHT * completion
            + FEEDBACK_WEIGHT * sentiment
            + CONSISTENCY_WEIGHT * consistency
            + RECOVERY_WEIGHT * recovery;

        ReadinessScore {
            overall: overall.round() as u32,
            completion_rate: completion.round() as u32,
            feedback_score: sentiment.round() as u32,
            consistency_score: consistency.round() as u32,
            recovery_indicator: recovery.round() as u32,
        }
    }

    fn completion_rate(week_workouts: &[Workout]) -> f64 {
        if week_workouts.is_empty() {
            return NEUTRAL_SCORE;
        }
        let completed = week_workouts
            .iter()
            .filter(|workout| workout.status == WorkoutStatus::Completed)
            .count();
        completed as f64 / week_workouts.len() as f64 * 100.0
    }

    fn feedback_score(feedback: &[WorkoutFeedback]) -> f64 {
        if feedback.is_empty() {
            return NEUTRAL_SCORE;
        }
        let total: f64 = feedback.iter().map(|entry| entry.rating.score()).sum();
        total / feedback.len() as f64
    }

    /// Average gap between consecutive completions, bucketed
    fn consistency_score(recent_completions: &[DateTime<Utc>]) -> f64 {
        if recent_completions.len() < 2 {
            return NEUTRAL_SCORE;
        }
        let mut sorted = recent_completions.to_vec();
        sorted.sort_unstable();

        let gap_days: f64 = sorted
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).num_hours() as f64 / 24.0)
            .sum::<f64>()
            / (sorted.len() - 1) as f64;

        if gap_days <= 2.0 {
            100.0
        } else if gap_days <= 3.0 {
            75.0
        } else if gap_days <= 4.0 {
            50.0
        } else {
            25.0
        }
    }

    /// Hours since the most recent completion, bucketed around the 24-48h
    /// sweet spot
    fn recovery_indicator(recent_completions: &[DateTime<Utc>], now: DateTime<Utc>) -> f64 {
        let Some(latest) = recent_completions.iter().max() else {
            return NEUTRAL_SCORE;
        };
        // Fractional hours so the bucket boundaries hold exactly; whole-hour
        // truncation would put a 48h59m-old session in the [24,48] bucket.
        let hours = (now - *latest).num_minutes() as f64 / 60.0;

        if (24.0..=48.0).contains(&hours) {
            100.0
        } else if hours > 48.0 && hours <= 72.0 {
            75.0
        } else if (12.0..24.0).contains(&hours) {
            50.0
        } else {
            25.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DifficultyRating;
    use chrono::Duration;
    use uuid::Uuid;

    fn workout(status: WorkoutStatus) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            day_of_week: 1,
            workout_type: "chest/back".into(),
            status,
            completed_at: None,
        }
    }

    fn feedback(rating: DifficultyRating) -> WorkoutFeedback {
        WorkoutFeedback {
            workout_id: Uuid::new_v4(),
            rating,
            duration_minutes: None,
            notes: None,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn empty_history_scores_neutral_everywhere() {
        let score = ReadinessAggregator::compute(&[], &[], &[], Utc::now());
        assert_eq!(score.completion_rate, 50);
        assert_eq!(score.feedback_score, 50);
        assert_eq!(score.consistency_score, 50);
        assert_eq!(score.recovery_indicator, 50);
        assert_eq!(score.overall, 50);
    }

    #[test]
    fn completion_rate_is_a_percentage() {
        let workouts = vec![
            workout(WorkoutStatus::Completed),
            workout(WorkoutStatus::Completed),
            workout(WorkoutStatus::Completed),
            workout(WorkoutStatus::Skipped),
        ];
        let score = ReadinessAggregator::compute(&workouts, &[], &[], Utc::now());
        assert_eq!(score.completion_rate, 75);
    }

    #[test]
    fn feedback_score_averages_ratings() {
        let entries = vec![
            feedback(DifficultyRating::Easy),
            feedback(DifficultyRating::Ok),
            feedback(DifficultyRating::Hard),
        ];
        let score = ReadinessAggregator::compute(&[], &entries, &[], Utc::now());
        assert_eq!(score.feedback_score, 50);

        let all_easy = vec![feedback(DifficultyRating::Easy); 3];
        let score = ReadinessAggregator::compute(&[], &all_easy, &[], Utc::now());
        assert_eq!(score.feedback_score, 100);
    }

    #[test]
    fn tight_gaps_score_high_consistency() {
        let now = Utc::now();
        let completions: Vec<_> = (0..4)
            .map(|i| now - Duration::days(i * 2) - Duration::hours(30))
            .collect();
        let score = ReadinessAggregator::compute(&[], &[], &completions, now);
        assert_eq!(score.consistency_score, 100);
    }

    #[test]
    fn sparse_gaps_score_low_consistency() {
        let now = Utc::now();
        let completions = vec![now - Duration::days(20), now - Duration::days(10), now];
        let score = ReadinessAggregator::compute(&[], &[], &completions, now);
        assert_eq!(score.consistency_score, 25);
    }

    #[test]
    fn recovery_windows_follow_the_buckets() {
        let now = Utc::now();
        let cases = [
            (Duration::hours(36), 100),
            (Duration::hours(60), 75),
            (Duration::hours(18), 50),
            (Duration::hours(6), 25),
            (Duration::hours(100), 25),
        ];
        for (age, expected) in cases {
            let score = ReadinessAggregator::compute(&[], &[], &[now - age], now);
            assert_eq!(score.recovery_indicator, expected, "age {age:?}");
        }
    }

    #[test]
    fn recovery_bucket_edges_use_fractional_hours() {
        let now = Utc::now();
        let cases = [
            (Duration::hours(48), 100),                          // inclusive end
            (Duration::hours(48) + Duration::minutes(30), 75),   // just past it
            (Duration::hours(24), 100),                          // inclusive start
            (Duration::hours(23) + Duration::minutes(59), 50),   // just before it
            (Duration::hours(72) + Duration::minutes(30), 25),
        ];
        for (age, expected) in cases {
            let score = ReadinessAggregator::compute(&[], &[], &[now - age], now);
            assert_eq!(score.recovery_indicator, expected, "age {age:?}");
        }
    }

    #[test]
    fn overall_is_the_weighted_blend() {
        // 100% completion, all-easy feedback, no history beyond that.
        let workouts = vec![workout(WorkoutStatus::Completed)];
        let entries = vec![feedback(DifficultyRating::Easy)];
        let score = ReadinessAggregator::compute(&workouts, &entries, &[], Utc::now());
        // 0.4*100 + 0.3*100 + 0.2*50 + 0.1*50 = 85
        assert_eq!(score.overall, 85);
    }
}
