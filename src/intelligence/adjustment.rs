// ABOUTME: Progressive-overload decision policies mapping history to adjustments
// ABOUTME: Canonical feedback-ratio policy plus the readiness-table v2 policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Adjustment Decision Engine
//!
//! Two policies implement [`AdjustmentStrategy`]:
//!
//! - [`FeedbackRatioStrategy`] — the canonical production policy. It counts
//!   raw difficulty ratings over the completed week and only acts once at
//!   least [`MIN_FEEDBACK_FOR_ADJUSTMENT`] entries exist: a 60% "easy"
//!   majority scales volume by 1.10, a 60% "hard" majority by 0.90, anything
//!   else holds at 1.00.
//! - [`ReadinessStrategy`] — the v2 heuristic driven by the aggregated
//!   [`ReadinessScore`], with graduated volume deltas, intensity multipliers,
//!   and directional exercise swaps.
//!
//! The two use different thresholds and step sizes on purpose; they are
//! versioned side by side rather than merged.

use serde::{Deserialize, Serialize};

use super::readiness::ReadinessScore;
use crate::models::{DifficultyRating, ExperienceLevel};

/// Minimum feedback entries before the ratio policy will change anything
pub const MIN_FEEDBACK_FOR_ADJUSTMENT: usize = 3;

/// Share of "easy" ratings that triggers a volume increase
pub const EASY_RATIO_THRESHOLD: f64 = 0.6;

/// Share of "hard" ratings that triggers a volume decrease
pub const HARD_RATIO_THRESHOLD: f64 = 0.6;

/// Direction of a weekly adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentAction {
    /// Add training stimulus
    Increase,
    /// Hold the current load
    Maintain,
    /// Back off to support recovery
    Decrease,
}

/// How next week's set counts are derived from this week's
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeAdjustment {
    /// Multiply sets by a factor, round, clamp (feedback-ratio policy)
    Scale(f64),
    /// Add a signed delta to sets, clamp (readiness policy)
    Delta(i32),
}

/// A concrete adjustment ready for the plan mutator
#[derive(Debug, Clone, PartialEq)]
pub struct PlanAdjustment {
    /// Direction of the change
    pub action: AdjustmentAction,
    /// Set-count derivation
    pub volume: VolumeAdjustment,
    /// Multiplier applied to the plan's cumulative difficulty multiplier
    pub intensity_multiplier: f64,
    /// Signed count of directional exercise swaps (+harder / -easier)
    pub exercise_swaps: i32,
    /// Human-readable explanation surfaced to the caller
    pub reason: String,
    /// Number of feedback entries the decision was based on
    pub feedback_count: usize,
}

/// Everything a strategy may consult when deciding
#[derive(Debug, Clone, Copy)]
pub struct AdjustmentInput<'a> {
    /// Difficulty ratings collected over the completed week
    pub ratings: &'a [DifficultyRating],
    /// Aggregated readiness, when the caller computed one
    pub readiness: Option<&'a ReadinessScore>,
    /// The user's experience level
    pub experience: ExperienceLevel,
    /// The week just completed
    pub current_week: u32,
}

/// A versioned adjustment policy
pub trait AdjustmentStrategy: Send + Sync {
    /// Stable policy identifier, recorded in logs
    fn name(&self) -> &'static str;

    /// Decide next week's adjustment from the input history
    fn decide(&self, input: &AdjustmentInput<'_>) -> PlanAdjustment;
}

/// Result of the feedback-ratio evaluation, exposed for reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRatioAdjustment {
    /// Multiplier applied to set counts (1.10, 1.00, or 0.90)
    pub factor: f64,
    /// Explanation of how the factor was chosen
    pub reason: String,
    /// Number of feedback entries considered
    pub feedback_count: usize,
}

impl FeedbackRatioAdjustment {
    /// Evaluate the ratio rules over a week's ratings
    #[must_use]
    pub fn from_ratings(ratings: &[DifficultyRating]) -> Self {
        let count = ratings.len();
        if count < MIN_FEEDBACK_FOR_ADJUSTMENT {
            return Self {
                factor: 1.0,
                reason: format!(
                    "insufficient feedback ({count} of {MIN_FEEDBACK_FOR_ADJUSTMENT} required entries)"
                ),
                feedback_count: count,
            };
        }

        let easy = ratings
            .iter()
            .filter(|rating| **rating == DifficultyRating::Easy)
            .count();
        let hard = ratings
            .iter()
            .filter(|rating| **rating == DifficultyRating::Hard)
            .count();
        let easy_ratio = easy as f64 / count as f64;
        let hard_ratio = hard as f64 / count as f64;

        if easy_ratio >= EASY_RATIO_THRESHOLD {
            Self {
                factor: 1.1,
                reason: format!("most workouts rated easy ({easy} of {count}); increasing volume by 10%"),
                feedback_count: count,
            }
        } else if hard_ratio >= HARD_RATIO_THRESHOLD {
            Self {
                factor: 0.9,
                reason: format!("most workouts rated hard ({hard} of {count}); reducing volume by 10%"),
                feedback_count: count,
            }
        } else {
            Self {
                factor: 1.0,
                reason: "mixed feedback; holding volume steady".into(),
                feedback_count: count,
            }
        }
    }

    /// Direction implied by the factor
    #[must_use]
    pub fn action(&self) -> AdjustmentAction {
        if self.factor > 1.0 {
            AdjustmentAction::Increase
        } else if self.factor < 1.0 {
            AdjustmentAction::Decrease
        } else {
            AdjustmentAction::Maintain
        }
    }
}

/// Canonical policy: fixed 10% step driven by the rating mix
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackRatioStrategy;

impl AdjustmentStrategy for FeedbackRatioStrategy {
    fn name(&self) -> &'static str {
        "feedback_ratio"
    }

    fn decide(&self, input: &AdjustmentInput<'_>) -> PlanAdjustment {
        let evaluated = FeedbackRatioAdjustment::from_ratings(input.ratings);
        PlanAdjustment {
            action: evaluated.action(),
            volume: VolumeAdjustment::Scale(evaluated.factor),
            intensity_multiplier: evaluated.factor,
            exercise_swaps: 0,
            reason: evaluated.reason,
            feedback_count: evaluated.feedback_count,
        }
    }
}

/// v2 policy: graduated steps from the readiness score table
///
/// Rules are evaluated in precedence order, first match wins:
///
/// 1. overall ≥ 80 and completion ≥ 80 → increase (+1 set for beginners, +2
///    otherwise, intensity 1.10, one harder swap from week 4 on)
/// 2. 50 ≤ overall < 80 → maintain (+1 set on even weeks, intensity 1.05)
/// 3. completion < 50 or feedback < 25 → decrease (-1 set, intensity 0.95,
///    one easier swap from week 4 on)
/// 4. otherwise → maintain (no volume change, intensity 1.03)
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadinessStrategy;

impl ReadinessStrategy {
    const SWAP_UNLOCK_WEEK: u32 = 4;

    fn decide_from_score(
        score: &ReadinessScore,
        experience: ExperienceLevel,
        current_week: u32,
        feedback_count: usize,
    ) -> PlanAdjustment {
        let swaps_unlocked = current_week >= Self::SWAP_UNLOCK_WEEK;

        if score.overall >= 80 && score.completion_rate >= 80 {
            let volume_change = if experience == ExperienceLevel::Beginner {
                1
            } else {
                2
            };
            return PlanAdjustment {
                action: AdjustmentAction::Increase,
                volume: VolumeAdjustment::Delta(volume_change),
                intensity_multiplier: 1.10,
                exercise_swaps: i32::from(swaps_unlocked),
                reason: format!(
                    "high readiness ({}) with strong completion ({}%); progressing load",
                    score.overall, score.completion_rate
                ),
                feedback_count,
            };
        }

        if (50..80).contains(&score.overall) {
            let volume_change = i32::from(current_week % 2 == 0);
            return PlanAdjustment {
                action: AdjustmentAction::Maintain,
                volume: VolumeAdjustment::Delta(volume_change),
                intensity_multiplier: 1.05,
                exercise_swaps: 0,
                reason: format!(
                    "moderate readiness ({}); holding with a small nudge",
                    score.overall
                ),
                feedback_count,
            };
        }

        if score.completion_rate < 50 || score.feedback_score < 25 {
            return PlanAdjustment {
                action: AdjustmentAction::Decrease,
                volume: VolumeAdjustment::Delta(-1),
                intensity_multiplier: 0.95,
                exercise_swaps: -i32::from(swaps_unlocked),
                reason: format!(
                    "low completion ({}%) or strained feedback ({}); backing off",
                    score.completion_rate, score.feedback_score
                ),
                feedback_count,
            };
        }

        PlanAdjustment {
            action: AdjustmentAction::Maintain,
            volume: VolumeAdjustment::Delta(0),
            intensity_multiplier: 1.03,
            exercise_swaps: 0,
            reason: format!("readiness {} outside rule bands; maintaining", score.overall),
            feedback_count,
        }
    }
}

impl AdjustmentStrategy for ReadinessStrategy {
    fn name(&self) -> &'static str {
        "readiness_v2"
    }

    fn decide(&self, input: &AdjustmentInput<'_>) -> PlanAdjustment {
        let neutral = ReadinessScore {
            overall: 50,
            completion_rate: 50,
            feedback_score: 50,
            consistency_score: 50,
            recovery_indicator: 50,
        };
        let score = input.readiness.unwrap_or(&neutral);
        Self::decide_from_score(score, input.experience, input.current_week, input.ratings.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(easy: usize, ok: usize, hard: usize) -> Vec<DifficultyRating> {
        let mut out = vec![DifficultyRating::Easy; easy];
        out.extend(vec![DifficultyRating::Ok; ok]);
        out.extend(vec![DifficultyRating::Hard; hard]);
        out
    }

    fn score(overall: u32, completion: u32, feedback: u32) -> ReadinessScore {
        ReadinessScore {
            overall,
            completion_rate: completion,
            feedback_score: feedback,
            consistency_score: 50,
            recovery_indicator: 50,
        }
    }

    #[test]
    fn fewer_than_three_entries_never_adjusts() {
        let result = FeedbackRatioAdjustment::from_ratings(&ratings(2, 0, 0));
        assert!((result.factor - 1.0).abs() < f64::EPSILON);
        assert!(result.reason.contains("insufficient feedback"));
        assert_eq!(result.feedback_count, 2);
    }

    #[test]
    fn easy_majority_increases() {
        let result = FeedbackRatioAdjustment::from_ratings(&ratings(2, 1, 0));
        assert!(result.factor > 1.0);
        assert_eq!(result.action(), AdjustmentAction::Increase);

        // Exactly 60% easy counts as a majority.
        let result = FeedbackRatioAdjustment::from_ratings(&ratings(3, 2, 0));
        assert!((result.factor - 1.1).abs() < f64::EPSILON);
    }

    #[test]
    fn hard_majority_decreases() {
        let result = FeedbackRatioAdjustment::from_ratings(&ratings(0, 1, 2));
        assert!(result.factor < 1.0);
        assert_eq!(result.action(), AdjustmentAction::Decrease);
    }

    #[test]
    fn mixed_feedback_holds() {
        let result = FeedbackRatioAdjustment::from_ratings(&ratings(1, 1, 1));
        assert!((result.factor - 1.0).abs() < f64::EPSILON);
        assert_eq!(result.action(), AdjustmentAction::Maintain);
    }

    #[test]
    fn readiness_rule_one_progresses() {
        let decision = ReadinessStrategy::decide_from_score(
            &score(85, 90, 70),
            ExperienceLevel::Intermediate,
            5,
            4,
        );
        assert_eq!(decision.action, AdjustmentAction::Increase);
        assert_eq!(decision.volume, VolumeAdjustment::Delta(2));
        assert!((decision.intensity_multiplier - 1.10).abs() < f64::EPSILON);
        assert_eq!(decision.exercise_swaps, 1);

        let beginner = ReadinessStrategy::decide_from_score(
            &score(85, 90, 70),
            ExperienceLevel::Beginner,
            2,
            4,
        );
        assert_eq!(beginner.volume, VolumeAdjustment::Delta(1));
        assert_eq!(beginner.exercise_swaps, 0); // swaps unlock at week 4
    }

    #[test]
    fn readiness_rule_two_holds_with_even_week_nudge() {
        let even = ReadinessStrategy::decide_from_score(
            &score(65, 70, 60),
            ExperienceLevel::Intermediate,
            4,
            3,
        );
        assert_eq!(even.action, AdjustmentAction::Maintain);
        assert_eq!(even.volume, VolumeAdjustment::Delta(1));

        let odd = ReadinessStrategy::decide_from_score(
            &score(65, 70, 60),
            ExperienceLevel::Intermediate,
            5,
            3,
        );
        assert_eq!(odd.volume, VolumeAdjustment::Delta(0));
        assert!((odd.intensity_multiplier - 1.05).abs() < f64::EPSILON);
    }

    #[test]
    fn readiness_rule_three_backs_off() {
        let decision = ReadinessStrategy::decide_from_score(
            &score(40, 30, 60),
            ExperienceLevel::Advanced,
            6,
            2,
        );
        assert_eq!(decision.action, AdjustmentAction::Decrease);
        assert_eq!(decision.volume, VolumeAdjustment::Delta(-1));
        assert_eq!(decision.exercise_swaps, -1);
    }

    #[test]
    fn readiness_default_rule_maintains() {
        // overall 85 but completion 70: rule 1 misses (completion < 80),
        // rule 2 misses (overall >= 80), rule 3 misses.
        let decision = ReadinessStrategy::decide_from_score(
            &score(85, 70, 60),
            ExperienceLevel::Intermediate,
            3,
            3,
        );
        assert_eq!(decision.action, AdjustmentAction::Maintain);
        assert_eq!(decision.volume, VolumeAdjustment::Delta(0));
        assert!((decision.intensity_multiplier - 1.03).abs() < f64::EPSILON);
    }

    #[test]
    fn strategies_report_distinct_names() {
        assert_eq!(FeedbackRatioStrategy.name(), "feedback_ratio");
        assert_eq!(ReadinessStrategy.name(), "readiness_v2");
    }
}
