// ABOUTME: Streak tracking and achievement unlocks from workout completions
// ABOUTME: Side-channel collaborator; the adjustment core never depends on it
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Gamification
//!
//! After a workout transitions to completed, the caller feeds the completion
//! event into [`StreakState::record_completion`] and re-evaluates
//! achievements. Streaks count calendar days: a second workout on the same
//! day keeps the streak, the next day extends it, and any longer gap resets
//! it to one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A user's streak counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Consecutive training days ending at the most recent completion
    pub current_streak: u32,
    /// Best streak ever reached
    pub longest_streak: u32,
    /// Lifetime completed workouts
    pub total_completed: u32,
    /// Calendar day of the most recent completion
    pub last_completed_on: Option<NaiveDate>,
}

impl StreakState {
    /// Fold a completion event into the counters
    pub fn record_completion(&mut self, completed_at: DateTime<Utc>) {
        let day = completed_at.date_naive();
        self.total_completed += 1;

        self.current_streak = match self.last_completed_on {
            Some(last) if day == last => self.current_streak,
            Some(last) if (day - last).num_days() == 1 => self.current_streak + 1,
            _ => 1,
        };
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_completed_on = Some(day);
    }
}

/// What unlocks an achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementRequirement {
    /// Reach a current streak of this many days
    Streak(u32),
    /// Complete this many workouts in total
    TotalWorkouts(u32),
}

/// A single achievement definition
#[derive(Debug, Clone, Copy)]
pub struct Achievement {
    /// Stable identifier
    pub slug: &'static str,
    /// Display title
    pub title: &'static str,
    /// Unlock condition
    pub requirement: AchievementRequirement,
}

/// The built-in achievement table, ordered by difficulty
pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        slug: "first-workout",
        title: "First Workout",
        requirement: AchievementRequirement::TotalWorkouts(1),
    },
    Achievement {
        slug: "ten-workouts",
        title: "Ten Down",
        requirement: AchievementRequirement::TotalWorkouts(10),
    },
    Achievement {
        slug: "fifty-workouts",
        title: "Half Century",
        requirement: AchievementRequirement::TotalWorkouts(50),
    },
    Achievement {
        slug: "streak-3",
        title: "Three-Day Streak",
        requirement: AchievementRequirement::Streak(3),
    },
    Achievement {
        slug: "streak-7",
        title: "Full Week",
        requirement: AchievementRequirement::Streak(7),
    },
    Achievement {
        slug: "streak-30",
        title: "Iron Month",
        requirement: AchievementRequirement::Streak(30),
    },
];

/// Achievements the given state has unlocked
#[must_use]
pub fn unlocked_achievements(state: &StreakState) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|achievement| match achievement.requirement {
            AchievementRequirement::Streak(days) => state.current_streak >= days,
            AchievementRequirement::TotalWorkouts(count) => state.total_completed >= count,
        })
        .collect()
}
