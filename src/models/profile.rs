// ABOUTME: User onboarding profile model and its enumerations
// ABOUTME: Goal, Location, ExperienceLevel, and the UserProfile entity
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Training goal selected during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Fat loss: higher reps, shorter rest
    LoseWeight,
    /// Hypertrophy: moderate reps, longer rest
    GainMuscle,
    /// General fitness: middle-of-the-road volume
    Maintenance,
}

impl Goal {
    /// Stable string form used for storage and display
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoseWeight => "lose_weight",
            Self::GainMuscle => "gain_muscle",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lose_weight" => Ok(Self::LoseWeight),
            "gain_muscle" => Ok(Self::GainMuscle),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(AppError::validation(format!("unknown goal: {other}"))),
        }
    }
}

/// Where the user trains, constraining available equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Training at home with limited equipment
    Home,
    /// Training at a commercial gym
    Gym,
}

impl Location {
    /// Stable string form used for storage and display
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Gym => "gym",
        }
    }
}

impl FromStr for Location {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Self::Home),
            "gym" => Ok(Self::Gym),
            other => Err(AppError::validation(format!("unknown location: {other}"))),
        }
    }
}

/// Self-reported training experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// New to structured training
    Beginner,
    /// Comfortable with common movement patterns
    Intermediate,
    /// Several years of consistent training
    Advanced,
}

impl ExperienceLevel {
    /// Stable string form used for storage and display
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(AppError::validation(format!(
                "unknown experience level: {other}"
            ))),
        }
    }
}

/// Onboarding profile driving plan generation and weekly adjustment
///
/// Created when onboarding completes, mutated by later onboarding steps,
/// and read-only from the adjuster's point of view (except `current_week`,
/// which advances after each successful weekly adjustment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Owning user
    pub user_id: Uuid,
    /// Training goal
    pub goal: Goal,
    /// Planned training days per week (2-6)
    pub frequency_per_week: u8,
    /// Home or gym training
    pub location: Location,
    /// Self-reported experience
    pub experience_level: ExperienceLevel,
    /// Equipment the user has access to ("bodyweight" is always implied)
    pub equipment: HashSet<String>,
    /// Contraindication tags the user reported (e.g. "knee", "lower_back")
    pub limitations: HashSet<String>,
    /// Current training week, starting at 1
    pub current_week: u32,
}

impl UserProfile {
    /// Validate invariants a profile must satisfy before it reaches the engine
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the training frequency is outside
    /// the supported 2-6 range or `current_week` is zero.
    pub fn validate(&self) -> AppResult<()> {
        if !(2..=6).contains(&self.frequency_per_week) {
            return Err(AppError::validation(format!(
                "frequency_per_week must be between 2 and 6, got {}",
                self.frequency_per_week
            )));
        }
        if self.current_week == 0 {
            return Err(AppError::validation("current_week must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(frequency: u8) -> UserProfile {
        UserProfile {
            user_id: Uuid::new_v4(),
            goal: Goal::Maintenance,
            frequency_per_week: frequency,
            location: Location::Home,
            experience_level: ExperienceLevel::Beginner,
            equipment: HashSet::new(),
            limitations: HashSet::new(),
            current_week: 1,
        }
    }

    #[test]
    fn frequency_bounds_are_enforced() {
        assert!(profile(1).validate().is_err());
        assert!(profile(2).validate().is_ok());
        assert!(profile(6).validate().is_ok());
        assert!(profile(7).validate().is_err());
    }

    #[test]
    fn enums_round_trip_through_strings() {
        for goal in [Goal::LoseWeight, Goal::GainMuscle, Goal::Maintenance] {
            assert_eq!(goal.as_str().parse::<Goal>().ok(), Some(goal));
        }
        assert!("cardio_bro".parse::<Goal>().is_err());
    }
}
