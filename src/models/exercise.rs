// ABOUTME: Exercise reference data model with muscle groups and difficulty tiers
// ABOUTME: Immutable catalog entries consumed by the generator and mutator
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Major muscle groups targeted by catalog exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    /// Pectorals
    Chest,
    /// Lats and mid-back
    Back,
    /// Deltoids
    Shoulders,
    /// Biceps
    Biceps,
    /// Triceps
    Triceps,
    /// Quadriceps
    Quads,
    /// Hamstrings
    Hamstrings,
    /// Glutes
    Glutes,
    /// Calves
    Calves,
    /// Abdominals and trunk stabilizers
    Core,
}

impl MuscleGroup {
    /// Stable string form used for storage and workout-type labels
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Shoulders => "shoulders",
            Self::Biceps => "biceps",
            Self::Triceps => "triceps",
            Self::Quads => "quads",
            Self::Hamstrings => "hamstrings",
            Self::Glutes => "glutes",
            Self::Calves => "calves",
            Self::Core => "core",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MuscleGroup {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chest" => Ok(Self::Chest),
            "back" => Ok(Self::Back),
            "shoulders" => Ok(Self::Shoulders),
            "biceps" => Ok(Self::Biceps),
            "triceps" => Ok(Self::Triceps),
            "quads" => Ok(Self::Quads),
            "hamstrings" => Ok(Self::Hamstrings),
            "glutes" => Ok(Self::Glutes),
            "calves" => Ok(Self::Calves),
            "core" => Ok(Self::Core),
            other => Err(AppError::validation(format!(
                "unknown muscle group: {other}"
            ))),
        }
    }
}

/// Difficulty tier assigned to a catalog exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Suitable for users new to training
    Beginner,
    /// Standard barbell/dumbbell movements
    Intermediate,
    /// Technically demanding or high-load variations
    Advanced,
}

impl Difficulty {
    /// Stable string form used for storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Next harder tier, or `None` when already at the top
    #[must_use]
    pub const fn harder(self) -> Option<Self> {
        match self {
            Self::Beginner => Some(Self::Intermediate),
            Self::Intermediate => Some(Self::Advanced),
            Self::Advanced => None,
        }
    }

    /// Next easier tier, or `None` when already at the bottom
    #[must_use]
    pub const fn easier(self) -> Option<Self> {
        match self {
            Self::Beginner => None,
            Self::Intermediate => Some(Self::Beginner),
            Self::Advanced => Some(Self::Intermediate),
        }
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(AppError::validation(format!("unknown difficulty: {other}"))),
        }
    }
}

/// A single catalog exercise
///
/// Immutable reference data seeded at deploy time. `slug` is the unique key;
/// `equipment_required` items are satisfied by the user's equipment set, with
/// "bodyweight" always considered available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique key, e.g. "barbell-bench-press"
    pub slug: String,
    /// Display name
    pub name: String,
    /// Muscle groups this exercise trains
    pub muscle_groups: Vec<MuscleGroup>,
    /// Equipment needed to perform the exercise
    pub equipment_required: Vec<String>,
    /// Difficulty tier
    pub difficulty: Difficulty,
    /// Contraindication tags (matched against profile limitations)
    pub contraindications: Vec<String>,
}

impl Exercise {
    /// Count of muscle groups shared with `targets`
    #[must_use]
    pub fn overlap_with(&self, targets: &[MuscleGroup]) -> usize {
        self.muscle_groups
            .iter()
            .filter(|group| targets.contains(group))
            .count()
    }

    /// True when this exercise shares at least one muscle group with `other`
    #[must_use]
    pub fn shares_muscle_group(&self, other: &Self) -> bool {
        self.overlap_with(&other.muscle_groups) > 0
    }
}
