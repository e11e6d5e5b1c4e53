// ABOUTME: First-week plan generation from an onboarding profile
// ABOUTME: Split selection, per-day exercise selection, and volume assignment
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Plan Generator
//!
//! Builds the first week's workouts in three steps:
//!
//! 1. **Split selection** — purely from training frequency.
//! 2. **Exercise selection** — a coverage pass guarantees every target
//!    muscle group gets its best eligible exercise, then a fill pass tops up
//!    to the day's target count by overlap score.
//! 3. **Volume assignment** — sets/reps/rest from a fixed table keyed by
//!    (goal, experience).
//!
//! Shortfalls are silent: a day with too few eligible exercises simply
//! contains fewer, and a muscle group with no eligible exercise is skipped.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::ExerciseCatalog;
use crate::errors::AppResult;
use crate::models::{ExperienceLevel, Goal, MuscleGroup, UserProfile};

use MuscleGroup::{
    Back, Biceps, Calves, Chest, Core, Glutes, Hamstrings, Quads, Shoulders, Triceps,
};

const UPPER: &[MuscleGroup] = &[Chest, Back, Shoulders, Biceps, Triceps];
const LOWER: &[MuscleGroup] = &[Quads, Hamstrings, Glutes, Calves];
const FULL: &[MuscleGroup] = &[Chest, Back, Quads, Hamstrings, Shoulders, Core];
const PUSH: &[MuscleGroup] = &[Chest, Shoulders, Triceps];
const PULL: &[MuscleGroup] = &[Back, Biceps];
const LEGS: &[MuscleGroup] = &[Quads, Hamstrings, Glutes, Calves];

/// Weekly pattern assigning muscle-group focus to each training day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    /// Every session trains the whole body
    FullBody,
    /// Upper, lower, then a full-body day
    UpperLowerFull,
    /// Alternating upper and lower sessions
    UpperLower,
    /// Push, pull, legs rotation
    PushPullLegs,
}

impl Split {
    /// Select the split purely from weekly training frequency
    #[must_use]
    pub const fn for_frequency(frequency_per_week: u8) -> Self {
        match frequency_per_week {
            0..=2 => Self::FullBody,
            3 => Self::UpperLowerFull,
            4 => Self::UpperLower,
            _ => Self::PushPullLegs,
        }
    }

    /// Ordered cycle of muscle-group sets; day index modulo cycle length
    /// selects a day's targets
    #[must_use]
    pub const fn day_cycle(self) -> &'static [&'static [MuscleGroup]] {
        match self {
            Self::FullBody => &[FULL],
            Self::UpperLowerFull => &[UPPER, LOWER, FULL],
            Self::UpperLower => &[UPPER, LOWER],
            Self::PushPullLegs => &[PUSH, PULL, LEGS],
        }
    }

    /// Stable string form used for logging
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullBody => "full_body",
            Self::UpperLowerFull => "upper_lower_full",
            Self::UpperLower => "upper_lower",
            Self::PushPullLegs => "push_pull_legs",
        }
    }
}

/// Sets/reps/rest prescription from the volume table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumePrescription {
    /// Working sets per exercise
    pub sets: u32,
    /// Lower bound of the rep range
    pub reps_min: u32,
    /// Upper bound of the rep range
    pub reps_max: u32,
    /// Rest between sets, seconds
    pub rest_seconds: u32,
}

/// Look up the volume prescription for a goal/experience pair
///
/// Beginners get one fewer base set than intermediate/advanced users
/// training for the same goal.
#[must_use]
pub fn volume_for(goal: Goal, experience: ExperienceLevel) -> VolumePrescription {
    let (base_sets, reps_min, reps_max, rest_seconds) = match goal {
        Goal::LoseWeight => (3, 12, 15, 45),
        Goal::GainMuscle => (4, 8, 12, 90),
        Goal::Maintenance => (3, 10, 12, 60),
    };
    let sets = if experience == ExperienceLevel::Beginner {
        base_sets - 1
    } else {
        base_sets
    };
    VolumePrescription {
        sets,
        reps_min,
        reps_max,
        rest_seconds,
    }
}

/// One exercise prescription produced by the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedExercise {
    /// Catalog slug
    pub exercise_slug: String,
    /// Working sets
    pub sets: u32,
    /// Lower rep bound
    pub reps_min: u32,
    /// Upper rep bound
    pub reps_max: u32,
    /// Rest between sets, seconds
    pub rest_seconds: u32,
}

/// One generated training day, not yet persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedWorkout {
    /// Day of week, 1-based
    pub day_of_week: u8,
    /// Label derived by joining the day's muscle groups
    pub workout_type: String,
    /// The day's target muscle groups, in split order
    pub target_groups: Vec<MuscleGroup>,
    /// Ordered exercise prescriptions
    pub exercises: Vec<GeneratedExercise>,
}

/// Builds the first week's workouts from a profile and the catalog
#[derive(Debug, Clone, Copy)]
pub struct PlanGenerator<'a> {
    catalog: &'a ExerciseCatalog,
}

impl<'a> PlanGenerator<'a> {
    /// Create a generator over a catalog
    #[must_use]
    pub const fn new(catalog: &'a ExerciseCatalog) -> Self {
        Self { catalog }
    }

    /// How many exercises a day aims for
    #[must_use]
    pub const fn target_exercise_count(experience: ExperienceLevel) -> usize {
        match experience {
            ExperienceLevel::Beginner => 5,
            ExperienceLevel::Intermediate | ExperienceLevel::Advanced => 6,
        }
    }

    /// Generate one workout per training day for the first week
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::AppError::Validation`] when the profile
    /// fails its invariants (frequency out of range).
    pub fn generate_week(&self, profile: &UserProfile) -> AppResult<Vec<GeneratedWorkout>> {
        profile.validate()?;

        let split = Split::for_frequency(profile.frequency_per_week);
        let cycle = split.day_cycle();
        let volume = volume_for(profile.goal, profile.experience_level);
        let eligible = self.catalog.eligible_for(profile);
        let target_count = Self::target_exercise_count(profile.experience_level);

        let workouts = (0..profile.frequency_per_week)
            .map(|day_index| {
                let groups = cycle[usize::from(day_index) % cycle.len()];
                let selected = Self::select_exercises(&eligible, groups, target_count);
                GeneratedWorkout {
                    day_of_week: day_index + 1,
                    workout_type: Self::workout_type_label(groups),
                    target_groups: groups.to_vec(),
                    exercises: selected
                        .into_iter()
                        .map(|slug| GeneratedExercise {
                            exercise_slug: slug,
                            sets: volume.sets,
                            reps_min: volume.reps_min,
                            reps_max: volume.reps_max,
                            rest_seconds: volume.rest_seconds,
                        })
                        .collect(),
                }
            })
            .collect();

        Ok(workouts)
    }

    fn workout_type_label(groups: &[MuscleGroup]) -> String {
        groups
            .iter()
            .map(|group| group.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Two-pass selection: coverage first, then fill by overlap score
    fn select_exercises(
        eligible: &[&crate::models::Exercise],
        groups: &[MuscleGroup],
        target_count: usize,
    ) -> Vec<String> {
        let mut selected: Vec<String> = Vec::with_capacity(target_count);
        let mut used: HashSet<&str> = HashSet::new();

        // Coverage pass: the best unused exercise per target group, in group
        // order. A group with no eligible exercise is skipped silently.
        for group in groups {
            if selected.len() >= target_count {
                break;
            }
            // max_by_key keeps the last maximum; iterate in reverse so the
            // earliest catalog entry wins ties.
            let best = eligible
                .iter()
                .rev()
                .filter(|exercise| {
                    !used.contains(exercise.slug.as_str())
                        && exercise.muscle_groups.contains(group)
                })
                .max_by_key(|exercise| exercise.overlap_with(groups));
            if let Some(exercise) = best {
                used.insert(exercise.slug.as_str());
                selected.push(exercise.slug.clone());
            }
        }

        // Fill pass: remaining slots by descending overlap with the day's
        // targets, catalog order breaking ties.
        while selected.len() < target_count {
            let next = eligible
                .iter()
                .rev()
                .filter(|exercise| {
                    !used.contains(exercise.slug.as_str()) && exercise.overlap_with(groups) > 0
                })
                .max_by_key(|exercise| exercise.overlap_with(groups));
            let Some(exercise) = next else {
                break;
            };
            used.insert(exercise.slug.as_str());
            selected.push(exercise.slug.clone());
        }

        selected
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet as StdHashSet;
    use uuid::Uuid;

    use crate::models::Location;

    fn profile(goal: Goal, frequency: u8, experience: ExperienceLevel) -> UserProfile {
        UserProfile {
            user_id: Uuid::new_v4(),
            goal,
            frequency_per_week: frequency,
            location: Location::Gym,
            experience_level: experience,
            equipment: ["barbell", "bench"].iter().map(|&s| s.into()).collect(),
            limitations: StdHashSet::new(),
            current_week: 1,
        }
    }

    #[test]
    fn split_is_a_pure_function_of_frequency() {
        assert_eq!(Split::for_frequency(2), Split::FullBody);
        assert_eq!(Split::for_frequency(3), Split::UpperLowerFull);
        assert_eq!(Split::for_frequency(4), Split::UpperLower);
        assert_eq!(Split::for_frequency(5), Split::PushPullLegs);
        assert_eq!(Split::for_frequency(6), Split::PushPullLegs);
    }

    #[test]
    fn volume_table_matches_goals() {
        let hypertrophy = volume_for(Goal::GainMuscle, ExperienceLevel::Intermediate);
        assert_eq!(hypertrophy.sets, 4);
        assert_eq!((hypertrophy.reps_min, hypertrophy.reps_max), (8, 12));
        assert_eq!(hypertrophy.rest_seconds, 90);

        let fat_loss = volume_for(Goal::LoseWeight, ExperienceLevel::Advanced);
        assert_eq!((fat_loss.reps_min, fat_loss.reps_max), (12, 15));
        assert_eq!(fat_loss.rest_seconds, 45);

        let maintenance = volume_for(Goal::Maintenance, ExperienceLevel::Intermediate);
        assert_eq!((maintenance.reps_min, maintenance.reps_max), (10, 12));
        assert_eq!(maintenance.rest_seconds, 60);
    }

    #[test]
    fn beginners_get_one_fewer_set() {
        let beginner = volume_for(Goal::GainMuscle, ExperienceLevel::Beginner);
        let seasoned = volume_for(Goal::GainMuscle, ExperienceLevel::Intermediate);
        assert_eq!(beginner.sets + 1, seasoned.sets);
    }

    #[test]
    fn cold_start_scenario_gain_muscle_beginner() {
        let catalog = ExerciseCatalog::builtin();
        let generator = PlanGenerator::new(&catalog);
        let profile = profile(Goal::GainMuscle, 4, ExperienceLevel::Beginner);

        let week = generator.generate_week(&profile).unwrap();

        // Upper/lower split cycled twice across 4 days.
        assert_eq!(week.len(), 4);
        assert_eq!(week[0].workout_type, week[2].workout_type);
        assert_eq!(week[1].workout_type, week[3].workout_type);
        assert!(week[0].workout_type.contains("chest"));
        assert!(week[1].workout_type.contains("quads"));

        for workout in &week {
            assert_eq!(workout.exercises.len(), 5, "{}", workout.workout_type);
            for exercise in &workout.exercises {
                assert_eq!(exercise.sets, 3);
                assert_eq!((exercise.reps_min, exercise.reps_max), (8, 12));
                assert_eq!(exercise.rest_seconds, 90);
            }
        }
    }

    #[test]
    fn coverage_pass_hits_every_group_with_candidates() {
        let catalog = ExerciseCatalog::builtin();
        let generator = PlanGenerator::new(&catalog);
        let profile = profile(Goal::Maintenance, 4, ExperienceLevel::Intermediate);

        let week = generator.generate_week(&profile).unwrap();
        let lower_day = &week[1];

        let covered: StdHashSet<MuscleGroup> = lower_day
            .exercises
            .iter()
            .filter_map(|prescription| catalog.get(&prescription.exercise_slug))
            .flat_map(|exercise| exercise.muscle_groups.iter().copied())
            .collect();
        for group in &lower_day.target_groups {
            assert!(covered.contains(group), "missing {group}");
        }
    }

    #[test]
    fn selection_never_repeats_an_exercise_within_a_day() {
        let catalog = ExerciseCatalog::builtin();
        let generator = PlanGenerator::new(&catalog);
        let profile = profile(Goal::Maintenance, 2, ExperienceLevel::Intermediate);

        let week = generator.generate_week(&profile).unwrap();
        for workout in &week {
            let mut seen = StdHashSet::new();
            for exercise in &workout.exercises {
                assert!(seen.insert(exercise.exercise_slug.clone()));
            }
        }
    }

    #[test]
    fn sparse_equipment_yields_a_shorter_day_without_error() {
        let catalog = ExerciseCatalog::builtin();
        let generator = PlanGenerator::new(&catalog);
        let mut profile = profile(Goal::Maintenance, 5, ExperienceLevel::Advanced);
        profile.equipment.clear();

        // Advanced users skip beginner movements, and with no equipment the
        // pull day has almost nothing left. The day shrinks; it never fails.
        let week = generator.generate_week(&profile).unwrap();
        assert_eq!(week.len(), 5);
        let pull_day = &week[1];
        assert!(pull_day.exercises.len() < 6);
    }
}
