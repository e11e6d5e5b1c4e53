// ABOUTME: Seeded exercise catalog with eligibility filtering and swap lookups
// ABOUTME: Static reference data consumed by the plan generator and mutator
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Exercise Catalog
//!
//! The catalog is immutable reference data: every exercise carries muscle
//! groups, required equipment, a difficulty tier, and contraindication tags.
//! Catalog order is significant; it breaks ties during exercise selection, so
//! the built-in list keeps common movements ahead of specialty variations.

use std::collections::HashSet;

use crate::models::{Difficulty, Exercise, ExperienceLevel, MuscleGroup, UserProfile};

/// Equipment tag that every user implicitly has
pub const BODYWEIGHT: &str = "bodyweight";

struct CatalogEntry {
    slug: &'static str,
    name: &'static str,
    muscle_groups: &'static [MuscleGroup],
    equipment: &'static [&'static str],
    difficulty: Difficulty,
    contraindications: &'static [&'static str],
}

use MuscleGroup::{
    Back, Biceps, Calves, Chest, Core, Glutes, Hamstrings, Quads, Shoulders, Triceps,
};

const BUILTIN_EXERCISES: &[CatalogEntry] = &[
    // Push
    CatalogEntry {
        slug: "push-up",
        name: "Push-Up",
        muscle_groups: &[Chest, Triceps, Shoulders],
        equipment: &[BODYWEIGHT],
        difficulty: Difficulty::Beginner,
        contraindications: &["wrist"],
    },
    CatalogEntry {
        slug: "incline-push-up",
        name: "Incline Push-Up",
        muscle_groups: &[Chest, Shoulders],
        equipment: &[BODYWEIGHT],
        difficulty: Difficulty::Beginner,
        contraindications: &[],
    },
    CatalogEntry {
        slug: "barbell-bench-press",
        name: "Barbell Bench Press",
        muscle_groups: &[Chest, Triceps],
        equipment: &["barbell", "bench"],
        difficulty: Difficulty::Intermediate,
        contraindications: &["shoulder"],
    },
    CatalogEntry {
        slug: "dumbbell-bench-press",
        name: "Dumbbell Bench Press",
        muscle_groups: &[Chest, Triceps],
        equipment: &["dumbbells", "bench"],
        difficulty: Difficulty::Intermediate,
        contraindications: &["shoulder"],
    },
    CatalogEntry {
        slug: "dumbbell-fly",
        name: "Dumbbell Fly",
        muscle_groups: &[Chest],
        equipment: &["dumbbells", "bench"],
        difficulty: Difficulty::Intermediate,
        contraindications: &["shoulder"],
    },
    // Pull
    CatalogEntry {
        slug: "barbell-row",
        name: "Barbell Row",
        muscle_groups: &[Back, Biceps],
        equipment: &["barbell"],
        difficulty: Difficulty::Intermediate,
        contraindications: &["lower_back"],
    },
    CatalogEntry {
        slug: "dumbbell-row",
        name: "One-Arm Dumbbell Row",
        muscle_groups: &[Back, Biceps],
        equipment: &["dumbbells"],
        difficulty: Difficulty::Beginner,
        contraindications: &[],
    },
    CatalogEntry {
        slug: "inverted-row",
        name: "Inverted Row",
        muscle_groups: &[Back, Biceps],
        equipment: &[BODYWEIGHT],
        difficulty: Difficulty::Beginner,
        contraindications: &[],
    },
    CatalogEntry {
        slug: "pull-up",
        name: "Pull-Up",
        muscle_groups: &[Back, Biceps],
        equipment: &["pullup_bar"],
        difficulty: Difficulty::Advanced,
        contraindications: &["shoulder"],
    },
    CatalogEntry {
        slug: "lat-pulldown",
        name: "Lat Pulldown",
        muscle_groups: &[Back, Biceps],
        equipment: &["cable_machine"],
        difficulty: Difficulty::Beginner,
        contraindications: &[],
    },
    // Shoulders
    CatalogEntry {
        slug: "overhead-press",
        name: "Overhead Press",
        muscle_groups: &[Shoulders, Triceps],
        equipment: &["barbell"],
        difficulty: Difficulty::Intermediate,
        contraindications: &["shoulder"],
    },
    CatalogEntry {
        slug: "dumbbell-shoulder-press",
        name: "Dumbbell Shoulder Press",
        muscle_groups: &[Shoulders, Triceps],
        equipment: &["dumbbells"],
        difficulty: Difficulty::Beginner,
        contraindications: &["shoulder"],
    },
    CatalogEntry {
        slug: "lateral-raise",
        name: "Lateral Raise",
        muscle_groups: &[Shoulders],
        equipment: &["dumbbells"],
        difficulty: Difficulty::Beginner,
        contraindications: &[],
    },
    // Arms
    CatalogEntry {
        slug: "barbell-curl",
        name: "Barbell Curl",
        muscle_groups: &[Biceps],
        equipment: &["barbell"],
        difficulty: Difficulty::Beginner,
        contraindications: &[],
    },
    CatalogEntry {
        slug: "dumbbell-curl",
        name: "Dumbbell Curl",
        muscle_groups: &[Biceps],
        equipment: &["dumbbells"],
        difficulty: Difficulty::Beginner,
        contraindications: &[],
    },
    CatalogEntry {
        slug: "bench-dip",
        name: "Bench Dip",
        muscle_groups: &[Triceps, Chest],
        equipment: &["bench"],
        difficulty: Difficulty::Beginner,
        contraindications: &["shoulder", "wrist"],
    },
    CatalogEntry {
        slug: "triceps-pushdown",
        name: "Triceps Pushdown",
        muscle_groups: &[Triceps],
        equipment: &["cable_machine"],
        difficulty: Difficulty::Beginner,
        contraindications: &[],
    },
    CatalogEntry {
        slug: "close-grip-bench-press",
        name: "Close-Grip Bench Press",
        muscle_groups: &[Triceps, Chest],
        equipment: &["barbell", "bench"],
        difficulty: Difficulty::Advanced,
        contraindications: &["shoulder"],
    },
    // Legs
    CatalogEntry {
        slug: "bodyweight-squat",
        name: "Bodyweight Squat",
        muscle_groups: &[Quads, Glutes],
        equipment: &[BODYWEIGHT],
        difficulty: Difficulty::Beginner,
        contraindications: &["knee"],
    },
    CatalogEntry {
        slug: "barbell-back-squat",
        name: "Barbell Back Squat",
        muscle_groups: &[Quads, Glutes],
        equipment: &["barbell"],
        difficulty: Difficulty::Intermediate,
        contraindications: &["knee", "lower_back"],
    },
    CatalogEntry {
        slug: "goblet-squat",
        name: "Goblet Squat",
        muscle_groups: &[Quads, Glutes, Core],
        equipment: &["dumbbells"],
        difficulty: Difficulty::Beginner,
        contraindications: &["knee"],
    },
    CatalogEntry {
        slug: "walking-lunge",
        name: "Walking Lunge",
        muscle_groups: &[Quads, Glutes],
        equipment: &[BODYWEIGHT],
        difficulty: Difficulty::Beginner,
        contraindications: &["knee"],
    },
    CatalogEntry {
        slug: "leg-press",
        name: "Leg Press",
        muscle_groups: &[Quads, Glutes],
        equipment: &["leg_press_machine"],
        difficulty: Difficulty::Beginner,
        contraindications: &["knee"],
    },
    CatalogEntry {
        slug: "romanian-deadlift",
        name: "Romanian Deadlift",
        muscle_groups: &[Hamstrings, Glutes],
        equipment: &["barbell"],
        difficulty: Difficulty::Intermediate,
        contraindications: &["lower_back"],
    },
    CatalogEntry {
        slug: "conventional-deadlift",
        name: "Conventional Deadlift",
        muscle_groups: &[Hamstrings, Glutes, Back],
        equipment: &["barbell"],
        difficulty: Difficulty::Advanced,
        contraindications: &["lower_back"],
    },
    CatalogEntry {
        slug: "glute-bridge",
        name: "Glute Bridge",
        muscle_groups: &[Glutes, Hamstrings],
        equipment: &[BODYWEIGHT],
        difficulty: Difficulty::Beginner,
        contraindications: &[],
    },
    CatalogEntry {
        slug: "hamstring-curl",
        name: "Hamstring Curl",
        muscle_groups: &[Hamstrings],
        equipment: &["leg_curl_machine"],
        difficulty: Difficulty::Beginner,
        contraindications: &[],
    },
    CatalogEntry {
        slug: "step-up",
        name: "Step-Up",
        muscle_groups: &[Quads, Glutes],
        equipment: &["bench"],
        difficulty: Difficulty::Beginner,
        contraindications: &["knee"],
    },
    CatalogEntry {
        slug: "pistol-squat",
        name: "Pistol Squat",
        muscle_groups: &[Quads, Glutes, Core],
        equipment: &[BODYWEIGHT],
        difficulty: Difficulty::Advanced,
        contraindications: &["knee"],
    },
    // Calves and core
    CatalogEntry {
        slug: "standing-calf-raise",
        name: "Standing Calf Raise",
        muscle_groups: &[Calves],
        equipment: &[BODYWEIGHT],
        difficulty: Difficulty::Beginner,
        contraindications: &[],
    },
    CatalogEntry {
        slug: "plank",
        name: "Plank",
        muscle_groups: &[Core],
        equipment: &[BODYWEIGHT],
        difficulty: Difficulty::Beginner,
        contraindications: &[],
    },
    CatalogEntry {
        slug: "russian-twist",
        name: "Russian Twist",
        muscle_groups: &[Core],
        equipment: &[BODYWEIGHT],
        difficulty: Difficulty::Beginner,
        contraindications: &["lower_back"],
    },
    CatalogEntry {
        slug: "bicycle-crunch",
        name: "Bicycle Crunch",
        muscle_groups: &[Core],
        equipment: &[BODYWEIGHT],
        difficulty: Difficulty::Beginner,
        contraindications: &[],
    },
    CatalogEntry {
        slug: "hanging-leg-raise",
        name: "Hanging Leg Raise",
        muscle_groups: &[Core],
        equipment: &["pullup_bar"],
        difficulty: Difficulty::Advanced,
        contraindications: &["lower_back"],
    },
];

/// The exercise catalog, ordered reference data for selection and swaps
#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    exercises: Vec<Exercise>,
}

impl ExerciseCatalog {
    /// Build the built-in seeded catalog
    #[must_use]
    pub fn builtin() -> Self {
        let exercises = BUILTIN_EXERCISES
            .iter()
            .map(|entry| Exercise {
                slug: entry.slug.into(),
                name: entry.name.into(),
                muscle_groups: entry.muscle_groups.to_vec(),
                equipment_required: entry.equipment.iter().map(|&item| item.into()).collect(),
                difficulty: entry.difficulty,
                contraindications: entry
                    .contraindications
                    .iter()
                    .map(|&tag| tag.into())
                    .collect(),
            })
            .collect();
        Self { exercises }
    }

    /// Build a catalog from pre-loaded exercises, preserving their order
    #[must_use]
    pub fn from_exercises(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    /// Look up an exercise by slug
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|exercise| exercise.slug == slug)
    }

    /// All exercises in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.iter()
    }

    /// Number of exercises in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// True when the catalog holds no exercises
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Exercises a profile may be prescribed, in catalog order
    ///
    /// An exercise is eligible iff every required-equipment item is either
    /// bodyweight or owned by the user, none of its contraindication tags
    /// match the user's limitations, and its difficulty tier is compatible
    /// with the user's experience. Adding equipment to a profile can only
    /// grow this set.
    #[must_use]
    pub fn eligible_for(&self, profile: &UserProfile) -> Vec<&Exercise> {
        self.exercises
            .iter()
            .filter(|exercise| Self::is_eligible(exercise, profile))
            .collect()
    }

    fn is_eligible(exercise: &Exercise, profile: &UserProfile) -> bool {
        let equipment_ok = exercise
            .equipment_required
            .iter()
            .all(|item| item == BODYWEIGHT || profile.equipment.contains(item));
        if !equipment_ok {
            return false;
        }

        let contraindicated = exercise
            .contraindications
            .iter()
            .any(|tag| profile.limitations.contains(tag));
        if contraindicated {
            return false;
        }

        Self::difficulty_compatible(exercise.difficulty, profile.experience_level)
    }

    /// Beginners never see advanced movements; advanced users skip the
    /// beginner tier; intermediates see everything.
    const fn difficulty_compatible(difficulty: Difficulty, experience: ExperienceLevel) -> bool {
        match experience {
            ExperienceLevel::Beginner => !matches!(difficulty, Difficulty::Advanced),
            ExperienceLevel::Intermediate => true,
            ExperienceLevel::Advanced => !matches!(difficulty, Difficulty::Beginner),
        }
    }

    /// Best replacement sharing at least one muscle group with `current`
    ///
    /// Candidates must not appear in `used`, and when `target_difficulty` is
    /// set, must sit exactly on that tier. Ranking is by shared-muscle-group
    /// count, descending, ties broken by catalog order. Returns `None` when
    /// no candidate exists; callers leave the original exercise untouched.
    #[must_use]
    pub fn find_replacement(
        &self,
        current: &Exercise,
        used: &HashSet<String>,
        target_difficulty: Option<Difficulty>,
    ) -> Option<&Exercise> {
        self.exercises
            .iter()
            .filter(|candidate| {
                candidate.slug != current.slug
                    && !used.contains(&candidate.slug)
                    && candidate.shares_muscle_group(current)
                    && target_difficulty.is_none_or(|tier| candidate.difficulty == tier)
            })
            .max_by_key(|candidate| {
                // max_by_key keeps the last maximum; negate the index so
                // earlier catalog entries win ties.
                let position = self
                    .exercises
                    .iter()
                    .position(|exercise| exercise.slug == candidate.slug)
                    .unwrap_or(usize::MAX);
                (
                    candidate.overlap_with(&current.muscle_groups),
                    usize::MAX - position,
                )
            })
    }
}
