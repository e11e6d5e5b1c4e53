// ABOUTME: Training split definitions, volume table, and plan construction
// ABOUTME: Hosts the cold-start generator and the weekly plan mutator
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Plans
//!
//! [`generator`] builds the first training week from an onboarding profile;
//! [`mutator`] clones a completed week into the next one, applying the
//! adjustment decision, variety swaps, and directional substitutions.

pub mod generator;
pub mod mutator;

pub use generator::{GeneratedExercise, GeneratedWorkout, PlanGenerator, Split, VolumePrescription};
pub use mutator::{AdvanceOutcome, PlanMutator, VARIETY_INTERVAL_WEEKS};
