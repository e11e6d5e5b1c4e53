// ABOUTME: Orchestration services wiring repositories to the plan engine
// ABOUTME: Protocol-agnostic: a thin HTTP layer or a cron binary calls these
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Services
//!
//! Protocol-agnostic business logic. Each service takes only the repository
//! traits it needs, so any entry point (REST handler, cron binary, test)
//! gets identical behavior.

/// Workout completion and feedback intake
pub mod feedback;

/// Onboarding: profile storage plus first-week plan generation
pub mod plan_service;

/// The weekly cron: per-user sequential adjustment with partial-failure tolerance
pub mod weekly_adjustment;

pub use feedback::{CompletionEvent, FeedbackService};
pub use plan_service::{PlanDetail, PlanService, WorkoutDetail};
pub use weekly_adjustment::{
    AdjustmentReport, BatchSummary, WeeklyAdjustmentService, TRAILING_WINDOW_DAYS,
};
