// ABOUTME: Readiness scoring and progressive-overload decision policies
// ABOUTME: Pure functions over history; repositories stay at the service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Intelligence
//!
//! Two cooperating pieces:
//!
//! - [`readiness`] turns a user's workout and feedback history into a
//!   `ReadinessScore`, a weighted 0-100 aggregate of completion, feedback
//!   sentiment, consistency, and recovery signals.
//! - [`adjustment`] maps that history to a concrete [`adjustment::PlanAdjustment`].
//!   Two policies exist and are deliberately kept apart: the canonical
//!   feedback-ratio policy used by the weekly cron, and the readiness-table
//!   policy ("v2") with graduated volume and intensity steps. Their
//!   thresholds differ and are never merged.

pub mod adjustment;
pub mod readiness;

pub use adjustment::{
    AdjustmentAction, AdjustmentInput, AdjustmentStrategy, FeedbackRatioAdjustment,
    FeedbackRatioStrategy, PlanAdjustment, ReadinessStrategy, VolumeAdjustment,
    EASY_RATIO_THRESHOLD, HARD_RATIO_THRESHOLD, MIN_FEEDBACK_FOR_ADJUSTMENT,
};
pub use readiness::{ReadinessAggregator, ReadinessScore};
