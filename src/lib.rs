// ABOUTME: Main library entry point for the repkit training plan engine
// ABOUTME: Exposes plan generation, readiness scoring, and weekly adjustment services
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # repkit
//!
//! A rule-based engine for consumer strength training plans: it generates a
//! user's first training week from an onboarding profile, aggregates workout
//! feedback into readiness signals, and applies progressive-overload
//! adjustments when the weekly cron advances a user to the next week.
//!
//! ## Architecture
//!
//! Data flows one direction through the core:
//!
//! - **Catalog** → **Generator** on the cold-start path (first week)
//! - **Aggregator** → **Decision engine** → **Mutator** on the warm path
//!   (weekly cron)
//!
//! The mutator writes back to the same relational store the aggregator reads
//! from. Storage is abstracted behind narrow per-entity repositories
//! ([`database::PlanRepo`], [`database::WorkoutRepo`], ...) so the engine can
//! run against SQLite in production and in-memory fakes in tests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use repkit::config::environment::ServerConfig;
//! use repkit::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("repkit configured against {}", config.database_url);
//!     Ok(())
//! }
//! ```

/// Exercise reference data and eligibility filtering
pub mod catalog;

/// Environment-driven configuration
pub mod config;

/// Repository traits plus SQLite and in-memory backends
pub mod database;

/// Unified error types shared across the crate
pub mod errors;

/// Streaks and achievement unlocks driven by workout completions
pub mod gamification;

/// Readiness scoring and adjustment decision policies
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Domain entities: profiles, plans, workouts, feedback
pub mod models;

/// Plan generation (cold start) and plan mutation (weekly advance)
pub mod plans;

/// Orchestration services wiring repositories to the engine
pub mod services;
