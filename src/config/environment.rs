// ABOUTME: Environment-variable configuration for binaries and services
// ABOUTME: DATABASE_URL plus weekly-adjustment knobs with sane defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::env;

use crate::errors::{AppError, AppResult};

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/repkit.db";

/// Runtime configuration assembled from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite connection string
    pub database_url: String,
    /// Seed for the variety-swap RNG; random batches when unset
    pub adjustment_seed: Option<u64>,
}

impl ServerConfig {
    /// Read configuration from environment variables
    ///
    /// `DATABASE_URL` defaults to [`DEFAULT_DATABASE_URL`];
    /// `ADJUSTMENT_SEED`, when set, must parse as an unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when `ADJUSTMENT_SEED` is set but
    /// not a valid unsigned integer.
    pub fn from_env() -> AppResult<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());
        let adjustment_seed = match env::var("ADJUSTMENT_SEED") {
            Ok(raw) => Some(raw.parse::<u64>().map_err(|err| {
                AppError::validation(format!("ADJUSTMENT_SEED must be an unsigned integer: {err}"))
            })?),
            Err(_) => None,
        };
        Ok(Self {
            database_url,
            adjustment_seed,
        })
    }
}
