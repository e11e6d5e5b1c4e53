// ABOUTME: Exercise catalog seeding utility
// ABOUTME: Writes the built-in catalog into the exercises table, idempotently
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog seeder.
//!
//! Usage:
//! ```bash
//! # Seed the catalog (uses DATABASE_URL from environment)
//! cargo run --bin seed-exercises
//!
//! # Force re-seed (replaces existing data)
//! cargo run --bin seed-exercises -- --force
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use repkit::catalog::ExerciseCatalog;
use repkit::config::ServerConfig;
use repkit::database::SqliteDatabase;
use repkit::logging::LoggingConfig;

#[derive(Parser)]
#[command(
    name = "seed-exercises",
    about = "Seed the repkit exercise catalog",
    long_about = "Populates the exercises table with the built-in catalog of movements"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Force re-seed even if data already exists
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    LoggingConfig::from_env().init();
    let args = SeedArgs::parse();
    let config = ServerConfig::from_env()?;
    let database_url = args.database_url.unwrap_or(config.database_url);

    let db = SqliteDatabase::new(&database_url).await?;
    let existing = db.count_exercises().await?;
    if existing > 0 && !args.force {
        info!(existing, "exercise catalog already seeded, use --force to replace");
        return Ok(());
    }
    if args.force {
        db.clear_exercises().await?;
    }

    let catalog = ExerciseCatalog::builtin();
    for (position, exercise) in catalog.iter().enumerate() {
        db.upsert_exercise(exercise, position as i64).await?;
    }
    info!(count = catalog.len(), "exercise catalog seeded");
    Ok(())
}
