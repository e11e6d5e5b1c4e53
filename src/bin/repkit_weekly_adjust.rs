// ABOUTME: Cron entry point running the weekly progressive-overload batch
// ABOUTME: Lists users with an active plan for the week and adjusts each
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weekly adjustment runner.
//!
//! Usage:
//! ```bash
//! # Adjust everyone who just finished week 3
//! cargo run --bin repkit-weekly-adjust -- --week 3
//!
//! # Reproducible variety swaps
//! cargo run --bin repkit-weekly-adjust -- --week 3 --seed 42
//! ```

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use rand::RngCore;
use tracing::info;

use repkit::catalog::ExerciseCatalog;
use repkit::config::ServerConfig;
use repkit::database::SqliteDatabase;
use repkit::intelligence::FeedbackRatioStrategy;
use repkit::logging::LoggingConfig;
use repkit::services::WeeklyAdjustmentService;

#[derive(Parser)]
#[command(
    name = "repkit-weekly-adjust",
    about = "Run the weekly plan adjustment batch",
    long_about = "Adjusts every user with an active plan for the completed week, \
                  creating next week's plan from their feedback."
)]
struct AdjustArgs {
    /// The training week users just completed
    #[arg(long)]
    week: u32,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Seed for the variety-swap RNG (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    LoggingConfig::from_env().init();
    let args = AdjustArgs::parse();
    let config = ServerConfig::from_env()?;
    let database_url = args.database_url.unwrap_or(config.database_url);

    let db = SqliteDatabase::new(&database_url).await?;
    let seeded = db.list_exercises().await?;
    let catalog = if seeded.is_empty() {
        info!("exercise table empty, using built-in catalog");
        ExerciseCatalog::builtin()
    } else {
        ExerciseCatalog::from_exercises(seeded)
    };

    let db = Arc::new(db);
    let service = WeeklyAdjustmentService::new(
        db.clone(),
        db.clone(),
        db.clone(),
        db.clone(),
        Arc::new(catalog),
        Arc::new(FeedbackRatioStrategy),
    );

    let seed = args
        .seed
        .or(config.adjustment_seed)
        .unwrap_or_else(|| rand::thread_rng().next_u64());
    let summary = service.run_week(args.week, seed).await?;

    info!(
        processed = summary.processed,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "batch complete"
    );
    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
