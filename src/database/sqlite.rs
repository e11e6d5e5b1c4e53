// ABOUTME: SQLite repository implementation over an sqlx connection pool
// ABOUTME: Inline migrations; unique (user_id, week_number) index guards idempotency
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # SQLite Backend
//!
//! Parameterized `sqlx::query` calls with explicit binds and typed row
//! mapping; no raw string interpolation. Set-valued columns (equipment,
//! limitations, muscle groups) are stored as JSON text.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{FeedbackRepo, PlanRepo, ProfileRepo, WorkoutRepo};
use crate::errors::{AppError, AppResult};
use crate::models::{
    Exercise, PlanStatus, UserProfile, Workout, WorkoutExercise, WorkoutFeedback, WorkoutPlan,
    WorkoutStatus,
};

/// SQLite-backed implementation of every repository trait
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|err| AppError::internal(format!("malformed uuid: {err}")))
}

impl SqliteDatabase {
    /// Connect and run migrations
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] when the connection or migration fails.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist.
        let connection_options = if database_url.starts_with("sqlite:") && !database_url.contains('?')
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };
        let pool = SqlitePool::connect(&connection_options).await?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Create the schema when it does not exist yet
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] when a DDL statement fails.
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_profiles (
                user_id TEXT PRIMARY KEY,
                goal TEXT NOT NULL,
                frequency_per_week INTEGER NOT NULL,
                location TEXT NOT NULL,
                experience_level TEXT NOT NULL,
                equipment TEXT NOT NULL,
                limitations TEXT NOT NULL,
                current_week INTEGER NOT NULL DEFAULT 1
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                slug TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                muscle_groups TEXT NOT NULL,
                equipment_required TEXT NOT NULL,
                difficulty TEXT NOT NULL,
                contraindications TEXT NOT NULL,
                position INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                week_number INTEGER NOT NULL,
                status TEXT NOT NULL,
                difficulty_multiplier REAL NOT NULL DEFAULT 1.0,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // The actual correctness guarantee for idempotent weekly adjustment.
        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_plans_user_week
             ON workout_plans(user_id, week_number)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                plan_id TEXT NOT NULL,
                day_of_week INTEGER NOT NULL,
                workout_type TEXT NOT NULL,
                status TEXT NOT NULL,
                completed_at TEXT,
                UNIQUE(plan_id, day_of_week),
                FOREIGN KEY (plan_id) REFERENCES workout_plans (id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_exercises (
                id TEXT PRIMARY KEY,
                workout_id TEXT NOT NULL,
                exercise_slug TEXT NOT NULL,
                order_index INTEGER NOT NULL,
                sets INTEGER NOT NULL,
                reps_min INTEGER NOT NULL,
                reps_max INTEGER NOT NULL,
                rest_seconds INTEGER NOT NULL,
                notes TEXT,
                UNIQUE(workout_id, order_index),
                FOREIGN KEY (workout_id) REFERENCES workouts (id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_feedback (
                workout_id TEXT PRIMARY KEY,
                rating TEXT NOT NULL,
                duration_minutes INTEGER,
                notes TEXT,
                submitted_at TEXT NOT NULL,
                FOREIGN KEY (workout_id) REFERENCES workouts (id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ================================
    // Exercise catalog (seed tooling)
    // ================================

    /// Insert or replace a catalog exercise at a given catalog position
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage failure.
    pub async fn upsert_exercise(&self, exercise: &Exercise, position: i64) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO exercises
                (slug, name, muscle_groups, equipment_required, difficulty, contraindications, position)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&exercise.slug)
        .bind(&exercise.name)
        .bind(serde_json::to_string(&exercise.muscle_groups)?)
        .bind(serde_json::to_string(&exercise.equipment_required)?)
        .bind(exercise.difficulty.as_str())
        .bind(serde_json::to_string(&exercise.contraindications)?)
        .bind(position)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// All catalog exercises in seeded order
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage failure.
    pub async fn list_exercises(&self) -> AppResult<Vec<Exercise>> {
        let rows = sqlx::query(
            "SELECT slug, name, muscle_groups, equipment_required, difficulty, contraindications
             FROM exercises ORDER BY position",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(Exercise {
                    slug: row.try_get("slug")?,
                    name: row.try_get("name")?,
                    muscle_groups: serde_json::from_str(row.try_get::<String, _>("muscle_groups")?.as_str())?,
                    equipment_required: serde_json::from_str(
                        row.try_get::<String, _>("equipment_required")?.as_str(),
                    )?,
                    difficulty: row.try_get::<String, _>("difficulty")?.parse()?,
                    contraindications: serde_json::from_str(
                        row.try_get::<String, _>("contraindications")?.as_str(),
                    )?,
                })
            })
            .collect()
    }

    /// Number of seeded catalog exercises
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage failure.
    pub async fn count_exercises(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM exercises")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }

    /// Delete all seeded catalog exercises (used by forced re-seeds)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on storage failure.
    pub async fn clear_exercises(&self) -> AppResult<()> {
        sqlx::query("DELETE FROM exercises")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn map_plan(row: &sqlx::sqlite::SqliteRow) -> AppResult<WorkoutPlan> {
        Ok(WorkoutPlan {
            id: parse_uuid(row.try_get::<String, _>("id")?.as_str())?,
            user_id: parse_uuid(row.try_get::<String, _>("user_id")?.as_str())?,
            week_number: row.try_get::<i64, _>("week_number")? as u32,
            status: row.try_get::<String, _>("status")?.parse()?,
            difficulty_multiplier: row.try_get("difficulty_multiplier")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn map_workout(row: &sqlx::sqlite::SqliteRow) -> AppResult<Workout> {
        Ok(Workout {
            id: parse_uuid(row.try_get::<String, _>("id")?.as_str())?,
            plan_id: parse_uuid(row.try_get::<String, _>("plan_id")?.as_str())?,
            day_of_week: row.try_get::<i64, _>("day_of_week")? as u8,
            workout_type: row.try_get("workout_type")?,
            status: row.try_get::<String, _>("status")?.parse()?,
            completed_at: row.try_get("completed_at")?,
        })
    }

    fn map_exercise_row(row: &sqlx::sqlite::SqliteRow) -> AppResult<WorkoutExercise> {
        Ok(WorkoutExercise {
            id: parse_uuid(row.try_get::<String, _>("id")?.as_str())?,
            workout_id: parse_uuid(row.try_get::<String, _>("workout_id")?.as_str())?,
            exercise_slug: row.try_get("exercise_slug")?,
            order_index: row.try_get::<i64, _>("order_index")? as u32,
            sets: row.try_get::<i64, _>("sets")? as u32,
            reps_min: row.try_get::<i64, _>("reps_min")? as u32,
            reps_max: row.try_get::<i64, _>("reps_max")? as u32,
            rest_seconds: row.try_get::<i64, _>("rest_seconds")? as u32,
            notes: row.try_get("notes")?,
        })
    }

    fn map_feedback(row: &sqlx::sqlite::SqliteRow) -> AppResult<WorkoutFeedback> {
        let duration: Option<i64> = row.try_get("duration_minutes")?;
        Ok(WorkoutFeedback {
            workout_id: parse_uuid(row.try_get::<String, _>("workout_id")?.as_str())?,
            rating: row.try_get::<String, _>("rating")?.parse()?,
            duration_minutes: duration.map(|minutes| minutes as u32),
            notes: row.try_get("notes")?,
            submitted_at: row.try_get("submitted_at")?,
        })
    }
}

#[async_trait]
impl ProfileRepo for SqliteDatabase {
    async fn upsert_profile(&self, profile: &UserProfile) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO user_profiles
                (user_id, goal, frequency_per_week, location, experience_level,
                 equipment, limitations, current_week)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(profile.user_id.to_string())
        .bind(profile.goal.as_str())
        .bind(i64::from(profile.frequency_per_week))
        .bind(profile.location.as_str())
        .bind(profile.experience_level.as_str())
        .bind(serde_json::to_string(&profile.equipment)?)
        .bind(serde_json::to_string(&profile.limitations)?)
        .bind(i64::from(profile.current_week))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query(
            "SELECT user_id, goal, frequency_per_week, location, experience_level,
                    equipment, limitations, current_week
             FROM user_profiles WHERE user_id = ?",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            Ok(UserProfile {
                user_id: parse_uuid(row.try_get::<String, _>("user_id")?.as_str())?,
                goal: row.try_get::<String, _>("goal")?.parse()?,
                frequency_per_week: row.try_get::<i64, _>("frequency_per_week")? as u8,
                location: row.try_get::<String, _>("location")?.parse()?,
                experience_level: row.try_get::<String, _>("experience_level")?.parse()?,
                equipment: serde_json::from_str(row.try_get::<String, _>("equipment")?.as_str())?,
                limitations: serde_json::from_str(
                    row.try_get::<String, _>("limitations")?.as_str(),
                )?,
                current_week: row.try_get::<i64, _>("current_week")? as u32,
            })
        })
        .transpose()
    }

    async fn set_current_week(&self, user_id: Uuid, week_number: u32) -> AppResult<()> {
        sqlx::query("UPDATE user_profiles SET current_week = ? WHERE user_id = ?")
            .bind(i64::from(week_number))
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PlanRepo for SqliteDatabase {
    async fn insert_plan_if_absent(&self, plan: &WorkoutPlan) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO workout_plans
                (id, user_id, week_number, status, difficulty_multiplier, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, week_number) DO NOTHING
            ",
        )
        .bind(plan.id.to_string())
        .bind(plan.user_id.to_string())
        .bind(i64::from(plan.week_number))
        .bind(plan.status.as_str())
        .bind(plan.difficulty_multiplier)
        .bind(plan.created_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_plan(&self, user_id: Uuid, week_number: u32) -> AppResult<Option<WorkoutPlan>> {
        let row = sqlx::query(
            "SELECT id, user_id, week_number, status, difficulty_multiplier, created_at
             FROM workout_plans WHERE user_id = ? AND week_number = ?",
        )
        .bind(user_id.to_string())
        .bind(i64::from(week_number))
        .fetch_optional(&self.pool)
        .await?;
        row.map(|row| Self::map_plan(&row)).transpose()
    }

    async fn set_plan_status(&self, plan_id: Uuid, status: PlanStatus) -> AppResult<()> {
        sqlx::query("UPDATE workout_plans SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(plan_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn users_with_active_plan(&self, week_number: u32) -> AppResult<Vec<Uuid>> {
        // Stable ordering keeps seeded batch runs reproducible.
        let rows = sqlx::query(
            "SELECT user_id FROM workout_plans WHERE week_number = ? AND status = ?
             ORDER BY user_id",
        )
        .bind(i64::from(week_number))
        .bind(PlanStatus::Active.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| parse_uuid(row.try_get::<String, _>("user_id")?.as_str()))
            .collect()
    }
}

#[async_trait]
impl WorkoutRepo for SqliteDatabase {
    async fn insert_workout(&self, workout: &Workout) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO workouts (id, plan_id, day_of_week, workout_type, status, completed_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(workout.id.to_string())
        .bind(workout.plan_id.to_string())
        .bind(i64::from(workout.day_of_week))
        .bind(&workout.workout_type)
        .bind(workout.status.as_str())
        .bind(workout.completed_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_exercises(&self, exercises: &[WorkoutExercise]) -> AppResult<()> {
        for exercise in exercises {
            sqlx::query(
                r"
                INSERT INTO workout_exercises
                    (id, workout_id, exercise_slug, order_index, sets,
                     reps_min, reps_max, rest_seconds, notes)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(exercise.id.to_string())
            .bind(exercise.workout_id.to_string())
            .bind(&exercise.exercise_slug)
            .bind(i64::from(exercise.order_index))
            .bind(i64::from(exercise.sets))
            .bind(i64::from(exercise.reps_min))
            .bind(i64::from(exercise.reps_max))
            .bind(i64::from(exercise.rest_seconds))
            .bind(exercise.notes.as_deref())
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    async fn get_workout(&self, workout_id: Uuid) -> AppResult<Option<Workout>> {
        let row = sqlx::query(
            "SELECT id, plan_id, day_of_week, workout_type, status, completed_at
             FROM workouts WHERE id = ?",
        )
        .bind(workout_id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.map(|row| Self::map_workout(&row)).transpose()
    }

    async fn workouts_for_plan(&self, plan_id: Uuid) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query(
            "SELECT id, plan_id, day_of_week, workout_type, status, completed_at
             FROM workouts WHERE plan_id = ? ORDER BY day_of_week",
        )
        .bind(plan_id.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(Self::map_workout).collect()
    }

    async fn exercises_for_workout(&self, workout_id: Uuid) -> AppResult<Vec<WorkoutExercise>> {
        let rows = sqlx::query(
            "SELECT id, workout_id, exercise_slug, order_index, sets,
                    reps_min, reps_max, rest_seconds, notes
             FROM workout_exercises WHERE workout_id = ? ORDER BY order_index",
        )
        .bind(workout_id.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(Self::map_exercise_row).collect()
    }

    async fn complete_workout(
        &self,
        workout_id: Uuid,
        completed_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE workouts SET status = ?, completed_at = ?
             WHERE id = ? AND status != ?",
        )
        .bind(WorkoutStatus::Completed.as_str())
        .bind(completed_at)
        .bind(workout_id.to_string())
        .bind(WorkoutStatus::Completed.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn completions_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<DateTime<Utc>>> {
        let rows = sqlx::query(
            r"
            SELECT w.completed_at FROM workouts w
            JOIN workout_plans p ON p.id = w.plan_id
            WHERE p.user_id = ? AND w.completed_at IS NOT NULL AND w.completed_at >= ?
            ORDER BY w.completed_at
            ",
        )
        .bind(user_id.to_string())
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| Ok(row.try_get::<DateTime<Utc>, _>("completed_at")?))
            .collect()
    }
}

#[async_trait]
impl FeedbackRepo for SqliteDatabase {
    async fn upsert_feedback(&self, feedback: &WorkoutFeedback) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO workout_feedback
                (workout_id, rating, duration_minutes, notes, submitted_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(workout_id) DO UPDATE SET
                rating = excluded.rating,
                duration_minutes = excluded.duration_minutes,
                notes = excluded.notes,
                submitted_at = excluded.submitted_at
            ",
        )
        .bind(feedback.workout_id.to_string())
        .bind(feedback.rating.as_str())
        .bind(feedback.duration_minutes.map(i64::from))
        .bind(feedback.notes.as_deref())
        .bind(feedback.submitted_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_feedback(&self, workout_id: Uuid) -> AppResult<Option<WorkoutFeedback>> {
        let row = sqlx::query(
            "SELECT workout_id, rating, duration_minutes, notes, submitted_at
             FROM workout_feedback WHERE workout_id = ?",
        )
        .bind(workout_id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.map(|row| Self::map_feedback(&row)).transpose()
    }

    async fn feedback_for_workouts(
        &self,
        workout_ids: &[Uuid],
    ) -> AppResult<Vec<WorkoutFeedback>> {
        let mut out = Vec::with_capacity(workout_ids.len());
        for workout_id in workout_ids {
            if let Some(feedback) = self.get_feedback(*workout_id).await? {
                out.push(feedback);
            }
        }
        Ok(out)
    }
}
