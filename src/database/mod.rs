// ABOUTME: Database management with sqlx SQLite pool, schema migration, and repositories
// ABOUTME: Stores students, plans, enrollments, and admin users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

//! # Database Management
//!
//! The store is the sole writer of persisted state. Timestamps are kept as
//! fixed-width RFC 3339 UTC text with millisecond precision, so comparing the
//! text compares the instants.

mod admin_users;
mod enrollments;
mod plans;
/// Repository traits the services are written against
pub mod repositories;
mod students;

pub use repositories::{
    AdminUserRepository, EnrollmentRepository, NewEnrollment, PlanRepository, StudentRepository,
};

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::info;

/// Text format used for every persisted timestamp
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Render a timestamp for storage
pub(crate) fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp
pub(crate) fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid stored timestamp '{raw}': {e}")))
}

/// Database manager for the gym domain
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open the database and run migrations
    ///
    /// In-memory databases are held on a single connection that never
    /// expires, otherwise each pooled connection would see its own empty
    /// database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or the migration fails
    pub async fn new(url: &DatabaseUrl, max_connections: u32) -> Result<Self> {
        if let DatabaseUrl::SQLite { path } = url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::from_str(&url.to_connection_string())
            .context("Invalid database URL")?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to {url}"))?;

        let db = Self { pool };
        db.migrate().await?;

        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Open a fresh in-memory database
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or the migration fails
    pub async fn in_memory() -> Result<Self> {
        Self::new(&DatabaseUrl::Memory, 1).await
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Check that the database answers queries
    ///
    /// # Errors
    ///
    /// Returns a database error if the ping fails
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_students().await?;
        self.migrate_plans().await?;
        self.migrate_enrollments().await?;
        self.migrate_admin_users().await?;
        Ok(())
    }

    async fn migrate_students(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS students (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                name_folded TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                age INTEGER NOT NULL,
                weight REAL NOT NULL,
                height REAL NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create students table")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_students_name ON students(name)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn migrate_plans(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS plans (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                length INTEGER NOT NULL CHECK (length >= 1),
                price REAL NOT NULL CHECK (price >= 0),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create plans table")?;

        Ok(())
    }

    async fn migrate_enrollments(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS enrollments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                student_id INTEGER NOT NULL REFERENCES students(id),
                plan_id INTEGER NOT NULL REFERENCES plans(id),
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                price REAL NOT NULL,
                canceled_at TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create enrollments table")?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_enrollments_student_period ON enrollments(student_id, start_date, end_date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn migrate_admin_users(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS admin_users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create admin_users table")?;

        Ok(())
    }
}

/// Whether a sqlx error is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_text_is_fixed_width() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 10, 23, 59, 59).unwrap();
        assert_eq!(format_timestamp(instant), "2024-01-10T23:59:59.000Z");
    }

    #[test]
    fn test_timestamp_round_trip_keeps_millis() {
        let instant = crate::models::end_of_day(chrono::NaiveDate::from_ymd_opt(2024, 4, 10).unwrap())
            .unwrap();
        let parsed = parse_timestamp(&format_timestamp(instant)).unwrap();
        assert_eq!(parsed, instant);
    }

    #[tokio::test]
    async fn test_in_memory_migration_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db.ping().await.unwrap();
    }
}
