// ABOUTME: Administrator account database operations
// ABOUTME: Handles admin creation and lookup by email for session issuing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use super::{format_timestamp, is_unique_violation, parse_timestamp, AdminUserRepository, Database};
use crate::errors::{AppError, AppResult};
use crate::models::AdminUser;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

fn row_to_admin_user(row: &SqliteRow) -> AppResult<AdminUser> {
    Ok(AdminUser {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: parse_timestamp(row.try_get("created_at")?)?,
    })
}

#[async_trait]
impl AdminUserRepository for Database {
    async fn create_admin_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<AdminUser> {
        sqlx::query(
            r"
            INSERT INTO admin_users (name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict(format!("Admin user {email} already exists"))
            } else {
                AppError::database(format!("Failed to create admin user: {e}"))
            }
        })?;

        self.find_admin_by_email(email)
            .await?
            .ok_or_else(|| AppError::internal("Admin user vanished after insert"))
    }

    async fn find_admin_by_email(&self, email: &str) -> AppResult<Option<AdminUser>> {
        sqlx::query(
            "SELECT id, name, email, password_hash, created_at FROM admin_users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get admin user: {e}")))?
        .as_ref()
        .map(row_to_admin_user)
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_admin_email_is_unique() {
        let db = Database::in_memory().await.unwrap();
        db.create_admin_user("Desk", "desk@gympoint.test", "hash")
            .await
            .unwrap();

        let error = db
            .create_admin_user("Desk 2", "desk@gympoint.test", "hash")
            .await
            .unwrap_err();
        assert_eq!(error.code, crate::errors::ErrorCode::ResourceConflict);
    }
}
