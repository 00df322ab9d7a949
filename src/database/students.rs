// ABOUTME: Student database operations
// ABOUTME: Handles student creation, lookup, name search with pagination, and partial updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use super::{format_timestamp, is_unique_violation, parse_timestamp, Database, StudentRepository};
use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::models::Student;
use crate::validation::{ValidStudent, ValidStudentUpdate};
use async_trait::async_trait;
use chrono::Utc;
use gympoint_core::pagination::PageRequest;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

const STUDENT_COLUMNS: &str = "id, name, email, age, weight, height, created_at, updated_at";

/// Escape LIKE wildcards so they match literally with `ESCAPE '\'`
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Unicode lowercase form used for name search
fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

fn row_to_student(row: &SqliteRow) -> AppResult<Student> {
    Ok(Student {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        age: row.try_get("age")?,
        weight: row.try_get("weight")?,
        height: row.try_get("height")?,
        created_at: parse_timestamp(row.try_get("created_at")?)?,
        updated_at: parse_timestamp(row.try_get("updated_at")?)?,
    })
}

#[async_trait]
impl StudentRepository for Database {
    async fn create_student(&self, student: &ValidStudent) -> AppResult<Student> {
        let now = format_timestamp(Utc::now());

        let result = sqlx::query(
            r"
            INSERT INTO students (name, name_folded, email, age, weight, height, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            ",
        )
        .bind(&student.name)
        .bind(fold_name(&student.name))
        .bind(&student.email)
        .bind(student.age)
        .bind(student.weight)
        .bind(student.height)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict(messages::EMAIL_ALREADY_REGISTERED)
            } else {
                AppError::database(format!("Failed to create student: {e}"))
            }
        })?;

        self.find_student(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::internal("Student vanished after insert"))
    }

    async fn find_student(&self, id: i64) -> AppResult<Option<Student>> {
        sqlx::query(&format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get student: {e}")))?
            .as_ref()
            .map(row_to_student)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Student>> {
        sqlx::query(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get student by email: {e}")))?
        .as_ref()
        .map(row_to_student)
        .transpose()
    }

    async fn list_students(&self, page: PageRequest) -> AppResult<Vec<Student>> {
        let rows = sqlx::query(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY name ASC, id ASC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list students: {e}")))?;

        rows.iter().map(row_to_student).collect()
    }

    async fn search_by_name(&self, substring: &str, page: PageRequest) -> AppResult<Vec<Student>> {
        let pattern = format!("%{}%", escape_like(&fold_name(substring)));

        // SQLite only folds ASCII, so both sides are lowercased up front
        let rows = sqlx::query(&format!(
            r"
            SELECT {STUDENT_COLUMNS} FROM students
            WHERE name_folded LIKE $1 ESCAPE '\'
            ORDER BY name ASC, id ASC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(&pattern)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to search students: {e}")))?;

        rows.iter().map(row_to_student).collect()
    }

    async fn update_student(
        &self,
        id: i64,
        changes: &ValidStudentUpdate,
    ) -> AppResult<Option<Student>> {
        let result = sqlx::query(
            r"
            UPDATE students SET
                name = COALESCE($1, name),
                name_folded = COALESCE($2, name_folded),
                email = COALESCE($3, email),
                age = COALESCE($4, age),
                weight = COALESCE($5, weight),
                height = COALESCE($6, height),
                updated_at = $7
            WHERE id = $8
            ",
        )
        .bind(changes.name.as_deref())
        .bind(changes.name.as_deref().map(fold_name))
        .bind(changes.email.as_deref())
        .bind(changes.age)
        .bind(changes.weight)
        .bind(changes.height)
        .bind(format_timestamp(Utc::now()))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::conflict(messages::EMAIL_ALREADY_REGISTERED)
            } else {
                AppError::database(format!("Failed to update student: {e}"))
            }
        })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_student(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(name: &str, email: &str) -> ValidStudent {
        ValidStudent {
            name: name.to_owned(),
            email: email.to_owned(),
            age: 30,
            weight: 70.0,
            height: 1.75,
        }
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("ana"), "ana");
    }

    #[tokio::test]
    async fn test_create_and_find_by_email() {
        let db = Database::in_memory().await.unwrap();
        let created = db.create_student(&student("Ana", "ana@example.com")).await.unwrap();

        let found = db.find_by_email("ana@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(db.find_by_email("ANA@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_conflict() {
        let db = Database::in_memory().await.unwrap();
        db.create_student(&student("Ana", "ana@example.com")).await.unwrap();

        let error = db
            .create_student(&student("Other", "ana@example.com"))
            .await
            .unwrap_err();
        assert_eq!(error.code, crate::errors::ErrorCode::ResourceConflict);
    }

    #[tokio::test]
    async fn test_search_matches_wildcards_literally() {
        let db = Database::in_memory().await.unwrap();
        db.create_student(&student("100% Ana", "a@example.com")).await.unwrap();
        db.create_student(&student("Bruno", "b@example.com")).await.unwrap();

        let hits = db.search_by_name("%", PageRequest::first()).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "100% Ana");

        let hits = db.search_by_name("BRU", PageRequest::first()).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_search_folds_accented_letters() {
        let db = Database::in_memory().await.unwrap();
        let created = db
            .create_student(&student("Álvaro Souza", "alvaro@example.com"))
            .await
            .unwrap();

        for query in ["álvaro", "ÁLVARO", "Álvaro", "souza"] {
            let hits = db.search_by_name(query, PageRequest::first()).await.unwrap();
            assert_eq!(hits.len(), 1, "query {query}");
            assert_eq!(hits[0].name, "Álvaro Souza");
        }

        let changes = ValidStudentUpdate {
            name: Some("Élio Souza".to_owned()),
            ..ValidStudentUpdate::default()
        };
        db.update_student(created.id, &changes).await.unwrap();

        assert!(db
            .search_by_name("álvaro", PageRequest::first())
            .await
            .unwrap()
            .is_empty());
        let hits = db.search_by_name("élio", PageRequest::first()).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_student_returns_none() {
        let db = Database::in_memory().await.unwrap();
        let updated = db
            .update_student(42, &ValidStudentUpdate::default())
            .await
            .unwrap();
        assert!(updated.is_none());
    }
}
