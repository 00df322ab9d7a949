// ABOUTME: Enrollment database operations
// ABOUTME: Handles enrollment persistence, the overlap query, and soft cancellation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use super::{format_timestamp, parse_timestamp, Database, EnrollmentRepository, NewEnrollment};
use crate::errors::{AppError, AppResult};
use crate::models::Enrollment;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

const ENROLLMENT_COLUMNS: &str =
    "id, student_id, plan_id, start_date, end_date, price, canceled_at, created_at, updated_at";

fn row_to_enrollment(row: &SqliteRow) -> AppResult<Enrollment> {
    let canceled_at: Option<&str> = row.try_get("canceled_at")?;
    Ok(Enrollment {
        id: row.try_get("id")?,
        student_id: row.try_get("student_id")?,
        plan_id: row.try_get("plan_id")?,
        start_date: parse_timestamp(row.try_get("start_date")?)?,
        end_date: parse_timestamp(row.try_get("end_date")?)?,
        price: row.try_get("price")?,
        canceled_at: canceled_at.map(parse_timestamp).transpose()?,
        created_at: parse_timestamp(row.try_get("created_at")?)?,
        updated_at: parse_timestamp(row.try_get("updated_at")?)?,
    })
}

#[async_trait]
impl EnrollmentRepository for Database {
    async fn create_enrollment(&self, enrollment: &NewEnrollment) -> AppResult<Enrollment> {
        let now = format_timestamp(Utc::now());

        let result = sqlx::query(
            r"
            INSERT INTO enrollments (
                student_id, plan_id, start_date, end_date, price,
                canceled_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, NULL, $6, $6)
            ",
        )
        .bind(enrollment.student_id)
        .bind(enrollment.plan_id)
        .bind(format_timestamp(enrollment.period.start))
        .bind(format_timestamp(enrollment.period.end))
        .bind(enrollment.price)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create enrollment: {e}")))?;

        self.find_enrollment(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::internal("Enrollment vanished after insert"))
    }

    async fn find_enrollment(&self, id: i64) -> AppResult<Option<Enrollment>> {
        sqlx::query(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get enrollment: {e}")))?
        .as_ref()
        .map(row_to_enrollment)
        .transpose()
    }

    async fn list_enrollments(&self) -> AppResult<Vec<Enrollment>> {
        let rows = sqlx::query(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list enrollments: {e}")))?;

        rows.iter().map(row_to_enrollment).collect()
    }

    async fn find_overlapping(
        &self,
        student_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<i64>,
    ) -> AppResult<Vec<Enrollment>> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {ENROLLMENT_COLUMNS} FROM enrollments
            WHERE student_id = $1
              AND canceled_at IS NULL
              AND start_date <= $2
              AND end_date > $3
              AND ($4 IS NULL OR id <> $4)
            ORDER BY id ASC
            "
        ))
        .bind(student_id)
        .bind(format_timestamp(end))
        .bind(format_timestamp(start))
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to check enrollment overlap: {e}")))?;

        rows.iter().map(row_to_enrollment).collect()
    }

    async fn update_enrollment(
        &self,
        id: i64,
        enrollment: &NewEnrollment,
    ) -> AppResult<Option<Enrollment>> {
        let result = sqlx::query(
            r"
            UPDATE enrollments SET
                student_id = $1,
                plan_id = $2,
                start_date = $3,
                end_date = $4,
                price = $5,
                updated_at = $6
            WHERE id = $7
            ",
        )
        .bind(enrollment.student_id)
        .bind(enrollment.plan_id)
        .bind(format_timestamp(enrollment.period.start))
        .bind(format_timestamp(enrollment.period.end))
        .bind(enrollment.price)
        .bind(format_timestamp(Utc::now()))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update enrollment: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_enrollment(id).await
    }

    async fn cancel_enrollment(
        &self,
        id: i64,
        canceled_at: DateTime<Utc>,
    ) -> AppResult<Option<Enrollment>> {
        let stamp = format_timestamp(canceled_at);
        let result = sqlx::query(
            "UPDATE enrollments SET canceled_at = $1, updated_at = $1 WHERE id = $2",
        )
        .bind(&stamp)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to cancel enrollment: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_enrollment(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{PlanRepository, StudentRepository};
    use crate::models::EnrollmentPeriod;
    use crate::validation::{ValidPlan, ValidStudent};
    use chrono::NaiveDate;

    async fn seeded() -> (Database, i64, i64) {
        let db = Database::in_memory().await.unwrap();
        let student = db
            .create_student(&ValidStudent {
                name: "Ana".to_owned(),
                email: "ana@example.com".to_owned(),
                age: 29,
                weight: 61.0,
                height: 1.68,
            })
            .await
            .unwrap();
        let plan = db
            .create_plan(&ValidPlan {
                title: "Gold".to_owned(),
                length: 3,
                price: 100.0,
            })
            .await
            .unwrap();
        (db, student.id, plan.id)
    }

    fn period(y: i32, m: u32, d: u32, months: u32) -> EnrollmentPeriod {
        EnrollmentPeriod::from_start_date(NaiveDate::from_ymd_opt(y, m, d).unwrap(), months)
            .unwrap()
    }

    #[tokio::test]
    async fn test_stored_period_round_trips() {
        let (db, student_id, plan_id) = seeded().await;
        let period = period(2024, 1, 10, 3);
        let created = db
            .create_enrollment(&NewEnrollment {
                student_id,
                plan_id,
                period,
                price: 300.0,
            })
            .await
            .unwrap();

        assert_eq!(created.period(), period);
        assert!(created.canceled_at.is_none());
    }

    #[tokio::test]
    async fn test_overlap_query_boundaries() {
        let (db, student_id, plan_id) = seeded().await;
        let existing = period(2024, 1, 10, 3);
        let created = db
            .create_enrollment(&NewEnrollment {
                student_id,
                plan_id,
                period: existing,
                price: 300.0,
            })
            .await
            .unwrap();

        let adjacent = period(2024, 4, 10, 3);
        let hits = db
            .find_overlapping(student_id, adjacent.start, adjacent.end, None)
            .await
            .unwrap();
        assert!(hits.is_empty());

        let early = period(2024, 4, 9, 3);
        let hits = db
            .find_overlapping(student_id, early.start, early.end, None)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);

        let hits = db
            .find_overlapping(student_id, early.start, early.end, Some(created.id))
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_canceled_enrollments_do_not_overlap() {
        let (db, student_id, plan_id) = seeded().await;
        let existing = period(2024, 1, 10, 3);
        let created = db
            .create_enrollment(&NewEnrollment {
                student_id,
                plan_id,
                period: existing,
                price: 300.0,
            })
            .await
            .unwrap();

        let canceled = db
            .cancel_enrollment(created.id, Utc::now())
            .await
            .unwrap()
            .unwrap();
        assert!(canceled.canceled_at.is_some());

        let hits = db
            .find_overlapping(student_id, existing.start, existing.end, None)
            .await
            .unwrap();
        assert!(hits.is_empty());
    }
}
