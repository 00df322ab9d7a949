// ABOUTME: Plan catalog database operations
// ABOUTME: Handles plan creation, lookup, price-ordered listing, and partial updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use super::{format_timestamp, parse_timestamp, Database, PlanRepository};
use crate::errors::{AppError, AppResult};
use crate::models::Plan;
use crate::validation::{ValidPlan, ValidPlanUpdate};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

const PLAN_COLUMNS: &str = "id, title, length, price, created_at, updated_at";

fn row_to_plan(row: &SqliteRow) -> AppResult<Plan> {
    let length: i64 = row.try_get("length")?;
    Ok(Plan {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        length: u32::try_from(length)
            .map_err(|_| AppError::database(format!("Invalid stored plan length: {length}")))?,
        price: row.try_get("price")?,
        created_at: parse_timestamp(row.try_get("created_at")?)?,
        updated_at: parse_timestamp(row.try_get("updated_at")?)?,
    })
}

#[async_trait]
impl PlanRepository for Database {
    async fn create_plan(&self, plan: &ValidPlan) -> AppResult<Plan> {
        let now = format_timestamp(Utc::now());

        let result = sqlx::query(
            r"
            INSERT INTO plans (title, length, price, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ",
        )
        .bind(&plan.title)
        .bind(i64::from(plan.length))
        .bind(plan.price)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create plan: {e}")))?;

        self.find_plan(result.last_insert_rowid())
            .await?
            .ok_or_else(|| AppError::internal("Plan vanished after insert"))
    }

    async fn find_plan(&self, id: i64) -> AppResult<Option<Plan>> {
        sqlx::query(&format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get plan: {e}")))?
            .as_ref()
            .map(row_to_plan)
            .transpose()
    }

    async fn list_plans(&self) -> AppResult<Vec<Plan>> {
        let rows = sqlx::query(&format!(
            "SELECT {PLAN_COLUMNS} FROM plans ORDER BY price ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list plans: {e}")))?;

        rows.iter().map(row_to_plan).collect()
    }

    async fn update_plan(&self, id: i64, changes: &ValidPlanUpdate) -> AppResult<Option<Plan>> {
        let result = sqlx::query(
            r"
            UPDATE plans SET
                title = COALESCE($1, title),
                length = COALESCE($2, length),
                price = COALESCE($3, price),
                updated_at = $4
            WHERE id = $5
            ",
        )
        .bind(changes.title.as_deref())
        .bind(changes.length.map(i64::from))
        .bind(changes.price)
        .bind(format_timestamp(Utc::now()))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update plan: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_plan(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(title: &str, length: u32, price: f64) -> ValidPlan {
        ValidPlan {
            title: title.to_owned(),
            length,
            price,
        }
    }

    #[tokio::test]
    async fn test_plans_are_listed_by_price() {
        let db = Database::in_memory().await.unwrap();
        db.create_plan(&plan("Diamond", 6, 89.0)).await.unwrap();
        db.create_plan(&plan("Start", 1, 129.0)).await.unwrap();
        db.create_plan(&plan("Gold", 3, 109.0)).await.unwrap();

        let titles: Vec<String> = db
            .list_plans()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["Diamond", "Gold", "Start"]);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let db = Database::in_memory().await.unwrap();
        let created = db.create_plan(&plan("Gold", 3, 109.0)).await.unwrap();

        let updated = db
            .update_plan(
                created.id,
                &ValidPlanUpdate {
                    price: Some(99.0),
                    ..ValidPlanUpdate::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Gold");
        assert_eq!(updated.length, 3);
        assert!((updated.price - 99.0).abs() < f64::EPSILON);
    }
}
