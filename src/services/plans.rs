// ABOUTME: Plan catalog operations
// ABOUTME: Plans feed length and monthly price into enrollments, which snapshot both
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use crate::database::PlanRepository;
use crate::errors::{AppError, AppResult};
use crate::models::Plan;
use crate::validation::{
    validate_create_plan, validate_update_plan, CreatePlanRequest, UpdatePlanRequest,
};
use tracing::{info, instrument};

/// Plan catalog operations
pub struct PlanService<'a, R: ?Sized> {
    plans: &'a R,
}

impl<'a, R: PlanRepository + ?Sized> PlanService<'a, R> {
    /// Borrow a plan repository for one operation
    pub const fn new(plans: &'a R) -> Self {
        Self { plans }
    }

    /// Add a plan
    ///
    /// # Errors
    ///
    /// `INVALID_INPUT` for a missing field, a length below 1 or a negative price
    #[instrument(skip(self, request), fields(operation = "create_plan"))]
    pub async fn create(&self, request: CreatePlanRequest) -> AppResult<Plan> {
        let plan = validate_create_plan(request)?;
        let created = self.plans.create_plan(&plan).await?;
        info!(plan_id = created.id, "Plan created");
        Ok(created)
    }

    /// Every plan, cheapest first
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    #[instrument(skip(self), fields(operation = "list_plans"))]
    pub async fn list(&self) -> AppResult<Vec<Plan>> {
        self.plans.list_plans().await
    }

    /// Apply the provided fields to a plan
    ///
    /// Existing enrollments keep the dates and price they were created with.
    ///
    /// # Errors
    ///
    /// `INVALID_INPUT` for a bad field, `RESOURCE_NOT_FOUND` for an unknown id
    #[instrument(skip(self, request), fields(operation = "update_plan"))]
    pub async fn update(&self, id: i64, request: UpdatePlanRequest) -> AppResult<Plan> {
        let changes = validate_update_plan(request)?;
        let updated = self
            .plans
            .update_plan(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("plan"))?;
        info!(plan_id = id, "Plan updated");
        Ok(updated)
    }
}
