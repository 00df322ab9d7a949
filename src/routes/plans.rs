// ABOUTME: Plan catalog route handlers
// ABOUTME: Bearer-token protected endpoints for creating, listing, and updating plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use super::{json_body, path_id};
use crate::errors::AppError;
use crate::middleware::require_auth;
use crate::resources::ServerResources;
use crate::services::PlanService;
use crate::validation::{CreatePlanRequest, UpdatePlanRequest};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use std::sync::Arc;

/// Plan routes
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create all plan routes behind the bearer-token guard
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/plans", get(Self::handle_list).post(Self::handle_create))
            .route("/plans/:id", put(Self::handle_update))
            .route_layer(middleware::from_fn_with_state(
                resources.clone(),
                require_auth,
            ))
            .with_state(resources)
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<CreatePlanRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(payload)?;
        let plan = PlanService::new(resources.database.as_ref())
            .create(request)
            .await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let plans = PlanService::new(resources.database.as_ref()).list().await?;
        Ok((StatusCode::OK, Json(plans)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        id: Result<Path<i64>, PathRejection>,
        payload: Result<Json<UpdatePlanRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let id = path_id(id)?;
        let request = json_body(payload)?;
        let plan = PlanService::new(resources.database.as_ref())
            .update(id, request)
            .await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }
}
