// ABOUTME: Enrollment route handlers
// ABOUTME: Bearer-token protected endpoints for enrolling, listing, re-pointing, and canceling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

//! Enrollment routes
//!
//! Every handler runs behind [`require_auth`], so an [`AuthContext`] is
//! always present in the request extensions.

use super::{json_body, path_id};
use crate::errors::AppError;
use crate::middleware::{require_auth, AuthContext};
use crate::resources::ServerResources;
use crate::services::EnrollmentService;
use crate::validation::{CreateEnrollmentRequest, UpdateEnrollmentRequest};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Extension, Json, Router};
use std::sync::Arc;
use tracing::info;

/// Enrollment routes
pub struct EnrollmentRoutes;

impl EnrollmentRoutes {
    /// Create all enrollment routes behind the bearer-token guard
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/enrollments",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/enrollments/:id",
                put(Self::handle_update).delete(Self::handle_cancel),
            )
            .route_layer(middleware::from_fn_with_state(
                resources.clone(),
                require_auth,
            ))
            .with_state(resources)
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Extension(auth): Extension<AuthContext>,
        payload: Result<Json<CreateEnrollmentRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(payload)?;
        let enrollment =
            EnrollmentService::new(resources.database.as_ref(), resources.notifications.as_ref())
                .create(request)
                .await?;
        info!(
            admin_id = %auth.admin_id,
            enrollment_id = enrollment.id,
            "Enrollment recorded by admin"
        );
        Ok((StatusCode::OK, Json(enrollment)).into_response())
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let enrollments =
            EnrollmentService::new(resources.database.as_ref(), resources.notifications.as_ref())
                .list()
                .await?;
        Ok((StatusCode::OK, Json(enrollments)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        id: Result<Path<i64>, PathRejection>,
        payload: Result<Json<UpdateEnrollmentRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let id = path_id(id)?;
        let request = json_body(payload)?;
        let enrollment =
            EnrollmentService::new(resources.database.as_ref(), resources.notifications.as_ref())
                .update(id, request)
                .await?;
        Ok((StatusCode::OK, Json(enrollment)).into_response())
    }

    async fn handle_cancel(
        State(resources): State<Arc<ServerResources>>,
        Extension(auth): Extension<AuthContext>,
        id: Result<Path<i64>, PathRejection>,
    ) -> Result<Response, AppError> {
        let id = path_id(id)?;
        let response =
            EnrollmentService::new(resources.database.as_ref(), resources.notifications.as_ref())
                .cancel(id)
                .await?;
        info!(admin_id = %auth.admin_id, enrollment_id = id, "Enrollment canceled by admin");
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
