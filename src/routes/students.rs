// ABOUTME: Student directory route handlers
// ABOUTME: Public endpoints for registering, listing, and updating students
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use super::{json_body, path_id, query_params};
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::StudentService;
use crate::validation::{CreateStudentRequest, ListStudentsQuery, UpdateStudentRequest};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use std::sync::Arc;

/// Student routes
pub struct StudentRoutes;

impl StudentRoutes {
    /// Create all student routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/students",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/students/:id", put(Self::handle_update))
            .with_state(resources)
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<CreateStudentRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(payload)?;
        let student = StudentService::new(resources.database.as_ref())
            .create(request)
            .await?;
        Ok((StatusCode::OK, Json(student)).into_response())
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        query: Result<Query<ListStudentsQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let query = query_params(query)?;
        let students = StudentService::new(resources.database.as_ref())
            .list(query)
            .await?;
        Ok((StatusCode::OK, Json(students)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        id: Result<Path<i64>, PathRejection>,
        payload: Result<Json<UpdateStudentRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let id = path_id(id)?;
        let request = json_body(payload)?;
        let student = StudentService::new(resources.database.as_ref())
            .update(id, request)
            .await?;
        Ok((StatusCode::OK, Json(student)).into_response())
    }
}
