// ABOUTME: Admin sign-in route handler
// ABOUTME: Exchanges administrator credentials for a bearer token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use super::json_body;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::SessionService;
use crate::validation::CreateSessionRequest;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;

/// Session routes
pub struct SessionRoutes;

impl SessionRoutes {
    /// Create the sign-in route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/sessions", post(Self::handle_create))
            .with_state(resources)
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<CreateSessionRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(payload)?;
        let session = SessionService::new(resources.database.as_ref(), &resources.auth_manager)
            .create(request)
            .await?;
        Ok((StatusCode::OK, Json(session)).into_response())
    }
}
