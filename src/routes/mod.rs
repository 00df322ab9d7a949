// ABOUTME: Route module organization for the Gympoint HTTP endpoints
// ABOUTME: Groups routes by domain and maps extractor rejections into validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

//! Route module for the Gympoint server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Enrollment routes (authenticated)
pub mod enrollments;
/// Health check and readiness routes
pub mod health;
/// Plan catalog routes (authenticated)
pub mod plans;
/// Admin sign-in routes
pub mod sessions;
/// Student directory routes
pub mod students;

pub use enrollments::EnrollmentRoutes;
pub use health::HealthRoutes;
pub use plans::PlanRoutes;
pub use sessions::SessionRoutes;
pub use students::StudentRoutes;

use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;

fn rejection(field: &str, reason: &str) -> AppError {
    AppError::invalid_input(messages::VALIDATION_FAILED)
        .with_details(serde_json::json!({ "fields": { field: reason } }))
}

/// Unwrap a JSON body, turning malformed input into a 400
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| rejection("body", &e.body_text()))
}

/// Unwrap a query string, turning malformed input into a 400
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|e| rejection("query", &e.body_text()))
}

/// Unwrap a numeric `:id` segment, turning malformed input into a 400
pub(crate) fn path_id(id: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    id.map(|Path(id)| id)
        .map_err(|e| rejection("id", &e.body_text()))
}
