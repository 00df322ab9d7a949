// ABOUTME: Bearer token authentication middleware for guarded routes
// ABOUTME: Validates the Authorization header and attaches the admin identity to the request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use crate::auth::AuthManager;
use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

/// Identity of the authenticated administrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Admin user id from the `sub` claim
    pub admin_id: String,
    /// Admin email from the `email` claim
    pub email: String,
}

/// Authenticate a request from its raw `Authorization` header
///
/// The header is split on whitespace and the second element is the token,
/// so the scheme word itself is not checked.
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` when the header is absent and `AUTH_INVALID` for
/// every other failure. The failure detail is logged, never returned.
#[tracing::instrument(skip(auth_manager, auth_header), fields(success = tracing::field::Empty))]
pub fn authenticate_request(
    auth_manager: &AuthManager,
    auth_header: Option<&str>,
) -> AppResult<AuthContext> {
    let Some(header) = auth_header else {
        tracing::debug!("Authentication failed: missing authorization header");
        tracing::Span::current().record("success", false);
        return Err(AppError::auth_required(messages::TOKEN_NOT_PROVIDED));
    };

    let Some(token) = header.split_whitespace().nth(1) else {
        tracing::debug!("Authentication failed: authorization header has no token part");
        tracing::Span::current().record("success", false);
        return Err(AppError::auth_invalid(messages::AUTHENTICATION_FAILED));
    };

    match auth_manager.validate_token(token) {
        Ok(claims) => {
            tracing::Span::current().record("success", true);
            Ok(AuthContext {
                admin_id: claims.sub,
                email: claims.email,
            })
        }
        Err(e) => {
            tracing::debug!("Authentication failed: {e}");
            tracing::Span::current().record("success", false);
            Err(AppError::auth_invalid(messages::AUTHENTICATION_FAILED))
        }
    }
}

/// Axum middleware guarding a router with bearer token authentication
///
/// On success the [`AuthContext`] is inserted into request extensions.
///
/// # Errors
///
/// Returns the authentication error as the response
pub async fn require_auth(
    State(resources): State<Arc<ServerResources>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // A header that is not valid UTF-8 is present but unusable
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());

    let context = authenticate_request(&resources.auth_manager, auth_header)?;
    tracing::Span::current().record("admin_email", context.email.as_str());

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}
