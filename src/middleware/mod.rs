// ABOUTME: HTTP middleware for request tracing and bearer token authentication
// ABOUTME: Provides request spans and the guard that protects plan and enrollment routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

/// Bearer token guard
pub mod auth;
/// Request spans for the HTTP trace layer
pub mod tracing;

pub use auth::{authenticate_request, require_auth, AuthContext};
pub use tracing::{create_request_span, make_request_span, REQUEST_ID_HEADER};
