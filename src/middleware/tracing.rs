// ABOUTME: Request tracing helpers for correlation and structured logging
// ABOUTME: Creates the http_request span every request runs inside, keyed by request id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use axum::http::Request;
use tracing::Span;

/// Header carrying the request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create a tracing span for HTTP requests
pub fn create_request_span(method: &str, path: &str, request_id: &str) -> Span {
    tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id,
        admin_email = tracing::field::Empty,
    )
}

/// Span factory for `TraceLayer::make_span_with`
///
/// The request id is set by the request-id layer before this runs.
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    create_request_span(
        request.method().as_str(),
        request.uri().path(),
        request_id,
    )
}
