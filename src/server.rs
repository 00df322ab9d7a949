// ABOUTME: Router assembly and HTTP server lifecycle
// ABOUTME: Merges the domain routers, applies request-id, tracing, and timeout layers, and serves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

//! # HTTP Server
//!
//! Every request gets an `x-request-id` (generated unless the client sent
//! one), runs inside an `http_request` span carrying that id, and is cut off
//! with `408 Request Timeout` after the configured timeout.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::middleware::make_request_span;
use crate::notifications::build_sink;
use crate::resources::ServerResources;
use crate::routes::{EnrollmentRoutes, HealthRoutes, PlanRoutes, SessionRoutes, StudentRoutes};
use anyhow::{Context, Result};
use axum::body::Body;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// How long the in-process mail worker gets to drain after shutdown
const WORKER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Build the full application router
pub fn build_router(resources: &Arc<ServerResources>, request_timeout: Duration) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(SessionRoutes::routes(resources.clone()))
        .merge(StudentRoutes::routes(resources.clone()))
        .merge(PlanRoutes::routes(resources.clone()))
        .merge(EnrollmentRoutes::routes(resources.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(request_timeout)),
        )
}

/// Open every resource named by `config` and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the database, the queue, or the listener cannot be
/// set up, or if the server fails while running
pub async fn run(config: ServerConfig) -> Result<()> {
    let database = Database::new(&config.database.url, config.database.max_connections).await?;
    let auth_manager = AuthManager::from_config(&config.auth);
    let (notifications, worker) = build_sink(&config.queue)
        .await
        .context("Failed to set up the notification queue")?;

    let resources = Arc::new(ServerResources::new(database, auth_manager, notifications));
    let router = build_router(
        &resources,
        Duration::from_secs(config.request_timeout_secs),
    );
    drop(resources);

    let address = format!("{}:{}", config.host, config.http_port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!(address = %address, "Gympoint server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    // The router and its sink are gone, so the worker sees a closed channel
    if let Some(worker) = worker {
        if tokio::time::timeout(WORKER_DRAIN_TIMEOUT, worker).await.is_err() {
            warn!("Notification worker did not drain before shutdown");
        }
    }

    info!("Gympoint server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C; shutting down");
        return;
    }
    info!("Shutdown signal received");
}
