// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds an in-memory application with a captured job queue and a signed-in admin
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `gympoint_server`

use axum::Router;
use chrono::{Duration, Utc};
use gympoint_server::{
    auth::AuthManager,
    database::{Database, PlanRepository, StudentRepository},
    models::{Plan, Student},
    notifications::{ChannelSink, NotificationJob},
    resources::ServerResources,
    server::build_router,
    services::provision_admin,
    validation::{ValidPlan, ValidStudent},
};
use std::sync::{Arc, Once};
use tokio::sync::mpsc::UnboundedReceiver;

static INIT_LOGGER: Once = Once::new();

/// Secret shared by every test token
pub const TEST_JWT_SECRET: &[u8] = b"gympoint-test-secret-key";
/// Admin seeded by [`TestApp::new`]
pub const ADMIN_EMAIL: &str = "admin@gympoint.test";
/// Password of the seeded admin
pub const ADMIN_PASSWORD: &str = "123456";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// A fully wired application on an in-memory database
pub struct TestApp {
    /// Router with every layer applied
    pub router: Router,
    /// Shared resources behind the router
    pub resources: Arc<ServerResources>,
    /// Jobs queued by handlers
    pub jobs: UnboundedReceiver<NotificationJob>,
    /// Bearer token of the seeded admin
    pub token: String,
}

impl TestApp {
    /// Build the application and seed one admin
    pub async fn new() -> Self {
        init_test_logging();

        let database = Database::in_memory().await.unwrap();
        let auth_manager = AuthManager::new(TEST_JWT_SECRET, 24);
        let (sink, jobs) = ChannelSink::new();
        let resources = Arc::new(ServerResources::new(
            database,
            auth_manager,
            Arc::new(sink),
        ));

        let admin = provision_admin(
            resources.database.as_ref(),
            "Gympoint Admin",
            ADMIN_EMAIL,
            ADMIN_PASSWORD,
        )
        .await
        .unwrap();
        let token = resources.auth_manager.generate_token(&admin).unwrap();

        let router = build_router(&resources, std::time::Duration::from_secs(30));

        Self {
            router,
            resources,
            jobs,
            token,
        }
    }

    /// A clone of the router for one request
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Insert a student directly
    pub async fn seed_student(&self, name: &str, email: &str) -> Student {
        self.resources
            .database
            .create_student(&ValidStudent {
                name: name.to_owned(),
                email: email.to_owned(),
                age: 30,
                weight: 70.5,
                height: 1.75,
            })
            .await
            .unwrap()
    }

    /// Insert a plan directly
    pub async fn seed_plan(&self, title: &str, length: u32, price: f64) -> Plan {
        self.resources
            .database
            .create_plan(&ValidPlan {
                title: title.to_owned(),
                length,
                price,
            })
            .await
            .unwrap()
    }
}

/// `YYYY-MM-DD` for today plus `days` (negative for the past)
pub fn date_from_today(days: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}
