// ABOUTME: Centralized resource container for dependency injection into route handlers
// ABOUTME: Holds the database, token manager, and notification sink shared by every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

//! # Server Resources
//!
//! Built once at startup and shared as `Arc<ServerResources>` axum state.
//! Nothing in here is mutated after construction.

use crate::auth::AuthManager;
use crate::database::Database;
use crate::notifications::NotificationSink;
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Connection pool and repositories
    pub database: Arc<Database>,
    /// Token issuing and validation
    pub auth_manager: Arc<AuthManager>,
    /// Background job queue
    pub notifications: Arc<dyn NotificationSink>,
}

impl ServerResources {
    /// Bundle the shared resources
    #[must_use]
    pub fn new(
        database: Database,
        auth_manager: AuthManager,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            notifications,
        }
    }
}
