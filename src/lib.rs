// ABOUTME: Main library entry point for the Gympoint enrollment backend
// ABOUTME: Provides the REST API for students, plans, enrollments, and admin sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

#![deny(unsafe_code)]

//! # Gympoint Server
//!
//! HTTP backend for a gym: it manages students, subscription plans and
//! enrollments, guards enrollment and plan operations behind bearer tokens,
//! and queues a confirmation email whenever an enrollment is created.
//!
//! ## Architecture
//!
//! - **Routes**: thin axum handlers that extract, authenticate and delegate
//! - **Services**: validation and business rules (period arithmetic, overlap checks)
//! - **Database**: sqlx-backed repositories behind traits
//! - **Notifications**: fire-and-forget job queue for confirmation emails
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gympoint_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Gympoint configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Token issuing and validation
pub mod auth;

/// Environment-based configuration
pub mod config;

/// Application constants
pub mod constants;

/// sqlx persistence layer and repository traits
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware for authentication and request tracing
pub mod middleware;

/// Domain models shared with the core crate
pub mod models;

/// Enrollment confirmation job queue
pub mod notifications;

/// Shared server resources for dependency injection
pub mod resources;

/// `HTTP` routes grouped by domain
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Domain services with the business rules
pub mod services;

/// Per-operation input validation
pub mod validation;
