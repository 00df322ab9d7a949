// ABOUTME: Core types and constants for the Gympoint enrollment backend
// ABOUTME: Foundation crate with error handling, pagination, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

#![deny(unsafe_code)]

//! # Gympoint Core
//!
//! Foundation crate providing shared types and constants for the Gympoint
//! enrollment backend. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Application-wide constants organized by domain
//! - **pagination**: Offset pagination with a fixed page size
//! - **models**: Students, plans, enrollments, and admin users

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and configuration values organized by domain
pub mod constants;

/// Offset pagination for list endpoints
pub mod pagination;

/// Core data models (Student, Plan, Enrollment, AdminUser)
pub mod models;
