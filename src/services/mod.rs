// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Holds the student, plan, enrollment, and session rules behind repository traits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

//! Domain service layer
//!
//! Services are stateless. Each one borrows the repositories (and, for
//! enrollments, the notification sink) it needs for the duration of a call,
//! so handlers build one per request from the shared resources.

/// Enrollment lifecycle: period arithmetic, overlap checks, cancellation
pub mod enrollments;

/// Plan catalog
pub mod plans;

/// Administrator sessions and provisioning
pub mod sessions;

/// Student directory
pub mod students;

pub use enrollments::{CancelResponse, EnrollmentService};
pub use plans::PlanService;
pub use sessions::{provision_admin, SessionResponse, SessionService};
pub use students::StudentService;
