// ABOUTME: Core data models for the Gympoint enrollment backend
// ABOUTME: Re-exports Student, Plan, Enrollment and AdminUser structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

//! # Data Models
//!
//! - `Student`: a gym member, publicly exposed through `StudentProfile`
//! - `Plan`: a subscription plan with a length in months and a monthly price
//! - `Enrollment`: a student's subscription to a plan over a date range
//! - `AdminUser`: an operator allowed to open sessions

mod admin_user;
mod enrollment;
mod plan;
mod student;

pub use admin_user::{AdminUser, AdminUserInfo};
pub use enrollment::{end_of_day, Enrollment, EnrollmentPeriod, EnrollmentStatus};
pub use plan::Plan;
pub use student::{Student, StudentProfile};
