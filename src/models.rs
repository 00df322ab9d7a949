// ABOUTME: Domain models re-exported from the core crate
// ABOUTME: Student, Plan, Enrollment, AdminUser and the enrollment period arithmetic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

pub use gympoint_core::models::*;
