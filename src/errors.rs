// ABOUTME: Unified error handling re-exported from the core crate
// ABOUTME: AppError implements axum IntoResponse so handlers can return it directly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

pub use gympoint_core::errors::*;
