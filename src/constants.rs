// ABOUTME: Application constants re-exported from the core crate
// ABOUTME: Groups pagination, configuration defaults, env names, and client messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

//! # Constants Module
//!
//! Constants live in `gympoint-core` so both crates agree on them; this module
//! re-exports them under the crate root.

pub use gympoint_core::constants::*;
