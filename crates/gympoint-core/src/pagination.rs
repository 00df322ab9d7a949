// ABOUTME: Offset pagination for list endpoints with a fixed page size
// ABOUTME: Converts 1-based page numbers into SQL limit/offset pairs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use serde::{Deserialize, Serialize};

use crate::constants::pagination::{FIRST_PAGE, STUDENT_PAGE_SIZE};

/// A 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number, starting at 1
    pub page: u32,
    /// Items per page
    pub limit: u32,
}

impl PageRequest {
    /// Create a page request, defaulting to the first page
    ///
    /// Returns `None` when `page` is 0.
    #[must_use]
    pub fn new(page: Option<u32>, limit: u32) -> Option<Self> {
        let page = page.unwrap_or(FIRST_PAGE);
        (page >= FIRST_PAGE).then_some(Self { page, limit })
    }

    /// First page of student results
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: FIRST_PAGE,
            limit: STUDENT_PAGE_SIZE,
        }
    }

    /// Number of rows skipped before this page
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }

    /// Row limit for this page
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}
