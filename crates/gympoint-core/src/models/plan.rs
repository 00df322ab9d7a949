// ABOUTME: Subscription plan with a length in months and a monthly price
// ABOUTME: Plans are read-only snapshots from the enrollment logic's perspective
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A subscription plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Database identity
    pub id: i64,
    /// Display title
    pub title: String,
    /// Duration in months
    pub length: u32,
    /// Price per month
    pub price: f64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Plan {
    /// Price of the whole plan (monthly price times length)
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.price * f64::from(self.length)
    }
}
