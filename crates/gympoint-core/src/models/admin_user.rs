// ABOUTME: Administrator account allowed to open authenticated sessions
// ABOUTME: The password hash never leaves the server; AdminUserInfo is the public shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Administrator account
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// Database identity
    pub id: i64,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Public view of an [`AdminUser`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUserInfo {
    /// Database identity
    pub id: i64,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
}

impl From<&AdminUser> for AdminUserInfo {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
