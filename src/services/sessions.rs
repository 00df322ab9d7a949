// ABOUTME: Administrator session issuing and provisioning
// ABOUTME: Exchanges email and password for a signed token; creates admins for the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

use crate::auth::{hash_password, verify_password, AuthManager};
use crate::constants::messages;
use crate::database::AdminUserRepository;
use crate::errors::{AppError, AppResult};
use crate::models::{AdminUser, AdminUserInfo};
use crate::validation::{validate_create_session, CreateSessionRequest, ValidationErrors};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Body returned by a successful sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Signed-in administrator
    pub user: AdminUserInfo,
    /// Bearer token for guarded routes
    pub token: String,
}

/// Session issuing
pub struct SessionService<'a, R: ?Sized> {
    admins: &'a R,
    auth_manager: &'a AuthManager,
}

impl<'a, R: AdminUserRepository + ?Sized> SessionService<'a, R> {
    /// Borrow the admin repository and token manager for one operation
    pub const fn new(admins: &'a R, auth_manager: &'a AuthManager) -> Self {
        Self {
            admins,
            auth_manager,
        }
    }

    /// Exchange credentials for a token
    ///
    /// Unknown emails and wrong passwords produce the same error.
    ///
    /// # Errors
    ///
    /// `INVALID_INPUT` for a bad payload, `AUTH_INVALID` for bad credentials
    #[instrument(skip(self, request), fields(operation = "create_session"))]
    pub async fn create(&self, request: CreateSessionRequest) -> AppResult<SessionResponse> {
        let credentials = validate_create_session(request)?;

        let Some(user) = self.admins.find_admin_by_email(&credentials.email).await? else {
            warn!("Sign-in rejected: unknown email");
            return Err(AppError::auth_invalid(messages::AUTHENTICATION_FAILED));
        };

        if !verify_password(credentials.password, user.password_hash.clone()).await? {
            warn!(admin_id = user.id, "Sign-in rejected: wrong password");
            return Err(AppError::auth_invalid(messages::AUTHENTICATION_FAILED));
        }

        let token = self.auth_manager.generate_token(&user)?;
        info!(admin_id = user.id, "Session created");

        Ok(SessionResponse {
            user: AdminUserInfo::from(&user),
            token,
        })
    }
}

/// Create an administrator account with a bcrypt-hashed password
///
/// # Errors
///
/// `INVALID_INPUT` for a blank name, a bad email or an empty password, and
/// `RESOURCE_CONFLICT` when the email is taken
pub async fn provision_admin<R: AdminUserRepository + ?Sized>(
    admins: &R,
    name: &str,
    email: &str,
    password: &str,
) -> AppResult<AdminUser> {
    let mut errors = ValidationErrors::new();
    if name.trim().is_empty() {
        errors.add("name", "must not be blank");
    }
    if let Err(credential_errors) = validate_create_session(CreateSessionRequest {
        email: Some(email.to_owned()),
        password: Some(password.to_owned()),
    }) {
        for field in ["email", "password"] {
            if let Some(reason) = credential_errors.reason(field) {
                errors.add(field, reason);
            }
        }
    }
    errors.into_result(())?;

    let password_hash = hash_password(password.to_owned()).await?;
    let admin = admins
        .create_admin_user(name.trim(), email, &password_hash)
        .await?;

    info!(admin_id = admin.id, "Admin user provisioned");
    Ok(admin)
}
