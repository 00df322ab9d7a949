// ABOUTME: Integration tests for admin sign-in and the bearer-token guard
// ABOUTME: Covers credential checks, issued token claims, and expired or malformed tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Gympoint Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{TestApp, ADMIN_EMAIL, ADMIN_PASSWORD, TEST_JWT_SECRET};
use gympoint_server::auth::AuthManager;
use gympoint_server::services::SessionResponse;
use helpers::axum_test::AxumTestRequest;
use serde_json::json;

#[tokio::test]
async fn test_sign_in_returns_user_and_token() {
    let app = TestApp::new().await;

    let session: SessionResponse = AxumTestRequest::post("/sessions")
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(session.user.email, ADMIN_EMAIL);
    assert_eq!(session.user.name, "Gympoint Admin");

    let claims = app.resources.auth_manager.validate_token(&session.token).unwrap();
    assert_eq!(claims.sub, session.user.id.to_string());
    assert_eq!(claims.email, ADMIN_EMAIL);
    assert_eq!(claims.exp - claims.iat, 24 * 3600);
}

#[tokio::test]
async fn test_sign_in_token_opens_guarded_routes() {
    let app = TestApp::new().await;

    let session: SessionResponse = AxumTestRequest::post("/sessions")
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send(app.app())
        .await
        .json();

    AxumTestRequest::get("/plans")
        .bearer(&session.token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_sign_in_response_hides_password_hash() {
    let app = TestApp::new().await;

    let text = AxumTestRequest::post("/sessions")
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send(app.app())
        .await
        .text();

    assert!(!text.contains("password"));
    assert!(!text.contains("$2"));
}

#[tokio::test]
async fn test_sign_in_wrong_password_and_unknown_email_look_alike() {
    let app = TestApp::new().await;

    let wrong_password = AxumTestRequest::post("/sessions")
        .json(&json!({ "email": ADMIN_EMAIL, "password": "nope" }))
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .error();
    let unknown_email = AxumTestRequest::post("/sessions")
        .json(&json!({ "email": "nobody@gympoint.test", "password": ADMIN_PASSWORD }))
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .error();

    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password.1, "authentication failed");
}

#[tokio::test]
async fn test_sign_in_validation() {
    let app = TestApp::new().await;

    for body in [
        json!({ "password": ADMIN_PASSWORD }),
        json!({ "email": ADMIN_EMAIL }),
        json!({ "email": "not-an-email", "password": ADMIN_PASSWORD }),
    ] {
        let (code, _) = AxumTestRequest::post("/sessions")
            .json(&body)
            .send(app.app())
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .error();
        assert_eq!(code, "INVALID_INPUT");
    }
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new().await;
    let admin = gympoint_server::models::AdminUser {
        id: 1,
        name: "Gympoint Admin".to_owned(),
        email: ADMIN_EMAIL.to_owned(),
        password_hash: String::new(),
        created_at: chrono::Utc::now(),
    };
    let expired = AuthManager::new(TEST_JWT_SECRET, -1)
        .generate_token(&admin)
        .unwrap();

    let (code, message) = AxumTestRequest::get("/plans")
        .bearer(&expired)
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .error();

    assert_eq!(code, "AUTH_INVALID");
    assert_eq!(message, "authentication failed");
}

#[tokio::test]
async fn test_token_signed_with_another_secret_is_rejected() {
    let app = TestApp::new().await;
    let admin = gympoint_server::models::AdminUser {
        id: 1,
        name: "Gympoint Admin".to_owned(),
        email: ADMIN_EMAIL.to_owned(),
        password_hash: String::new(),
        created_at: chrono::Utc::now(),
    };
    let foreign = AuthManager::new(b"some-other-secret-value", 24)
        .generate_token(&admin)
        .unwrap();

    AxumTestRequest::get("/plans")
        .bearer(&foreign)
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_header_without_token_part_is_rejected() {
    let app = TestApp::new().await;

    let (_, message) = AxumTestRequest::get("/plans")
        .header("authorization", "Bearer")
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .error();

    assert_eq!(message, "authentication failed");
}

#[tokio::test]
async fn test_scheme_word_is_not_checked() {
    let app = TestApp::new().await;

    AxumTestRequest::get("/plans")
        .header("authorization", &format!("Token {}", app.token))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK);
}
