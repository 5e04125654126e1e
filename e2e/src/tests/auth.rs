use httpmock::prelude::*;
use scribe::errors::Error;
use scribe::forms::{ForgotPasswordForm, RegisterForm, ResetPasswordForm};
use scribe::{Role, StatusCode};
use serde_json::json;

use super::utils::{anonymous_client, signed_in_client, user_json};

#[tokio::test]
async fn login_stores_session() {
    let server = MockServer::start_async().await;
    let client = anonymous_client(&server);

    let login = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/login")
                .json_body(json!({ "email": "ann@example.com", "password": "hunter22" }));
            then.status(200).json_body(json!({
                "success": true,
                "token": "t1",
                "refreshToken": "r1",
                "user": user_json("u1", "admin"),
            }));
        })
        .await;

    let user = client
        .auth()
        .login("  ann@example.com ", "hunter22")
        .await
        .unwrap();
    login.assert_async().await;

    assert_eq!(user.id, "u1");
    let state = client.store().state().await;
    assert!(state.is_authenticated);
    assert!(state.is_admin());
    assert_eq!(state.token.as_deref(), Some("t1"));
    assert_eq!(state.refresh_token.as_deref(), Some("r1"));
}

#[tokio::test]
async fn failed_login_leaves_store_signed_out() {
    let server = MockServer::start_async().await;
    let client = anonymous_client(&server);

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(401)
                .json_body(json!({ "success": false, "message": "Invalid credentials" }));
        })
        .await;
    let refresh = server
        .mock_async(|when, then| {
            when.path("/api/auth/refresh-token");
            then.status(200);
        })
        .await;

    let err = client
        .auth()
        .login("ann@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.user_message(), "Invalid credentials");
    assert_eq!(refresh.hits_async().await, 0);
    assert!(!client.store().is_authenticated().await);
}

#[tokio::test]
async fn invalid_forms_never_reach_the_server() {
    let server = MockServer::start_async().await;
    let client = anonymous_client(&server);

    let any = server
        .mock_async(|when, then| {
            when.path_contains("/api/auth");
            then.status(200).json_body(json!({ "success": true }));
        })
        .await;

    let err = client.auth().login("ann@example.com", "").await.unwrap_err();
    assert!(
        matches!(&err, Error::Validation(f) if f.get("password") == Some("Password is required")),
        "{err:?}"
    );

    let form = RegisterForm {
        name: "Ann".into(),
        email: "ann@example.com".into(),
        password: "hunter22".into(),
        confirm_password: "hunter23".into(),
        avatar: None,
    };
    let err = client.auth().register(&form).await.unwrap_err();
    assert!(
        matches!(&err, Error::Validation(f) if f.get("confirmPassword") == Some("Passwords do not match")),
        "{err:?}"
    );

    assert_eq!(any.hits_async().await, 0);
}

#[tokio::test]
async fn register_with_session_signs_in() {
    let server = MockServer::start_async().await;
    let client = anonymous_client(&server);

    let register = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/register")
                .header_exists("content-type")
                .body_contains("name=\"name\"")
                .body_contains("Ann")
                .body_contains("name=\"password\"");
            then.status(201).json_body(json!({
                "success": true,
                "token": "t1",
                "refreshToken": "r1",
                "user": user_json("u1", "user"),
            }));
        })
        .await;

    let form = RegisterForm {
        name: " Ann ".into(),
        email: "ann@example.com".into(),
        password: "hunter22".into(),
        confirm_password: "hunter22".into(),
        avatar: None,
    };
    let user = client.auth().register(&form).await.unwrap();
    register.assert_async().await;

    assert_eq!(user.map(|u| u.id).as_deref(), Some("u1"));
    assert!(client.store().is_authenticated().await);
}

#[tokio::test]
async fn register_without_session_stays_signed_out() {
    let server = MockServer::start_async().await;
    let client = anonymous_client(&server);

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/register");
            then.status(201).json_body(json!({
                "success": true,
                "message": "Check your inbox",
                "user": user_json("u1", "user"),
            }));
        })
        .await;

    let form = RegisterForm {
        name: "Ann".into(),
        email: "ann@example.com".into(),
        password: "hunter22".into(),
        confirm_password: "hunter22".into(),
        avatar: None,
    };
    let user = client.auth().register(&form).await.unwrap();
    assert!(user.is_some());
    assert!(!client.store().is_authenticated().await);
}

#[tokio::test]
async fn logout_revokes_refresh_token_and_clears() {
    let server = MockServer::start_async().await;
    let client = signed_in_client(&server, Role::User, "t1", Some("r1")).await;

    let logout = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/logout")
                .header("Authorization", "Bearer t1")
                .json_body(json!({ "refreshToken": "r1" }));
            then.status(200)
                .json_body(json!({ "success": true, "message": "Logged out" }));
        })
        .await;

    client.auth().logout().await.unwrap();
    logout.assert_async().await;

    let state = client.store().state().await;
    assert!(!state.is_authenticated);
    assert_eq!(state.token, None);
    assert_eq!(state.refresh_token, None);
}

#[tokio::test]
async fn logout_clears_locally_when_server_fails() {
    let server = MockServer::start_async().await;
    let client = signed_in_client(&server, Role::User, "t1", Some("r1")).await;

    let logout = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/logout");
            then.status(500).body("boom");
        })
        .await;

    client.auth().logout().await.unwrap();
    logout.assert_async().await;
    assert!(!client.store().is_authenticated().await);
}

#[tokio::test]
async fn logout_without_refresh_token_skips_server() {
    let server = MockServer::start_async().await;
    let client = signed_in_client(&server, Role::User, "t1", None).await;

    let logout = server
        .mock_async(|when, then| {
            when.path("/api/auth/logout");
            then.status(200);
        })
        .await;

    client.auth().logout().await.unwrap();
    assert_eq!(logout.hits_async().await, 0);
    assert!(!client.store().is_authenticated().await);
}

#[tokio::test]
async fn refresh_session_on_demand() {
    let server = MockServer::start_async().await;
    let client = signed_in_client(&server, Role::User, "t1", Some("r1")).await;

    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/refresh-token")
                .json_body(json!({ "refreshToken": "r1" }));
            then.status(200)
                .json_body(json!({ "success": true, "token": "t2" }));
        })
        .await;

    client.auth().refresh_session().await.unwrap();
    assert_eq!(client.store().token().await.as_deref(), Some("t2"));
    // Not rotated by the server, so kept.
    assert_eq!(client.store().refresh_token().await.as_deref(), Some("r1"));
}

#[tokio::test]
async fn password_recovery() {
    let server = MockServer::start_async().await;
    let client = anonymous_client(&server);

    let forgot = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/forgot-password")
                .json_body(json!({ "email": "ann@example.com" }));
            then.status(200)
                .json_body(json!({ "success": true, "message": "Email sent" }));
        })
        .await;
    let reset = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/auth/reset-password/abc123")
                .json_body(json!({ "password": "hunter22" }));
            then.status(200)
                .json_body(json!({ "success": true, "message": "Password reset" }));
        })
        .await;

    let message = client
        .auth()
        .forgot_password(&ForgotPasswordForm {
            email: "ann@example.com".into(),
        })
        .await
        .unwrap();
    assert_eq!(message.as_deref(), Some("Email sent"));

    let message = client
        .auth()
        .reset_password(
            "abc123",
            &ResetPasswordForm {
                password: "hunter22".into(),
                confirm_password: "hunter22".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(message.as_deref(), Some("Password reset"));

    forgot.assert_async().await;
    reset.assert_async().await;
}
