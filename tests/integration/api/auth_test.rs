//! Authentication API tests
//!
//! Tests for user registration, login, token checks and logout

use axum::http::{header, StatusCode};
use bookshelf::shared::UserView;
use serde_json::{json, Value};

use crate::common::*;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .server
        .post("/register")
        .json(&json!({
            "username": "newreader",
            "password": "password123",
            "email": "reader@example.com"
        }))
        .await;

    assert_status!(response, StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["username"], "newreader");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;
    create_test_user(&app, "duplicate").await;

    let response = app
        .server
        .post("/register")
        .json(&json!({ "username": "duplicate", "password": "password123" }))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Username already exists");
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::spawn().await;

    let short_password = app
        .server
        .post("/register")
        .json(&json!({ "username": "reader", "password": "short" }))
        .await;
    assert_status!(short_password, StatusCode::BAD_REQUEST);

    let bad_username = app
        .server
        .post("/register")
        .json(&json!({ "username": "1reader", "password": "password123" }))
        .await;
    assert_status!(bad_username, StatusCode::BAD_REQUEST);

    let bad_email = app
        .server
        .post("/register")
        .json(&json!({ "username": "reader", "password": "password123", "email": "nope" }))
        .await;
    assert_status!(bad_email, StatusCode::BAD_REQUEST);
    assert_eq!(bad_email.text(), "Invalid email format");
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    let user = create_test_user(&app, "loginuser").await;

    assert!(!user.token.is_empty());
    assert_eq!(user.username, "loginuser");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = TestApp::spawn().await;
    create_test_user(&app, "loginuser").await;

    let wrong_password = app
        .server
        .post("/login")
        .json(&json!({ "username": "loginuser", "password": "wrongpassword" }))
        .await;
    let unknown_user = app
        .server
        .post("/login")
        .json(&json!({ "username": "nobody", "password": TEST_PASSWORD }))
        .await;

    assert_status!(wrong_password, StatusCode::UNAUTHORIZED);
    assert_status!(unknown_user, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.text(), unknown_user.text());
}

#[tokio::test]
async fn test_current_user_with_token() {
    let app = TestApp::spawn().await;
    let user = create_unique_test_user(&app).await;

    let response = app
        .server
        .get("/current-user")
        .add_header(header::AUTHORIZATION, user.bearer())
        .await;

    assert_status!(response, StatusCode::OK);
    let view: UserView = response.json();
    assert_eq!(view.id, user.id);
    assert_eq!(view.username, user.username);
}

#[tokio::test]
async fn test_current_user_requires_token() {
    let app = TestApp::spawn().await;

    let missing = app.server.get("/current-user").await;
    assert_status!(missing, StatusCode::UNAUTHORIZED);

    let garbage = app
        .server
        .get("/current-user")
        .add_header(header::AUTHORIZATION, auth_header("not-a-jwt"))
        .await;
    assert_status!(garbage, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_check_auth_status() {
    let app = TestApp::spawn().await;
    let user = create_unique_test_user(&app).await;

    let anonymous = app.server.get("/checkAuthStatus").await;
    assert_status!(anonymous, StatusCode::OK);
    assert_eq!(anonymous.json::<bool>(), false);

    let logged_in = app
        .server
        .get("/checkAuthStatus")
        .add_header(header::AUTHORIZATION, user.bearer())
        .await;
    assert_eq!(logged_in.json::<bool>(), true);
}

#[tokio::test]
async fn test_logout() {
    let app = TestApp::spawn().await;

    let response = app.server.post("/logout").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.text(), "Logged out successfully.");
}

#[tokio::test]
async fn test_seed_admin_can_log_in() {
    let app = TestApp::spawn().await;

    let admin = login_seed_admin(&app).await;

    let response = app
        .server
        .get("/current-user")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    let view: UserView = response.json();
    assert!(view.role.is_admin());
}
