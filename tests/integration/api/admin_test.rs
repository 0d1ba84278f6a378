//! Admin API tests
//!
//! User listing and deletion for admins, role changes for the seed admin

use axum::http::{header, StatusCode};
use bookshelf::shared::{Role, UserView};

use crate::common::*;

async fn users(app: &TestApp, admin: &TestUser) -> Vec<UserView> {
    let response = app
        .server
        .get("/users")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(response, StatusCode::OK);
    response.json()
}

async fn role_of(app: &TestApp, admin: &TestUser, id: i64) -> Role {
    users(app, admin)
        .await
        .into_iter()
        .find(|user| user.id == id)
        .map(|user| user.role)
        .expect("user should be listed")
}

#[tokio::test]
async fn test_list_users() {
    let app = TestApp::spawn().await;
    let admin = login_seed_admin(&app).await;
    let reader = create_test_user(&app, "listed_reader").await;

    let listed = users(&app, &admin).await;

    assert_eq!(listed.len(), 2);
    assert!(listed.iter().any(|user| user.id == reader.id && user.role == Role::User));
    assert!(listed.iter().any(|user| user.username == SEED_ADMIN && user.role == Role::Admin));
}

#[tokio::test]
async fn test_admin_routes_reject_readers() {
    let app = TestApp::spawn().await;
    let reader = create_unique_test_user(&app).await;

    let list = app
        .server
        .get("/users")
        .add_header(header::AUTHORIZATION, reader.bearer())
        .await;
    assert_status!(list, StatusCode::FORBIDDEN);

    let grant = app
        .server
        .post(&format!("/users/{}/grant-admin", reader.id))
        .add_header(header::AUTHORIZATION, reader.bearer())
        .await;
    assert_status!(grant, StatusCode::FORBIDDEN);

    let anonymous = app.server.get("/users").await;
    assert_status!(anonymous, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::spawn().await;
    let admin = login_seed_admin(&app).await;
    let reader = create_unique_test_user(&app).await;

    let response = app
        .server
        .delete(&format!("/users/{}", reader.id))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.text(), "User deleted successfully.");
    assert_eq!(users(&app, &admin).await.len(), 1);

    let again = app
        .server
        .delete(&format!("/users/{}", reader.id))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(again, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admins_cannot_be_deleted() {
    let app = TestApp::spawn().await;
    let admin = login_seed_admin(&app).await;

    let response = app
        .server
        .delete(&format!("/users/{}", admin.id))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Admin accounts cannot be deleted.");
}

#[tokio::test]
async fn test_grant_and_revoke_admin() {
    let app = TestApp::spawn().await;
    let admin = login_seed_admin(&app).await;
    let reader = create_unique_test_user(&app).await;

    let grant = app
        .server
        .post(&format!("/users/{}/grant-admin", reader.id))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(grant, StatusCode::OK);
    assert_eq!(grant.text(), format!("User with ID {} granted admin role.", reader.id));
    assert_eq!(role_of(&app, &admin, reader.id).await, Role::Admin);

    // A granted admin manages users but not roles
    let promoted_list = app
        .server
        .get("/users")
        .add_header(header::AUTHORIZATION, reader.bearer())
        .await;
    assert_status!(promoted_list, StatusCode::OK);
    let promoted_grant = app
        .server
        .post(&format!("/users/{}/revoke-admin", reader.id))
        .add_header(header::AUTHORIZATION, reader.bearer())
        .await;
    assert_status!(promoted_grant, StatusCode::FORBIDDEN);

    let revoke = app
        .server
        .post(&format!("/users/{}/revoke-admin", reader.id))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(revoke, StatusCode::OK);
    assert_eq!(revoke.text(), format!("User with ID {} revoked admin role.", reader.id));
    assert_eq!(role_of(&app, &admin, reader.id).await, Role::User);
}

#[tokio::test]
async fn test_seed_admin_cannot_revoke_itself() {
    let app = TestApp::spawn().await;
    let admin = login_seed_admin(&app).await;

    let response = app
        .server
        .post(&format!("/users/{}/revoke-admin", admin.id))
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let missing = app
        .server
        .post("/users/9999/grant-admin")
        .add_header(header::AUTHORIZATION, admin.bearer())
        .await;
    assert_status!(missing, StatusCode::NOT_FOUND);
}
