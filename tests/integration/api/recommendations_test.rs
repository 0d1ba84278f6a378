//! Recommendation proxy tests

use axum::http::{header, StatusCode};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;

#[tokio::test]
async fn test_recommendations_are_proxied() {
    let service = MockServer::start().await;
    let app = TestApp::spawn_with(|config| config.recommendation_url(service.uri())).await;
    let user = create_unique_test_user(&app).await;

    Mock::given(method("GET"))
        .and(path("/recommendations"))
        .and(query_param("user_id", user.id.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "recommendations": [1, 4, 9] })))
        .expect(1)
        .mount(&service)
        .await;

    let response = app
        .server
        .get("/recommendations")
        .add_header(header::AUTHORIZATION, user.bearer())
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "recommendations": [1, 4, 9] }));
}

#[tokio::test]
async fn test_recommendation_failures_are_hidden() {
    let service = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream exploded"))
        .mount(&service)
        .await;
    let app = TestApp::spawn_with(|config| config.recommendation_url(service.uri())).await;
    let user = create_unique_test_user(&app).await;

    let response = app
        .server
        .get("/recommendations")
        .add_header(header::AUTHORIZATION, user.bearer())
        .await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "error": "Error fetching recommendations" }));
}

#[tokio::test]
async fn test_recommendations_when_service_is_down() {
    let app = TestApp::spawn().await;
    let user = create_unique_test_user(&app).await;

    let response = app
        .server
        .get("/recommendations")
        .add_header(header::AUTHORIZATION, user.bearer())
        .await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_recommendations_require_login() {
    let app = TestApp::spawn().await;

    let response = app.server.get("/recommendations").await;

    assert_status!(response, StatusCode::UNAUTHORIZED);
}
